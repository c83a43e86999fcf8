#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-life-timeline]";

/// Default CSS for the widget along with easy-to-override design tokens.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --lt-font-family: 'Inter', system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
  --lt-bg: #020817;
  --lt-surface: #010614;
  --lt-card: #0b1220;
  --lt-border: rgba(148, 163, 184, 0.2);
  --lt-text: #e2e8f0;
  --lt-muted: #94a3b8;
  --lt-primary: #0ea5e9;
  --lt-primary-text: #f8fafc;
  --lt-destructive: #dc2626;
  --lt-line: #334155;
  --lt-marker: #64748b;
  --lt-radius: 10px;
}

.lt-root {
  font-family: var(--lt-font-family);
  color: var(--lt-text);
  background: var(--lt-bg);
  display: flex;
  flex-direction: column;
  min-height: 100%;
  padding: 0 24px;
}

.lt-controls {
  position: sticky;
  top: 0;
  z-index: 10;
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 16px 0;
  backdrop-filter: blur(4px);
}

.lt-controls-group {
  display: flex;
  align-items: center;
  gap: 8px;
  position: relative;
}

.lt-button {
  border: 1px solid transparent;
  border-radius: 8px;
  background: var(--lt-primary);
  color: var(--lt-primary-text);
  font: inherit;
  font-size: 13px;
  padding: 6px 12px;
  cursor: pointer;
  transition: opacity 0.2s ease;
}

.lt-button:hover { opacity: 0.9; }
.lt-button.is-outline { background: transparent; color: var(--lt-text); border-color: var(--lt-border); }
.lt-button.is-destructive { background: var(--lt-destructive); }

.lt-settings {
  position: absolute;
  top: calc(100% + 8px);
  right: 0;
  width: 288px;
  padding: 16px;
  border-radius: var(--lt-radius);
  border: 1px solid var(--lt-border);
  background: var(--lt-card);
  display: grid;
  gap: 12px;
  box-shadow: 0 16px 32px rgba(0, 0, 0, 0.4);
}

.lt-settings h4 { margin: 0; font-size: 14px; font-weight: 500; }
.lt-settings-grid { display: grid; grid-template-columns: 1fr 1fr; gap: 12px; }

.lt-field {
  display: flex;
  flex-direction: column;
  gap: 6px;
  font-size: 12px;
}

.lt-field input[type="text"],
.lt-field input[type="number"],
.lt-field textarea,
.lt-select,
.lt-date-selector select {
  background: var(--lt-bg);
  color: var(--lt-text);
  border: 1px solid var(--lt-border);
  border-radius: 6px;
  padding: 6px 8px;
  font: inherit;
}

.lt-field textarea { resize: none; min-height: 72px; }
.lt-field small { color: var(--lt-muted); }

.lt-switch {
  display: flex;
  align-items: center;
  justify-content: space-between;
  font-size: 12px;
  cursor: pointer;
}

.lt-scroll {
  overflow-x: auto;
  overscroll-behavior-x: contain;
  touch-action: pan-x;
  cursor: grab;
  user-select: none;
}

.lt-scroll.is-dragging { cursor: grabbing; }

.lt-surface {
  position: relative;
  background: var(--lt-surface);
  border: 1px solid var(--lt-border);
  min-width: 100%;
}

.lt-axis {
  position: absolute;
  left: 0;
  right: 0;
  height: 2px;
  background: var(--lt-line);
}

.lt-year {
  position: absolute;
  width: 24px;
  display: flex;
  flex-direction: column;
  align-items: center;
  transition: opacity 0.5s ease;
}

.lt-year-tick { width: 1px; background: var(--lt-marker); }
.lt-year.is-current .lt-year-tick { background: var(--lt-primary); animation: lt-pulse 2s ease-in-out infinite; }
.lt-year-label { margin-top: 4px; font-size: 12px; font-weight: 500; color: var(--lt-muted); }
.lt-year.is-current .lt-year-label { color: var(--lt-primary); }

.lt-ticker {
  position: absolute;
  width: 4px;
  cursor: pointer;
  opacity: 0.8;
  animation: lt-fade-in 0.4s ease-out;
}

.lt-ticker.is-highlighted { opacity: 1; z-index: 5; }

.lt-ticker-title {
  position: absolute;
  top: -10px;
  left: -5px;
  width: 100px;
  transform: rotate(-45deg);
  transform-origin: left top;
  font-size: 10px;
  line-height: 1.1;
  word-break: break-word;
  white-space: pre-wrap;
  pointer-events: none;
}

.lt-context-menu {
  position: fixed;
  z-index: 40;
  width: 192px;
  padding: 4px;
  border-radius: 8px;
  border: 1px solid var(--lt-border);
  background: var(--lt-card);
  display: flex;
  flex-direction: column;
}

.lt-context-menu button {
  background: transparent;
  border: none;
  color: var(--lt-text);
  text-align: left;
  padding: 6px 8px;
  border-radius: 4px;
  font: inherit;
  font-size: 13px;
  cursor: pointer;
}

.lt-context-menu button:hover { background: rgba(148, 163, 184, 0.12); }
.lt-context-menu button.is-destructive { color: var(--lt-destructive); }

.lt-tip { font-size: 13px; opacity: 0.5; font-style: italic; margin-top: 4px; }

.lt-events { margin-top: 32px; padding-bottom: 32px; }
.lt-events h3 { font-size: 18px; font-weight: 500; margin: 0 0 12px; }

.lt-event-grid {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(260px, 1fr));
  gap: 16px;
}

.lt-event-card {
  background: var(--lt-card);
  padding: 16px;
  border-radius: var(--lt-radius);
  border: 1px solid var(--lt-border);
  transition: box-shadow 0.3s ease;
}

.lt-event-card.is-highlighted { box-shadow: 0 0 0 2px var(--lt-primary); }
.lt-event-bar { height: 4px; border-radius: 999px; margin-bottom: 12px; }
.lt-event-card h4 { margin: 0; font-size: 14px; font-weight: 500; }
.lt-event-card p { margin: 6px 0 0; font-size: 12px; color: var(--lt-muted); }
.lt-event-card p.lt-event-description { color: var(--lt-text); opacity: 0.8; }

.lt-overlay {
  position: fixed;
  inset: 0;
  z-index: 50;
  background: rgba(0, 0, 0, 0.6);
  display: flex;
  align-items: center;
  justify-content: center;
}

.lt-dialog {
  width: min(500px, calc(100% - 32px));
  max-height: calc(100% - 32px);
  overflow-y: auto;
  background: var(--lt-card);
  border: 1px solid var(--lt-border);
  border-radius: var(--lt-radius);
}

.lt-dialog.is-compact { padding-bottom: 16px; }
.lt-dialog-accent { height: 6px; width: 100%; }
.lt-dialog-header { padding: 24px 24px 0; }
.lt-dialog-header h2 { margin: 0; font-size: 20px; font-weight: 500; }
.lt-dialog-header p { margin: 6px 0 0; font-size: 13px; color: var(--lt-muted); }
.lt-form { display: grid; gap: 16px; padding: 16px 24px; }
.lt-form-error { color: var(--lt-destructive); font-size: 13px; margin: 0; }
.lt-color-row { display: flex; gap: 8px; align-items: center; }
.lt-color-row input[type="color"] { width: 48px; height: 34px; padding: 2px; cursor: pointer; }
.lt-color-row input[type="text"] { flex: 1; }
.lt-date-selector { display: flex; gap: 12px; }
.lt-date-selector label { flex: 1; display: flex; align-items: center; gap: 6px; }
.lt-date-selector label span { opacity: 0.5; }
.lt-date-selector select { flex: 1; }
.lt-dialog-footer { display: flex; justify-content: flex-end; gap: 8px; padding: 8px 24px 0; }

.lt-toasts {
  position: fixed;
  right: 16px;
  bottom: 16px;
  z-index: 60;
  display: flex;
  flex-direction: column;
  gap: 8px;
  width: 340px;
}

.lt-toast {
  background: var(--lt-card);
  border: 1px solid var(--lt-border);
  border-radius: var(--lt-radius);
  padding: 12px 16px;
  font-size: 13px;
  cursor: pointer;
}

.lt-toast.is-destructive { background: var(--lt-destructive); border-color: transparent; }
.lt-toast strong { display: block; margin-bottom: 2px; }

@keyframes lt-pulse {
  0%, 100% { opacity: 1; }
  50% { opacity: 0.6; }
}

@keyframes lt-fade-in {
  from { opacity: 0; }
  to { opacity: 0.8; }
}

@media (max-width: 720px) {
  .lt-controls { flex-direction: column; align-items: stretch; gap: 8px; }
  .lt-date-selector { flex-direction: column; }
}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document không có thẻ <head>"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-life-timeline", "v1")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.clone().dyn_into::<Node>()?)?;

    Ok(())
}
