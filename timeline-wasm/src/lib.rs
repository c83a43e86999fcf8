//! Bridge WASM <-> JavaScript trung lập framework.

use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use timeline_core::{
    current_year, layout, EventDraft, LifeEvent, TimelineConfig, TimelineError, TimelineLayout,
    YearRange,
};
use timeline_render::{render_svg, SceneStyle};
use wasm_bindgen::prelude::*;

/// Cấu hình từ JS, mọi trường đều có thể bỏ trống.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsTimelineConfig {
    #[serde(default)]
    start_year: Option<i32>,
    #[serde(default)]
    end_year: Option<i32>,
    #[serde(default)]
    year_spacing: Option<u32>,
    #[serde(default)]
    show_future_years: Option<bool>,
    #[serde(default)]
    highlight_current_year: Option<bool>,
}

impl JsTimelineConfig {
    /// Trường thiếu lấy từ cấu hình mặc định tính theo dữ liệu.
    fn resolve(self, base: TimelineConfig) -> TimelineConfig {
        TimelineConfig {
            start_year: self.start_year.unwrap_or(base.start_year),
            end_year: self.end_year.unwrap_or(base.end_year),
            year_spacing: self.year_spacing.unwrap_or(base.year_spacing),
            show_future_years: self.show_future_years.unwrap_or(base.show_future_years),
            highlight_current_year: self
                .highlight_current_year
                .unwrap_or(base.highlight_current_year),
        }
    }
}

fn build_layout(
    events: JsValue,
    config: Option<JsValue>,
    year: Option<i32>,
) -> Result<TimelineLayout, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let events: Vec<LifeEvent> = from_value(events)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được danh sách sự kiện: {err}")))?;
    let year = year.unwrap_or_else(current_year);
    let base = TimelineConfig::for_range(YearRange::of(&events, year), year);

    let cfg = match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let cfg: JsTimelineConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?;
            cfg.resolve(base)
        }
        _ => base,
    };
    cfg.validate()
        .map_err(|err| JsValue::from_str(&format_timeline_error(err)))?;

    Ok(layout(&events, &cfg, year))
}

/// Dàn trang timeline, trả về layout dạng object JS.
#[wasm_bindgen]
pub fn layout_timeline(
    events: JsValue,
    config: Option<JsValue>,
    current_year: Option<i32>,
) -> Result<JsValue, JsValue> {
    let layout = build_layout(events, config, current_year)?;
    to_value(&layout).map_err(|err| JsValue::from_str(&format!("Không serialize layout: {err}")))
}

/// Dàn trang và vẽ thành chuỗi SVG.
#[wasm_bindgen]
pub fn render_timeline_svg(
    events: JsValue,
    config: Option<JsValue>,
    current_year: Option<i32>,
) -> Result<String, JsValue> {
    let layout = build_layout(events, config, current_year)?;
    Ok(render_svg(&layout, &SceneStyle::default()))
}

/// Kiểm tra dữ liệu form, trả về sự kiện hoàn chỉnh (có id).
#[wasm_bindgen]
pub fn validate_event(draft: JsValue) -> Result<JsValue, JsValue> {
    let draft: EventDraft = from_value(draft)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được form: {err}")))?;
    let event = draft
        .validate()
        .map_err(|err| JsValue::from_str(&format_timeline_error(err)))?;
    to_value(&event).map_err(|err| JsValue::from_str(&format!("Không serialize sự kiện: {err}")))
}

/// Phân tích chuỗi JSON đã lưu (định dạng `lifeEvents`).
#[wasm_bindgen]
pub fn parse_saved_events(json: &str) -> Result<JsValue, JsValue> {
    let events: Vec<LifeEvent> = serde_json::from_str(json)
        .map_err(|err| JsValue::from_str(&format_timeline_error(TimelineError::Parse(err.to_string()))))?;
    to_value(&events).map_err(|err| JsValue::from_str(&format!("Không serialize sự kiện: {err}")))
}

fn format_timeline_error(err: TimelineError) -> String {
    format!("Timeline error: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_falls_back_per_field() {
        let base = TimelineConfig::reset(2020);
        let cfg = JsTimelineConfig {
            year_spacing: Some(120),
            show_future_years: Some(false),
            ..JsTimelineConfig::default()
        }
        .resolve(base.clone());
        assert_eq!(cfg.year_spacing, 120);
        assert!(!cfg.show_future_years);
        assert_eq!(cfg.start_year, base.start_year);
        assert_eq!(cfg.end_year, base.end_year);
        assert!(cfg.highlight_current_year);
    }
}
