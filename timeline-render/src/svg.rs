//! Cảnh SVG dựng từ [`TimelineLayout`] đã tính.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use timeline_core::layout::{TimelineLayout, TICKER_WIDTH};

/// Màu và font dùng khi vẽ bề mặt timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SceneStyle {
    pub background: String,
    pub axis_color: String,
    pub marker_color: String,
    pub label_color: String,
    pub primary_color: String,
    pub font_family: String,
    /// Sự kiện được vẽ trên cùng, đậm hoàn toàn (khi hover).
    #[serde(default)]
    pub highlighted: Option<String>,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            background: "#010614".to_string(),
            axis_color: "#334155".to_string(),
            marker_color: "#64748b".to_string(),
            label_color: "#94a3b8".to_string(),
            primary_color: timeline_core::PRIMARY_COLOR.to_string(),
            font_family: "sans-serif".to_string(),
            highlighted: None,
        }
    }
}

/// Dòng chữ đóng ở góc phải-dưới của ảnh xuất.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Watermark {
    pub text: String,
    pub font_size: f32,
    pub font_family: String,
    pub fill: String,
    pub stroke: String,
    pub stroke_opacity: f32,
    pub stroke_width: f32,
    /// Khoảng cách tới mép phải và mép dưới, tính theo pixel ảnh cuối.
    pub padding: f32,
}

impl Default for Watermark {
    fn default() -> Self {
        Self {
            text: "Made by Life Timeline".to_string(),
            font_size: 20.0,
            font_family: "sans-serif".to_string(),
            fill: "#1e293b".to_string(),
            stroke: "#000000".to_string(),
            stroke_opacity: 0.1,
            stroke_width: 3.0,
            padding: 30.0,
        }
    }
}

const TICKER_OPACITY: f64 = 0.8;
const YEAR_LABEL_SIZE: f64 = 12.0;
const TICKER_LABEL_SIZE: f64 = 10.0;

/// Vẽ bề mặt timeline thành tài liệu SVG độc lập.
///
/// Ticker theo thứ tự ngày; ticker trùng vị trí đều được vẽ, ticker đang
/// highlight (nếu có) vẽ sau cùng với độ đậm tối đa.
pub fn render_svg(layout: &TimelineLayout, style: &SceneStyle) -> String {
    let mut out = String::with_capacity(512 + layout.tickers.len() * 256);
    let (w, h) = (layout.width, layout.height);

    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{}">"#,
        escape(&style.font_family)
    );
    let _ = writeln!(
        out,
        r#"  <rect x="0" y="0" width="{w}" height="{h}" fill="{}"/>"#,
        escape(&style.background)
    );
    let _ = writeln!(
        out,
        r#"  <rect class="axis" x="0" y="{}" width="{w}" height="2" fill="{}"/>"#,
        layout.axis_y - 1.0,
        escape(&style.axis_color)
    );

    for marker in &layout.years {
        let (tick_color, label_color) = if marker.is_current {
            (style.primary_color.as_str(), style.primary_color.as_str())
        } else {
            (style.marker_color.as_str(), style.label_color.as_str())
        };
        let cx = marker.center_x();
        let _ = writeln!(
            out,
            r#"  <g class="year" opacity="{}"><rect x="{}" y="{}" width="1" height="{}" fill="{}"/><text x="{cx}" y="{}" text-anchor="middle" font-size="{YEAR_LABEL_SIZE}" font-weight="500" fill="{}">{}</text></g>"#,
            marker.opacity,
            cx - 0.5,
            marker.tick_top,
            marker.tick_height,
            escape(tick_color),
            marker.label_y,
            escape(label_color),
            marker.year
        );
    }

    let highlighted = style.highlighted.as_deref();
    for ticker in layout.draw_order(highlighted) {
        let opacity = if highlighted == Some(ticker.event_id.as_str()) {
            1.0
        } else {
            TICKER_OPACITY
        };
        let color = escape(&ticker.color);
        let _ = writeln!(
            out,
            r#"  <g class="ticker" data-event-id="{}"><rect x="{}" y="{}" width="{TICKER_WIDTH}" height="{}" fill="{color}" opacity="{opacity}"/><text transform="translate({} {}) rotate(-45)" dominant-baseline="hanging" font-size="{TICKER_LABEL_SIZE}" fill="{color}">{}</text></g>"#,
            escape(&ticker.event_id),
            ticker.x,
            ticker.top,
            ticker.height,
            ticker.label_x,
            ticker.label_y,
            escape(&ticker.title)
        );
    }

    out.push_str("</svg>\n");
    out
}

/// Lớp phủ trong suốt `width` x `height` chỉ chứa watermark.
pub fn watermark_svg(width: u32, height: u32, mark: &Watermark) -> String {
    let x = width as f32 - mark.padding;
    let y = height as f32 - mark.padding;
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}"><text x="{x}" y="{y}" text-anchor="end" dominant-baseline="text-after-edge" font-family="{}" font-size="{}" fill="{}" stroke="{}" stroke-opacity="{}" stroke-width="{}" paint-order="stroke">{}</text></svg>"#,
        escape(&mark.font_family),
        mark.font_size,
        escape(&mark.fill),
        escape(&mark.stroke),
        mark.stroke_opacity,
        mark.stroke_width,
        escape(&mark.text)
    )
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape;

    #[test]
    fn escape_handles_markup() {
        assert_eq!(escape(r#"Tom & "Jerry" <3"#), "Tom &amp; &quot;Jerry&quot; &lt;3");
    }
}
