//! Thuật toán dàn trang: chuyển (ngày sự kiện, cấu hình) thành tọa độ pixel.
//!
//! Bề mặt timeline cao 300px, trục ngang nằm giữa. Mỗi năm chiếm
//! `year_spacing` pixel; tháng của sự kiện dịch ticker theo tỉ lệ trong năm.
//! Ngày trong tháng không ảnh hưởng vị trí, nên các sự kiện cùng tháng
//! chồng lên nhau và đều được vẽ.

use serde::{Deserialize, Serialize};

use crate::model::{sort_by_date, LifeEvent, TimelineConfig};

pub const SURFACE_HEIGHT: f64 = 300.0;
pub const AXIS_Y: f64 = SURFACE_HEIGHT / 2.0;
/// Khoảng đệm bên phải sau mốc năm cuối.
pub const TRAILING_PADDING: f64 = 100.0;
pub const YEAR_MARKER_INSET: f64 = 20.0;
pub const EVENT_INSET: f64 = 32.0;
/// Nửa bề rộng nhãn năm; vạch năm nằm giữa nhãn.
pub const YEAR_LABEL_HALF_WIDTH: f64 = 12.0;
pub const YEAR_TICK_HEIGHT: f64 = 12.0;
pub const CURRENT_YEAR_TICK_HEIGHT: f64 = 20.0;
/// Chiều cao khối nhãn năm (lề trên + dòng chữ) bên dưới vạch.
pub const YEAR_LABEL_BLOCK_HEIGHT: f64 = 20.0;
pub const FUTURE_YEAR_OPACITY: f64 = 0.3;
pub const TICKER_WIDTH: f64 = 4.0;
pub const MIN_TICKER_HEIGHT: f64 = 30.0;
pub const MAX_TICKER_HEIGHT: f64 = 150.0;
/// Màu chủ đạo dùng khi sự kiện không có màu riêng.
pub const PRIMARY_COLOR: &str = "#0ea5e9";

/// Mốc năm trên trục.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct YearMarkerLayout {
    pub year: i32,
    /// Cạnh trái của khối mốc năm.
    pub x: f64,
    pub tick_top: f64,
    pub tick_height: f64,
    pub label_y: f64,
    pub opacity: f64,
    pub is_current: bool,
}

impl YearMarkerLayout {
    pub fn center_x(&self) -> f64 {
        self.x + YEAR_LABEL_HALF_WIDTH
    }
}

/// Vạch dọc đại diện cho một sự kiện.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TickerLayout {
    pub event_id: String,
    pub title: String,
    pub color: String,
    /// Cạnh trái của vạch.
    pub x: f64,
    pub top: f64,
    pub height: f64,
    /// Điểm neo của tiêu đề xoay -45 độ.
    pub label_x: f64,
    pub label_y: f64,
}

impl TickerLayout {
    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.x && x <= self.x + TICKER_WIDTH
    }
}

/// Kết quả dàn trang cho toàn bộ bề mặt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineLayout {
    pub width: f64,
    pub height: f64,
    pub axis_y: f64,
    pub years: Vec<YearMarkerLayout>,
    /// Theo thứ tự ngày tăng dần.
    pub tickers: Vec<TickerLayout>,
    /// Id các sự kiện nằm ngoài khoảng năm đang hiển thị.
    pub skipped: Vec<String>,
}

impl TimelineLayout {
    /// Thứ tự vẽ: theo ngày, riêng ticker đang được highlight lên trên cùng.
    pub fn draw_order(&self, highlighted: Option<&str>) -> Vec<&TickerLayout> {
        let (mut rest, top): (Vec<&TickerLayout>, Vec<&TickerLayout>) = self
            .tickers
            .iter()
            .partition(|ticker| Some(ticker.event_id.as_str()) != highlighted);
        rest.extend(top);
        rest
    }

    /// Id các ticker nằm dưới hoành độ `x`, theo thứ tự ngày.
    pub fn hit_test(&self, x: f64) -> Vec<&str> {
        self.tickers
            .iter()
            .filter(|ticker| ticker.contains_x(x))
            .map(|ticker| ticker.event_id.as_str())
            .collect()
    }

    pub fn ticker(&self, event_id: &str) -> Option<&TickerLayout> {
        self.tickers.iter().find(|ticker| ticker.event_id == event_id)
    }

    /// Khoảng cuộn tối đa khi khung nhìn rộng `viewport_width`.
    pub fn max_scroll(&self, viewport_width: f64) -> f64 {
        (self.width - viewport_width).max(0.0)
    }
}

/// Chiều cao ticker theo mức độ quan trọng.
pub fn ticker_height(significance: u8) -> f64 {
    (MIN_TICKER_HEIGHT + f64::from(significance)).clamp(MIN_TICKER_HEIGHT, MAX_TICKER_HEIGHT)
}

/// Hoành độ của mốc năm thứ `index`.
pub fn year_marker_x(index: usize, config: &TimelineConfig) -> f64 {
    index as f64 * f64::from(config.year_spacing) + YEAR_MARKER_INSET
}

/// Hoành độ ticker: vị trí năm cộng phần tháng tỉ lệ trong năm.
///
/// Phần tháng dùng `year_spacing + 1`, nên tháng Mười Hai của năm này nằm
/// sát nhưng không vượt quá điểm tương ứng của năm sau.
pub fn event_x(year_index: usize, month0: u32, config: &TimelineConfig) -> f64 {
    let spacing = f64::from(config.year_spacing);
    let month_offset = f64::from(month0) / 12.0 * (spacing + 1.0);
    year_index as f64 * spacing + EVENT_INSET + month_offset
}

/// Tổng bề rộng bề mặt.
pub fn surface_width(config: &TimelineConfig) -> f64 {
    config.visible_year_count() as f64 * f64::from(config.year_spacing) + TRAILING_PADDING
}

/// Đỉnh vạch năm: cả khối (vạch + nhãn) được kéo lên 1/4 chiều cao của nó.
pub fn year_tick_top(tick_height: f64) -> f64 {
    AXIS_Y - (tick_height + YEAR_LABEL_BLOCK_HEIGHT) / 4.0
}

/// Dàn trang toàn bộ timeline.
pub fn layout(events: &[LifeEvent], config: &TimelineConfig, current_year: i32) -> TimelineLayout {
    let years = config.years();
    if (years.len() as u64) < config.year_count() {
        tracing::warn!(
            start_year = config.start_year,
            end_year = config.end_year,
            shown = years.len(),
            "year range truncated"
        );
    }

    let markers = years
        .iter()
        .enumerate()
        .map(|(index, &year)| {
            let is_current = config.highlight_current_year && year == current_year;
            let tick_height = if is_current {
                CURRENT_YEAR_TICK_HEIGHT
            } else {
                YEAR_TICK_HEIGHT
            };
            let tick_top = year_tick_top(tick_height);
            YearMarkerLayout {
                year,
                x: year_marker_x(index, config),
                tick_top,
                tick_height,
                label_y: tick_top + tick_height + 14.0,
                opacity: if !config.show_future_years && year > current_year {
                    FUTURE_YEAR_OPACITY
                } else {
                    1.0
                },
                is_current,
            }
        })
        .collect();

    let mut sorted = events.to_vec();
    sort_by_date(&mut sorted);

    let mut tickers = Vec::with_capacity(sorted.len());
    let mut skipped = Vec::new();
    for event in sorted {
        let offset = i64::from(event.year()) - i64::from(config.start_year);
        if offset < 0 || offset as u64 >= years.len() as u64 {
            skipped.push(event.id);
            continue;
        }
        let year_index = offset as usize;
        let x = event_x(year_index, event.month0(), config);
        let height = ticker_height(event.significance);
        let top = AXIS_Y - height / 2.0;
        tickers.push(TickerLayout {
            color: event
                .color
                .clone()
                .unwrap_or_else(|| PRIMARY_COLOR.to_string()),
            event_id: event.id,
            title: event.title,
            x,
            top,
            height,
            label_x: x - 5.0,
            label_y: top - 10.0,
        });
    }

    if !skipped.is_empty() {
        tracing::debug!(count = skipped.len(), "events outside visible year range");
    }

    TimelineLayout {
        width: surface_width(config),
        height: SURFACE_HEIGHT,
        axis_y: AXIS_Y,
        years: markers,
        tickers,
        skipped,
    }
}

/// Kéo chuột để cuộn ngang: kéo sang phải thì nội dung lùi về trái.
pub fn drag_scroll(start_scroll: f64, start_x: f64, current_x: f64, max_scroll: f64) -> f64 {
    (start_scroll - (current_x - start_x)).clamp(0.0, max_scroll.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_height_is_clamped() {
        assert_eq!(ticker_height(1), 31.0);
        assert_eq!(ticker_height(100), 130.0);
        assert_eq!(ticker_height(0), 30.0);
        assert_eq!(ticker_height(255), 150.0);
    }

    #[test]
    fn drag_scroll_stays_in_bounds() {
        assert_eq!(drag_scroll(100.0, 50.0, 80.0, 500.0), 70.0);
        assert_eq!(drag_scroll(10.0, 0.0, 100.0, 500.0), 0.0);
        assert_eq!(drag_scroll(490.0, 100.0, 0.0, 500.0), 500.0);
    }
}
