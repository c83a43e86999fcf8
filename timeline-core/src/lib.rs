//! Logic lõi của timeline sự kiện đời sống: dữ liệu, dàn trang và lưu trữ.

pub mod layout;
pub mod model;
pub mod palette;
pub mod storage;
pub mod store;

pub use layout::{
    drag_scroll, layout, ticker_height, TickerLayout, TimelineLayout, YearMarkerLayout,
    PRIMARY_COLOR,
};
pub use model::{
    is_hex_color, sample_events, ConfigPatch, EventDraft, LifeEvent, TimelineConfig, YearRange,
    DEFAULT_EVENT_COLOR, MAX_YEAR_SPAN,
};
pub use palette::{PresetColor, PRESET_COLORS};
pub use storage::{KeyValueStore, MemoryStore, CONFIG_KEY, EVENTS_KEY};
pub use store::{SaveOutcome, TimelineStore};

/// Lỗi chung của timeline.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error("Dữ liệu không hợp lệ: {0}")]
    Invalid(String),
    #[error("Không tìm thấy sự kiện: {0}")]
    NotFound(String),
    #[error("Không đọc được dữ liệu: {0}")]
    Parse(String),
    #[error("Lỗi lưu trữ: {0}")]
    Storage(String),
}

/// Năm hiện tại theo giờ địa phương.
pub fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Local::now().year()
}

/// Ngày hôm nay theo giờ địa phương.
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
