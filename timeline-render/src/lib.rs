//! Vẽ và xuất ảnh timeline sự kiện đời sống.
//!
//! [`render_svg`] biến [`timeline_core::TimelineLayout`] thành cảnh SVG để mọi
//! bề mặt hiển thị được. Với feature `raster` (mặc định), cảnh còn được
//! rasterize thành PNG kèm watermark.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod svg;

#[cfg(feature = "raster")]
pub mod raster;

pub use svg::{render_svg, watermark_svg, SceneStyle, Watermark};

#[cfg(feature = "raster")]
pub use raster::{export_png, rasterize, Frame};

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Kích thước ảnh không hợp lệ: {0}")]
    InvalidSize(String),

    #[error("Ảnh xuất quá lớn: {width}x{height} (tối đa {max}x{max})")]
    TooLarge { width: u32, height: u32, max: u32 },

    #[error("Lỗi SVG: {0}")]
    Svg(String),

    #[error("Không mã hóa được PNG: {0}")]
    Encode(String),
}

/// Mật độ điểm ảnh mặc định khi xuất.
pub const DEFAULT_EXPORT_SCALE: f32 = 2.0;

/// Tùy chọn cho một lần xuất ảnh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    pub scale: f32,
    #[serde(default)]
    pub watermark: Option<Watermark>,
    #[serde(default)]
    pub style: SceneStyle,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            scale: DEFAULT_EXPORT_SCALE,
            watermark: Some(Watermark::default()),
            style: SceneStyle::default(),
        }
    }
}

/// Tên file tải xuống cho ngày `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("life-timeline-{}.png", date.format("%Y-%m-%d"))
}
