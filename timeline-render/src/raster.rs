//! Xuất PNG: rasterize cảnh rồi đóng watermark lên ảnh kết quả.

use std::io::Cursor;

use timeline_core::TimelineLayout;

use crate::svg::{render_svg, watermark_svg};
use crate::{ExportOptions, RenderError, RenderResult};

/// Cạnh lớn nhất (pixel) cho phép khi xuất.
pub const MAX_DIM: u32 = 16_384;

/// Khung RGBA8 thô, alpha không nhân trước.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Kích thước pixel đầu ra của `layout` ở tỉ lệ `scale`.
pub fn output_size(layout: &TimelineLayout, scale: f32) -> RenderResult<(u32, u32)> {
    fn to_px(v: f64, scale: f32) -> RenderResult<u32> {
        let scaled = v * f64::from(scale);
        if !scaled.is_finite() || scaled <= 0.0 {
            return Err(RenderError::InvalidSize(format!(
                "surface edge {v} at scale {scale}"
            )));
        }
        Ok((scaled.ceil() as u32).max(1))
    }

    let w = to_px(layout.width, scale)?;
    let h = to_px(layout.height, scale)?;
    if w > MAX_DIM || h > MAX_DIM {
        return Err(RenderError::TooLarge {
            width: w,
            height: h,
            max: MAX_DIM,
        });
    }
    Ok((w, h))
}

/// Font hệ thống cùng bộ chọn font có dự phòng.
///
/// `sans-serif` của usvg mặc định là Arial; máy không có Arial sẽ được gán
/// sang một họ sans khác có sẵn để chữ không bị bỏ qua.
pub fn scene_options() -> usvg::Options<'static> {
    let mut opts = usvg::Options::default();
    let db = opts.fontdb_mut();
    db.load_system_fonts();
    if let Some(family) = fallback_sans_family(db) {
        tracing::debug!(%family, "sans-serif mapped to installed family");
        db.set_sans_serif_family(family);
    }
    opts.font_resolver = font_resolver();
    opts
}

const SANS_CANDIDATES: [&str; 5] = [
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "FreeSans",
    "Helvetica",
];

fn fallback_sans_family(db: &usvg::fontdb::Database) -> Option<String> {
    let query = usvg::fontdb::Query {
        families: &[usvg::fontdb::Family::SansSerif],
        weight: usvg::fontdb::Weight::NORMAL,
        stretch: usvg::fontdb::Stretch::Normal,
        style: usvg::fontdb::Style::Normal,
    };
    if db.query(&query).is_some() {
        return None;
    }

    let installed: Vec<&str> = db
        .faces()
        .flat_map(|face| face.families.iter().map(|(name, _)| name.as_str()))
        .collect();
    SANS_CANDIDATES
        .iter()
        .copied()
        .find(|name| installed.contains(name))
        .or_else(|| installed.first().copied())
        .map(str::to_string)
}

/// Thử lần lượt họ font được yêu cầu, rồi sans, serif, mono, cuối cùng là
/// font đầu tiên có trong database.
fn font_resolver() -> usvg::FontResolver<'static> {
    usvg::FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families: Vec<usvg::fontdb::Family<'_>> = font
                .families()
                .iter()
                .map(|family| match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(name) => usvg::fontdb::Family::Name(name),
                })
                .collect();
            families.extend([
                usvg::fontdb::Family::SansSerif,
                usvg::fontdb::Family::Serif,
                usvg::fontdb::Family::Monospace,
            ]);

            let style = match font.style() {
                usvg::FontStyle::Normal => usvg::fontdb::Style::Normal,
                usvg::FontStyle::Italic => usvg::fontdb::Style::Italic,
                usvg::FontStyle::Oblique => usvg::fontdb::Style::Oblique,
            };
            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style,
            };

            fontdb
                .query(&query)
                .or_else(|| fontdb.faces().next().map(|face| face.id))
        }),
        select_fallback: usvg::FontResolver::default_fallback_selector(),
    }
}

/// Rasterize timeline (kèm watermark nếu có) thành khung RGBA.
pub fn rasterize(layout: &TimelineLayout, opts: &ExportOptions) -> RenderResult<Frame> {
    let (width, height) = output_size(layout, opts.scale)?;

    let usvg_opts = scene_options();

    let scene = render_svg(layout, &opts.style);
    let tree = usvg::Tree::from_str(&scene, &usvg_opts)
        .map_err(|err| RenderError::Svg(err.to_string()))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| RenderError::InvalidSize(format!("không cấp phát được {width}x{height}")))?;

    let sx = width as f32 / tree.size().width();
    let sy = height as f32 / tree.size().height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    // Watermark tính theo pixel ảnh cuối, không nhân `scale`.
    if let Some(mark) = &opts.watermark {
        let overlay = watermark_svg(width, height, mark);
        let overlay_tree = usvg::Tree::from_str(&overlay, &usvg_opts)
            .map_err(|err| RenderError::Svg(err.to_string()))?;
        resvg::render(
            &overlay_tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );
    }

    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    tracing::debug!(width, height, tickers = layout.tickers.len(), "timeline rasterized");
    Ok(Frame {
        width,
        height,
        data,
    })
}

/// Rasterize rồi mã hóa thành PNG.
pub fn export_png(layout: &TimelineLayout, opts: &ExportOptions) -> RenderResult<Vec<u8>> {
    let frame = rasterize(layout, opts)?;
    encode_png(frame)
}

pub fn encode_png(frame: Frame) -> RenderResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(frame.width, frame.height, frame.data)
        .ok_or_else(|| RenderError::Encode("kích thước buffer không khớp".to_string()))?;
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|err| RenderError::Encode(err.to_string()))?;
    Ok(buf)
}
