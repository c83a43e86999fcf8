#![cfg(target_arch = "wasm32")]

//! Export PNG trong trình duyệt: vẽ cảnh SVG lên canvas rồi đóng watermark.

use timeline_core::TimelineLayout;
use timeline_render::{render_svg, SceneStyle, Watermark, DEFAULT_EXPORT_SCALE};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement, HtmlImageElement};
use yew::Callback;

/// Bắt đầu export; kết quả trả về qua `on_done` khi ảnh đã được tải xuống.
pub fn export_png(
    layout: &TimelineLayout,
    file_name: String,
    on_done: Callback<Result<(), String>>,
) -> Result<(), JsValue> {
    let svg = render_svg(layout, &SceneStyle::default());
    let url = format!(
        "data:image/svg+xml;charset=utf-8,{}",
        String::from(js_sys::encode_uri_component(&svg))
    );

    let scale = f64::from(DEFAULT_EXPORT_SCALE);
    let width = (layout.width * scale).ceil() as u32;
    let height = (layout.height * scale).ceil() as u32;

    let image = HtmlImageElement::new()?;

    let onload = {
        let image = image.clone();
        let on_done = on_done.clone();
        Closure::once_into_js(move || {
            let result = draw_and_download(&image, width, height, &file_name)
                .map_err(|err| format!("{err:?}"));
            on_done.emit(result);
        })
    };
    let onerror = Closure::once_into_js(move || {
        on_done.emit(Err("Không tải được ảnh SVG của timeline".to_string()));
    });

    image.set_onload(Some(onload.unchecked_ref()));
    image.set_onerror(Some(onerror.unchecked_ref()));
    image.set_src(&url);
    Ok(())
}

fn draw_and_download(
    image: &HtmlImageElement,
    width: u32,
    height: u32,
    file_name: &str,
) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("Không truy cập được document"))?;

    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_width(width);
    canvas.set_height(height);

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("Canvas context not available"))?
        .dyn_into()?;

    ctx.draw_image_with_html_image_element_and_dw_and_dh(
        image,
        0.0,
        0.0,
        f64::from(width),
        f64::from(height),
    )?;
    stamp_watermark(&ctx, width, height, &Watermark::default())?;

    let href = canvas.to_data_url_with_type("image/png")?;
    let link: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    link.set_download(file_name);
    link.set_href(&href);
    link.click();
    Ok(())
}

/// Vẽ viền trước rồi tô chữ, canh phải-dưới theo pixel của ảnh cuối.
fn stamp_watermark(
    ctx: &CanvasRenderingContext2d,
    width: u32,
    height: u32,
    mark: &Watermark,
) -> Result<(), JsValue> {
    let x = f64::from(width) - f64::from(mark.padding);
    let y = f64::from(height) - f64::from(mark.padding);

    ctx.set_font(&format!("{}px {}", mark.font_size, mark.font_family));
    ctx.set_text_align("right");
    ctx.set_text_baseline("bottom");
    ctx.set_line_width(f64::from(mark.stroke_width));

    ctx.set_global_alpha(f64::from(mark.stroke_opacity));
    ctx.set_stroke_style_str(&mark.stroke);
    ctx.stroke_text(&mark.text, x, y)?;

    ctx.set_global_alpha(1.0);
    ctx.set_fill_style_str(&mark.fill);
    ctx.fill_text(&mark.text, x, y)
}
