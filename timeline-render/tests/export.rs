use chrono::NaiveDate;
use timeline_core::{layout, LifeEvent, TimelineConfig, TimelineLayout};
use timeline_render::raster::{output_size, MAX_DIM};
use timeline_render::{
    export_file_name, export_png, rasterize, render_svg, watermark_svg, ExportOptions,
    RenderError, SceneStyle, Watermark,
};

fn sample_layout() -> TimelineLayout {
    let config = TimelineConfig {
        start_year: 2018,
        end_year: 2021,
        year_spacing: 50,
        show_future_years: false,
        highlight_current_year: true,
    };
    let events = vec![
        LifeEvent {
            id: "a".into(),
            title: "Rock & <Roll>".into(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2019, 5, 1).expect("ngày hợp lệ"),
            significance: 60,
            color: Some("#FF4500".into()),
        },
        LifeEvent {
            id: "b".into(),
            title: "Second".into(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2019, 5, 20).expect("ngày hợp lệ"),
            significance: 20,
            color: None,
        },
    ];
    layout(&events, &config, 2020)
}

fn pixel(frame: &timeline_render::Frame, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

#[test]
fn svg_contains_every_year_and_ticker() {
    let layout = sample_layout();
    let svg = render_svg(&layout, &SceneStyle::default());

    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    for year in 2018..=2021 {
        assert!(svg.contains(&format!(">{year}</text>")), "thiếu năm {year}");
    }
    assert_eq!(svg.matches(r#"class="ticker""#).count(), 2);
    assert!(svg.contains("Rock &amp; &lt;Roll&gt;"));
    assert!(svg.contains(r#"opacity="0.3""#));
    assert!(svg.contains(r##"fill="#0ea5e9""##));
}

#[test]
fn highlighted_ticker_is_written_last() {
    let layout = sample_layout();
    let style = SceneStyle {
        highlighted: Some("a".into()),
        ..SceneStyle::default()
    };
    let svg = render_svg(&layout, &style);
    let a = svg.find(r#"data-event-id="a""#).expect("có ticker a");
    let b = svg.find(r#"data-event-id="b""#).expect("có ticker b");
    assert!(b < a);
}

#[test]
fn watermark_is_anchored_bottom_right() {
    let svg = watermark_svg(1000, 600, &Watermark::default());
    assert!(svg.contains(r#"x="970""#));
    assert!(svg.contains(r#"y="570""#));
    assert!(svg.contains(r#"text-anchor="end""#));
    assert!(svg.contains("Made by Life Timeline"));
}

#[test]
fn raster_is_scaled_and_draws_background_and_axis() {
    let layout = sample_layout();
    let frame = rasterize(&layout, &ExportOptions::default()).expect("rasterize");

    assert_eq!(frame.width, ((4.0 * 50.0 + 100.0) * 2.0) as u32);
    assert_eq!(frame.height, 600);
    assert_eq!(frame.data.len(), (frame.width * frame.height * 4) as usize);

    assert_eq!(pixel(&frame, 2, 2), [0x01, 0x06, 0x14, 0xff]);
    assert_eq!(pixel(&frame, 4, 299), [0x33, 0x41, 0x55, 0xff]);
}

#[test]
fn png_bytes_decode_back_to_scaled_size() {
    let layout = sample_layout();
    let opts = ExportOptions {
        scale: 1.0,
        watermark: None,
        ..ExportOptions::default()
    };
    let bytes = export_png(&layout, &opts).expect("export");
    let decoded = image::load_from_memory(&bytes).expect("PNG hợp lệ");
    assert_eq!(decoded.width(), 300);
    assert_eq!(decoded.height(), 300);
}

#[test]
fn oversized_exports_are_rejected() {
    let config = TimelineConfig {
        start_year: 1000,
        end_year: 2000,
        year_spacing: 200,
        show_future_years: true,
        highlight_current_year: true,
    };
    let wide = layout(&[], &config, 2000);
    match output_size(&wide, 2.0) {
        Err(RenderError::TooLarge { max, .. }) => assert_eq!(max, MAX_DIM),
        other => panic!("kỳ vọng TooLarge, nhận {other:?}"),
    }
    assert!(matches!(
        output_size(&wide, 0.0),
        Err(RenderError::InvalidSize(_))
    ));
}

#[test]
fn file_name_uses_iso_date() {
    let date = NaiveDate::from_ymd_opt(2026, 10, 19).expect("ngày hợp lệ");
    assert_eq!(export_file_name(date), "life-timeline-2026-10-19.png");
}

fn system_has_fonts() -> bool {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    db.len() > 0
}

#[test]
fn watermark_reaches_the_raster_in_the_bottom_right_corner() {
    if !system_has_fonts() {
        eprintln!("bỏ qua: máy không có font hệ thống");
        return;
    }

    let layout = sample_layout();
    let plain = rasterize(
        &layout,
        &ExportOptions {
            watermark: None,
            ..ExportOptions::default()
        },
    )
    .expect("rasterize không watermark");
    let marked = rasterize(&layout, &ExportOptions::default()).expect("rasterize có watermark");

    let (w, h) = (marked.width, marked.height);
    let mut changed = 0usize;
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (u32::MAX, 0, u32::MAX, 0);
    for y in 0..h {
        for x in 0..w {
            if pixel(&plain, x, y) != pixel(&marked, x, y) {
                changed += 1;
                min_x = min_x.min(x);
                max_x = max_x.max(x);
                min_y = min_y.min(y);
                max_y = max_y.max(y);
            }
        }
    }

    assert!(changed > 0, "watermark không xuất hiện trong ảnh");
    // Chữ canh phải-dưới cách mép 30px; cho phép viền stroke và khử răng cưa.
    assert!(max_x <= w - 30 + 3, "max_x={max_x}");
    assert!(max_y <= h - 30 + 3, "max_y={max_y}");
    assert!(min_x >= w - 30 - 320, "min_x={min_x}");
    assert!(min_y >= h - 30 - 40, "min_y={min_y}");
}
