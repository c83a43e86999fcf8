use chrono::NaiveDate;
use timeline_core::{layout, LifeEvent, TimelineConfig, PRIMARY_COLOR};

fn event(id: &str, (y, m, d): (i32, u32, u32), significance: u8) -> LifeEvent {
    LifeEvent {
        id: id.to_string(),
        title: format!("Event {id}"),
        description: String::new(),
        date: NaiveDate::from_ymd_opt(y, m, d).expect("Ngày mẫu không hợp lệ"),
        significance,
        color: None,
    }
}

fn config(start_year: i32, end_year: i32, year_spacing: u32) -> TimelineConfig {
    TimelineConfig {
        start_year,
        end_year,
        year_spacing,
        show_future_years: true,
        highlight_current_year: true,
    }
}

#[test]
fn width_covers_every_year_plus_padding() {
    let result = layout(&[], &config(2000, 2009, 50), 2005);
    assert_eq!(result.years.len(), 10);
    assert_eq!(result.width, 10.0 * 50.0 + 100.0);
    assert_eq!(result.height, 300.0);
    assert_eq!(result.axis_y, 150.0);
}

#[test]
fn year_markers_are_spaced_from_inset() {
    let result = layout(&[], &config(2000, 2002, 80), 2001);
    let xs: Vec<f64> = result.years.iter().map(|m| m.x).collect();
    assert_eq!(xs, vec![20.0, 100.0, 180.0]);
    assert!(result.years[1].is_current);
    assert!(!result.years[0].is_current);
    assert!(result.years[1].tick_height > result.years[0].tick_height);
}

#[test]
fn current_year_highlight_can_be_disabled() {
    let mut cfg = config(2000, 2002, 50);
    cfg.highlight_current_year = false;
    let result = layout(&[], &cfg, 2001);
    assert!(result.years.iter().all(|m| !m.is_current));
}

#[test]
fn future_years_fade_when_hidden() {
    let mut cfg = config(2020, 2030, 50);
    cfg.show_future_years = false;
    let result = layout(&[], &cfg, 2025);
    for marker in &result.years {
        let expected = if marker.year > 2025 { 0.3 } else { 1.0 };
        assert_eq!(marker.opacity, expected, "year {}", marker.year);
    }
}

#[test]
fn month_offsets_are_proportional() {
    let cfg = config(2000, 2005, 50);
    let events = vec![
        event("jan", (2002, 1, 20), 50),
        event("jul", (2002, 7, 1), 50),
        event("dec", (2002, 12, 31), 50),
    ];
    let result = layout(&events, &cfg, 2003);

    let jan = result.ticker("jan").expect("thiếu ticker jan");
    let jul = result.ticker("jul").expect("thiếu ticker jul");
    let dec = result.ticker("dec").expect("thiếu ticker dec");

    assert_eq!(jan.x, 2.0 * 50.0 + 32.0);
    assert_eq!(jul.x, 2.0 * 50.0 + 32.0 + 6.0 / 12.0 * 51.0);
    assert_eq!(dec.x, 2.0 * 50.0 + 32.0 + 11.0 / 12.0 * 51.0);
    assert!(dec.x < jan.x + 51.0);
}

#[test]
fn same_month_events_overlap_and_keep_date_order() {
    let cfg = config(2010, 2012, 50);
    let events = vec![
        event("late", (2011, 3, 28), 40),
        event("early", (2011, 3, 2), 90),
    ];
    let result = layout(&events, &cfg, 2012);

    let ids: Vec<&str> = result.tickers.iter().map(|t| t.event_id.as_str()).collect();
    assert_eq!(ids, vec!["early", "late"]);
    assert_eq!(result.tickers[0].x, result.tickers[1].x);

    let hits = result.hit_test(result.tickers[0].x + 1.0);
    assert_eq!(hits, vec!["early", "late"]);
}

#[test]
fn highlighted_ticker_is_drawn_last() {
    let cfg = config(2010, 2012, 50);
    let events = vec![
        event("a", (2010, 1, 1), 10),
        event("b", (2011, 1, 1), 10),
        event("c", (2012, 1, 1), 10),
    ];
    let result = layout(&events, &cfg, 2012);

    let order: Vec<&str> = result
        .draw_order(Some("a"))
        .into_iter()
        .map(|t| t.event_id.as_str())
        .collect();
    assert_eq!(order, vec!["b", "c", "a"]);

    let plain: Vec<&str> = result
        .draw_order(None)
        .into_iter()
        .map(|t| t.event_id.as_str())
        .collect();
    assert_eq!(plain, vec!["a", "b", "c"]);
}

#[test]
fn out_of_range_events_are_skipped() {
    let cfg = config(2010, 2012, 50);
    let events = vec![
        event("before", (2009, 12, 31), 10),
        event("inside", (2011, 5, 5), 10),
        event("after", (2013, 1, 1), 10),
    ];
    let result = layout(&events, &cfg, 2012);
    assert_eq!(result.tickers.len(), 1);
    assert_eq!(result.skipped, vec!["before".to_string(), "after".to_string()]);
}

#[test]
fn tickers_are_centered_on_axis_with_default_color() {
    let cfg = config(2010, 2010, 50);
    let mut colored = event("colored", (2010, 1, 1), 100);
    colored.color = Some("#FF4500".to_string());
    let events = vec![event("plain", (2010, 1, 1), 20), colored];
    let result = layout(&events, &cfg, 2010);

    let plain = result.ticker("plain").expect("thiếu ticker");
    assert_eq!(plain.height, 50.0);
    assert_eq!(plain.top + plain.height / 2.0, 150.0);
    assert_eq!(plain.color, PRIMARY_COLOR);
    assert_eq!((plain.label_x, plain.label_y), (plain.x - 5.0, plain.top - 10.0));

    let colored = result.ticker("colored").expect("thiếu ticker");
    assert_eq!(colored.height, 130.0);
    assert_eq!(colored.color, "#FF4500");
}

#[test]
fn inverted_range_renders_no_years() {
    let result = layout(&[event("x", (2010, 1, 1), 10)], &config(2012, 2010, 50), 2011);
    assert!(result.years.is_empty());
    assert!(result.tickers.is_empty());
    assert_eq!(result.width, 100.0);
}

#[test]
fn current_year_marker_sits_higher_than_plain_ones() {
    let result = layout(&[], &config(2000, 2002, 50), 2001);
    let plain = &result.years[0];
    let current = &result.years[1];
    assert_eq!(plain.tick_top, 142.0);
    assert_eq!(current.tick_top, 140.0);
    assert_eq!(current.tick_height, 20.0);
    assert_eq!(plain.label_y, plain.tick_top + plain.tick_height + 14.0);
}

#[test]
fn absurd_year_range_is_truncated_instead_of_allocated() {
    let events = vec![
        event("old", (1990, 1, 1), 10),
        event("now", (2026, 1, 1), 10),
    ];
    let result = layout(&events, &config(-2_000_000_000, 2026, 50), 2026);
    assert_eq!(result.years.len(), 1_000);
    assert_eq!(result.width, 1_000.0 * 50.0 + 100.0);
    assert_eq!(result.years[0].year, -2_000_000_000);
    assert!(result.tickers.is_empty());
    assert_eq!(result.skipped, vec!["old".to_string(), "now".to_string()]);
}
