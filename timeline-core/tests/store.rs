use chrono::NaiveDate;
use timeline_core::{
    ConfigPatch, EventDraft, KeyValueStore, LifeEvent, MemoryStore, SaveOutcome, TimelineConfig,
    TimelineError, TimelineStore, CONFIG_KEY, EVENTS_KEY,
};

const CURRENT_YEAR: i32 = 2026;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("Ngày mẫu không hợp lệ")
}

fn draft(title: &str, when: NaiveDate) -> EventDraft {
    EventDraft {
        title: title.to_string(),
        ..EventDraft::blank(when)
    }
}

#[test]
fn empty_storage_loads_sample_events() {
    let store = TimelineStore::load(MemoryStore::new(), CURRENT_YEAR);
    assert_eq!(store.events().len(), 10);
    assert_eq!(store.config().start_year, 2001);
    assert_eq!(store.config().end_year, CURRENT_YEAR);
    assert_eq!(store.config().year_spacing, 50);
}

#[test]
fn corrupt_storage_falls_back_to_defaults() {
    let mut kv = MemoryStore::new();
    kv.set(EVENTS_KEY, "{not json").expect("ghi kho");
    kv.set(CONFIG_KEY, "[]").expect("ghi kho");

    let store = TimelineStore::load(kv, CURRENT_YEAR);
    assert_eq!(store.events().len(), 10);
    assert_eq!(
        store.config(),
        &TimelineConfig::for_range(store.year_range(CURRENT_YEAR), CURRENT_YEAR)
    );
}

#[test]
fn saved_config_is_widened_to_cover_events() {
    let mut kv = MemoryStore::new();
    let events = vec![LifeEvent {
        id: "a".into(),
        title: "Old".into(),
        description: String::new(),
        date: date(1990, 3, 1),
        significance: 10,
        color: None,
    }];
    kv.set(EVENTS_KEY, &serde_json::to_string(&events).expect("serialize"))
        .expect("ghi kho");
    let narrow = TimelineConfig {
        start_year: 2000,
        end_year: 2010,
        year_spacing: 120,
        show_future_years: false,
        highlight_current_year: false,
    };
    kv.set(CONFIG_KEY, &serde_json::to_string(&narrow).expect("serialize"))
        .expect("ghi kho");

    let store = TimelineStore::load(kv, CURRENT_YEAR);
    assert_eq!(store.config().start_year, 1990);
    assert_eq!(store.config().end_year, CURRENT_YEAR);
    assert_eq!(store.config().year_spacing, 120);
    assert!(!store.config().show_future_years);
}

#[test]
fn save_event_adds_then_updates_and_persists() {
    let mut kv = MemoryStore::new();
    let mut store = TimelineStore::with_state(&mut kv, Vec::new(), TimelineConfig::reset(CURRENT_YEAR));

    let event = draft("Moved abroad", date(2015, 4, 2))
        .validate()
        .expect("draft hợp lệ");
    let id = event.id.clone();
    assert_eq!(
        store.save_event(event.clone(), CURRENT_YEAR).expect("lưu"),
        SaveOutcome::Added
    );
    assert_eq!(store.config().start_year, 2015);

    let mut edited = event;
    edited.title = "Moved abroad for work".into();
    assert_eq!(
        store.save_event(edited, CURRENT_YEAR).expect("lưu"),
        SaveOutcome::Updated
    );
    assert_eq!(store.events().len(), 1);
    drop(store);

    let saved: Vec<LifeEvent> =
        serde_json::from_str(&kv.get(EVENTS_KEY).expect("đọc").expect("có dữ liệu"))
            .expect("JSON hợp lệ");
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id, id);
    assert_eq!(saved[0].title, "Moved abroad for work");
    assert!(kv.get(CONFIG_KEY).expect("đọc").is_some());
}

#[test]
fn events_stay_sorted_after_edits() {
    let mut store = TimelineStore::load(MemoryStore::new(), CURRENT_YEAR);
    let mut first = store.events()[0].clone();
    first.date = date(2024, 1, 1);
    store.save_event(first, CURRENT_YEAR).expect("lưu");
    assert!(store
        .events()
        .windows(2)
        .all(|pair| pair[0].date <= pair[1].date));
    assert_eq!(store.events()[0].title, "First Day of School");
}

#[test]
fn delete_event_reports_missing_ids() {
    let mut store = TimelineStore::load(MemoryStore::new(), CURRENT_YEAR);
    let removed = store.delete_event("3").expect("xóa");
    assert_eq!(removed.title, "Winning a Science Fair");
    assert_eq!(store.events().len(), 9);
    assert!(matches!(
        store.delete_event("3"),
        Err(TimelineError::NotFound(id)) if id == "3"
    ));
}

#[test]
fn update_config_clamps_spacing() {
    let mut store = TimelineStore::load(MemoryStore::new(), CURRENT_YEAR);
    store
        .update_config(
            &ConfigPatch {
                year_spacing: Some(500),
                show_future_years: Some(false),
                ..ConfigPatch::default()
            },
            CURRENT_YEAR,
        )
        .expect("cập nhật");
    assert_eq!(store.config().year_spacing, 200);
    assert!(!store.config().show_future_years);

    store
        .update_config(
            &ConfigPatch {
                year_spacing: Some(10),
                ..ConfigPatch::default()
            },
            CURRENT_YEAR,
        )
        .expect("cập nhật");
    assert_eq!(store.config().year_spacing, 50);
}

#[test]
fn narrowed_range_is_rewidened_and_matches_reload() {
    let mut kv = MemoryStore::new();
    let updated = {
        let mut store = TimelineStore::load(&mut kv, CURRENT_YEAR);
        store
            .update_config(
                &ConfigPatch {
                    start_year: Some(2010),
                    ..ConfigPatch::default()
                },
                CURRENT_YEAR,
            )
            .expect("cập nhật");
        assert_eq!(store.config().start_year, 2001);
        assert!(store.layout(CURRENT_YEAR).skipped.is_empty());
        store.config().clone()
    };

    let reloaded = TimelineStore::load(kv, CURRENT_YEAR);
    assert_eq!(reloaded.config(), &updated);
}

#[test]
fn absurd_year_range_is_rejected() {
    let mut kv = MemoryStore::new();
    {
        let mut store = TimelineStore::load(&mut kv, CURRENT_YEAR);
        let before = store.config().clone();
        let err = store
            .update_config(
                &ConfigPatch {
                    start_year: Some(-2_000_000_000),
                    ..ConfigPatch::default()
                },
                CURRENT_YEAR,
            )
            .expect_err("khoảng năm quá rộng");
        assert!(matches!(err, TimelineError::Invalid(_)));
        assert_eq!(store.config(), &before);
    }

    let tampered = r#"{"startYear":-2000000000,"endYear":2026,"yearSpacing":50,"showFutureYears":true,"highlightCurrentYear":true}"#;
    kv.set(CONFIG_KEY, tampered).expect("ghi");
    let reloaded = TimelineStore::load(kv, CURRENT_YEAR);
    assert_eq!(reloaded.config().start_year, 2001);
}

#[test]
fn clear_all_survives_reload() {
    let mut kv = MemoryStore::new();
    {
        let mut store = TimelineStore::load(&mut kv, CURRENT_YEAR);
        store.clear_all(CURRENT_YEAR).expect("xóa hết");
        assert!(store.events().is_empty());
        assert_eq!(store.config(), &TimelineConfig::reset(CURRENT_YEAR));
    }

    let reloaded = TimelineStore::load(kv, CURRENT_YEAR);
    assert!(reloaded.events().is_empty());
    assert_eq!(reloaded.config().start_year, CURRENT_YEAR);
    assert_eq!(reloaded.config().end_year, CURRENT_YEAR);
}

#[test]
fn draft_validation_rejects_bad_input() {
    let today = date(2026, 10, 19);
    assert!(matches!(
        draft("   ", today).validate(),
        Err(TimelineError::Invalid(_))
    ));

    let mut too_big = draft("Big", today);
    too_big.significance = 101;
    assert!(too_big.validate().is_err());

    let mut bad_color = draft("Color", today);
    bad_color.color = Some("blue".into());
    assert!(bad_color.validate().is_err());

    let mut no_color = draft("  Trimmed  ", today);
    no_color.color = Some(String::new());
    let event = no_color.validate().expect("hợp lệ");
    assert_eq!(event.title, "Trimmed");
    assert_eq!(event.color, None);
    assert!(!event.id.is_empty());
}

#[test]
fn editing_draft_keeps_id() {
    let store = TimelineStore::load(MemoryStore::new(), CURRENT_YEAR);
    let original = store.event("5").expect("có sự kiện mẫu").clone();
    let draft = EventDraft::from_event(&original);
    assert!(draft.is_edit());
    let event = draft.validate().expect("hợp lệ");
    assert_eq!(event, original);
}
