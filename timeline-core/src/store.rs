//! Bộ chứa trạng thái: danh sách sự kiện + cấu hình, đồng bộ xuống kho key-value.

use serde::{Deserialize, Serialize};

use crate::layout::{layout, TimelineLayout};
use crate::model::{sample_events, sort_by_date, ConfigPatch, LifeEvent, TimelineConfig, YearRange};
use crate::storage::{KeyValueStore, CONFIG_KEY, EVENTS_KEY};
use crate::TimelineError;

/// Kết quả lưu một sự kiện.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SaveOutcome {
    Added,
    Updated,
}

/// Trạng thái timeline gắn với một kho lưu trữ.
#[derive(Debug, Clone)]
pub struct TimelineStore<S> {
    kv: S,
    events: Vec<LifeEvent>,
    config: TimelineConfig,
}

impl<S: KeyValueStore> TimelineStore<S> {
    /// Đọc dữ liệu đã lưu; thiếu hoặc hỏng thì dùng dữ liệu mẫu và cấu hình mặc định.
    pub fn load(kv: S, current_year: i32) -> Self {
        let mut events = match read_json::<Vec<LifeEvent>, _>(&kv, EVENTS_KEY) {
            Some(events) => events,
            None => sample_events(),
        };
        sort_by_date(&mut events);

        let range = YearRange::of(&events, current_year);
        let config = read_json::<TimelineConfig, _>(&kv, CONFIG_KEY)
            .filter(|saved| match saved.validate() {
                Ok(()) => true,
                Err(err) => {
                    tracing::warn!(error = %err, "ignoring saved config");
                    false
                }
            })
            .unwrap_or_else(|| TimelineConfig::for_range(range, current_year))
            .covering(range);

        tracing::debug!(
            events = events.len(),
            start_year = config.start_year,
            end_year = config.end_year,
            "timeline loaded"
        );

        Self { kv, events, config }
    }

    /// Khởi tạo với dữ liệu cho trước, không đọc từ kho.
    pub fn with_state(kv: S, mut events: Vec<LifeEvent>, config: TimelineConfig) -> Self {
        sort_by_date(&mut events);
        Self { kv, events, config }
    }

    /// Danh sách sự kiện đã sắp theo ngày.
    pub fn events(&self) -> &[LifeEvent] {
        &self.events
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn event(&self, id: &str) -> Option<&LifeEvent> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn year_range(&self, current_year: i32) -> YearRange {
        YearRange::of(&self.events, current_year)
    }

    pub fn layout(&self, current_year: i32) -> TimelineLayout {
        layout(&self.events, &self.config, current_year)
    }

    pub fn storage(&self) -> &S {
        &self.kv
    }

    pub fn into_storage(self) -> S {
        self.kv
    }

    /// Thêm mới hoặc thay thế theo id, rồi sắp xếp lại và mở rộng khoảng năm.
    pub fn save_event(
        &mut self,
        event: LifeEvent,
        current_year: i32,
    ) -> Result<SaveOutcome, TimelineError> {
        let outcome = match self.events.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => {
                *existing = event;
                SaveOutcome::Updated
            }
            None => {
                self.events.push(event);
                SaveOutcome::Added
            }
        };
        sort_by_date(&mut self.events);
        self.config = self.config.covering(self.year_range(current_year));

        self.persist_events()?;
        self.persist_config()?;
        Ok(outcome)
    }

    pub fn delete_event(&mut self, id: &str) -> Result<LifeEvent, TimelineError> {
        let index = self
            .events
            .iter()
            .position(|event| event.id == id)
            .ok_or_else(|| TimelineError::NotFound(id.to_string()))?;
        let removed = self.events.remove(index);
        self.persist_events()?;
        Ok(removed)
    }

    /// Gộp thay đổi cài đặt; khoảng cách năm bị kẹp trong 50..=200.
    ///
    /// Khoảng năm luôn được mở rộng lại để bao mọi sự kiện, giống như khi nạp.
    pub fn update_config(
        &mut self,
        patch: &ConfigPatch,
        current_year: i32,
    ) -> Result<(), TimelineError> {
        let next = self.config.apply(patch);
        next.validate()?;
        self.config = next.covering(self.year_range(current_year));
        self.persist_config()
    }

    /// Xóa toàn bộ sự kiện và đặt lại cấu hình.
    ///
    /// Danh sách rỗng vẫn được ghi lại để lần mở sau không nạp dữ liệu mẫu.
    pub fn clear_all(&mut self, current_year: i32) -> Result<(), TimelineError> {
        self.events.clear();
        self.config = TimelineConfig::reset(current_year);
        self.kv.remove(EVENTS_KEY)?;
        self.kv.remove(CONFIG_KEY)?;
        self.persist_events()?;
        self.persist_config()
    }

    fn persist_events(&mut self) -> Result<(), TimelineError> {
        let json = serde_json::to_string(&self.events)
            .map_err(|err| TimelineError::Parse(err.to_string()))?;
        self.kv.set(EVENTS_KEY, &json)
    }

    fn persist_config(&mut self) -> Result<(), TimelineError> {
        let json = serde_json::to_string(&self.config)
            .map_err(|err| TimelineError::Parse(err.to_string()))?;
        self.kv.set(CONFIG_KEY, &json)
    }
}

fn read_json<T, K>(kv: &K, key: &str) -> Option<T>
where
    T: for<'de> Deserialize<'de>,
    K: KeyValueStore + ?Sized,
{
    let raw = match kv.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to read saved data");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to parse saved data");
            None
        }
    }
}
