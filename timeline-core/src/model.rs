//! Kiểu dữ liệu sự kiện đời sống và cấu hình hiển thị timeline.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::TimelineError;

/// Màu mặc định cho sự kiện mới tạo từ form.
pub const DEFAULT_EVENT_COLOR: &str = "#0284c7";
/// Mức độ quan trọng mặc định cho sự kiện mới.
pub const DEFAULT_SIGNIFICANCE: u8 = 50;
/// Khoảng cách mặc định (px) giữa hai mốc năm.
pub const DEFAULT_YEAR_SPACING: u32 = 50;
/// Giới hạn khoảng cách năm cho phép chỉnh trong phần cài đặt.
pub const MIN_YEAR_SPACING: u32 = 50;
pub const MAX_YEAR_SPACING: u32 = 200;
/// Số năm tối đa một timeline được trải ra.
pub const MAX_YEAR_SPAN: u64 = 1_000;

/// Một sự kiện trong đời đã được kiểm tra hợp lệ.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LifeEvent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    /// Thang 1-100.
    pub significance: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl LifeEvent {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Tháng tính từ 0 (tháng Một = 0).
    pub fn month0(&self) -> u32 {
        self.date.month0()
    }
}

/// Cấu hình hiển thị timeline, được lưu cùng danh sách sự kiện.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineConfig {
    pub start_year: i32,
    pub end_year: i32,
    /// Số pixel cho mỗi năm.
    pub year_spacing: u32,
    pub show_future_years: bool,
    pub highlight_current_year: bool,
}

impl TimelineConfig {
    /// Cấu hình mặc định bao trọn khoảng năm của dữ liệu và năm hiện tại.
    pub fn for_range(range: YearRange, current_year: i32) -> Self {
        Self {
            start_year: range.earliest_year,
            end_year: range.latest_year.max(current_year),
            year_spacing: DEFAULT_YEAR_SPACING,
            show_future_years: true,
            highlight_current_year: true,
        }
    }

    /// Cấu hình sau khi xóa toàn bộ dữ liệu.
    pub fn reset(current_year: i32) -> Self {
        Self::for_range(YearRange::single(current_year), current_year)
    }

    /// Số năm trong khoảng cấu hình, 0 nếu `start_year > end_year`.
    pub fn year_count(&self) -> u64 {
        let span = i64::from(self.end_year) - i64::from(self.start_year) + 1;
        span.max(0) as u64
    }

    /// Số năm thực sự được vẽ, không vượt quá [`MAX_YEAR_SPAN`].
    pub fn visible_year_count(&self) -> usize {
        self.year_count().min(MAX_YEAR_SPAN) as usize
    }

    /// Danh sách năm hiển thị, rỗng nếu `start_year > end_year`.
    pub fn years(&self) -> Vec<i32> {
        (self.start_year..=self.end_year)
            .take(self.visible_year_count())
            .collect()
    }

    /// Khoảng năm quá rộng bị từ chối thay vì cấp phát cả triệu mốc năm.
    pub fn validate(&self) -> Result<(), TimelineError> {
        if self.year_count() > MAX_YEAR_SPAN {
            return Err(TimelineError::Invalid(format!(
                "khoảng năm {}..={} vượt quá {MAX_YEAR_SPAN} năm",
                self.start_year, self.end_year
            )));
        }
        Ok(())
    }

    pub fn contains_year(&self, year: i32) -> bool {
        (self.start_year..=self.end_year).contains(&year)
    }

    /// Chỉ mở rộng, không bao giờ thu hẹp, để bao khoảng năm cho trước.
    pub fn covering(&self, range: YearRange) -> Self {
        let mut next = self.clone();
        if range.earliest_year < next.start_year || range.latest_year > next.end_year {
            next.start_year = next.start_year.min(range.earliest_year);
            next.end_year = next.end_year.max(range.latest_year);
        }
        next
    }

    /// Gộp thay đổi một phần từ màn hình cài đặt.
    pub fn apply(&self, patch: &ConfigPatch) -> Self {
        let mut next = self.clone();
        if let Some(start) = patch.start_year {
            next.start_year = start;
        }
        if let Some(end) = patch.end_year {
            next.end_year = end;
        }
        if let Some(spacing) = patch.year_spacing {
            next.year_spacing = spacing.clamp(MIN_YEAR_SPACING, MAX_YEAR_SPACING);
        }
        if let Some(show) = patch.show_future_years {
            next.show_future_years = show;
        }
        if let Some(highlight) = patch.highlight_current_year {
            next.highlight_current_year = highlight;
        }
        next
    }
}

/// Thay đổi một phần cho `TimelineConfig`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPatch {
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub end_year: Option<i32>,
    #[serde(default)]
    pub year_spacing: Option<u32>,
    #[serde(default)]
    pub show_future_years: Option<bool>,
    #[serde(default)]
    pub highlight_current_year: Option<bool>,
}

impl ConfigPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Năm sớm nhất và muộn nhất xuất hiện trong dữ liệu.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct YearRange {
    pub earliest_year: i32,
    pub latest_year: i32,
}

impl YearRange {
    pub fn single(year: i32) -> Self {
        Self {
            earliest_year: year,
            latest_year: year,
        }
    }

    /// Luôn bao gồm năm hiện tại, kể cả khi danh sách rỗng.
    pub fn of(events: &[LifeEvent], current_year: i32) -> Self {
        events
            .iter()
            .map(LifeEvent::year)
            .fold(Self::single(current_year), |acc, year| Self {
                earliest_year: acc.earliest_year.min(year),
                latest_year: acc.latest_year.max(year),
            })
    }
}

/// Dữ liệu form trước khi kiểm tra hợp lệ.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    pub significance: u8,
    #[serde(default)]
    pub color: Option<String>,
}

impl EventDraft {
    /// Form trống cho sự kiện mới.
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            id: None,
            title: String::new(),
            description: String::new(),
            date: today,
            significance: DEFAULT_SIGNIFICANCE,
            color: Some(DEFAULT_EVENT_COLOR.to_string()),
        }
    }

    /// Nạp lại form từ một sự kiện có sẵn để chỉnh sửa.
    pub fn from_event(event: &LifeEvent) -> Self {
        Self {
            id: Some(event.id.clone()),
            title: event.title.clone(),
            description: event.description.clone(),
            date: event.date,
            significance: event.significance,
            color: Some(
                event
                    .color
                    .clone()
                    .unwrap_or_else(|| DEFAULT_EVENT_COLOR.to_string()),
            ),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// Kiểm tra và chuyển thành `LifeEvent`, cấp id mới nếu chưa có.
    pub fn validate(self) -> Result<LifeEvent, TimelineError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(TimelineError::Invalid("Title is required".to_string()));
        }
        if !(1..=100).contains(&self.significance) {
            return Err(TimelineError::Invalid(format!(
                "Significance must be between 1 and 100, got {}",
                self.significance
            )));
        }

        let color = match self.color.map(|c| c.trim().to_string()) {
            Some(c) if c.is_empty() => None,
            Some(c) if is_hex_color(&c) => Some(c),
            Some(c) => {
                return Err(TimelineError::Invalid(format!("Invalid color: {c}")));
            }
            None => None,
        };

        let id = match self.id {
            Some(id) if !id.is_empty() => id,
            _ => uuid::Uuid::new_v4().to_string(),
        };

        Ok(LifeEvent {
            id,
            title: title.to_string(),
            description: self.description.trim().to_string(),
            date: self.date,
            significance: self.significance,
            color,
        })
    }
}

/// `#rgb` hoặc `#rrggbb`.
pub fn is_hex_color(value: &str) -> bool {
    let Some(hex) = value.strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Danh sách sự kiện mẫu cho lần mở đầu tiên.
pub fn sample_events() -> Vec<LifeEvent> {
    const SAMPLES: [(&str, &str, &str, (i32, u32, u32), u8, &str); 10] = [
        (
            "1",
            "First Bicycle Ride",
            "The thrill of balancing on two wheels for the first time—freedom unlocked!",
            (2001, 6, 15),
            80,
            "#FFA500",
        ),
        (
            "2",
            "First Day of School",
            "Nervous yet excited, stepping into a world of learning and friendship.",
            (2003, 9, 1),
            90,
            "#1E90FF",
        ),
        (
            "3",
            "Winning a Science Fair",
            "A simple project turned into a proud moment—first taste of achievement.",
            (2008, 4, 12),
            85,
            "#32CD32",
        ),
        (
            "4",
            "Teenage First Crush",
            "Butterflies, stolen glances, and a heart learning new emotions.",
            (2010, 2, 14),
            75,
            "#FF69B4",
        ),
        (
            "5",
            "Graduating High School",
            "A milestone filled with tears, joy, and endless possibilities ahead.",
            (2013, 6, 20),
            95,
            "#FFD700",
        ),
        (
            "6",
            "First Job Offer",
            "Hard work paid off—first step into the professional world.",
            (2017, 8, 5),
            98,
            "#228B22",
        ),
        (
            "7",
            "First Solo Travel",
            "Exploring new places, meeting new people, and growing as a person.",
            (2019, 5, 10),
            88,
            "#4682B4",
        ),
        (
            "8",
            "Starting a Passion Project",
            "Turning ideas into reality—something truly meaningful begins.",
            (2021, 11, 3),
            92,
            "#8A2BE2",
        ),
        (
            "9",
            "Career Promotion",
            "Years of dedication recognized—stepping up to new challenges.",
            (2023, 7, 18),
            99,
            "#FF4500",
        ),
        (
            "10",
            "Finding True Love",
            "A heartwarming moment—when everything just felt right.",
            (2025, 2, 14),
            100,
            "#DC143C",
        ),
    ];

    SAMPLES
        .iter()
        .filter_map(|(id, title, description, (y, m, d), significance, color)| {
            Some(LifeEvent {
                id: (*id).to_string(),
                title: (*title).to_string(),
                description: (*description).to_string(),
                date: NaiveDate::from_ymd_opt(*y, *m, *d)?,
                significance: *significance,
                color: Some((*color).to_string()),
            })
        })
        .collect()
}

/// Sắp xếp ổn định theo ngày, giữ thứ tự chèn khi trùng ngày.
pub fn sort_by_date(events: &mut [LifeEvent]) {
    events.sort_by_key(|event| event.date);
}
