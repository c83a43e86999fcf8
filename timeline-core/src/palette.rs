//! Bảng màu có sẵn và tiện ích lịch cho bộ chọn ngày dạng cascade.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Một lựa chọn màu đặt sẵn.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PresetColor {
    pub label: &'static str,
    pub value: &'static str,
}

pub const PRESET_COLORS: [PresetColor; 16] = [
    PresetColor { label: "Orange Red", value: "#FF4500" },
    PresetColor { label: "Lime Green", value: "#32CD32" },
    PresetColor { label: "Dodger Blue", value: "#1E90FF" },
    PresetColor { label: "Gold", value: "#FFD700" },
    PresetColor { label: "Blue Violet", value: "#8A2BE2" },
    PresetColor { label: "Medium Spring Green", value: "#00FA9A" },
    PresetColor { label: "Deep Pink", value: "#FF1493" },
    PresetColor { label: "Chartreuse", value: "#7FFF00" },
    PresetColor { label: "Crimson", value: "#DC143C" },
    PresetColor { label: "Dark Turquoise", value: "#00CED1" },
    PresetColor { label: "Dark Orange", value: "#FF8C00" },
    PresetColor { label: "Deep Sky Blue", value: "#00BFFF" },
    PresetColor { label: "Green Yellow", value: "#ADFF2F" },
    PresetColor { label: "Magenta", value: "#FF00FF" },
    PresetColor { label: "Medium Slate Blue", value: "#7B68EE" },
    PresetColor { label: "Turquoise", value: "#40E0D0" },
];

pub fn find_preset(value: &str) -> Option<&'static PresetColor> {
    PRESET_COLORS
        .iter()
        .find(|preset| preset.value.eq_ignore_ascii_case(value))
}

/// Số năm có thể chọn trong bộ chọn ngày.
pub const SELECTABLE_YEAR_COUNT: i32 = 100;

/// Năm hiện tại trở về trước, tổng cộng 100 năm.
pub fn selectable_years(current_year: i32) -> Vec<i32> {
    (0..SELECTABLE_YEAR_COUNT).map(|i| current_year - i).collect()
}

/// Số ngày của tháng (`month` tính từ 1). Trả về 0 nếu tháng không hợp lệ.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.map(|n| n.signed_duration_since(first).num_days() as u32)
        .unwrap_or(31)
}

/// Ghép ngày từ ba ô chọn, kẹp ngày về cuối tháng khi đổi sang tháng ngắn hơn.
pub fn compose_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let max_day = days_in_month(year, month);
    if max_day == 0 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day.clamp(1, max_day))
}

/// Tách ngày thành (năm, tháng, ngày) cho ba ô chọn.
pub fn split_date(date: NaiveDate) -> (i32, u32, u32) {
    (date.year(), date.month(), date.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn february_follows_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2023, 12), 31);
        assert_eq!(days_in_month(2023, 13), 0);
    }

    #[test]
    fn compose_date_clamps_day() {
        assert_eq!(
            compose_date(2023, 2, 31),
            NaiveDate::from_ymd_opt(2023, 2, 28)
        );
        assert_eq!(compose_date(2023, 0, 1), None);
    }

    #[test]
    fn selectable_years_count_down_from_current() {
        let years = selectable_years(2026);
        assert_eq!(years.len(), 100);
        assert_eq!(years.first(), Some(&2026));
        assert_eq!(years.last(), Some(&1927));
    }

    #[test]
    fn preset_lookup_ignores_case() {
        assert_eq!(find_preset("#ff4500").map(|p| p.label), Some("Orange Red"));
        assert!(find_preset("#000000").is_none());
    }
}
