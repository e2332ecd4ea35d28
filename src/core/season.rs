//! Season lookup for the seasonal "Weather" button label

use chrono::{Datelike, NaiveDate};

/// One of four fixed seasonal buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Season of a month number, `None` outside 1..=12.
    pub fn from_month(month: u32) -> Option<Self> {
        match month {
            12 | 1 | 2 => Some(Season::Winter),
            3..=5 => Some(Season::Spring),
            6..=8 => Some(Season::Summer),
            9..=11 => Some(Season::Autumn),
            _ => None,
        }
    }

    /// Season of a calendar date.
    pub fn for_date(date: NaiveDate) -> Self {
        Self::from_month(date.month()).unwrap_or(Season::Autumn)
    }

    pub fn icon(self) -> &'static str {
        match self {
            Season::Winter => "❄",
            Season::Spring => "🌺",
            Season::Summer => "☀",
            Season::Autumn => "🍁",
        }
    }
}

/// Glyph for a month number (1..=12).
pub fn icon_for_month(month: u32) -> Option<&'static str> {
    Season::from_month(month).map(Season::icon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_month_has_one_of_four_glyphs() {
        let glyphs = ["❄", "🌺", "☀", "🍁"];
        for month in 1..=12 {
            let icon = icon_for_month(month).unwrap();
            assert!(glyphs.contains(&icon), "month {} mapped to {}", month, icon);
            // Stable across calls
            assert_eq!(icon_for_month(month), Some(icon));
        }
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(icon_for_month(12), Some("❄"));
        assert_eq!(icon_for_month(2), Some("❄"));
        assert_eq!(icon_for_month(3), Some("🌺"));
        assert_eq!(icon_for_month(5), Some("🌺"));
        assert_eq!(icon_for_month(6), Some("☀"));
        assert_eq!(icon_for_month(8), Some("☀"));
        assert_eq!(icon_for_month(9), Some("🍁"));
        assert_eq!(icon_for_month(11), Some("🍁"));
    }

    #[test]
    fn test_out_of_range_month() {
        assert_eq!(icon_for_month(0), None);
        assert_eq!(icon_for_month(13), None);
    }

    #[test]
    fn test_for_date_agrees_with_from_month() {
        for month in 1..=12 {
            let date = NaiveDate::from_ymd_opt(2024, month, 15).unwrap();
            assert_eq!(Some(Season::for_date(date)), Season::from_month(month));
        }
    }
}
