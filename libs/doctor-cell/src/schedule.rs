use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};

use shared_models::error::AppError;

/// Start times of bookable slots: two clinic shifts of half-hour slots with a
/// midday gap.
pub const TIME_LABELS: [&str; 13] = [
    "09:00", "09:30", "10:00", "10:30", "11:00", "11:30",
    "14:00", "14:30", "15:00", "15:30", "16:00", "16:30", "17:00",
];

/// A 24-hour `"HH:MM"` time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeLabel(NaiveTime);

/// The fixed label set, in schedule order.
pub fn time_labels() -> Vec<TimeLabel> {
    TIME_LABELS
        .iter()
        .filter_map(|raw| raw.parse().ok())
        .collect()
}

impl TimeLabel {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn is_bookable(&self) -> bool {
        time_labels().contains(self)
    }

    /// `"H:MM AM"` / `"H:MM PM"`; midnight and noon both show as 12.
    pub fn display_12h(&self) -> String {
        let hour = self.hour();
        let (display_hour, suffix) = match hour {
            0 => (12, "AM"),
            1..=11 => (hour, "AM"),
            12 => (12, "PM"),
            _ => (hour - 12, "PM"),
        };
        format!("{}:{:02} {}", display_hour, self.minute(), suffix)
    }

    /// Inverse of [`TimeLabel::display_12h`]. Also accepts the zero-padded
    /// `"09:00 AM"` form.
    pub fn from_12h(text: &str) -> Option<Self> {
        let (clock, suffix) = text.trim().split_once(' ')?;
        let (hour, minute) = clock.split_once(':')?;
        let hour: u32 = hour.parse().ok()?;
        let minute: u32 = minute.parse().ok()?;
        if !(1..=12).contains(&hour) || minute > 59 {
            return None;
        }

        let hour = match (suffix.trim().to_ascii_uppercase().as_str(), hour) {
            ("AM", 12) => 0,
            ("AM", h) => h,
            ("PM", 12) => 12,
            ("PM", h) => h + 12,
            _ => return None,
        };
        Self::new(hour, minute)
    }
}

impl fmt::Display for TimeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for TimeLabel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::ValidationError(format!("Invalid time label: {:?}", s));
        if s.len() != 5 || s.as_bytes()[2] != b':' {
            return Err(invalid());
        }
        NaiveTime::parse_from_str(s, "%H:%M")
            .map(Self)
            .map_err(|_| invalid())
    }
}
