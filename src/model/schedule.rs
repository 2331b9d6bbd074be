use chrono::{DateTime, Datelike, FixedOffset, Timelike, Weekday};
use strum::{Display, EnumString};

/// How minutes are judged during hour 21.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LateHourPolicy {
    /// Same rule as hour 18: open from minute 30 onwards.
    MinuteRule,
    /// The whole hour is closed, so the last open minute is 20:59.
    Closed,
}

/// Days and hours during which check-ins are accepted.
#[derive(Debug, Clone)]
pub struct OperatingWindow {
    pub allowed_days: Vec<Weekday>,
    pub late_hour: LateHourPolicy,
}

impl Default for OperatingWindow {
    fn default() -> Self {
        Self {
            allowed_days: vec![Weekday::Mon, Weekday::Wed],
            late_hour: LateHourPolicy::MinuteRule,
        }
    }
}

impl OperatingWindow {
    pub fn permits(&self, local: &DateTime<FixedOffset>) -> bool {
        self.is_allowed_day(local.weekday()) && self.is_allowed_time(local.hour(), local.minute())
    }

    pub fn is_allowed_day(&self, day: Weekday) -> bool {
        self.allowed_days.contains(&day)
    }

    pub fn is_allowed_time(&self, hour: u32, minute: u32) -> bool {
        match hour {
            19 | 20 => true,
            18 => minute >= 30,
            21 => match self.late_hour {
                LateHourPolicy::MinuteRule => minute >= 30,
                LateHourPolicy::Closed => false,
            },
            _ => false,
        }
    }
}
