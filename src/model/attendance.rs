use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%d/%m/%Y";
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// One check-in: `date` is "dd/mm/yyyy", `time` is "hh:mm:ss", both local.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceMark {
    pub date: String,
    pub time: String,
}

impl AttendanceMark {
    pub fn at(now: &DateTime<FixedOffset>) -> Self {
        Self {
            date: now.format(DATE_FORMAT).to_string(),
            time: now.format(TIME_FORMAT).to_string(),
        }
    }

    /// "dd/mm" prefix used as the listing column key.
    pub fn day_month(&self) -> &str {
        self.date.get(..5).unwrap_or(&self.date)
    }
}

/// Value stored under a normalized identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub name: Vec<String>,
    pub attendance: Vec<AttendanceMark>,
}

impl AttendanceRecord {
    pub fn new(name: String) -> Self {
        Self {
            name: vec![name],
            attendance: Vec::new(),
        }
    }

    pub fn has_date(&self, date: &str) -> bool {
        self.attendance.iter().any(|mark| mark.date == date)
    }

    /// Appends `mark` unless its date is already present.
    /// Returns whether the record changed.
    pub fn mark(&mut self, mark: AttendanceMark) -> bool {
        if self.has_date(&mark.date) {
            return false;
        }
        self.attendance.push(mark);
        true
    }
}
