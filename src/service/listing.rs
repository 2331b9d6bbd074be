use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use super::AttendanceService;
use crate::{
    error::AppError,
    model::attendance::{AttendanceMark, AttendanceRecord},
    store::is_reserved_key,
};

/// One identifier's record as shown to the admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedRecord {
    pub identifier: String,
    pub name: Vec<String>,
    pub attendance: Vec<AttendanceMark>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub identifier: String,
    pub name: String,
    /// Check-in time per column, `None` when absent that day.
    pub cells: Vec<Option<String>>,
    pub total: usize,
}

/// Records pivoted into one column per "dd/mm".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceTable {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl AttendanceService {
    /// Loads every non-reserved key concurrently.
    ///
    /// A key whose read fails, vanished, or holds unreadable JSON is logged
    /// and left out; only a failure to enumerate keys fails the listing.
    pub async fn list_attendance(&self) -> Result<Vec<ListedRecord>, AppError> {
        let keys: Vec<String> = self
            .store
            .list_keys()
            .await?
            .into_iter()
            .filter(|k| !is_reserved_key(k))
            .collect();

        let reads = keys.iter().map(|key| async move {
            let value = self.store.get(key).await;
            (key, value)
        });

        let mut records = Vec::with_capacity(keys.len());
        for (key, value) in join_all(reads).await {
            let raw = match value {
                Ok(Some(raw)) => raw,
                Ok(None) => {
                    warn!(identifier = %key, "Record disappeared during listing");
                    continue;
                }
                Err(e) => {
                    warn!(identifier = %key, error = %e, "Skipping record that failed to load");
                    continue;
                }
            };

            match serde_json::from_str::<AttendanceRecord>(&raw) {
                Ok(record) => records.push(ListedRecord {
                    identifier: key.clone(),
                    name: record.name,
                    attendance: record.attendance,
                }),
                Err(e) => {
                    warn!(identifier = %key, error = %e, "Skipping unreadable record");
                }
            }
        }

        records.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        info!(loaded = records.len(), keys = keys.len(), "Attendance listed");

        Ok(records)
    }
}

/// Splits "dd/mm" into (day, month). Unparsable parts sort first.
fn day_and_month(column: &str) -> (u32, u32) {
    let (day, month) = column.split_once('/').unwrap_or((column, ""));
    (day.parse().unwrap_or(0), month.parse().unwrap_or(0))
}

impl AttendanceTable {
    pub fn pivot(records: &[ListedRecord]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for mark in records.iter().flat_map(|r| r.attendance.iter()) {
            let key = mark.day_month();
            if !columns.iter().any(|c| c == key) {
                columns.push(key.to_string());
            }
        }

        // Day first, then a stable pass on month: month-major, day-minor.
        columns.sort_by_key(|c| day_and_month(c).0);
        columns.sort_by_key(|c| day_and_month(c).1);

        let rows = records
            .iter()
            .map(|record| TableRow {
                identifier: record.identifier.clone(),
                name: record.name.join(", "),
                cells: columns
                    .iter()
                    .map(|column| {
                        record
                            .attendance
                            .iter()
                            .find(|mark| mark.day_month() == column)
                            .map(|mark| mark.time.clone())
                    })
                    .collect(),
                total: record.attendance.len(),
            })
            .collect();

        Self { columns, rows }
    }
}
