use tracing::debug;

use super::AttendanceService;
use crate::{
    error::AppError,
    model::attendance::{AttendanceMark, AttendanceRecord},
    store::{ACCESS_TOKEN_KEY, ALLOW_LIST_KEY},
    utils::validation::{escape_name, normalize_identifier, parse_allow_list},
};

/// Raw form input, before normalisation.
#[derive(Debug, Clone)]
pub struct CheckInRequest {
    pub name: String,
    pub identifier: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckInOutcome {
    /// Today's mark was appended and the record written back.
    Recorded { identifier: String, mark: AttendanceMark },
    /// A mark for today already existed; nothing was written.
    AlreadyRecorded { identifier: String },
}

impl AttendanceService {
    /// Records today's attendance for the submitted identifier, at most once
    /// per local date.
    ///
    /// The load and the write back are separate store calls with nothing in
    /// between to detect a concurrent writer, so two simultaneous submissions
    /// for the same identifier race and the last write wins. With one
    /// check-in per person per day this is tolerated rather than locked
    /// around.
    pub async fn check_in(&self, request: CheckInRequest) -> Result<CheckInOutcome, AppError> {
        let now = self.local_now();

        // 1️⃣ Day / time window
        if !self.policy.debug && !self.policy.window.permits(&now) {
            return Err(AppError::ServiceUnavailable);
        }

        // 2️⃣ Shared access token
        let stored_token = self.store.get(ACCESS_TOKEN_KEY).await?;
        if stored_token.as_deref() != Some(request.token.as_str()) {
            return Err(AppError::Forbidden);
        }

        // 3️⃣ Allow-list, when one is configured
        let identifier = normalize_identifier(&request.identifier);
        if let Some(raw) = self.store.get(ALLOW_LIST_KEY).await? {
            if !parse_allow_list(&raw).contains(&identifier) {
                return Err(AppError::NotAllowed);
            }
        }

        // 4️⃣ Input
        let name = escape_name(request.name.trim());
        if identifier.is_empty() || name.is_empty() {
            return Err(AppError::InvalidInput(
                "Please fill in both your name and NUSNET ID".to_string(),
            ));
        }

        // 5️⃣ Load or start the record
        let mut record = match self.store.get(&identifier).await? {
            Some(raw) => serde_json::from_str::<AttendanceRecord>(&raw)?,
            None => AttendanceRecord::new(name),
        };

        // 6️⃣ Append once per date
        let mark = AttendanceMark::at(&now);
        if !record.mark(mark.clone()) {
            return Ok(CheckInOutcome::AlreadyRecorded { identifier });
        }

        self.store
            .put(&identifier, &serde_json::to_string(&record)?)
            .await?;

        if self.policy.debug {
            debug!(identifier = %identifier, attendance = ?record.attendance, "Record updated");
        }

        Ok(CheckInOutcome::Recorded { identifier, mark })
    }
}
