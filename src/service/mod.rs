//! Check-in, listing and token rotation over an injected [`KvStore`].
//!
//! The same [`AttendanceService`] value backs both the HTTP handlers and the
//! scheduled rotation job; it holds no mutable state of its own.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use mockable::Clock;

use crate::{auth::password::AdminCredential, model::schedule::OperatingWindow, store::KvStore};

pub mod checkin;
pub mod listing;
pub mod token;

pub use checkin::{CheckInOutcome, CheckInRequest};
pub use listing::AttendanceTable;

#[derive(Debug, Clone)]
pub struct CheckInPolicy {
    /// Skips the day/time window gate. The token gate still applies.
    pub debug: bool,
    pub window: OperatingWindow,
    pub utc_offset: FixedOffset,
}

pub struct AttendanceService {
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
    policy: CheckInPolicy,
    admin: AdminCredential,
}

impl AttendanceService {
    pub fn new(
        store: Arc<dyn KvStore>,
        clock: Arc<dyn Clock>,
        policy: CheckInPolicy,
        admin: AdminCredential,
    ) -> Self {
        Self {
            store,
            clock,
            policy,
            admin,
        }
    }

    pub fn verify_admin(&self, password: &str) -> bool {
        self.admin.verify(password)
    }

    fn local_now(&self) -> DateTime<FixedOffset> {
        self.clock.utc().with_timezone(&self.policy.utc_offset)
    }
}
