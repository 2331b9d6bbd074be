use std::{sync::Arc, time::Duration};

use actix_web::rt::{spawn, time::interval};
use tracing::{error, info};

use crate::service::AttendanceService;

/// Rotates the shared access token every `period`. The first tick of an
/// interval fires immediately, so it is consumed before the loop.
pub fn spawn_token_rotation(service: Arc<AttendanceService>, period: Duration) {
    spawn(async move {
        let mut ticker = interval(period);
        ticker.tick().await;
        info!(period_secs = period.as_secs(), "Token rotation scheduled");

        loop {
            ticker.tick().await;
            if let Err(e) = service.rotate_token().await {
                error!(error = %e, "Scheduled token rotation failed");
            }
        }
    });
}
