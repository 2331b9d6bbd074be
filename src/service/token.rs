use tracing::info;

use super::AttendanceService;
use crate::{auth::token::generate_access_token, error::StoreError, store::ACCESS_TOKEN_KEY};

impl AttendanceService {
    pub async fn current_token(&self) -> Result<Option<String>, StoreError> {
        self.store.get(ACCESS_TOKEN_KEY).await
    }

    /// Overwrites the stored token. In-flight forms carrying the old token
    /// fail their next submission and the user reloads.
    pub async fn rotate_token(&self) -> Result<String, StoreError> {
        let token = generate_access_token();
        self.store.put(ACCESS_TOKEN_KEY, &token).await?;
        info!("Access token rotated");
        Ok(token)
    }

    /// Rotates only when no token has been stored yet.
    pub async fn ensure_token(&self) -> Result<String, StoreError> {
        match self.current_token().await? {
            Some(token) => Ok(token),
            None => self.rotate_token().await,
        }
    }
}
