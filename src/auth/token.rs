use uuid::Uuid;

/// Fresh shared access token: 32 lowercase hex chars from a v4 UUID,
/// which draws on the OS random source.
pub fn generate_access_token() -> String {
    Uuid::new_v4().simple().to_string()
}
