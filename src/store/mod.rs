use async_trait::async_trait;
use strum::{Display, EnumString};

use crate::error::StoreError;

pub mod memory;
pub mod mysql;

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

/// Key holding the current shared access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Key holding the optional allow-list of identifiers.
pub const ALLOW_LIST_KEY: &str = "allow_list";

/// Reserved keys are lowercase; identifiers are always uppercased,
/// so the two never collide.
pub fn is_reserved_key(key: &str) -> bool {
    key == ACCESS_TOKEN_KEY || key == ALLOW_LIST_KEY
}

/// Flat string-to-string store. No transactions and no conditional writes:
/// a `get` followed by a `put` on the same key is last-write-wins.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;

    async fn list_keys(&self) -> Result<Vec<String>, StoreError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StoreBackend {
    Memory,
    Mysql,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn reserved_keys_are_recognised() {
        assert!(is_reserved_key("access_token"));
        assert!(is_reserved_key("allow_list"));
        assert!(!is_reserved_key("ACCESS_TOKEN"));
        assert!(!is_reserved_key("E0123456"));
    }

    #[test]
    fn backend_parses_case_insensitively() {
        assert_eq!(StoreBackend::from_str("MySQL").ok(), Some(StoreBackend::Mysql));
        assert_eq!(StoreBackend::from_str("memory").ok(), Some(StoreBackend::Memory));
        assert!(StoreBackend::from_str("redis").is_err());
    }
}
