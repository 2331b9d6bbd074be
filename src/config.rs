use std::{env, fmt::Display, str::FromStr, time::Duration};

use anyhow::{Context, Result, anyhow, bail};
use chrono::{FixedOffset, Weekday};
use dotenvy::dotenv;

use crate::{
    auth::password::AdminCredential,
    model::schedule::{LateHourPolicy, OperatingWindow},
    service::CheckInPolicy,
    store::StoreBackend,
};

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    /// Disables the day/time window gate.
    pub debug: bool,
    pub admin_credential: AdminCredential,

    pub store_backend: StoreBackend,
    pub database_url: Option<String>,

    pub utc_offset: FixedOffset,
    pub allowed_days: Vec<Weekday>,
    pub late_hour_policy: LateHourPolicy,
    pub token_rotation: Duration,

    // Rate limiting
    pub rate_checkin_per_min: u32,
    pub rate_admin_per_min: u32,

    pub log_dir: String,
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.trim()
        .parse()
        .map_err(|e| anyhow!("{key} has invalid value {raw:?}: {e}"))
}

fn parse_days(raw: &str) -> Result<Vec<Weekday>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|day| {
            day.parse::<Weekday>()
                .map_err(|_| anyhow!("ALLOWED_DAYS has unknown weekday {day:?}"))
        })
        .collect()
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let admin_credential = match (lookup("ADMIN_PASSWORD_HASH"), lookup("ADMIN_PASSWORD")) {
            (Some(hash), _) => AdminCredential::from_hash(&hash)
                .map_err(|e| anyhow!("ADMIN_PASSWORD_HASH is not a valid PHC string: {e}"))?,
            (None, Some(plain)) if !plain.is_empty() => AdminCredential::from_plain(&plain)
                .map_err(|e| anyhow!("failed to hash ADMIN_PASSWORD: {e}"))?,
            _ => bail!("ADMIN_PASSWORD or ADMIN_PASSWORD_HASH must be set"),
        };

        let store_backend: StoreBackend = parse_or(&lookup, "STORE_BACKEND", "memory")?;
        let database_url = lookup("DATABASE_URL");
        if store_backend == StoreBackend::Mysql && database_url.is_none() {
            bail!("DATABASE_URL must be set when STORE_BACKEND=mysql");
        }

        let offset_minutes: i32 = parse_or(&lookup, "UTC_OFFSET_MINUTES", "480")?;
        let utc_offset = FixedOffset::east_opt(offset_minutes * 60)
            .with_context(|| format!("UTC_OFFSET_MINUTES out of range: {offset_minutes}"))?;

        let allowed_days = parse_days(&lookup("ALLOWED_DAYS").unwrap_or_else(|| "Mon,Wed".to_string()))?;

        let rotation_secs: u64 = parse_or(&lookup, "TOKEN_ROTATION_SECS", "86400")?; // daily
        if rotation_secs == 0 {
            bail!("TOKEN_ROTATION_SECS must be greater than zero");
        }

        let rate_checkin_per_min: u32 = parse_or(&lookup, "RATE_CHECKIN_PER_MIN", "120")?;
        let rate_admin_per_min: u32 = parse_or(&lookup, "RATE_ADMIN_PER_MIN", "10")?;
        if rate_checkin_per_min == 0 || rate_admin_per_min == 0 {
            bail!("rate limits must be greater than zero");
        }

        Ok(Self {
            server_addr: lookup("SERVER_ADDR").unwrap_or_else(|| "127.0.0.1:8080".to_string()),
            debug: parse_or(&lookup, "DEBUG", "false")?,
            admin_credential,
            store_backend,
            database_url,
            utc_offset,
            allowed_days,
            late_hour_policy: parse_or(&lookup, "LATE_HOUR_POLICY", "minute_rule")?,
            token_rotation: Duration::from_secs(rotation_secs),
            rate_checkin_per_min,
            rate_admin_per_min,
            log_dir: lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
        })
    }

    pub fn check_in_policy(&self) -> CheckInPolicy {
        CheckInPolicy {
            debug: self.debug,
            window: OperatingWindow {
                allowed_days: self.allowed_days.clone(),
                late_hour: self.late_hour_policy,
            },
            utc_offset: self.utc_offset,
        }
    }
}
