use std::{net::SocketAddr, path::Path, str::FromStr, time::Duration};

use anyhow::Context;

const DEFAULT_DB_FILE: &str = "outlays.db";

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub jwt_secret: Option<String>,
    pub access_token_ttl: Duration,
    pub accrual: AccrualConfig,
    pub admin_email: String,
    pub admin_password: Option<String>,
    /// Requests per second per client IP on `/auth/*`. Zero disables limiting.
    pub auth_rate_limit_per_second: u64,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone)]
pub struct AccrualConfig {
    pub enabled: bool,
    pub interval: Duration,
    pub initial_delay: Duration,
    pub apply_timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = env_or("OUTLAYS_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid OUTLAYS_LISTEN_ADDR")?;
        let db_path = resolve_db_path(&env_or("OUTLAYS_DB_PATH", "./db/outlays.db"));
        let cors_allow = env_or("OUTLAYS_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = parse_env("OUTLAYS_REQUEST_TIMEOUT_MS", 30_000)?;
        let ttl_minutes: u64 = parse_env("OUTLAYS_ACCESS_TOKEN_TTL_MINUTES", 30)?;

        let accrual = AccrualConfig {
            enabled: parse_env("OUTLAYS_ACCRUAL_ENABLED", true)?,
            interval: Duration::from_secs(parse_env("OUTLAYS_ACCRUAL_INTERVAL_SECS", 86_400)?),
            initial_delay: Duration::from_secs(parse_env(
                "OUTLAYS_ACCRUAL_INITIAL_DELAY_SECS",
                60,
            )?),
            apply_timeout: Duration::from_millis(parse_env(
                "OUTLAYS_ACCRUAL_APPLY_TIMEOUT_MS",
                30_000,
            )?),
        };
        if accrual.interval.is_zero() {
            anyhow::bail!("OUTLAYS_ACCRUAL_INTERVAL_SECS must be greater than zero");
        }

        let log_format = match env_or("OUTLAYS_LOG_FORMAT", "text").to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            jwt_secret: non_empty_env("OUTLAYS_JWT_SECRET"),
            access_token_ttl: Duration::from_secs(ttl_minutes * 60),
            accrual,
            admin_email: env_or("OUTLAYS_ADMIN_EMAIL", "admin@easyoutlays.com"),
            admin_password: non_empty_env("OUTLAYS_ADMIN_PASSWORD"),
            auth_rate_limit_per_second: parse_env("OUTLAYS_AUTH_RATE_LIMIT_PER_SECOND", 0)?,
            log_format,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty_env(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {}='{}': {}", key, raw, e)),
        None => Ok(default),
    }
}

/// A directory (existing, or spelled with a trailing slash) gets the default file name appended.
fn resolve_db_path(raw: &str) -> String {
    let path = Path::new(raw);
    if raw.ends_with('/') || raw.ends_with('\\') || path.is_dir() {
        path.join(DEFAULT_DB_FILE).to_string_lossy().to_string()
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_get_the_default_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve_db_path(&dir.path().to_string_lossy());
        assert!(resolved.ends_with(DEFAULT_DB_FILE));
        assert_eq!(resolve_db_path("./data/"), "./data/outlays.db");
        assert_eq!(resolve_db_path("./data/app.db"), "./data/app.db");
    }
}
