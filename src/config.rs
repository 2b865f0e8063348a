//! Settings from the environment (after loading `.env` if present).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

/// Which [`RowStore`](crate::store::RowStore) backs the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            other => Err(format!("unknown store '{}', expected postgres or memory", other)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    /// JSON document served at `/complex-json-file`.
    pub asset_path: PathBuf,
    pub store: StoreKind,
    pub body_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: "postgres://localhost/petstore".into(),
            max_connections: 5,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            asset_path: PathBuf::from("complex_data.json"),
            store: StoreKind::Postgres,
            body_limit: 1024 * 1024,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut s = Settings::default();
        if let Some(v) = get("DATABASE_URL") {
            s.database_url = v;
        }
        if let Some(v) = get("DATABASE_MAX_CONNECTIONS") {
            s.max_connections = parse("DATABASE_MAX_CONNECTIONS", &v)?;
        }
        if let Some(v) = get("BIND_ADDR") {
            s.bind_addr = parse("BIND_ADDR", &v)?;
        }
        if let Some(v) = get("ASSET_PATH") {
            s.asset_path = PathBuf::from(v);
        }
        if let Some(v) = get("STORE") {
            s.store = parse("STORE", &v)?;
        }
        if let Some(v) = get("REQUEST_BODY_LIMIT") {
            s.body_limit = parse("REQUEST_BODY_LIMIT", &v)?;
        }
        Ok(s)
    }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::Invalid { key, reason: e.to_string() })
}
