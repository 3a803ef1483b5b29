// src/config.rs
//
// Runtime configuration
//
// Every setting has a default; environment variables override them.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const ENV_DB_PATH: &str = "RADIOKEEP_DB_PATH";
pub const ENV_POOL_SIZE: &str = "RADIOKEEP_POOL_SIZE";
pub const ENV_BUSY_TIMEOUT_MS: &str = "RADIOKEEP_BUSY_TIMEOUT_MS";
pub const ENV_BUS_BACKLOG_WARNING: &str = "RADIOKEEP_BUS_BACKLOG_WARNING";
pub const ENV_HANDLER_TIMEOUT_MS: &str = "RADIOKEEP_HANDLER_TIMEOUT_MS";
pub const ENV_ENVIRONMENT: &str = "RADIOKEEP_ENV";

const DEFAULT_POOL_SIZE: u32 = 8;
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;
const DEFAULT_BUS_BACKLOG_WARNING: usize = 64;
const DEFAULT_HANDLER_TIMEOUT_MS: u64 = 30_000;

/// Controls how much detail unexpected errors expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl FromStr for Environment {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(AppError::Config(format!("Unknown environment '{}'", other))),
        }
    }
}

/// Notification bus tuning
#[derive(Debug, Clone)]
pub struct BusSettings {
    /// Undelivered events per subscriber at which a backlog warning is logged.
    /// Queues are unbounded; this never drops anything.
    pub backlog_warning: usize,

    /// Longest one handler call may run before it is abandoned
    pub handler_timeout: Duration,
}

impl Default for BusSettings {
    fn default() -> Self {
        Self {
            backlog_warning: DEFAULT_BUS_BACKLOG_WARNING,
            handler_timeout: Duration::from_millis(DEFAULT_HANDLER_TIMEOUT_MS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub pool_max_size: u32,
    pub busy_timeout_ms: u64,
    pub bus: BusSettings,
    pub environment: Environment,
}

impl AppConfig {
    /// Defaults for everything except the database location
    pub fn with_database_path(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            pool_max_size: DEFAULT_POOL_SIZE,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            bus: BusSettings::default(),
            environment: Environment::default(),
        }
    }

    /// Load from the process environment
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = match lookup(ENV_DB_PATH) {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_database_path()?,
        };

        let pool_max_size = parse_or(&lookup, ENV_POOL_SIZE, DEFAULT_POOL_SIZE)?;
        if pool_max_size == 0 {
            return Err(AppError::Config(format!("{} must be at least 1", ENV_POOL_SIZE)));
        }

        let backlog_warning =
            parse_or(&lookup, ENV_BUS_BACKLOG_WARNING, DEFAULT_BUS_BACKLOG_WARNING)?;
        if backlog_warning == 0 {
            return Err(AppError::Config(format!(
                "{} must be at least 1",
                ENV_BUS_BACKLOG_WARNING
            )));
        }

        let handler_timeout_ms =
            parse_or(&lookup, ENV_HANDLER_TIMEOUT_MS, DEFAULT_HANDLER_TIMEOUT_MS)?;
        if handler_timeout_ms == 0 {
            return Err(AppError::Config(format!(
                "{} must be at least 1",
                ENV_HANDLER_TIMEOUT_MS
            )));
        }

        Ok(Self {
            database_path,
            pool_max_size,
            busy_timeout_ms: parse_or(&lookup, ENV_BUSY_TIMEOUT_MS, DEFAULT_BUSY_TIMEOUT_MS)?,
            bus: BusSettings {
                backlog_warning,
                handler_timeout: Duration::from_millis(handler_timeout_ms),
            },
            environment: parse_or(&lookup, ENV_ENVIRONMENT, Environment::default())?,
        })
    }
}

/// Default database location
///
/// Path structure: {APP_DATA}/radiokeep/radiokeep.db
pub fn default_database_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Config("Could not determine app data directory".to_string()))?;

    Ok(app_data_dir.join("radiokeep").join("radiokeep.db"))
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid value for {}: {}", key, e))),
        _ => Ok(default),
    }
}
