use std::env;

use log::info;
use thiserror::Error;

use crate::render::logo::MAX_LOGO_BYTES;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
const DEFAULT_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:4173"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub bind_addr: String,
    pub allowed_origins: Vec<String>,
    pub max_logo_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            allowed_origins: DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect(),
            max_logo_bytes: MAX_LOGO_BYTES,
        }
    }
}

fn parse_var<T>(name: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
            name,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

impl AppConfig {
    /// Load configuration from environment variables (after `.env`, if the caller loaded it).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let port = parse_var("PORT", lookup("PORT"), defaults.port)?;
        let max_logo_bytes =
            parse_var("MAX_LOGO_BYTES", lookup("MAX_LOGO_BYTES"), defaults.max_logo_bytes)?;
        if max_logo_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                name: "MAX_LOGO_BYTES",
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            });
        }

        let bind_addr = lookup("BIND_ADDR")
            .map(|addr| addr.trim().to_string())
            .filter(|addr| !addr.is_empty())
            .unwrap_or(defaults.bind_addr);

        let allowed_origins = match lookup("ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.allowed_origins,
        };

        info!(
            "Configuration loaded: bind={}:{}, origins={:?}, max_logo_bytes={}",
            bind_addr, port, allowed_origins, max_logo_bytes
        );

        Ok(AppConfig {
            port,
            bind_addr,
            allowed_origins,
            max_logo_bytes,
        })
    }
}
