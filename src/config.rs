use std::env;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
const DEFAULT_SMTP_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DNS_TIMEOUT_SECS: u64 = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Empty PORT variable")]
    MissingPort,
    #[error("Wrong PORT value: {0}")]
    InvalidPort(String),
    #[error("Wrong {name} value: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// # Service Configuration
///
/// Read from the process environment (after `.env` is loaded).
///
/// ## Variables
/// - `PORT` (required): TCP port to listen on
/// - `BIND_ADDRESS`: interface to bind, `0.0.0.0` by default
/// - `SMTP_CONNECT_TIMEOUT_SECS`: bound on each MX host dial, covering address
///   resolution and every connect attempt for that host, 10 by default
/// - `DNS_TIMEOUT_SECS`: MX query timeout, 2 by default
/// - `LOG_FORMAT`: `json` for JSON log lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_address: String,
    pub port: u16,
    pub smtp_connect_timeout: Duration,
    pub dns_timeout: Duration,
    pub json_logs: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            None => return Err(ConfigError::MissingPort),
            Some(value) if value.is_empty() => return Err(ConfigError::MissingPort),
            Some(value) => match value.parse::<u16>() {
                Ok(port) => port,
                Err(_) => return Err(ConfigError::InvalidPort(value)),
            },
        };

        let bind_address = lookup("BIND_ADDRESS")
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let smtp_connect_timeout = seconds(
            &lookup,
            "SMTP_CONNECT_TIMEOUT_SECS",
            DEFAULT_SMTP_CONNECT_TIMEOUT_SECS,
        )?;
        let dns_timeout = seconds(&lookup, "DNS_TIMEOUT_SECS", DEFAULT_DNS_TIMEOUT_SECS)?;

        let json_logs = lookup("LOG_FORMAT").is_some_and(|value| value.eq_ignore_ascii_case("json"));

        Ok(Self {
            bind_address,
            port,
            smtp_connect_timeout,
            dns_timeout,
            json_logs,
        })
    }
}

fn seconds<F>(lookup: &F, name: &'static str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(Duration::from_secs(default)),
        Some(value) => match value.parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
            _ => Err(ConfigError::InvalidValue { name, value }),
        },
    }
}
