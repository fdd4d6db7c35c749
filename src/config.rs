// src/config.rs
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_BIN: &str = "ollama";
pub const DEFAULT_MODELS: &[&str] = &["llama3", "llama3:latest", "llama3:8b", "llama3:70b"];

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub addr: SocketAddr,
    pub program: String,
    /// Tried in order until one produces a reply.
    pub models: Vec<String>,
    pub liveness_timeout: Duration,
    pub health_timeout: Duration,
    pub generate_timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            program: DEFAULT_BIN.to_string(),
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            liveness_timeout: Duration::from_secs(10),
            health_timeout: Duration::from_secs(5),
            generate_timeout: Duration::from_secs(90),
        }
    }
}

impl RelayConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let addr = match lookup("RELAY_ADDR") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "RELAY_ADDR",
                value: raw,
            })?,
            None => defaults.addr,
        };

        let program = lookup("OLLAMA_BIN")
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or(defaults.program);

        let models = match lookup("OLLAMA_MODELS") {
            Some(raw) => {
                let models: Vec<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(String::from)
                    .collect();
                if models.is_empty() {
                    return Err(ConfigError::NoModels);
                }
                models
            }
            None => defaults.models,
        };

        Ok(Self {
            addr,
            program,
            models,
            liveness_timeout: secs(&lookup, "LIVENESS_TIMEOUT_SECS", defaults.liveness_timeout)?,
            health_timeout: secs(&lookup, "HEALTH_TIMEOUT_SECS", defaults.health_timeout)?,
            generate_timeout: secs(&lookup, "GENERATE_TIMEOUT_SECS", defaults.generate_timeout)?,
        })
    }
}

fn secs<F>(lookup: &F, key: &'static str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(n) if n > 0 => Ok(Duration::from_secs(n)),
            _ => Err(ConfigError::Invalid { key, value: raw }),
        },
        None => Ok(default),
    }
}
