//! Runtime configuration from the environment (and `.env` when present)

use anyhow::{Context, Result};
use std::{env, fmt::Display, fs, net::SocketAddr, path::PathBuf, str::FromStr};
use tracing::{info, warn};

use crate::pricing::RatePolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// JSON rate policy loaded at startup instead of the built-in table
    pub rules_file: Option<PathBuf>,
    pub cors_allow_any: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            rules_file: None,
            cors_allow_any: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: try_load("PORT", defaults.port)?,
            rules_file: env::var("PRICING_RULES_FILE")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            cors_allow_any: try_load("CORS_ALLOW_ANY", defaults.cors_allow_any)?,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
    }

    /// Rate policy from `rules_file`, or the built-in defaults
    pub fn load_policy(&self) -> Result<RatePolicy> {
        let Some(path) = &self.rules_file else {
            info!("PRICING_RULES_FILE not set, using built-in rate policy");
            return Ok(RatePolicy::default());
        };

        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rate policy from {}", path.display()))?;
        let policy: RatePolicy = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse rate policy in {}", path.display()))?;
        policy.validate()?;

        info!("Loaded rate policy from {}", path.display());
        Ok(policy)
    }
}

fn try_load<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr + Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {} value: {}", key, raw)),
        Err(_) => {
            warn!("{} not set, using default: {}", key, default);
            Ok(default)
        }
    }
}
