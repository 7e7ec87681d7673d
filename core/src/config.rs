//! Enclave endpoint configuration.
//!
//! Values come from the environment:
//! - `ENCLAVE_URL`: host including scheme, default `http://localhost`
//! - `ENCLAVE_PORT`: default `9080`
//! - `ENCLAVE_TIMEOUT_SECS`: optional end-to-end timeout per call

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_HOST: &str = "http://localhost";
pub const DEFAULT_PORT: u16 = 9080;

/// Where the enclave lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnclaveConfig {
    pub host: String,
    pub port: u16,
    pub timeout: Option<Duration>,
}

impl Default for EnclaveConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: None,
        }
    }
}

impl EnclaveConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names. Unset or empty
    /// variables fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get("ENCLAVE_URL").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get("ENCLAVE_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };
        let timeout = match get("ENCLAVE_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self { host, port, timeout })
    }
}
