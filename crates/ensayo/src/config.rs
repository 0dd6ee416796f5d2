//! Harness configuration.
//!
//! Loaded from YAML, then overridden from `ENSAYO_*` environment variables:
//!
//! ```yaml
//! host: localhost:8111
//! super_user_token: "..."
//! browser: firefox
//! random_seed: 42
//! log:
//!   format: json
//! ```

use crate::generator::Generator;
use crate::logging::LogConfig;
use crate::random::Seed;
use crate::result::{EnsayoError, EnsayoResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_HOST: &str = "ENSAYO_HOST";
pub const ENV_SUPER_USER_TOKEN: &str = "ENSAYO_SUPER_USER_TOKEN";
pub const ENV_BROWSER: &str = "ENSAYO_BROWSER";
pub const ENV_SEED: &str = "ENSAYO_SEED";

/// Settings shared by API and UI suites
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Build server `host:port`
    pub host: String,
    /// Token of the built-in super user, used to create the first entities
    pub super_user_token: Option<String>,
    /// Browser for UI suites
    pub browser: String,
    /// Remote browser grid, when UI suites do not run locally
    pub remote_url: Option<String>,
    /// Fixed seed for reproducible test data
    pub random_seed: Option<u64>,
    /// Log output
    pub log: LogConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            host: "localhost:8111".to_string(),
            super_user_token: None,
            browser: "firefox".to_string(),
            remote_url: None,
            random_seed: None,
            log: LogConfig::default(),
        }
    }
}

impl HarnessConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse YAML. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EnsayoError::Yaml`] on malformed input.
    pub fn from_yaml_str(yaml: &str) -> EnsayoResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Read and parse a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a YAML error.
    pub fn from_file(path: impl AsRef<Path>) -> EnsayoResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Override from process environment variables.
    ///
    /// # Errors
    ///
    /// See [`HarnessConfig::apply_env_from`].
    pub fn apply_env(self) -> EnsayoResult<Self> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Override from `lookup`, which maps variable names to values.
    ///
    /// # Errors
    ///
    /// Returns [`EnsayoError::Config`] if `ENSAYO_SEED` is not a `u64`.
    pub fn apply_env_from<F>(mut self, lookup: F) -> EnsayoResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.host = host;
        }
        if let Some(token) = lookup(ENV_SUPER_USER_TOKEN) {
            self.super_user_token = Some(token);
        }
        if let Some(browser) = lookup(ENV_BROWSER) {
            self.browser = browser;
        }
        if let Some(seed) = lookup(ENV_SEED) {
            let seed = seed
                .trim()
                .parse::<u64>()
                .map_err(|e| EnsayoError::config(format!("{ENV_SEED}={seed:?}: {e}")))?;
            self.random_seed = Some(seed);
        }
        Ok(self)
    }

    /// Check the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`EnsayoError::Config`] for an empty host or browser.
    pub fn validate(&self) -> EnsayoResult<()> {
        if self.host.trim().is_empty() {
            return Err(EnsayoError::config("host must not be empty"));
        }
        if self.browser.trim().is_empty() {
            return Err(EnsayoError::config("browser must not be empty"));
        }
        Ok(())
    }

    /// Set host
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set random seed
    #[must_use]
    pub const fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Set log configuration
    #[must_use]
    pub fn with_log(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }

    /// `http://<host>`
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.host)
    }

    /// Generator seeded from `random_seed`, or from entropy when unset
    #[must_use]
    pub fn generator(&self) -> Generator {
        match self.random_seed {
            Some(seed) => Generator::seeded(Seed::from_u64(seed)),
            None => Generator::new(),
        }
    }
}
