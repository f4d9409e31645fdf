//! Runtime configuration for a TRIAGE run.
//!
//! Values come from four layers, later layers winning:
//!
//! 1. Built-in defaults (`TriageConfig::default()`)
//! 2. An optional TOML file
//! 3. `BASE_API_URL` and `API_KEY` from a dotenv file (`.env` in the working
//!    directory when present, or an explicit path)
//! 4. The same variables in the process environment
//!
//! The dotenv file is parsed with `dotenvy` but never exported into the
//! process environment.
//!
//! The assembled config is validated once and then passed explicitly to the
//! transport and pipeline constructors. Nothing reads it from global state.
//!
//! Example file:
//! ```toml
//! base_url = "https://assessment.example.com/api"
//! page_size = 20
//! max_pages = 200
//! timeout_secs = 15
//!
//! [retry]
//! max_attempts = 5
//! delay_ms = 3000
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use triage_contracts::error::{TriageError, TriageResult};
use triage_core::{CollectorOptions, RetryPolicy};

/// Environment variable overriding `base_url`.
pub const ENV_BASE_URL: &str = "BASE_API_URL";

/// Environment variable overriding `api_key`.
pub const ENV_API_KEY: &str = "API_KEY";

/// Dotenv file picked up from the working directory when no path is given.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Retry settings shared by page fetches and the submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts per remote call, counting the first.
    pub max_attempts: u32,
    /// Constant pause between attempts.
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_attempts: policy.max_attempts,
            delay_ms: policy.delay.as_millis() as u64,
        }
    }
}

/// Everything a run needs to reach the remote API.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// API root; `patients` and `submit-assessment` are resolved against it.
    pub base_url: String,
    /// Sent as the `x-api-key` header on every request.
    pub api_key: String,
    pub page_size: u32,
    /// Upper bound on pages per collection. `0` removes the bound.
    pub max_pages: u32,
    /// Per-request timeout enforced by the HTTP client.
    pub timeout_secs: u64,
    pub retry: RetryConfig,
}

impl Default for TriageConfig {
    fn default() -> Self {
        let options = CollectorOptions::default();
        Self {
            base_url: String::new(),
            api_key: String::new(),
            page_size: options.page_size,
            max_pages: options.max_pages.unwrap_or(0),
            timeout_secs: 30,
            retry: RetryConfig::default(),
        }
    }
}

impl fmt::Debug for TriageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriageConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "<redacted>" })
            .field("page_size", &self.page_size)
            .field("max_pages", &self.max_pages)
            .field("timeout_secs", &self.timeout_secs)
            .field("retry", &self.retry)
            .finish()
    }
}

impl TriageConfig {
    /// Parse `s` as TOML. Missing keys take their defaults.
    ///
    /// Returns `TriageError::ConfigError` if the TOML is malformed or a key
    /// has the wrong type.
    pub fn from_toml_str(s: &str) -> TriageResult<Self> {
        toml::from_str(s).map_err(|e| TriageError::ConfigError {
            reason: format!("failed to parse config TOML: {}", e),
        })
    }

    /// Read the file at `path` and parse it as TOML configuration.
    pub fn from_file(path: &Path) -> TriageResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| TriageError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Override fields from environment variables found by `lookup`.
    ///
    /// Empty values are ignored so an unset-but-exported variable does not
    /// clobber the file.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.is_empty()) {
            self.api_key = key;
        }
    }

    /// Override fields from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|name| std::env::var(name).ok());
    }

    /// Check that the config can drive a run.
    pub fn validate(&self) -> TriageResult<()> {
        let invalid = |reason: String| Err(TriageError::ConfigError { reason });

        if self.base_url.trim().is_empty() {
            return invalid(format!("base_url is empty; set it in the config file or {ENV_BASE_URL}"));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return invalid(format!(
                "base_url '{}' must start with http:// or https://",
                self.base_url
            ));
        }
        if self.api_key.trim().is_empty() {
            return invalid(format!("api_key is empty; set it in the config file or {ENV_API_KEY}"));
        }
        if self.page_size == 0 {
            return invalid("page_size must be at least 1".to_string());
        }
        if self.retry.max_attempts == 0 {
            return invalid("retry.max_attempts must be at least 1".to_string());
        }
        if self.timeout_secs == 0 {
            return invalid("timeout_secs must be at least 1".to_string());
        }
        Ok(())
    }

    /// Override fields from the dotenv file at `path`, with `process` taking
    /// precedence for any variable it reports as non-empty.
    pub fn apply_env_file_with<F>(&mut self, path: &Path, process: F) -> TriageResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = read_env_file(path)?;
        debug!(path = %path.display(), vars = file.len(), "read dotenv file");
        self.apply_env_with(|name| {
            process(name)
                .filter(|v| !v.is_empty())
                .or_else(|| file.get(name).cloned())
        });
        Ok(())
    }

    /// Defaults, then the optional config file, then the dotenv file, then the
    /// process environment, then validation.
    ///
    /// An explicit `env_file` must exist. Without one, `.env` in the working
    /// directory is used if it is there.
    pub fn load(path: Option<&Path>, env_file: Option<&Path>) -> TriageResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let process = |name: &str| std::env::var(name).ok();
        let default_env_file = Path::new(DEFAULT_ENV_FILE);
        match env_file {
            Some(file) => config.apply_env_file_with(file, process)?,
            None if default_env_file.is_file() => {
                config.apply_env_file_with(default_env_file, process)?
            }
            None => config.apply_env(),
        }
        config.validate()?;
        Ok(config)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retry.max_attempts, Duration::from_millis(self.retry.delay_ms))
    }

    pub fn collector_options(&self) -> CollectorOptions {
        CollectorOptions {
            page_size: self.page_size,
            max_pages: (self.max_pages > 0).then_some(self.max_pages),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Parse a dotenv file into a map without touching the process environment.
fn read_env_file(path: &Path) -> TriageResult<HashMap<String, String>> {
    let unreadable = |e: dotenvy::Error| TriageError::ConfigError {
        reason: format!("failed to read env file '{}': {}", path.display(), e),
    };
    dotenvy::from_path_iter(path)
        .map_err(unreadable)?
        .map(|item| item.map_err(unreadable))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
