//! Provider configuration and the request policy derived from it.
//!
//! [`ProviderConfig`] is the opaque key/value map handed to an adapter at
//! construction. [`RequestPolicy`] is its validated, typed view.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::error::FetchError;

/// Default minimum gap between requests, in seconds.
pub const DEFAULT_MIN_REQUEST_INTERVAL: f64 = 1.0;
/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default backoff unit, in seconds.
pub const DEFAULT_RETRY_DELAY: f64 = 1.0;
/// Default per-attempt timeout, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT: f64 = 30.0;
/// Desktop browser user agent; several vendors reject library defaults.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Recognized configuration keys.
pub mod keys {
    /// Minimum seconds between requests.
    pub const MIN_REQUEST_INTERVAL: &str = "min_request_interval";
    /// Retries after the first attempt.
    pub const MAX_RETRIES: &str = "max_retries";
    /// Backoff unit in seconds.
    pub const RETRY_DELAY: &str = "retry_delay";
    /// Per-attempt timeout in seconds.
    pub const REQUEST_TIMEOUT: &str = "request_timeout";
    /// Vendor origin override.
    pub const BASE_URL: &str = "base_url";
    /// Remembered postal code.
    pub const ZIP_CODE: &str = "zip_code";
    /// User agent override.
    pub const USER_AGENT: &str = "user_agent";
}

// ============================================================================
// Provider Config
// ============================================================================

/// Opaque adapter configuration. Unknown keys are kept but ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderConfig(Map<String, Value>);

impl ProviderConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing map.
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Inserts or replaces a key.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Removes a key.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Returns the underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Returns true if no keys are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reads a non-negative, finite number of seconds.
    pub fn seconds(&self, key: &str) -> Result<Option<f64>, FetchError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => {
                let secs = n
                    .as_f64()
                    .ok_or_else(|| FetchError::Config(format!("{key} is not a number")))?;
                if !secs.is_finite() || secs < 0.0 {
                    return Err(FetchError::Config(format!(
                        "{key} must be a non-negative number, got {secs}"
                    )));
                }
                Ok(Some(secs))
            }
            Some(other) => Err(FetchError::Config(format!(
                "{key} must be a number, got {other}"
            ))),
        }
    }

    /// Reads a non-negative integer.
    pub fn count(&self, key: &str) -> Result<Option<u32>, FetchError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .map(Some)
                .ok_or_else(|| {
                    FetchError::Config(format!("{key} must be a non-negative integer, got {n}"))
                }),
            Some(other) => Err(FetchError::Config(format!(
                "{key} must be an integer, got {other}"
            ))),
        }
    }

    /// Reads a string, treating blank strings as absent.
    pub fn string(&self, key: &str) -> Result<Option<&str>, FetchError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.trim())),
            Some(other) => Err(FetchError::Config(format!(
                "{key} must be a string, got {other}"
            ))),
        }
    }

    /// The remembered postal code, if any.
    pub fn zip_code(&self) -> Result<Option<&str>, FetchError> {
        self.string(keys::ZIP_CODE)
    }

    /// Resolves the vendor origin, using `default` unless overridden.
    pub fn base_url(&self, default: &str) -> Result<Url, FetchError> {
        let raw = self.string(keys::BASE_URL)?.unwrap_or(default);
        let url = Url::parse(raw).map_err(|e| FetchError::Config(format!("base_url {raw}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(FetchError::Config(format!(
                "base_url must be an absolute http(s) URL, got {raw}"
            )));
        }
        Ok(url)
    }
}

impl From<Map<String, Value>> for ProviderConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

// ============================================================================
// Request Policy
// ============================================================================

/// Validated timing policy for one adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestPolicy {
    /// Minimum gap between request dispatches.
    pub min_request_interval: Duration,
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Backoff unit; retry `n` waits `retry_delay * n`.
    pub retry_delay: Duration,
    /// Bound on each attempt.
    pub request_timeout: Duration,
    /// User agent sent with each request.
    pub user_agent: String,
}

impl Default for RequestPolicy {
    fn default() -> Self {
        Self {
            min_request_interval: Duration::from_secs_f64(DEFAULT_MIN_REQUEST_INTERVAL),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_secs_f64(DEFAULT_RETRY_DELAY),
            request_timeout: Duration::from_secs_f64(DEFAULT_REQUEST_TIMEOUT),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl RequestPolicy {
    /// Builds a policy from configuration, applying defaults for missing keys.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, FetchError> {
        let defaults = Self::default();
        Ok(Self {
            min_request_interval: duration(config, keys::MIN_REQUEST_INTERVAL)?
                .unwrap_or(defaults.min_request_interval),
            max_retries: config
                .count(keys::MAX_RETRIES)?
                .unwrap_or(defaults.max_retries),
            retry_delay: duration(config, keys::RETRY_DELAY)?.unwrap_or(defaults.retry_delay),
            request_timeout: duration(config, keys::REQUEST_TIMEOUT)?
                .unwrap_or(defaults.request_timeout),
            user_agent: config
                .string(keys::USER_AGENT)?
                .map_or(defaults.user_agent, str::to_string),
        })
    }

    /// Upper bound on the wall time of one logical request.
    ///
    /// `timeout * (retries + 1) + retry_delay * retries * (retries + 1) / 2`,
    /// ignoring rate-limit waits. Hosts should poll less often than this.
    pub fn worst_case_duration(&self) -> Duration {
        let retries = self.max_retries;
        let backoff_units = retries.saturating_mul(retries.saturating_add(1)) / 2;
        self.request_timeout
            .saturating_mul(retries.saturating_add(1))
            .saturating_add(self.retry_delay.saturating_mul(backoff_units))
    }
}

fn duration(config: &ProviderConfig, key: &str) -> Result<Option<Duration>, FetchError> {
    config
        .seconds(key)?
        .map(|secs| {
            Duration::try_from_secs_f64(secs)
                .map_err(|e| FetchError::Config(format!("{key} out of range: {e}")))
        })
        .transpose()
}

// ============================================================================
// Tests
// ============================================================================
