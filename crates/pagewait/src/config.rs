// Wait options - timeout and polling interval for condition waits
//
// Sources, lowest to highest precedence:
// - built-in defaults (DEFAULT_WAIT_TIMEOUT, DEFAULT_POLL_INTERVAL)
// - a JSON file / string (`timeout_ms`, `poll_interval_ms`)
// - environment variables (PAGEWAIT_TIMEOUT_MS, PAGEWAIT_POLL_INTERVAL_MS)
// - explicit per-call timeouts

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default time a wait may take before failing (10 seconds).
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default interval between condition checks (100ms).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Environment variable overriding the wait timeout, in milliseconds.
pub const TIMEOUT_ENV: &str = "PAGEWAIT_TIMEOUT_MS";

/// Environment variable overriding the poll interval, in milliseconds.
pub const POLL_INTERVAL_ENV: &str = "PAGEWAIT_POLL_INTERVAL_MS";

/// Timing options for condition waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitOptions {
    /// Maximum time to wait for a condition
    #[serde(rename = "timeout_ms", with = "duration_ms")]
    pub timeout: Duration,

    /// Time between condition checks
    #[serde(rename = "poll_interval_ms", with = "duration_ms")]
    pub poll_interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_WAIT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl WaitOptions {
    /// Creates options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wait timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Defaults, overridden by `PAGEWAIT_TIMEOUT_MS` / `PAGEWAIT_POLL_INTERVAL_MS` when set.
    pub fn from_env() -> Result<Self> {
        Self::default().merge_env()
    }

    /// Applies environment overrides on top of these options.
    pub fn merge_env(self) -> Result<Self> {
        self.merge_vars(|name| std::env::var(name).ok())
    }

    fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(ms) = lookup(TIMEOUT_ENV) {
            self.timeout = parse_millis(TIMEOUT_ENV, &ms)?;
        }
        if let Some(ms) = lookup(POLL_INTERVAL_ENV) {
            self.poll_interval = parse_millis(POLL_INTERVAL_ENV, &ms)?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Parses options from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: WaitOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Reads options from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::from(e).context(format!("reading {}", path.display())))?;
        Self::from_json_str(&contents).map_err(|e| e.context(format!("parsing {}", path.display())))
    }

    /// Checks that the options can drive a poll loop.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval.is_zero() {
            return Err(Error::Config("poll interval must be greater than zero".to_string()));
        }
        Ok(())
    }
}

fn parse_millis(name: &str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| {
            Error::Config(format!("{} must be milliseconds, got '{}': {}", name, value, e))
        })
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let options = WaitOptions::new();
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert_eq!(options.poll_interval, Duration::from_millis(100));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let options = WaitOptions::new()
            .with_timeout(Duration::from_secs(5))
            .with_poll_interval(Duration::from_millis(50));
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(options.poll_interval, Duration::from_millis(50));
    }

    #[test]
    fn test_env_overrides() {
        let options = WaitOptions::new()
            .merge_vars(vars(&[(TIMEOUT_ENV, "2500"), (POLL_INTERVAL_ENV, " 20 ")]))
            .unwrap();
        assert_eq!(options.timeout, Duration::from_millis(2500));
        assert_eq!(options.poll_interval, Duration::from_millis(20));

        let untouched = WaitOptions::new().merge_vars(vars(&[])).unwrap();
        assert_eq!(untouched, WaitOptions::default());
    }

    #[test]
    fn test_env_rejects_garbage() {
        let err = WaitOptions::new()
            .merge_vars(vars(&[(TIMEOUT_ENV, "five seconds")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains(TIMEOUT_ENV));

        let err = WaitOptions::new()
            .merge_vars(vars(&[(POLL_INTERVAL_ENV, "0")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_json_partial_and_full() {
        let partial = WaitOptions::from_json_str(r#"{"timeout_ms": 5000}"#).unwrap();
        assert_eq!(partial.timeout, Duration::from_secs(5));
        assert_eq!(partial.poll_interval, DEFAULT_POLL_INTERVAL);

        let json = serde_json::to_value(WaitOptions::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"timeout_ms": 10000, "poll_interval_ms": 100})
        );
    }

    #[test]
    fn test_json_errors() {
        assert!(matches!(
            WaitOptions::from_json_str("{not json"),
            Err(Error::Json(_))
        ));
        assert!(matches!(
            WaitOptions::from_json_str(r#"{"poll_interval_ms": 0}"#),
            Err(Error::Config(_))
        ));
    }
}
