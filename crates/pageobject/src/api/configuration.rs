// Configuration for root scopes
//
// Wait settings used by expectations created from UI objects, the selector
// every root locator starts from, and an optional url overriding the
// root's own.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default wait timeout (5 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 5_000;

/// Default polling interval (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Default root selector
pub const DEFAULT_ROOT_SELECTOR: &str = "html";

/// Options shared by every object of a root scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    /// Selector of the root locator (default: `html`)
    pub root_selector: String,

    /// Timeout for expectations in milliseconds
    pub wait_timeout_ms: u64,

    /// Polling interval for expectations in milliseconds
    pub poll_interval_ms: u64,

    /// Url opened on `open()`, overriding the root's own url
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            root_selector: DEFAULT_ROOT_SELECTOR.to_string(),
            wait_timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            url: None,
        }
    }
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn root_selector(mut self, selector: impl Into<String>) -> Self {
        self.root_selector = selector.into();
        self
    }

    pub fn wait_timeout_duration(mut self, timeout: Duration) -> Self {
        self.wait_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn poll_interval_duration(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let configuration = Configuration::default();
        assert_eq!(configuration.root_selector, "html");
        assert_eq!(configuration.wait_timeout(), Duration::from_secs(5));
        assert_eq!(configuration.poll_interval(), Duration::from_millis(100));
        assert!(configuration.url.is_none());
    }

    #[test]
    fn test_builder() {
        let configuration = Configuration::new()
            .root_selector("#app")
            .wait_timeout_duration(Duration::from_secs(2))
            .poll_interval_duration(Duration::from_millis(20))
            .url("https://example.com");
        assert_eq!(configuration.root_selector, "#app");
        assert_eq!(configuration.wait_timeout_ms, 2_000);
        assert_eq!(configuration.poll_interval_ms, 20);
        assert_eq!(configuration.url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let configuration =
            Configuration::from_json(r#"{"rootSelector":"body","waitTimeoutMs":250}"#)
                .expect("valid configuration");
        assert_eq!(configuration.root_selector, "body");
        assert_eq!(configuration.wait_timeout_ms, 250);
        assert_eq!(configuration.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);

        assert!(Configuration::from_json("{\"waitTimeoutMs\":\"soon\"}").is_err());
    }
}
