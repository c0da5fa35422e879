//! Configuration for a device session
//!
//! Collects every timeout, limit and port the session's components use, so
//! an application can tune them in one place.

use std::time::Duration;

use dvr_api::models::DEFAULT_QUALITY;
use dvr_api::DevicePorts;
use dvr_discovery::DiscoveryConfig;

use crate::error::SdkError;
use crate::playback::DEFAULT_STREAM_URL_TEMPLATE;
use crate::walker::{DEFAULT_MAX_DEPTH, DEFAULT_PAGE_SIZE};

/// Configuration for a [`DeviceSession`](crate::DeviceSession)
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Ports of the JSON API's functional areas
    /// Default: status 64210, schedule 64220
    pub ports: DevicePorts,

    /// Bound on each JSON API request
    /// Default: 5 seconds
    pub api_timeout: Duration,

    /// Media server probing
    /// Default: [`DiscoveryConfig::default`]
    pub discovery: DiscoveryConfig,

    /// Bound on each catalog `Browse` call
    /// Default: 10 seconds
    pub browse_timeout: Duration,

    /// `RequestedCount` of each `Browse` call
    /// Default: 200
    pub browse_page_size: u32,

    /// Deepest container level the catalog search descends to
    /// Default: 16
    pub max_depth: usize,

    /// Quality for reservations that do not name one
    /// Default: 100
    pub default_quality: u32,

    /// Fallback stream URL, with `{host}`, `{port}` and `{id}` placeholders
    /// Default: [`DEFAULT_STREAM_URL_TEMPLATE`]
    pub stream_url_template: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ports: DevicePorts::default(),
            api_timeout: Duration::from_secs(5),
            discovery: DiscoveryConfig::default(),
            browse_timeout: Duration::from_secs(10),
            browse_page_size: DEFAULT_PAGE_SIZE,
            max_depth: DEFAULT_MAX_DEPTH,
            default_quality: DEFAULT_QUALITY,
            stream_url_template: DEFAULT_STREAM_URL_TEMPLATE.to_string(),
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorter timeouts and only the canonical description path, for a
    /// recorder on the same wired LAN
    pub fn quick_probe() -> Self {
        Self {
            api_timeout: Duration::from_secs(2),
            discovery: DiscoveryConfig::default()
                .with_timeouts(Duration::from_secs(1), Duration::from_millis(500))
                .without_alternate_paths(),
            browse_timeout: Duration::from_secs(5),
            ..Default::default()
        }
    }

    /// Validate the configuration and return any issues
    pub fn validate(&self) -> Result<(), SdkError> {
        if self.browse_page_size == 0 {
            return Err(SdkError::Configuration(
                "Browse page size must be greater than 0".to_string(),
            ));
        }

        if self.max_depth == 0 {
            return Err(SdkError::Configuration(
                "Max depth must be greater than 0".to_string(),
            ));
        }

        if self.api_timeout == Duration::ZERO || self.browse_timeout == Duration::ZERO {
            return Err(SdkError::Configuration(
                "Timeouts must be greater than 0".to_string(),
            ));
        }

        if !self.stream_url_template.contains("{id}") {
            return Err(SdkError::Configuration(
                "Stream URL template must contain {id}".to_string(),
            ));
        }

        Ok(())
    }

    pub fn with_ports(mut self, ports: DevicePorts) -> Self {
        self.ports = ports;
        self
    }

    pub fn with_api_timeout(mut self, timeout: Duration) -> Self {
        self.api_timeout = timeout;
        self
    }

    pub fn with_discovery(mut self, discovery: DiscoveryConfig) -> Self {
        self.discovery = discovery;
        self
    }

    pub fn with_browse_timeout(mut self, timeout: Duration) -> Self {
        self.browse_timeout = timeout;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_default_quality(mut self, quality: u32) -> Self {
        self.default_quality = quality;
        self
    }

    pub fn with_stream_url_template(mut self, template: impl Into<String>) -> Self {
        self.stream_url_template = template.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.ports, DevicePorts::default());
        assert_eq!(config.api_timeout, Duration::from_secs(5));
        assert_eq!(config.browse_timeout, Duration::from_secs(10));
        assert_eq!(config.browse_page_size, 200);
        assert_eq!(config.max_depth, 16);
        assert_eq!(config.default_quality, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_quick_probe_preset() {
        let config = SessionConfig::quick_probe();
        assert!(config.discovery.alternate_paths.is_empty());
        assert!(config.api_timeout < SessionConfig::default().api_timeout);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let zero_page = SessionConfig {
            browse_page_size: 0,
            ..Default::default()
        };
        assert!(zero_page.validate().is_err());

        let no_depth = SessionConfig::default().with_max_depth(0);
        assert!(no_depth.validate().is_err());

        let no_id =
            SessionConfig::default().with_stream_url_template("http://{host}:{port}/stream");
        assert!(no_id.validate().is_err());

        let zero_timeout = SessionConfig::default().with_api_timeout(Duration::ZERO);
        assert!(zero_timeout.validate().is_err());
    }
}
