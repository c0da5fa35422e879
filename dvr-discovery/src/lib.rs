//! Media server discovery for network recorders
//!
//! Recorders ship a DLNA media server next to their JSON API, but do not
//! announce where it listens in a way the JSON API exposes. This crate probes
//! a fixed, likelihood-ordered list of ports and description-document paths
//! and confirms the service by marker strings in the fetched document.
//!
//! # Quick Start
//!
//! ```no_run
//! use dvr_discovery::{discover_content_endpoint, DiscoveryConfig};
//!
//! match discover_content_endpoint("192.168.1.20", &DiscoveryConfig::default()) {
//!     Some(endpoint) => println!("ContentDirectory at {}", endpoint.control_url),
//!     None => println!("no media server found"),
//! }
//! ```
//!
//! # Probe Plan
//!
//! For finer control, iterate the probes yourself:
//!
//! ```
//! use dvr_discovery::{DiscoveryConfig, ProbePlan};
//!
//! let config = DiscoveryConfig::default().with_ports(vec![58888]);
//! let first = ProbePlan::new(&config).next().unwrap();
//! assert_eq!(first.path, "/description.xml");
//! ```

mod error;
mod discovery;
mod endpoint;
pub mod control;

pub use error::{DiscoveryError, Result};
pub use discovery::{discover_content_endpoint, ProbePlan, ProbeTarget, Prober};
pub use endpoint::ContentEndpoint;

use std::time::Duration;

/// Candidate ports, most likely first.
pub const DEFAULT_CANDIDATE_PORTS: [u16; 6] = [58888, 60888, 55888, 50888, 2869, 8200];

/// Canonical description-document path tried on every port first.
pub const DEFAULT_DESCRIPTION_PATH: &str = "/description.xml";

/// Alternate description-document paths tried only after the canonical pass.
pub const DEFAULT_ALTERNATE_PATHS: [&str; 4] = [
    "/rootDesc.xml",
    "/DeviceDescription.xml",
    "/dms/description.xml",
    "/upnp/description.xml",
];

/// Substrings that confirm a content-sharing service in a description.
pub const DEFAULT_MARKERS: [&str; 2] = ["ContentDirectory", "MediaServer"];

/// Configuration for media server discovery.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Ports to probe, in priority order
    /// Default: [`DEFAULT_CANDIDATE_PORTS`]
    pub ports: Vec<u16>,

    /// Canonical description path
    /// Default: "/description.xml"
    pub primary_path: String,

    /// Alternate description paths, tried per port in a second pass
    pub alternate_paths: Vec<String>,

    /// Timeout for canonical-path probes
    /// Default: 3 seconds
    pub primary_timeout: Duration,

    /// Timeout for alternate-path probes
    /// Default: 2 seconds
    pub alternate_timeout: Duration,

    /// Marker substrings; any one of them confirms the service
    pub markers: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            ports: DEFAULT_CANDIDATE_PORTS.to_vec(),
            primary_path: DEFAULT_DESCRIPTION_PATH.to_string(),
            alternate_paths: DEFAULT_ALTERNATE_PATHS.iter().map(|p| p.to_string()).collect(),
            primary_timeout: Duration::from_secs(3),
            alternate_timeout: Duration::from_secs(2),
            markers: DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl DiscoveryConfig {
    /// Create a DiscoveryConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the candidate port list
    pub fn with_ports(mut self, ports: Vec<u16>) -> Self {
        self.ports = ports;
        self
    }

    /// Replace both probe timeouts
    pub fn with_timeouts(mut self, primary: Duration, alternate: Duration) -> Self {
        self.primary_timeout = primary;
        self.alternate_timeout = alternate;
        self
    }

    /// Skip the alternate-path pass entirely
    pub fn without_alternate_paths(mut self) -> Self {
        self.alternate_paths.clear();
        self
    }
}
