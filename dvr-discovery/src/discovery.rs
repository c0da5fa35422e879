//! Core probing logic.
//!
//! The probe order is:
//! 1. the canonical description path on every candidate port (longer timeout)
//! 2. every alternate path on every candidate port (shorter timeout)
//!
//! The first document containing a marker wins; nothing after it is fetched.

use std::time::Duration;

use dvr_parser::services::device_description::contains_marker;
use dvr_parser::DeviceDescription;
use tracing::{debug, info, warn};

use crate::control::resolve_control_url;
use crate::error::{DiscoveryError, Result};
use crate::{ContentEndpoint, DiscoveryConfig};

/// One description-document fetch to attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    pub port: u16,
    pub path: String,
    pub timeout: Duration,
}

impl ProbeTarget {
    /// Absolute URL of the document on `host`
    pub fn url(&self, host: &str) -> String {
        format!("http://{}:{}{}", host, self.port, self.path)
    }
}

/// Iterator over the probes of a [`DiscoveryConfig`], in priority order.
pub struct ProbePlan {
    targets: std::vec::IntoIter<ProbeTarget>,
}

impl ProbePlan {
    pub fn new(config: &DiscoveryConfig) -> Self {
        let primary = config.ports.iter().map(|&port| ProbeTarget {
            port,
            path: config.primary_path.clone(),
            timeout: config.primary_timeout,
        });

        let alternates = config.ports.iter().flat_map(|&port| {
            config.alternate_paths.iter().map(move |path| ProbeTarget {
                port,
                path: path.clone(),
                timeout: config.alternate_timeout,
            })
        });

        let targets: Vec<ProbeTarget> = primary.chain(alternates).collect();
        Self {
            targets: targets.into_iter(),
        }
    }
}

impl Iterator for ProbePlan {
    type Item = ProbeTarget;

    fn next(&mut self) -> Option<Self::Item> {
        self.targets.next()
    }
}

/// Fetches description documents over HTTP.
#[derive(Debug, Clone)]
pub struct Prober {
    http_client: reqwest::blocking::Client,
}

impl Prober {
    /// Create a prober with its own HTTP client
    pub fn new() -> Result<Self> {
        let http_client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| {
                DiscoveryError::NetworkError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { http_client })
    }

    /// Fetch a description document, bounded by the target's timeout
    pub fn fetch(&self, host: &str, target: &ProbeTarget) -> Result<String> {
        let response = self
            .http_client
            .get(target.url(host))
            .timeout(target.timeout)
            .send()
            .map_err(|e| {
                DiscoveryError::NetworkError(format!("Failed to fetch description: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DiscoveryError::HttpStatus(status.as_u16()));
        }

        response
            .text()
            .map_err(|e| {
                DiscoveryError::NetworkError(format!("Failed to read response body: {}", e))
            })
    }

    /// Fetch a document and confirm it advertises a content-sharing service
    pub fn probe(&self, host: &str, target: &ProbeTarget, markers: &[&str]) -> Result<String> {
        let document = self.fetch(host, target)?;
        if contains_marker(&document, markers) {
            Ok(document)
        } else {
            Err(DiscoveryError::MarkerMissing)
        }
    }

    /// Run the probe plan against `host`; first confirmed document wins.
    pub fn discover(&self, host: &str, config: &DiscoveryConfig) -> Option<ContentEndpoint> {
        let markers: Vec<&str> = config.markers.iter().map(String::as_str).collect();

        for target in ProbePlan::new(config) {
            match self.probe(host, &target, &markers) {
                Ok(description) => {
                    let endpoint = build_endpoint(host, &target, description);
                    info!(
                        host,
                        port = endpoint.port,
                        control_url = %endpoint.control_url,
                        "media server found"
                    );
                    return Some(endpoint);
                }
                Err(e) => {
                    debug!(
                        host,
                        port = target.port,
                        path = %target.path,
                        error = %e,
                        "probe failed"
                    );
                }
            }
        }

        debug!(host, "no media server answered on any candidate port");
        None
    }
}

fn build_endpoint(host: &str, target: &ProbeTarget, description: String) -> ContentEndpoint {
    let device = DeviceDescription::from_xml(&description).ok();
    if let Some(device) = device.as_ref().filter(|device| !device.is_media_server()) {
        debug!(
            device_type = device.device_type.as_deref().unwrap_or("unknown"),
            "marker matched on a root device that is not a MediaServer"
        );
    }
    let friendly_name = device.and_then(|device| device.friendly_name);

    ContentEndpoint {
        host: host.to_string(),
        port: target.port,
        description_path: target.path.clone(),
        control_url: resolve_control_url(&description, host, target.port),
        description,
        friendly_name,
    }
}

/// Locate the recorder's media server with a fresh [`Prober`].
///
/// Never fails: every error is logged and `None` means no endpoint was found.
pub fn discover_content_endpoint(host: &str, config: &DiscoveryConfig) -> Option<ContentEndpoint> {
    match Prober::new() {
        Ok(prober) => prober.discover(host, config),
        Err(e) => {
            warn!(error = %e, "cannot probe for media server");
            None
        }
    }
}
