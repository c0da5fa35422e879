//! Error types for a single probe.
//!
//! These never escape [`crate::discover_content_endpoint`]; they exist so each
//! failed probe can be logged with its cause before the next one is tried.

use std::fmt;

/// Why one description-document probe did not yield an endpoint.
#[derive(Debug)]
pub enum DiscoveryError {
    /// Connection refused, timed out, or the body could not be read
    NetworkError(String),
    /// The server answered with a non-success status
    HttpStatus(u16),
    /// The document was fetched but contains none of the markers
    MarkerMissing,
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            DiscoveryError::HttpStatus(code) => write!(f, "HTTP status {}", code),
            DiscoveryError::MarkerMissing => write!(f, "No content-sharing marker in document"),
        }
    }
}

impl std::error::Error for DiscoveryError {}

/// Convenience Result type alias for probe operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
