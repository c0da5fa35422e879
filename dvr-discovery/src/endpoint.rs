//! The discovered media server endpoint.

use serde::Serialize;

/// A confirmed ContentDirectory endpoint on the recorder.
///
/// Holds everything later Browse calls need, so discovery runs once per
/// device session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentEndpoint {
    /// Host the description was fetched from
    pub host: String,
    /// Port whose description document matched a marker
    pub port: u16,
    /// Path of the matching description document
    pub description_path: String,
    /// Raw description document text
    #[serde(skip)]
    pub description: String,
    /// Absolute ContentDirectory control URL
    pub control_url: String,
    /// Friendly name from the description, when it parsed
    pub friendly_name: Option<String>,
}

impl ContentEndpoint {
    /// Base URL of the media server, e.g. "http://192.168.1.20:58888"
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
