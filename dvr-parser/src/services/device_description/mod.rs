//! UPnP root description parsing.
//!
//! Two views of the same document are offered: a serde-backed
//! [`DeviceDescription`] for the identifying fields, and pattern-based
//! extraction of the ContentDirectory control path, because the service list
//! is where firmware revisions differ the most.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::common::xml_decode::{self, decode_entities};
use crate::error::ParseResult;

static SERVICE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<(?:[\w-]+:)?service\b[^>]*>(.*?)</(?:[\w-]+:)?service>")
        .expect("service pattern is valid")
});

static CONTROL_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<(?:[\w-]+:)?controlURL\b[^>]*>\s*(.*?)\s*</(?:[\w-]+:)?controlURL>")
        .expect("controlURL pattern is valid")
});

/// UPnP device description root element.
#[derive(Debug, Deserialize)]
struct Root {
    device: DeviceDescription,
}

/// Identifying fields of the root device.
///
/// Every field is optional: media servers built into recorders routinely
/// omit some of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDescription {
    #[serde(default)]
    pub device_type: Option<String>,
    #[serde(default)]
    pub friendly_name: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(rename = "UDN", default)]
    pub udn: Option<String>,
}

impl DeviceDescription {
    /// Parse the root device from a description document.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::XmlDeserializationFailed` if the XML is malformed
    /// or has no `<device>` element.
    pub fn from_xml(xml: &str) -> ParseResult<Self> {
        let root: Root = xml_decode::parse(xml)?;
        Ok(root.device)
    }

    /// True when the root device declares itself a MediaServer.
    pub fn is_media_server(&self) -> bool {
        self.device_type
            .as_deref()
            .map(|t| t.contains("MediaServer"))
            .unwrap_or(false)
    }
}

/// True when the document contains any of the marker substrings.
pub fn contains_marker(document: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| document.contains(marker))
}

/// Extract the control path of the ContentDirectory service.
///
/// Returns the text of the `<controlURL>` element inside the first
/// `<service>` block that mentions `ContentDirectory`, entity-decoded and
/// trimmed. `None` when there is no such block or it has no (or an empty)
/// control element.
pub fn content_directory_control_path(document: &str) -> Option<String> {
    let block = SERVICE_BLOCK
        .captures_iter(document)
        .filter_map(|caps| caps.get(1))
        .map(|body| body.as_str())
        .find(|body| body.contains("ContentDirectory"))?;

    let raw = CONTROL_URL.captures(block)?.get(1)?.as_str();
    let path = decode_entities(raw).trim().to_string();
    if path.is_empty() {
        None
    } else {
        Some(path)
    }
}
