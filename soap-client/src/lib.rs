//! Private SOAP client for UPnP ContentDirectory communication
//!
//! This crate provides a minimal SOAP client for invoking actions on the
//! control URL a recorder advertises in its UPnP description document. The
//! response body is handed back as text: recorder firmware wraps its listings
//! in entity-escaped markup that is scraped further up the stack.

mod error;

pub use error::SoapError;

use std::time::Duration;
use tracing::{debug, warn};
use xmltree::Element;

/// A minimal SOAP client for UPnP device communication
#[derive(Debug, Clone)]
pub struct SoapClient {
    agent: ureq::Agent,
}

impl SoapClient {
    /// Create a new SOAP client with default configuration
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(Duration::from_secs(5))
                .timeout_read(Duration::from_secs(10))
                .build(),
        }
    }

    /// Create a SOAP client whose whole request is bounded by `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    /// Send a SOAP request to an absolute control URL and return the raw body
    ///
    /// # Arguments
    /// * `control_url` - Absolute control URL (e.g. "http://192.168.1.20:58888/ContentDirectory/control")
    /// * `service_uri` - Service type, used in the envelope and the SOAPACTION header
    /// * `action` - Action name (e.g. "Browse")
    /// * `payload` - Pre-built argument elements, see [`build_arguments`]
    pub fn call(
        &self,
        control_url: &str,
        service_uri: &str,
        action: &str,
        payload: &str,
    ) -> Result<String, SoapError> {
        let body = format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/">
    <s:Body>
        <u:{action} xmlns:u="{service_uri}">
            {payload}
        </u:{action}>
    </s:Body>
</s:Envelope>"#,
            action = action,
            service_uri = service_uri,
            payload = payload
        );

        let soap_action = format!("\"{}#{}\"", service_uri, action);
        debug!(control_url, action, "sending SOAP request");

        let response = self
            .agent
            .post(control_url)
            .set("Content-Type", "text/xml; charset=\"utf-8\"")
            .set("SOAPACTION", &soap_action)
            .send_string(&body);

        match response {
            Ok(response) => response
                .into_string()
                .map_err(|e| SoapError::Network(e.to_string())),
            Err(ureq::Error::Status(status, response)) => {
                // UPnP reports faults as HTTP 500 with a Fault body
                let text = response.into_string().unwrap_or_default();
                match fault_code(&text) {
                    Some(code) => {
                        warn!(control_url, action, code, "SOAP fault");
                        Err(SoapError::Fault(code))
                    }
                    None => Err(SoapError::Network(format!(
                        "{} failed: HTTP {}",
                        action, status
                    ))),
                }
            }
            Err(e) => Err(SoapError::Network(e.to_string())),
        }
    }
}

impl Default for SoapClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the argument elements of a SOAP action, escaping every value
///
/// ```
/// let payload = soap_client::build_arguments(&[("ObjectID", "0"), ("Filter", "*")]);
/// assert_eq!(payload, "<ObjectID>0</ObjectID><Filter>*</Filter>");
/// ```
pub fn build_arguments(args: &[(&str, &str)]) -> String {
    args.iter()
        .map(|(name, value)| format!("<{name}>{}</{name}>", escape_text(value)))
        .collect()
}

fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Extract the UPnP error code from a SOAP fault body.
///
/// Returns `None` when the body is not a SOAP envelope or carries no fault.
/// A fault without a parsable `errorCode` maps to 500.
pub fn fault_code(body: &str) -> Option<u16> {
    let xml = Element::parse(body.as_bytes()).ok()?;
    let fault = xml.get_child("Body")?.get_child("Fault")?;

    let code = fault
        .get_child("detail")
        .and_then(|d| d.get_child("UPnPError").or_else(|| d.get_child("UpnPError")))
        .and_then(|e| e.get_child("errorCode"))
        .and_then(|c| c.get_text())
        .and_then(|t| t.trim().parse::<u16>().ok())
        .unwrap_or(500);
    Some(code)
}
