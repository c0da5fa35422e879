//! JSON-over-HTTP transport for the recorder's control API.
//!
//! Every call is a GET with query-string parameters. The port is picked from
//! the first path segment (see [`DevicePorts`](crate::DevicePorts)), and the
//! body is decoded as JSON.

use std::time::Duration;

use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{ApiError, Result};
use crate::service::DeviceEndpoint;

/// Default bound on a whole API request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Ordered query parameters for one request.
///
/// Absent optional values are dropped when added, so they never reach the
/// query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, stringified verbatim
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    /// Add a parameter only when it has a value
    pub fn with_opt<V: ToString>(mut self, key: &str, value: Option<V>) -> Self {
        self.push_opt(key, value);
        self
    }

    pub fn push(&mut self, key: &str, value: impl ToString) {
        self.pairs.push((key.to_string(), value.to_string()));
    }

    pub fn push_opt<V: ToString>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// First value stored under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K: AsRef<str>, V: ToString> FromIterator<(K, Option<V>)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.push_opt(key.as_ref(), value);
        }
        params
    }
}

/// A request before it is sent: path relative to the area's port, plus
/// parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub path: String,
    pub params: Params,
}

impl RequestDescriptor {
    pub fn new(path: impl Into<String>, params: Params) -> Self {
        Self {
            path: path.into(),
            params,
        }
    }

    /// Absolute request URL on `endpoint`, with percent-encoded parameters
    pub fn url(&self, endpoint: &DeviceEndpoint) -> Result<Url> {
        let path = self.path.trim_start_matches('/');
        let port = endpoint.port_for_path(path);

        let mut url = Url::parse(&format!("http://{}:{}/{}", endpoint.host(), port, path))
            .map_err(|e| {
                ApiError::InvalidParameter(format!("Cannot build URL for '{}': {}", path, e))
            })?;

        if !self.params.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in self.params.iter() {
                query.append_pair(key, value);
            }
        }

        Ok(url)
    }
}

/// Sends requests to one device.
#[derive(Debug, Clone)]
pub struct Transport {
    endpoint: DeviceEndpoint,
    agent: ureq::Agent,
}

impl Transport {
    /// Transport with the default 5 second timeout
    pub fn new(endpoint: DeviceEndpoint) -> Self {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(endpoint: DeviceEndpoint, timeout: Duration) -> Self {
        Self {
            endpoint,
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    pub fn endpoint(&self) -> &DeviceEndpoint {
        &self.endpoint
    }

    /// GET `path` with `params` and decode the JSON body
    ///
    /// An empty success body decodes to [`Value::Null`].
    pub fn request(&self, path: &str, params: &Params) -> Result<Value> {
        self.send(&RequestDescriptor::new(path, params.clone()))
    }

    pub fn send(&self, descriptor: &RequestDescriptor) -> Result<Value> {
        let url = descriptor.url(&self.endpoint)?;
        debug!(
            path = %descriptor.path,
            port = url.port().unwrap_or_default(),
            "sending API request"
        );

        let response = match self.agent.get(url.as_str()).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, _)) => {
                return Err(ApiError::DeviceUnreachable {
                    status: Some(status),
                    message: format!("HTTP {} from {}", status, descriptor.path),
                });
            }
            Err(e) => return Err(ApiError::unreachable(e.to_string())),
        };

        let body = response
            .into_string()
            .map_err(|e| ApiError::unreachable(format!("Failed to read response body: {}", e)))?;

        decode_body(&body)
    }
}

fn decode_body(body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| ApiError::ParseError(e.to_string()))
}
