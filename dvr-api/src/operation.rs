use serde_json::Value;

use crate::error::Result;
use crate::service::Service;
use crate::transport::Params;

/// Base trait for all recorder API operations
///
/// Each operation is a unit type naming a request path, the typed request it
/// accepts and the typed response it produces. [`DvrClient::execute`]
/// handles the transport in between.
///
/// [`DvrClient::execute`]: crate::DvrClient::execute
pub trait DeviceOperation {
    /// The request type for this operation
    type Request;

    /// The response type for this operation
    type Response;

    /// Request path, relative to the area's port (e.g. "status/boxStatusListGet")
    const PATH: &'static str;

    /// Build the query parameters from the request data
    ///
    /// Fails with [`ApiError::InvalidParameter`](crate::ApiError::InvalidParameter)
    /// when the request cannot be sent as given.
    fn params(request: &Self::Request) -> Result<Params>;

    /// Convert the decoded JSON body into the typed response
    ///
    /// An empty body arrives as [`Value::Null`].
    fn parse_response(body: Value) -> Result<Self::Response>;

    /// Functional area this operation belongs to
    fn service() -> Option<Service> {
        Service::from_path(Self::PATH)
    }
}
