use thiserror::Error;

/// Errors raised by the recorder's JSON API
///
/// Only transport-level problems are hard errors. Responses that arrive but do
/// not contain what a caller looked for are reported as `None` by the
/// operations themselves.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The device could not be reached or answered with a non-success status
    ///
    /// Covers connection refusals, DNS failures, timeouts and HTTP error
    /// statuses. `status` is set when the device answered at all.
    #[error("Device unreachable: {message}")]
    DeviceUnreachable {
        status: Option<u16>,
        message: String,
    },

    /// The device answered with a body that is not JSON
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A request was rejected before being sent
    ///
    /// Returned when a reservation lacks the fields the device needs to
    /// schedule it, or a request URL cannot be built.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl ApiError {
    /// Build an unreachable error for a transport failure with no HTTP status
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::DeviceUnreachable {
            status: None,
            message: message.into(),
        }
    }

    /// HTTP status the device answered with, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::DeviceUnreachable { status, .. } => *status,
            _ => None,
        }
    }
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::DeviceUnreachable {
            status: Some(503),
            message: "HTTP 503 from status/boxStatusListGet".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Device unreachable: HTTP 503 from status/boxStatusListGet"
        );
        assert_eq!(err.status(), Some(503));

        let parse_err = ApiError::ParseError("expected value".to_string());
        assert_eq!(format!("{}", parse_err), "Parse error: expected value");

        let invalid = ApiError::InvalidParameter("title is required".to_string());
        assert_eq!(format!("{}", invalid), "Invalid parameter: title is required");
        assert_eq!(invalid.status(), None);
    }

    #[test]
    fn test_unreachable_has_no_status() {
        let err = ApiError::unreachable("connection refused");
        assert!(matches!(err, ApiError::DeviceUnreachable { status: None, .. }));
    }
}
