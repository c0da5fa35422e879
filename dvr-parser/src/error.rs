//! Error types for structured XML parsing

use thiserror::Error;

/// Errors that can occur when a document is deserialized against a schema.
///
/// Pattern-based scraping never produces these; only the serde-backed
/// description parser does.
#[derive(Error, Debug)]
pub enum ParseError {
    /// XML deserialization failed
    #[error("XML deserialization failed: {0}")]
    XmlDeserializationFailed(String),
}

/// Result type alias for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
