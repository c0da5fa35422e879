//! # dvr-parser
//!
//! Tolerant parsing for the secondary (UPnP/DLNA) protocol spoken by the
//! recorder. Firmware revisions disagree on namespaces, whitespace and how many
//! times a listing is entity-escaped, so most of this crate scrapes the markup
//! with targeted patterns instead of deserializing it against a schema. A
//! malformed block is skipped, never fatal.
//!
//! ## Usage
//!
//! ### Top-level convenience access
//! ```rust
//! use dvr_parser::{BrowseListing, TitleMatch};
//!
//! let body = "<Result>&lt;DIDL-Lite&gt;&lt;item id=\"7\"&gt;&lt;dc:title&gt;News&lt;/dc:title&gt;\
//!             &lt;res protocolInfo=\"http-get:*:video/mpeg:*\"&gt;http://10.0.0.2/7.ts&lt;/res&gt;\
//!             &lt;/item&gt;&lt;/DIDL-Lite&gt;</Result>";
//! let listing = BrowseListing::from_response(body);
//! assert_eq!(listing.items[0].title, "News");
//! assert_eq!(TitleMatch::evaluate("News", "News"), Some(TitleMatch::Exact));
//! ```
//!
//! ### Service-specific access
//! ```rust
//! use dvr_parser::services::device_description::{
//!     content_directory_control_path, DeviceDescription,
//! };
//! ```

pub mod error;
pub mod common;
pub mod services;

// Re-export error types for convenient top-level access
pub use error::{ParseError, ParseResult};

// Re-export common utilities for convenient top-level access
pub use common::{Container, Item, Listing, Resource, TitleMatch};

pub use services::content_directory::BrowseListing;
pub use services::device_description::DeviceDescription;
