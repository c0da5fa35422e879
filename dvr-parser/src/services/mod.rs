//! Service-specific parsers
//!
//! - [`content_directory`]: Browse responses of the ContentDirectory service
//! - [`device_description`]: UPnP root description documents
//!
//! ```rust
//! use dvr_parser::services::content_directory::BrowseListing;
//! use dvr_parser::services::device_description::DeviceDescription;
//! ```

pub mod content_directory;
pub mod device_description;
