//! Common utilities shared by the service parsers
//!
//! - [`xml_decode`]: entity decoding and serde entry point
//! - [`didl`]: pattern-based DIDL-Lite scraping (containers, items, resources)
//! - [`title`]: fuzzy title acceptance rules

pub mod xml_decode;
pub mod didl;
pub mod title;

pub use didl::{Container, Item, Listing, Resource};
pub use title::TitleMatch;
