//! Pattern-based DIDL-Lite scraping.
//!
//! A ContentDirectory listing looks like:
//! ```xml
//! <DIDL-Lite xmlns:dc="http://purl.org/dc/elements/1.1/" ...>
//!   <container id="12" parentID="0" restricted="1">
//!     <dc:title>Recorded</dc:title>
//!   </container>
//!   <item id="12$3" parentID="12" restricted="1">
//!     <dc:title>Evening News</dc:title>
//!     <res protocolInfo="http-get:*:video/mpeg:DLNA.ORG_PN=MPEG_TS_JP_T">http://192.168.1.20:64220/dlna/3.ts</res>
//!   </item>
//! </DIDL-Lite>
//! ```
//!
//! Recorder firmware is not strict about namespaces or attribute quoting, so
//! the blocks are located with regular expressions rather than a schema. A
//! block that lacks what it needs is dropped; the rest of the level survives.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::common::xml_decode::decode_entities;

static CONTAINER_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<(?:[\w-]+:)?container\b([^>]*)>(.*?)</(?:[\w-]+:)?container>")
        .expect("container pattern is valid")
});

static ITEM_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<(?:[\w-]+:)?item\b([^>]*)>(.*?)</(?:[\w-]+:)?item>")
        .expect("item pattern is valid")
});

static RES_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<(?:[\w-]+:)?res\b([^>]*)>(.*?)</(?:[\w-]+:)?res>")
        .expect("res pattern is valid")
});

static TITLE_ELEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<(?:[\w-]+:)?title\b[^>]*>(.*?)</(?:[\w-]+:)?title>")
        .expect("title pattern is valid")
});

static ID_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:^|\s)id\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("id pattern is valid")
});

static PROTOCOL_INFO_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"protocolInfo\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("protocolInfo pattern is valid")
});

/// A playable stream reference attached to an item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Resource {
    /// The resource URL, exactly as advertised (after entity decoding)
    pub url: String,

    /// The `protocolInfo` descriptor, e.g. `http-get:*:video/mpeg:*`.
    /// Empty when the device omitted it.
    pub protocol_info: String,
}

impl Resource {
    /// True when either the descriptor or the URL mentions video content.
    pub fn is_video(&self) -> bool {
        self.protocol_info.to_ascii_lowercase().contains("video")
            || self.url.to_ascii_lowercase().contains("video")
    }
}

/// A browsable folder in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub id: String,
    pub title: String,
}

/// A playable entry in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: Option<String>,
    pub title: String,
    /// Resources in document order
    pub resources: Vec<Resource>,
}

impl Item {
    /// The first video resource, or the first resource when none is video.
    pub fn preferred_resource(&self) -> Option<&Resource> {
        self.resources
            .iter()
            .find(|res| res.is_video())
            .or_else(|| self.resources.first())
    }
}

/// The containers and items found at one level of the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub containers: Vec<Container>,
    pub items: Vec<Item>,
}

impl Listing {
    /// Scrape already-unescaped DIDL-Lite markup.
    ///
    /// Containers without an id and items without a title are skipped.
    pub fn scrape(markup: &str) -> Self {
        let containers = CONTAINER_BLOCK
            .captures_iter(markup)
            .filter_map(|caps| {
                let id = attribute(&ID_ATTRIBUTE, caps.get(1)?.as_str())?;
                let title = caps.get(2).and_then(|body| title_of(body.as_str()));
                Some(Container {
                    id,
                    title: title.unwrap_or_default(),
                })
            })
            .collect();

        let items = ITEM_BLOCK
            .captures_iter(markup)
            .filter_map(|caps| {
                let body = caps.get(2)?.as_str();
                let title = title_of(body)?;
                let id = caps
                    .get(1)
                    .and_then(|attrs| attribute(&ID_ATTRIBUTE, attrs.as_str()));
                Some(Item {
                    id,
                    title,
                    resources: resources_of(body),
                })
            })
            .collect();

        Self { containers, items }
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty() && self.items.is_empty()
    }
}

fn attribute(pattern: &Regex, attrs: &str) -> Option<String> {
    let caps = pattern.captures(attrs)?;
    let value = caps.get(1).or_else(|| caps.get(2))?.as_str();
    Some(decode_entities(value).into_owned())
}

fn title_of(body: &str) -> Option<String> {
    let raw = TITLE_ELEMENT.captures(body)?.get(1)?.as_str();
    let title = decode_entities(raw.trim()).into_owned();
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

fn resources_of(body: &str) -> Vec<Resource> {
    RES_BLOCK
        .captures_iter(body)
        .filter_map(|caps| {
            let url = decode_entities(caps.get(2)?.as_str().trim()).into_owned();
            if url.is_empty() {
                return None;
            }
            let protocol_info = caps
                .get(1)
                .and_then(|attrs| attribute(&PROTOCOL_INFO_ATTRIBUTE, attrs.as_str()))
                .unwrap_or_default();
            Some(Resource { url, protocol_info })
        })
        .collect()
}
