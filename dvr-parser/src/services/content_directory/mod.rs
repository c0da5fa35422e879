//! ContentDirectory `Browse` response parsing.
//!
//! The response is a SOAP envelope whose `Result` element holds the DIDL-Lite
//! listing as escaped text:
//! ```xml
//! <s:Envelope ...><s:Body><u:BrowseResponse ...>
//!   <Result>&lt;DIDL-Lite ...&gt;&lt;container id="1"&gt;...</Result>
//!   <NumberReturned>1</NumberReturned>
//!   <TotalMatches>1</TotalMatches>
//! </u:BrowseResponse></s:Body></s:Envelope>
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::common::didl::{Container, Item, Listing};
use crate::common::xml_decode::unescape_markup;

/// Service type of the ContentDirectory service.
pub const SERVICE_URI: &str = "urn:schemas-upnp-org:service:ContentDirectory:1";

static NUMBER_RETURNED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(?:[\w-]+:)?NumberReturned\b[^>]*>\s*(\d+)\s*<")
        .expect("NumberReturned pattern is valid")
});

static TOTAL_MATCHES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(?:[\w-]+:)?TotalMatches\b[^>]*>\s*(\d+)\s*<")
        .expect("TotalMatches pattern is valid")
});

/// One level of the catalog as returned by a `Browse` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseListing {
    pub containers: Vec<Container>,
    pub items: Vec<Item>,
    /// `NumberReturned` when the device reported it
    pub number_returned: Option<u32>,
    /// `TotalMatches` when the device reported it
    pub total_matches: Option<u32>,
}

impl BrowseListing {
    /// Decode and scrape a raw `Browse` response body.
    ///
    /// Never fails: an unrecognisable body yields an empty listing.
    pub fn from_response(body: &str) -> Self {
        let markup = unescape_markup(body);
        let Listing { containers, items } = Listing::scrape(&markup);

        Self {
            containers,
            items,
            number_returned: count(&NUMBER_RETURNED, &markup),
            total_matches: count(&TOTAL_MATCHES, &markup),
        }
    }

    /// True when the device holds more children than it returned.
    pub fn is_truncated(&self) -> bool {
        match (self.number_returned, self.total_matches) {
            (Some(returned), Some(total)) => total > returned,
            _ => false,
        }
    }
}

fn count(pattern: &Regex, markup: &str) -> Option<u32> {
    pattern.captures(markup)?.get(1)?.as_str().parse().ok()
}
