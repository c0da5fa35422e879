//! Content catalog search.
//!
//! The media server exposes recordings as a tree of containers and items.
//! [`ContentTreeWalker`] searches it depth-first for an item whose title
//! matches a recording title, one `Browse` call per container, and returns
//! the item's preferred resource. The walk is bounded by a depth limit and a
//! visited set, so a catalog that lists a container inside itself still
//! terminates.

use std::collections::HashSet;
use std::time::Duration;

use dvr_parser::services::content_directory::SERVICE_URI;
use dvr_parser::{BrowseListing, Item, Listing, Resource, TitleMatch};
use soap_client::{build_arguments, SoapClient, SoapError};
use tracing::{debug, info};

/// Object id of the catalog root
pub const ROOT_OBJECT_ID: &str = "0";

/// Default `RequestedCount` for one `Browse` call
pub const DEFAULT_PAGE_SIZE: u32 = 200;

/// Default depth limit below the root
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Source of catalog listings.
///
/// Returns the containers and items directly below `object_id`, or `None`
/// when the level could not be fetched.
pub trait BrowseSource {
    fn browse_children(&self, object_id: &str) -> Option<Listing>;
}

impl<S: BrowseSource + ?Sized> BrowseSource for &S {
    fn browse_children(&self, object_id: &str) -> Option<Listing> {
        (**self).browse_children(object_id)
    }
}

/// [`BrowseSource`] backed by ContentDirectory `Browse` calls.
#[derive(Debug, Clone)]
pub struct ContentDirectoryBrowser {
    soap_client: SoapClient,
    control_url: String,
    page_size: u32,
}

impl ContentDirectoryBrowser {
    pub fn new(control_url: impl Into<String>, timeout: Duration, page_size: u32) -> Self {
        Self {
            soap_client: SoapClient::with_timeout(timeout),
            control_url: control_url.into(),
            page_size,
        }
    }

    /// One `BrowseDirectChildren` call, decoded and scraped
    pub fn browse(&self, object_id: &str) -> Result<BrowseListing, SoapError> {
        let requested_count = self.page_size.to_string();
        let payload = build_arguments(&[
            ("ObjectID", object_id),
            ("BrowseFlag", "BrowseDirectChildren"),
            ("Filter", "*"),
            ("StartingIndex", "0"),
            ("RequestedCount", &requested_count),
            ("SortCriteria", ""),
        ]);

        let body = self.soap_client.call(&self.control_url, SERVICE_URI, "Browse", &payload)?;
        Ok(BrowseListing::from_response(&body))
    }
}

impl BrowseSource for ContentDirectoryBrowser {
    fn browse_children(&self, object_id: &str) -> Option<Listing> {
        match self.browse(object_id) {
            Ok(listing) => {
                if listing.is_truncated() {
                    debug!(
                        object_id,
                        returned = listing.number_returned,
                        total = listing.total_matches,
                        "listing truncated to first page"
                    );
                }
                Some(Listing {
                    containers: listing.containers,
                    items: listing.items,
                })
            }
            Err(e) => {
                debug!(object_id, error = %e, "browse failed, skipping container");
                None
            }
        }
    }
}

/// Depth-first title search over a [`BrowseSource`].
#[derive(Debug, Clone)]
pub struct ContentTreeWalker<S> {
    source: S,
    max_depth: usize,
}

impl<S: BrowseSource> ContentTreeWalker<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Find the preferred resource of the first item matching `title`
    ///
    /// At each level the items are checked before descending into the
    /// containers, and an exact title match on a level beats substring
    /// matches on the same level.
    pub fn find(&self, title: &str) -> Option<Resource> {
        if title.trim().is_empty() {
            return None;
        }

        let mut visited = HashSet::new();
        let found = self.search(ROOT_OBJECT_ID, title, 0, &mut visited);
        if found.is_none() {
            debug!(title, containers = visited.len(), "no catalog item matches");
        }
        found
    }

    fn search(
        &self,
        object_id: &str,
        target: &str,
        depth: usize,
        visited: &mut HashSet<String>,
    ) -> Option<Resource> {
        if depth > self.max_depth {
            debug!(object_id, depth, "depth limit reached");
            return None;
        }
        if !visited.insert(object_id.to_string()) {
            debug!(object_id, "container already visited");
            return None;
        }

        let listing = self.source.browse_children(object_id)?;

        if let Some((item, kind, resource)) = best_item(&listing.items, target) {
            info!(
                title = %item.title,
                match_kind = ?kind,
                url = %resource.url,
                "catalog item matched"
            );
            return Some(resource.clone());
        }

        listing
            .containers
            .iter()
            .find_map(|container| self.search(&container.id, target, depth + 1, visited))
    }
}

/// Pick the item on one level: first exact match, else first match of any
/// kind. Items without resources are ignored.
fn best_item<'a>(items: &'a [Item], target: &str) -> Option<(&'a Item, TitleMatch, &'a Resource)> {
    let mut first_hit = None;

    for item in items {
        let Some(kind) = TitleMatch::evaluate(target, &item.title) else {
            continue;
        };
        let Some(resource) = item.preferred_resource() else {
            debug!(title = %item.title, "matching item has no resources");
            continue;
        };

        if kind.is_exact() {
            return Some((item, kind, resource));
        }
        first_hit.get_or_insert((item, kind, resource));
    }

    first_hit
}
