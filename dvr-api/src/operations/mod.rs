//! Recorder API operations organized by functional area
//!
//! Each module holds the operations served under one path prefix.

pub mod recorded;
pub mod schedule;
pub mod status;

pub use recorded::{DeleteRecordingOperation, RecordingListOperation};
pub use schedule::{
    CreateReservationOperation, DeleteReservationOperation, ReservationListOperation,
};
pub use status::{ChannelListOperation, DeviceStatusOperation, ProgramDetailOperation};

use crate::transport::Params;

/// Window of a listing request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub starting_index: u32,
    pub requested_count: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            starting_index: 0,
            requested_count: 100,
        }
    }
}

/// Keys a listing response may keep its entries under
pub(crate) const LIST_KEYS: [&str; 5] = ["item", "items", "list", "reservations", "titles"];

/// Parameters shared by the reservation and recording listings
pub(crate) fn listing_params(page: &Page, with_user_data: bool) -> Params {
    Params::new()
        .with("searchCriteria", 0)
        .with("filter", 0)
        .with("startingIndex", page.starting_index)
        .with("requestedCount", page.requested_count)
        .with("sortCriteria", 0)
        .with("withDescriptionLong", 0)
        .with("withUserData", u8::from(with_user_data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_params_order() {
        let params = listing_params(&Page::default(), true);
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "searchCriteria",
                "filter",
                "startingIndex",
                "requestedCount",
                "sortCriteria",
                "withDescriptionLong",
                "withUserData"
            ]
        );
        assert_eq!(params.get("withUserData"), Some("1"));
        assert_eq!(params.get("requestedCount"), Some("100"));
    }
}
