//! Operations under the `recorded` prefix

use serde_json::Value;

use super::{listing_params, Page, LIST_KEYS};
use crate::error::Result;
use crate::json::find_array;
use crate::models::Recording;
use crate::operation::DeviceOperation;
use crate::transport::Params;

/// Completed recordings
pub struct RecordingListOperation;

impl DeviceOperation for RecordingListOperation {
    type Request = Page;
    type Response = Vec<Recording>;

    const PATH: &'static str = "recorded/titleListGet";

    fn params(request: &Self::Request) -> Result<Params> {
        Ok(listing_params(request, false))
    }

    fn parse_response(body: Value) -> Result<Self::Response> {
        Ok(find_array(&body, &LIST_KEYS)
            .map(|entries| entries.iter().filter_map(Recording::from_value).collect())
            .unwrap_or_default())
    }
}

/// Delete a completed recording by id
pub struct DeleteRecordingOperation;

impl DeviceOperation for DeleteRecordingOperation {
    type Request = String;
    type Response = ();

    const PATH: &'static str = "recorded/titleDelete";

    fn params(request: &Self::Request) -> Result<Params> {
        Ok(Params::new().with("id", request))
    }

    fn parse_response(_body: Value) -> Result<Self::Response> {
        Ok(())
    }
}
