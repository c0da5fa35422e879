//! Operations under the `schedule` prefix

use serde_json::Value;

use super::{listing_params, Page, LIST_KEYS};
use crate::error::Result;
use crate::json::find_array;
use crate::models::{NewReservation, Reservation, DEFAULT_CONDITION_ID, DEFAULT_QUALITY};
use crate::operation::DeviceOperation;
use crate::transport::Params;

/// Scheduled recordings
pub struct ReservationListOperation;

impl DeviceOperation for ReservationListOperation {
    type Request = Page;
    type Response = Vec<Reservation>;

    const PATH: &'static str = "schedule/reservedListGet";

    fn params(request: &Self::Request) -> Result<Params> {
        Ok(listing_params(request, true))
    }

    fn parse_response(body: Value) -> Result<Self::Response> {
        Ok(find_array(&body, &LIST_KEYS)
            .map(|entries| entries.iter().filter_map(Reservation::from_value).collect())
            .unwrap_or_default())
    }
}

/// Schedule a recording
///
/// The device's response is returned untouched; firmwares disagree on what
/// it contains.
pub struct CreateReservationOperation;

impl DeviceOperation for CreateReservationOperation {
    type Request = NewReservation;
    type Response = Value;

    const PATH: &'static str = "schedule/reservedAdd";

    fn params(request: &Self::Request) -> Result<Params> {
        request.validate()?;

        Ok(Params::new()
            .with_opt("eventId", request.event_id.as_deref())
            .with("networkId", request.tuning.network_id)
            .with("transportStreamId", request.tuning.transport_stream_id)
            .with("serviceId", request.tuning.service_id)
            .with_opt("title", request.title.as_deref())
            .with_opt("startDateTime", request.start_date_time.as_deref())
            .with_opt("duration", request.duration)
            .with("conditionId", request.condition_id.as_deref().unwrap_or(DEFAULT_CONDITION_ID))
            .with("quality", request.quality.unwrap_or(DEFAULT_QUALITY)))
    }

    fn parse_response(body: Value) -> Result<Self::Response> {
        Ok(body)
    }
}

/// Key of a reservation to delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationKey {
    pub id: String,
    pub reservation_type: String,
}

/// Cancel a scheduled recording
pub struct DeleteReservationOperation;

impl DeviceOperation for DeleteReservationOperation {
    type Request = ReservationKey;
    type Response = ();

    const PATH: &'static str = "schedule/reservedDelete";

    fn params(request: &Self::Request) -> Result<Params> {
        Ok(Params::new()
            .with("id", &request.id)
            .with("type", &request.reservation_type))
    }

    fn parse_response(_body: Value) -> Result<Self::Response> {
        Ok(())
    }
}
