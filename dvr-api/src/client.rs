use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{
    BroadcastBand, Channel, DeviceStatus, NewReservation, ProgramLookup, Recording, Reservation,
    TuningIds,
};
use crate::operation::DeviceOperation;
use crate::operations::schedule::ReservationKey;
use crate::operations::{
    ChannelListOperation, CreateReservationOperation, DeleteRecordingOperation,
    DeleteReservationOperation, DeviceStatusOperation, Page, ProgramDetailOperation,
    RecordingListOperation, ReservationListOperation,
};
use crate::service::DeviceEndpoint;
use crate::transport::Transport;

/// A client for executing recorder operations against one device
///
/// Bridges the stateless operation definitions and the [`Transport`]. Only
/// transport failures surface as errors; responses that lack what an
/// operation looks for come back empty.
///
/// ```no_run
/// use dvr_api::{BroadcastBand, DeviceEndpoint, DvrClient};
///
/// let client = DvrClient::new(DeviceEndpoint::new("192.168.1.20"));
/// for channel in client.channels(BroadcastBand::Terrestrial)? {
///     println!("{:?}", channel.name);
/// }
/// # Ok::<(), dvr_api::ApiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DvrClient {
    transport: Transport,
}

impl DvrClient {
    /// Client with the default request timeout
    pub fn new(endpoint: DeviceEndpoint) -> Self {
        Self {
            transport: Transport::new(endpoint),
        }
    }

    pub fn with_timeout(endpoint: DeviceEndpoint, timeout: Duration) -> Self {
        Self {
            transport: Transport::with_timeout(endpoint, timeout),
        }
    }

    pub fn with_transport(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn endpoint(&self) -> &DeviceEndpoint {
        self.transport.endpoint()
    }

    /// Execute an operation against the device
    ///
    /// # Example
    /// ```no_run
    /// use dvr_api::operations::DeviceStatusOperation;
    /// use dvr_api::{DeviceEndpoint, DvrClient};
    ///
    /// let client = DvrClient::new(DeviceEndpoint::new("192.168.1.20"));
    /// let status = client.execute::<DeviceStatusOperation>(&())?;
    /// # Ok::<(), dvr_api::ApiError>(())
    /// ```
    pub fn execute<Op: DeviceOperation>(&self, request: &Op::Request) -> Result<Op::Response> {
        let params = Op::params(request)?;
        debug!(path = Op::PATH, service = ?Op::service(), "executing operation");
        let body = self.transport.request(Op::PATH, &params)?;
        Op::parse_response(body)
    }

    /// Channels on one broadcast band
    pub fn channels(&self, band: BroadcastBand) -> Result<Vec<Channel>> {
        self.execute::<ChannelListOperation>(&band)
    }

    /// Current program on a service
    pub fn program_detail(&self, tuning: &TuningIds) -> Result<ProgramLookup> {
        let lookup = self.execute::<ProgramDetailOperation>(tuning)?;
        if lookup.program.is_none() {
            debug!(service_id = tuning.service_id, "program detail has no recognisable record");
        }
        Ok(lookup)
    }

    pub fn status(&self) -> Result<DeviceStatus> {
        self.execute::<DeviceStatusOperation>(&())
    }

    /// First page of scheduled recordings
    pub fn reservations(&self) -> Result<Vec<Reservation>> {
        self.reservations_page(&Page::default())
    }

    pub fn reservations_page(&self, page: &Page) -> Result<Vec<Reservation>> {
        self.execute::<ReservationListOperation>(page)
    }

    /// Schedule a recording, returning the device's raw response
    pub fn create_reservation(&self, reservation: &NewReservation) -> Result<Value> {
        let response = self.execute::<CreateReservationOperation>(reservation)?;
        info!(
            event_id = reservation.event_id.as_deref(),
            title = reservation.title.as_deref(),
            "reservation created"
        );
        Ok(response)
    }

    /// Cancel a reservation; an empty success body counts as success
    pub fn delete_reservation(&self, id: &str, reservation_type: &str) -> Result<()> {
        self.execute::<DeleteReservationOperation>(&ReservationKey {
            id: id.to_string(),
            reservation_type: reservation_type.to_string(),
        })?;
        info!(id, "reservation deleted");
        Ok(())
    }

    /// First page of completed recordings
    pub fn recordings(&self) -> Result<Vec<Recording>> {
        self.recordings_page(&Page::default())
    }

    pub fn recordings_page(&self, page: &Page) -> Result<Vec<Recording>> {
        self.execute::<RecordingListOperation>(page)
    }

    pub fn delete_recording(&self, id: &str) -> Result<()> {
        self.execute::<DeleteRecordingOperation>(&id.to_string())?;
        info!(id, "recording deleted");
        Ok(())
    }

    /// Whether the device answers a status request
    pub fn test_connection(&self) -> bool {
        match self.status() {
            Ok(_) => true,
            Err(e) => {
                debug!(host = self.endpoint().host(), error = %e, "connection test failed");
                false
            }
        }
    }
}
