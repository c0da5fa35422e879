//! Records built from the device's JSON responses.
//!
//! Every record is read field by field with tolerant readers: a missing or
//! oddly-typed field becomes `None` rather than failing the whole response.

use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::json::{first_text, first_u64};

pub(crate) const TITLE_KEYS: [&str; 3] = ["title", "name", "programTitle"];
pub(crate) const START_KEYS: [&str; 3] = ["startDateTime", "startTime", "start"];
const END_KEYS: [&str; 2] = ["endDateTime", "endTime"];
const DESCRIPTION_KEYS: [&str; 2] = ["description", "desc"];
const LONG_DESCRIPTION_KEYS: [&str; 2] = ["descriptionLong", "longDescription"];
const CHANNEL_NAME_KEYS: [&str; 2] = ["serviceName", "channelName"];

/// Repeat condition used when a reservation does not name one
pub const DEFAULT_CONDITION_ID: &str = "1";

/// Recording quality used when a reservation does not name one
pub const DEFAULT_QUALITY: u32 = 100;

/// The three identifiers that select a broadcast service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TuningIds {
    pub network_id: u64,
    pub transport_stream_id: u64,
    pub service_id: u64,
}

/// Broadcast band a channel list is requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BroadcastBand {
    Terrestrial,
    BsSatellite,
    CsSatellite,
}

impl BroadcastBand {
    /// Numeric `broadcastingType` the device expects
    pub fn broadcasting_type(&self) -> u8 {
        match self {
            BroadcastBand::Terrestrial => 1,
            BroadcastBand::BsSatellite => 2,
            BroadcastBand::CsSatellite => 3,
        }
    }

    pub fn from_broadcasting_type(value: u64) -> Option<Self> {
        match value {
            1 => Some(BroadcastBand::Terrestrial),
            2 => Some(BroadcastBand::BsSatellite),
            3 => Some(BroadcastBand::CsSatellite),
            _ => None,
        }
    }
}

/// A tunable broadcast service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub network_id: Option<u64>,
    pub transport_stream_id: Option<u64>,
    pub service_id: Option<u64>,
    pub name: Option<String>,
    pub channel_number: Option<String>,
    /// Band named by the entry's own `broadcastingType`, when it carries one
    pub band: Option<BroadcastBand>,
}

impl Channel {
    /// Read a channel from one list entry; non-objects yield `None`
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            network_id: first_u64(value, &["networkId"]),
            transport_stream_id: first_u64(value, &["transportStreamId"]),
            service_id: first_u64(value, &["serviceId"]),
            name: first_text(value, &["serviceName", "name", "channelName", "title"]),
            channel_number: first_text(
                value,
                &["channelNumber", "remoteControlKeyId", "channelNo"],
            ),
            band: first_u64(value, &["broadcastingType", "type"])
                .and_then(BroadcastBand::from_broadcasting_type),
        })
    }

    /// Tuning identifiers, when all three are present
    pub fn tuning(&self) -> Option<TuningIds> {
        Some(TuningIds {
            network_id: self.network_id?,
            transport_stream_id: self.transport_stream_id?,
            service_id: self.service_id?,
        })
    }
}

/// The program currently airing on a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramRecord {
    pub title: String,
    pub start_date_time: Option<String>,
    /// Length in seconds
    pub duration: Option<u64>,
    pub end_date_time: Option<String>,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub event_id: Option<String>,
}

impl ProgramRecord {
    /// Read a program from a located candidate object; a title is required
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            title: first_text(value, &TITLE_KEYS)?,
            start_date_time: first_text(value, &START_KEYS),
            duration: first_u64(value, &["duration"]),
            end_date_time: first_text(value, &END_KEYS),
            description: first_text(value, &DESCRIPTION_KEYS),
            long_description: first_text(value, &LONG_DESCRIPTION_KEYS),
            event_id: first_text(value, &["eventId"]),
        })
    }
}

/// Result of a program-detail lookup.
///
/// `program` is `None` when no known response shape matched; `raw` is always
/// the full response so a caller can still show something.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramLookup {
    pub program: Option<ProgramRecord>,
    pub raw: Value,
}

/// A scheduled recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: Option<String>,
    pub reservation_type: Option<String>,
    pub title: Option<String>,
    pub start_date_time: Option<String>,
    pub duration: Option<u64>,
    pub channel_name: Option<String>,
}

impl Reservation {
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            id: first_text(value, &["id", "reservationId"]),
            reservation_type: first_text(value, &["type", "reservationType"]),
            title: first_text(value, &TITLE_KEYS),
            start_date_time: first_text(value, &START_KEYS),
            duration: first_u64(value, &["duration"]),
            channel_name: first_text(value, &CHANNEL_NAME_KEYS),
        })
    }
}

/// Request to schedule a recording.
///
/// Either `event_id` identifies a guide event, or `title`, `start_date_time`
/// and `duration` describe the slot by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub tuning: TuningIds,
    pub event_id: Option<String>,
    pub title: Option<String>,
    pub start_date_time: Option<String>,
    /// Length in seconds
    pub duration: Option<u64>,
    /// Repeat condition, defaults to [`DEFAULT_CONDITION_ID`]
    pub condition_id: Option<String>,
    /// Recording quality, defaults to [`DEFAULT_QUALITY`]
    pub quality: Option<u32>,
}

impl NewReservation {
    /// Reserve a guide event by id
    pub fn for_event(tuning: TuningIds, event_id: impl Into<String>) -> Self {
        Self {
            tuning,
            event_id: Some(event_id.into()),
            title: None,
            start_date_time: None,
            duration: None,
            condition_id: None,
            quality: None,
        }
    }

    /// Reserve an explicit time slot
    pub fn manual(
        tuning: TuningIds,
        title: impl Into<String>,
        start_date_time: impl Into<String>,
        duration: u64,
    ) -> Self {
        Self {
            tuning,
            event_id: None,
            title: Some(title.into()),
            start_date_time: Some(start_date_time.into()),
            duration: Some(duration),
            condition_id: None,
            quality: None,
        }
    }

    /// Reserve the program returned by a program-detail lookup
    ///
    /// The event id is used when the record has one; its title, start and
    /// duration are carried along either way.
    pub fn from_program(tuning: TuningIds, program: &ProgramRecord) -> Self {
        Self {
            tuning,
            event_id: program.event_id.clone(),
            title: Some(program.title.clone()),
            start_date_time: program.start_date_time.clone(),
            duration: program.duration,
            condition_id: None,
            quality: None,
        }
    }

    pub fn with_quality(mut self, quality: u32) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn with_condition(mut self, condition_id: impl Into<String>) -> Self {
        self.condition_id = Some(condition_id.into());
        self
    }

    /// Check that the device has enough to schedule this reservation
    pub fn validate(&self) -> Result<()> {
        if self.event_id.is_some() {
            return Ok(());
        }
        let missing: Vec<&str> = [
            ("title", self.title.is_none()),
            ("startDateTime", self.start_date_time.is_none()),
            ("duration", self.duration.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ApiError::InvalidParameter(format!(
                "reservation without eventId requires {}",
                missing.join(", ")
            )))
        }
    }
}

const URL_FIELDS: [&str; 5] = ["url", "playUrl", "streamUrl", "contentUrl", "resUrl"];

/// Places a recording entry may carry a playable URL, in search order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlScan {
    /// One of the known URL field names
    KnownField,
    /// Any top-level string that looks like an HTTP URL
    TopLevel,
    /// Any string one object level down that looks like an HTTP URL
    Nested,
}

pub const URL_SCAN_ORDER: [UrlScan; 3] = [UrlScan::KnownField, UrlScan::TopLevel, UrlScan::Nested];

impl UrlScan {
    pub fn scan(&self, entry: &Value) -> Option<String> {
        match self {
            UrlScan::KnownField => URL_FIELDS
                .iter()
                .filter_map(|key| entry.get(*key)?.as_str())
                .find(|s| is_http_url(s))
                .map(str::to_string),
            UrlScan::TopLevel => first_http_string(entry),
            UrlScan::Nested => entry
                .as_object()?
                .values()
                .filter(|v| v.is_object())
                .find_map(first_http_string),
        }
    }
}

fn first_http_string(object: &Value) -> Option<String> {
    object
        .as_object()?
        .values()
        .filter_map(Value::as_str)
        .find(|s| is_http_url(s))
        .map(str::to_string)
}

fn is_http_url(text: &str) -> bool {
    let lower = text.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// A completed recording.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recording {
    pub id: Option<String>,
    pub title: Option<String>,
    pub channel_name: Option<String>,
    /// Length in seconds
    pub duration: Option<u64>,
    pub start_date_time: Option<String>,
    /// The entry exactly as the device sent it
    #[serde(skip)]
    pub raw: Value,
}

impl Recording {
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            id: first_text(value, &["id", "titleId"]),
            title: first_text(value, &TITLE_KEYS),
            channel_name: first_text(value, &CHANNEL_NAME_KEYS),
            duration: first_u64(value, &["duration"]),
            start_date_time: first_text(value, &START_KEYS),
            raw: value.clone(),
        })
    }

    /// A playable HTTP URL carried in the entry itself, if any
    pub fn playable_url(&self) -> Option<String> {
        URL_SCAN_ORDER.iter().find_map(|scan| scan.scan(&self.raw))
    }
}

/// Device status snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceStatus {
    /// Device-reported error code; 0 means healthy on known firmware
    pub error_code: Option<u64>,
    pub raw: Value,
}

impl DeviceStatus {
    pub fn from_value(value: &Value) -> Self {
        Self {
            error_code: first_u64(value, &["errorCode"]),
            raw: value.clone(),
        }
    }
}
