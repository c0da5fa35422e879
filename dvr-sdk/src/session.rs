//! DeviceSession - Main entry point for the SDK
//!
//! One session talks to one recorder. It owns the JSON API client and caches
//! the media server endpoint once discovery has found it.

use serde_json::Value;
use tracing::{debug, info};

use dvr_api::{
    BroadcastBand, Channel, DeviceEndpoint, DeviceStatus, DvrClient, NewReservation, ProgramLookup,
    Recording, Reservation, TuningIds,
};
use dvr_discovery::{discover_content_endpoint, ContentEndpoint};
use dvr_parser::Resource;

use crate::config::SessionConfig;
use crate::error::{Result, SdkError};
use crate::playback::{construct_stream_url, PlaybackSource};
use crate::settings::Settings;
use crate::walker::{ContentDirectoryBrowser, ContentTreeWalker};

/// A connection to one recorder
///
/// DeviceSession is fully synchronous; every call blocks for at most the
/// configured timeouts.
///
/// # Example
///
/// ```rust,no_run
/// use dvr_sdk::DeviceSession;
///
/// fn main() -> Result<(), dvr_sdk::SdkError> {
///     let mut session = DeviceSession::new("192.168.1.20")?;
///
///     let recordings = session.recordings()?;
///     let sources = session.resolve_playback_all(&recordings);
///     for (recording, source) in recordings.iter().zip(sources) {
///         if let Some(source) = source {
///             println!("{:?} -> {}", recording.title, source.url());
///         }
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct DeviceSession {
    client: DvrClient,
    config: SessionConfig,
    /// Media server endpoint; only a successful discovery is cached
    content_endpoint: Option<ContentEndpoint>,
}

impl DeviceSession {
    /// Session with the default configuration
    pub fn new(host: impl Into<String>) -> Result<Self> {
        Self::with_config(host, SessionConfig::default())
    }

    pub fn with_config(host: impl Into<String>, config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            client: Self::build_client(host.into(), &config),
            config,
            content_endpoint: None,
        })
    }

    /// Session for the device and quality stored in `settings`
    pub fn from_settings(settings: &Settings, config: SessionConfig) -> Result<Self> {
        let host = settings.device_host.clone().ok_or(SdkError::NoDevice)?;
        Self::with_config(host, config.with_default_quality(settings.quality))
    }

    fn build_client(host: String, config: &SessionConfig) -> DvrClient {
        DvrClient::with_timeout(DeviceEndpoint::with_ports(host, config.ports), config.api_timeout)
    }

    pub fn host(&self) -> &str {
        self.client.endpoint().host()
    }

    pub fn client(&self) -> &DvrClient {
        &self.client
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Point the session at another device, dropping the cached endpoint
    pub fn reconnect(&mut self, host: impl Into<String>) {
        self.client = Self::build_client(host.into(), &self.config);
        self.content_endpoint = None;
        info!(host = self.host(), "session reconnected");
    }

    /// Whether the device answers a status request
    pub fn test_connection(&self) -> bool {
        self.client.test_connection()
    }

    pub fn channels(&self, band: BroadcastBand) -> Result<Vec<Channel>> {
        Ok(self.client.channels(band)?)
    }

    pub fn program_detail(&self, tuning: &TuningIds) -> Result<ProgramLookup> {
        Ok(self.client.program_detail(tuning)?)
    }

    pub fn status(&self) -> Result<DeviceStatus> {
        Ok(self.client.status()?)
    }

    pub fn reservations(&self) -> Result<Vec<Reservation>> {
        Ok(self.client.reservations()?)
    }

    /// Schedule a recording; the configured quality applies when none is set
    pub fn create_reservation(&self, mut reservation: NewReservation) -> Result<Value> {
        reservation.quality.get_or_insert(self.config.default_quality);
        Ok(self.client.create_reservation(&reservation)?)
    }

    pub fn delete_reservation(&self, reservation: &Reservation) -> Result<()> {
        let id = reservation
            .id
            .as_deref()
            .ok_or(SdkError::MissingField("reservation", "id"))?;
        let reservation_type = reservation
            .reservation_type
            .as_deref()
            .ok_or(SdkError::MissingField("reservation", "type"))?;
        Ok(self.client.delete_reservation(id, reservation_type)?)
    }

    pub fn recordings(&self) -> Result<Vec<Recording>> {
        Ok(self.client.recordings()?)
    }

    pub fn delete_recording(&self, recording: &Recording) -> Result<()> {
        let id = recording
            .id
            .as_deref()
            .ok_or(SdkError::MissingField("recording", "id"))?;
        self.client.delete_recording(id).map_err(SdkError::from)
    }

    /// The media server endpoint, discovering it on first use
    ///
    /// A failed discovery is not remembered; the next call probes again.
    pub fn content_endpoint(&mut self) -> Option<&ContentEndpoint> {
        if self.content_endpoint.is_none() {
            self.content_endpoint =
                discover_content_endpoint(self.client.endpoint().host(), &self.config.discovery);
        }
        self.content_endpoint.as_ref()
    }

    /// The endpoint found by an earlier discovery, without probing
    pub fn cached_content_endpoint(&self) -> Option<&ContentEndpoint> {
        self.content_endpoint.as_ref()
    }

    /// Search the media server catalog for a recording by title
    pub fn find_recording_resource(&mut self, title: &str) -> Option<Resource> {
        self.content_endpoint()?;
        let endpoint = self.content_endpoint.as_ref()?;
        self.catalog_walker(endpoint).find(title)
    }

    fn catalog_walker(
        &self,
        endpoint: &ContentEndpoint,
    ) -> ContentTreeWalker<ContentDirectoryBrowser> {
        let browser = ContentDirectoryBrowser::new(
            endpoint.control_url.as_str(),
            self.config.browse_timeout,
            self.config.browse_page_size,
        );
        ContentTreeWalker::new(browser).with_max_depth(self.config.max_depth)
    }

    /// Resolve where a recording can be streamed from
    ///
    /// Tries, in order: a URL in the recording entry, the media server
    /// catalog by title, then the stream template by id. `None` only when the
    /// entry has no URL, no catalog match and no id.
    pub fn resolve_playback(&mut self, recording: &Recording) -> Option<PlaybackSource> {
        self.resolve_playback_all(std::slice::from_ref(recording))
            .pop()
            .flatten()
    }

    /// [`resolve_playback`](Self::resolve_playback) for a whole listing
    ///
    /// Discovery runs at most once for the listing, and only when some entry
    /// carries no URL of its own. When it fails, every entry falls through to
    /// the stream template instead of probing again.
    pub fn resolve_playback_all(
        &mut self,
        recordings: &[Recording],
    ) -> Vec<Option<PlaybackSource>> {
        if recordings.iter().any(needs_catalog) {
            self.content_endpoint();
        }
        let endpoint = self.content_endpoint.as_ref();

        recordings
            .iter()
            .map(|recording| self.resolve_with(recording, endpoint))
            .collect()
    }

    fn resolve_with(
        &self,
        recording: &Recording,
        endpoint: Option<&ContentEndpoint>,
    ) -> Option<PlaybackSource> {
        if let Some(url) = recording.playable_url() {
            debug!(url = %url, "playback from recording entry");
            return Some(PlaybackSource::Direct(url));
        }

        if let (Some(title), Some(endpoint)) = (recording.title.as_deref(), endpoint) {
            if let Some(resource) = self.catalog_walker(endpoint).find(title) {
                return Some(PlaybackSource::ContentDirectory(resource));
            }
        }

        let id = recording.id.as_deref()?;
        let url = construct_stream_url(
            &self.config.stream_url_template,
            self.host(),
            self.config.ports.schedule,
            id,
        );
        debug!(url = %url, "playback from stream template");
        Some(PlaybackSource::Constructed(url))
    }
}

/// Whether resolving `recording` would search the catalog
fn needs_catalog(recording: &Recording) -> bool {
    recording.playable_url().is_none()
        && recording
            .title
            .as_deref()
            .is_some_and(|title| !title.trim().is_empty())
}
