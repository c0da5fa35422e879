//! # DVR SDK - Remote control for network video recorders
//!
//! Browse channels, schedule and delete recordings, and find where a
//! finished recording can be streamed from:
//!
//! ```rust,no_run
//! use dvr_sdk::{BroadcastBand, DeviceSession, NewReservation};
//!
//! fn main() -> Result<(), dvr_sdk::SdkError> {
//!     dvr_sdk::logging::init_logging_from_env()?;
//!     let mut session = DeviceSession::new("192.168.1.20")?;
//!
//!     // Current program on the first terrestrial channel, reserved by event id
//!     let channels = session.channels(BroadcastBand::Terrestrial)?;
//!     if let Some(tuning) = channels.first().and_then(|c| c.tuning()) {
//!         if let Some(program) = session.program_detail(&tuning)?.program {
//!             session.create_reservation(NewReservation::from_program(tuning, &program))?;
//!         }
//!     }
//!
//!     // Playback: entry URL, then the media server catalog, then the stream template
//!     let recordings = session.recordings()?;
//!     let sources = session.resolve_playback_all(&recordings);
//!     for (recording, source) in recordings.iter().zip(sources) {
//!         if let Some(source) = source {
//!             println!("{:?}: {}", recording.title, source.url());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! dvr-sdk (DeviceSession, catalog walker, playback)
//!     ↓                       ↓
//! dvr-api (JSON API)      dvr-discovery (media server probing)
//!                             ↓
//!                         dvr-parser (listing and description scraping)
//!                             ↑
//!                         soap-client (Browse calls)
//! ```

mod error;
mod session;

pub mod config;
pub mod logging;
pub mod playback;
pub mod settings;
pub mod walker;

pub use config::SessionConfig;
pub use error::{Result, SdkError};
pub use playback::PlaybackSource;
pub use session::DeviceSession;
pub use settings::Settings;
pub use walker::{BrowseSource, ContentDirectoryBrowser, ContentTreeWalker};

pub use dvr_api::{
    ApiError, BroadcastBand, Channel, DeviceStatus, NewReservation, ProgramLookup, ProgramRecord,
    Recording, Reservation, TuningIds,
};
pub use dvr_discovery::{ContentEndpoint, DiscoveryConfig};
pub use dvr_parser::Resource;
