//! List recordings and reservations on a recorder
//!
//! The device address comes from the first argument, falling back to the
//! saved settings. A given address is saved for next time.
//!
//! Run with: cargo run -p dvr-sdk --example list_recordings -- 192.168.1.20
//!
//! Set DVR_LOG_MODE=development to see discovery and catalog logs.

use dvr_sdk::{logging, DeviceSession, SdkError, SessionConfig, Settings};

fn main() -> Result<(), SdkError> {
    logging::init_logging_from_env()?;

    let mut settings = Settings::load();
    if let Some(host) = std::env::args().nth(1) {
        settings = settings.with_device_host(host);
        settings.save()?;
    }

    let mut session = DeviceSession::from_settings(&settings, SessionConfig::default())?;
    println!("Recorder at {}", session.host());

    if !session.test_connection() {
        println!("Recorder is not answering; check the address and that it is powered on");
        return Ok(());
    }

    println!("\nReservations:");
    for reservation in session.reservations()? {
        println!(
            "  {} {}",
            reservation.start_date_time.as_deref().unwrap_or("?"),
            reservation.title.as_deref().unwrap_or("(untitled)")
        );
    }

    println!("\nRecordings:");
    let recordings = session.recordings()?;
    let sources = session.resolve_playback_all(&recordings);
    for (recording, source) in recordings.iter().zip(sources) {
        let title = recording.title.as_deref().unwrap_or("(untitled)");
        match source {
            Some(source) => println!("  {} -> {}", title, source.url()),
            None => println!("  {} (no playback location)", title),
        }
    }

    if let Some(endpoint) = session.cached_content_endpoint() {
        println!(
            "\nMedia server: {} on port {}",
            endpoint.friendly_name.as_deref().unwrap_or("unnamed"),
            endpoint.port
        );
    }

    Ok(())
}
