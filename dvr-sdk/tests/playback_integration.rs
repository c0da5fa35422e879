//! Integration tests for playback resolution
//!
//! One mock server plays the media server: it serves the description
//! document and answers `Browse` calls on the advertised control URL.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use dvr_api::DevicePorts;
use dvr_sdk::{DeviceSession, DiscoveryConfig, PlaybackSource, Recording, Resource, SessionConfig};
use mockito::{Matcher, Server};
use serde_json::json;

fn fixture(filename: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/fixtures");
    path.push(filename);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", filename, e))
}

fn port_of(server: &Server) -> u16 {
    server
        .host_with_port()
        .rsplit(':')
        .next()
        .and_then(|p| p.parse().ok())
        .expect("mock server has a port")
}

fn session_for(server: &Server) -> DeviceSession {
    let discovery = DiscoveryConfig::default()
        .with_ports(vec![port_of(server)])
        .with_timeouts(Duration::from_secs(2), Duration::from_secs(1))
        .without_alternate_paths();
    let config = SessionConfig::default()
        .with_ports(DevicePorts::default())
        .with_discovery(discovery)
        .with_browse_timeout(Duration::from_secs(2));

    DeviceSession::with_config("127.0.0.1", config).unwrap()
}

fn browse_of(object_id: &str) -> Matcher {
    Matcher::Regex(format!("<ObjectID>{}</ObjectID>", regex_escape(object_id)))
}

fn regex_escape(text: &str) -> String {
    text.chars()
        .flat_map(|c| if c.is_alphanumeric() { vec![c] } else { vec!['\\', c] })
        .collect()
}

#[test]
fn test_catalog_resource_resolved_and_endpoint_cached() {
    let mut server = Server::new();
    let description = server
        .mock("GET", "/description.xml")
        .with_body(fixture("media_server_description.xml"))
        .expect(1)
        .create();
    let root = server
        .mock("POST", "/cds/control")
        .match_header("soapaction", Matcher::Regex("ContentDirectory:1#Browse".into()))
        .match_body(browse_of("0"))
        .with_body(fixture("browse_root.xml"))
        .expect(2)
        .create();
    let recorded = server
        .mock("POST", "/cds/control")
        .match_body(browse_of("R"))
        .with_body(fixture("browse_recorded.xml"))
        .expect(2)
        .create();

    let mut session = session_for(&server);
    let recording = Recording::from_value(&json!({"id": 2, "title": "Morning Show"})).unwrap();

    let expected = PlaybackSource::ContentDirectory(Resource {
        url: "http://127.0.0.1:9/dlna/2.ts?quality=high&seek=0".to_string(),
        protocol_info: "http-get:*:video/mpeg:DLNA.ORG_PN=MPEG_TS_JP_T".to_string(),
    });
    assert_eq!(session.resolve_playback(&recording), Some(expected.clone()));
    assert_eq!(session.resolve_playback(&recording), Some(expected));

    let endpoint = session.cached_content_endpoint().expect("endpoint cached");
    assert_eq!(endpoint.friendly_name.as_deref(), Some("Recorder (Den)"));
    assert_eq!(
        endpoint.control_url,
        format!("http://127.0.0.1:{}/cds/control", port_of(&server))
    );

    description.assert();
    root.assert();
    recorded.assert();
}

#[test]
fn test_entry_url_skips_discovery() {
    let mut server = Server::new();
    let untouched = server.mock("GET", Matcher::Any).expect(0).create();

    let mut session = session_for(&server);
    let recording = Recording::from_value(&json!({
        "id": 3,
        "title": "Morning Show",
        "media": {"streamLocation": "http://10.0.0.2/3.ts"}
    }))
    .unwrap();

    assert_eq!(
        session.resolve_playback(&recording),
        Some(PlaybackSource::Direct("http://10.0.0.2/3.ts".to_string()))
    );
    untouched.assert();
}

#[test]
fn test_constructed_fallback_and_failed_discovery_not_cached() {
    let mut server = Server::new();
    let missing = server
        .mock("GET", "/description.xml")
        .with_status(404)
        .expect(1)
        .create();

    let mut session = session_for(&server);
    let recording = Recording::from_value(&json!({"id": 9, "title": "Unknown"})).unwrap();

    assert_eq!(
        session.resolve_playback(&recording),
        Some(PlaybackSource::Constructed(
            "http://127.0.0.1:64220/recorded/titleStream?id=9".to_string()
        ))
    );
    assert!(session.cached_content_endpoint().is_none());
    missing.assert();

    // The server comes up later: the next lookup probes again
    missing.remove();
    let found = server
        .mock("GET", "/description.xml")
        .with_body(fixture("media_server_description.xml"))
        .expect(1)
        .create();

    assert!(session.content_endpoint().is_some());
    found.assert();

    session.reconnect("127.0.0.1");
    assert!(session.cached_content_endpoint().is_none());
}

#[test]
fn test_listing_probes_once_when_media_server_is_missing() {
    let mut server = Server::new();
    let missing = server
        .mock("GET", "/description.xml")
        .with_status(404)
        .expect(1)
        .create();

    let mut session = session_for(&server);
    let listing: Vec<Recording> = (1..=3)
        .filter_map(|id| Recording::from_value(&json!({"id": id, "title": format!("Show {}", id)})))
        .collect();

    let sources = session.resolve_playback_all(&listing);
    assert_eq!(sources.len(), 3);
    assert_eq!(
        sources[2],
        Some(PlaybackSource::Constructed(
            "http://127.0.0.1:64220/recorded/titleStream?id=3".to_string()
        ))
    );
    assert!(sources
        .iter()
        .all(|source| matches!(source, Some(PlaybackSource::Constructed(_)))));
    missing.assert();
}

#[test]
fn test_nothing_to_play() {
    let mut server = Server::new();
    let _missing = server.mock("GET", Matcher::Any).with_status(404).create();

    let mut session = session_for(&server);
    let recording = Recording::from_value(&json!({"title": "No id"})).unwrap();
    assert_eq!(session.resolve_playback(&recording), None);
}
