//! Integration tests for the recorder client
//!
//! Both API ports point at one mock server so the real HTTP path is
//! exercised without a recorder on the network.

use std::net::TcpListener;
use std::time::Duration;

use dvr_api::{ApiError, DeviceEndpoint, DevicePorts, DvrClient, NewReservation, TuningIds};
use mockito::{Matcher, Server};

fn client_for(server: &Server) -> DvrClient {
    let port = server
        .host_with_port()
        .rsplit(':')
        .next()
        .and_then(|p| p.parse().ok())
        .expect("mock server has a port");
    let ports = DevicePorts {
        status: port,
        schedule: port,
    };
    DvrClient::with_timeout(DeviceEndpoint::with_ports("127.0.0.1", ports), Duration::from_secs(2))
}

fn tuning() -> TuningIds {
    TuningIds {
        network_id: 32736,
        transport_stream_id: 32736,
        service_id: 1024,
    }
}

#[test]
fn test_event_only_reservation_sends_defaults() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/schedule/reservedAdd")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("eventId".into(), "4711".into()),
            Matcher::UrlEncoded("conditionId".into(), "1".into()),
            Matcher::UrlEncoded("quality".into(), "100".into()),
            Matcher::UrlEncoded("serviceId".into(), "1024".into()),
        ]))
        .with_body(r#"{"errorCode":0}"#)
        .expect(1)
        .create();

    let response = client_for(&server)
        .create_reservation(&NewReservation::for_event(tuning(), "4711"))
        .unwrap();

    assert_eq!(response["errorCode"], 0);
    mock.assert();
}

#[test]
fn test_incomplete_reservation_never_hits_the_device() {
    let mut server = Server::new();
    let mock = server.mock("GET", Matcher::Any).expect(0).create();

    let mut reservation =
        NewReservation::manual(tuning(), "Drama", "2024-05-01T21:00:00+09:00", 3600);
    reservation.start_date_time = None;

    let result = client_for(&server).create_reservation(&reservation);
    assert!(matches!(result, Err(ApiError::InvalidParameter(_))));
    mock.assert();
}

#[test]
fn test_delete_reservation_accepts_empty_body() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/schedule/reservedDelete")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("id".into(), "12".into()),
            Matcher::UrlEncoded("type".into(), "0".into()),
        ]))
        .with_status(200)
        .with_body("")
        .expect(1)
        .create();

    client_for(&server).delete_reservation("12", "0").unwrap();
    mock.assert();
}

#[test]
fn test_delete_recording() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/recorded/titleDelete")
        .match_query(Matcher::UrlEncoded("id".into(), "7".into()))
        .with_body("")
        .expect(1)
        .create();

    client_for(&server).delete_recording("7").unwrap();
    mock.assert();
}

#[test]
fn test_http_error_carries_status() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/status/boxStatusListGet")
        .with_status(503)
        .create();

    let err = client_for(&server).status().unwrap_err();
    assert!(matches!(err, ApiError::DeviceUnreachable { status: Some(503), .. }));
}

#[test]
fn test_non_json_body_is_a_parse_error() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/status/boxStatusListGet")
        .with_body("<html>maintenance</html>")
        .create();

    let err = client_for(&server).status().unwrap_err();
    assert!(matches!(err, ApiError::ParseError(_)));
}

#[test]
fn test_program_detail_resolves_shape() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/status/channelInfoGet2")
        .match_query(Matcher::UrlEncoded("withDescriptionLong".into(), "1".into()))
        .with_body(
            r#"{"errorCode":0,"channel":{"serviceName":"Channel 4","programs":[{"title":"Evening News","startDateTime":"2024-05-01T19:00:00+09:00","duration":1800,"eventId":4711}]}}"#,
        )
        .create();

    let lookup = client_for(&server).program_detail(&tuning()).unwrap();
    let program = lookup.program.expect("program located");
    assert_eq!(program.title, "Evening News");
    assert_eq!(program.event_id.as_deref(), Some("4711"));
    assert_eq!(lookup.raw["channel"]["serviceName"], "Channel 4");
}

#[test]
fn test_recordings_list() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/recorded/titleListGet")
        .match_query(Matcher::UrlEncoded("withUserData".into(), "0".into()))
        .with_body(r#"{"errorCode":0,"item":[{"id":7,"title":"Drama Special","duration":3600}],"numberOfHits":1}"#)
        .create();

    let recordings = client_for(&server).recordings().unwrap();
    assert_eq!(recordings.len(), 1);
    assert_eq!(recordings[0].id.as_deref(), Some("7"));
    assert_eq!(recordings[0].playable_url(), None);
}

#[test]
fn test_connection_check() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/status/boxStatusListGet")
        .with_body(r#"{"errorCode":0}"#)
        .create();
    assert!(client_for(&server).test_connection());

    let closed = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let offline = DvrClient::with_timeout(
        DeviceEndpoint::with_ports("127.0.0.1", DevicePorts { status: closed, schedule: closed }),
        Duration::from_millis(500),
    );
    assert!(!offline.test_connection());
}
