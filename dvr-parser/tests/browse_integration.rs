//! Fixture-based integration tests for listing and description parsing

use std::fs;
use std::path::PathBuf;

use dvr_parser::services::device_description::{content_directory_control_path, contains_marker};
use dvr_parser::{BrowseListing, DeviceDescription, TitleMatch};
use rstest::rstest;

fn fixture(filename: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/fixtures");
    path.push(filename);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", filename, e))
}

#[test]
fn test_double_escaped_browse_response() {
    let listing = BrowseListing::from_response(&fixture("browse_root_double_escaped.xml"));

    let ids: Vec<&str> = listing.containers.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["R", "T"]);
    assert_eq!(listing.containers[0].title, "Recorded Titles");

    assert_eq!(listing.items.len(), 1);
    let item = &listing.items[0];
    assert_eq!(item.title, "Morning Show & Weather");
    assert_eq!(item.resources.len(), 2);

    let preferred = item.preferred_resource().expect("item has resources");
    assert_eq!(preferred.url, "http://192.168.1.20:64220/dlna/1.ts");
    assert!(preferred.protocol_info.contains("video/mpeg"));

    assert_eq!(listing.number_returned, Some(3));
    assert!(!listing.is_truncated());
}

#[rstest]
#[case("Morning Show & Weather", Some(TitleMatch::Exact))]
#[case("Morning Show", Some(TitleMatch::TitleContainsTarget))]
#[case("Morning Show & Weather (Rerun)", Some(TitleMatch::TargetContainsTitle))]
#[case("Evening Show", None)]
fn test_title_rules_against_fixture(#[case] target: &str, #[case] expected: Option<TitleMatch>) {
    let listing = BrowseListing::from_response(&fixture("browse_root_double_escaped.xml"));
    assert_eq!(TitleMatch::evaluate(target, &listing.items[0].title), expected);
}

#[test]
fn test_media_server_description_fixture() {
    let xml = fixture("media_server_description.xml");

    let device = DeviceDescription::from_xml(&xml).expect("Failed to parse description XML");
    assert_eq!(device.friendly_name.as_deref(), Some("Recorder (Living Room)"));
    assert!(device.is_media_server());

    assert!(contains_marker(&xml, &["ContentDirectory"]));
    assert_eq!(content_directory_control_path(&xml).as_deref(), Some("/cds/control"));
}
