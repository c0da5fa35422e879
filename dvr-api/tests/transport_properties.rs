//! Property tests for port selection and query construction

use dvr_api::{DeviceEndpoint, DevicePorts, Params, RequestDescriptor};
use proptest::prelude::*;

const KNOWN_PREFIXES: [&str; 4] = ["status", "chEpg", "schedule", "recorded"];

fn unknown_prefix() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9]{0,11}"
        .prop_filter("must not be a known area", |s| !KNOWN_PREFIXES.contains(&s.as_str()))
}

proptest! {
    #[test]
    fn unknown_prefix_uses_status_port(
        prefix in unknown_prefix(),
        rest in "[a-zA-Z]{0,16}",
        status in 1u16..,
        schedule in 1u16..
    ) {
        let ports = DevicePorts { status, schedule };
        let path = format!("{}/{}", prefix, rest);
        prop_assert_eq!(ports.port_for_path(&path), status);
    }

    #[test]
    fn none_values_never_reach_the_query(
        entries in prop::collection::vec(("[a-zA-Z]{1,10}", prop::option::of("\\PC{0,20}")), 0..8)
    ) {
        let params: Params = entries.iter().map(|(k, v)| (k.as_str(), v.clone())).collect();
        let url = RequestDescriptor::new("status/channelListGet", params)
            .url(&DeviceEndpoint::new("10.0.0.2"))
            .unwrap();

        let sent: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let expected: Vec<(String, String)> = entries
            .iter()
            .filter_map(|(k, v)| v.clone().map(|v| (k.clone(), v)))
            .collect();
        prop_assert_eq!(sent, expected);
    }

    #[test]
    fn numbers_are_stringified_verbatim(id in any::<u64>(), quality in any::<u32>()) {
        let params = Params::new().with("id", id).with_opt("quality", Some(quality));
        let (id_text, quality_text) = (id.to_string(), quality.to_string());
        prop_assert_eq!(params.get("id"), Some(id_text.as_str()));
        prop_assert_eq!(params.get("quality"), Some(quality_text.as_str()));
    }
}
