//! Operations under the `status` prefix

use serde_json::Value;

use crate::error::Result;
use crate::json::find_array;
use crate::models::{BroadcastBand, Channel, DeviceStatus, ProgramLookup, TuningIds};
use crate::operation::DeviceOperation;
use crate::shape::extract_program;
use crate::transport::Params;

/// Channel list for one broadcast band
pub struct ChannelListOperation;

impl DeviceOperation for ChannelListOperation {
    type Request = BroadcastBand;
    type Response = Vec<Channel>;

    const PATH: &'static str = "status/channelListGet";

    fn params(request: &Self::Request) -> Result<Params> {
        Ok(Params::new().with("broadcastingType", request.broadcasting_type()))
    }

    fn parse_response(body: Value) -> Result<Self::Response> {
        Ok(find_array(&body, &["channel", "channels", "item", "items", "list"])
            .map(|entries| entries.iter().filter_map(Channel::from_value).collect())
            .unwrap_or_default())
    }
}

/// Current program on one service
pub struct ProgramDetailOperation;

impl DeviceOperation for ProgramDetailOperation {
    type Request = TuningIds;
    type Response = ProgramLookup;

    const PATH: &'static str = "status/channelInfoGet2";

    fn params(request: &Self::Request) -> Result<Params> {
        Ok(Params::new()
            .with("networkId", request.network_id)
            .with("transportStreamId", request.transport_stream_id)
            .with("serviceId", request.service_id)
            .with("withDescriptionLong", 1))
    }

    fn parse_response(body: Value) -> Result<Self::Response> {
        Ok(ProgramLookup {
            program: extract_program(&body),
            raw: body,
        })
    }
}

/// Device health and tuner status
pub struct DeviceStatusOperation;

impl DeviceOperation for DeviceStatusOperation {
    type Request = ();
    type Response = DeviceStatus;

    const PATH: &'static str = "status/boxStatusListGet";

    fn params(_request: &Self::Request) -> Result<Params> {
        Ok(Params::new())
    }

    fn parse_response(body: Value) -> Result<Self::Response> {
        Ok(DeviceStatus::from_value(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_channel_list_params() {
        let params = ChannelListOperation::params(&BroadcastBand::BsSatellite).unwrap();
        assert_eq!(params.get("broadcastingType"), Some("2"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_channel_list_skips_non_objects() {
        let body = json!({
            "errorCode": 0,
            "channel": [
                {"networkId": 4, "transportStreamId": 16625, "serviceId": 101, "serviceName": "BS1"},
                "garbage",
                {"serviceName": "No ids"}
            ]
        });
        let channels = ChannelListOperation::parse_response(body).unwrap();
        assert_eq!(channels.len(), 2);
        assert!(channels[0].tuning().is_some());
        assert!(channels[1].tuning().is_none());
    }

    #[test]
    fn test_channel_list_empty_body() {
        assert!(ChannelListOperation::parse_response(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_program_detail_params() {
        let params = ProgramDetailOperation::params(&TuningIds {
            network_id: 32736,
            transport_stream_id: 32737,
            service_id: 1024,
        })
        .unwrap();

        let pairs: Vec<(&str, &str)> = params.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("networkId", "32736"),
                ("transportStreamId", "32737"),
                ("serviceId", "1024"),
                ("withDescriptionLong", "1"),
            ]
        );
    }

    #[test]
    fn test_program_detail_keeps_raw_when_unresolved() {
        let body = json!({"errorCode": 0, "odd": 1});
        let lookup = ProgramDetailOperation::parse_response(body.clone()).unwrap();
        assert_eq!(lookup.program, None);
        assert_eq!(lookup.raw, body);
    }

    #[test]
    fn test_device_status_service() {
        assert_eq!(DeviceStatusOperation::service(), Some(crate::Service::Status));
        let status = DeviceStatusOperation::parse_response(json!({"errorCode": 0})).unwrap();
        assert_eq!(status.error_code, Some(0));
    }
}
