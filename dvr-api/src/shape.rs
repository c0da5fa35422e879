//! Locating the current-program record in a program-detail response.
//!
//! Firmwares nest the record differently: under `program`, as the first
//! element of `programs`, under a `channel` wrapper, directly at the top
//! level, or somewhere else entirely. Each known layout is a
//! [`ShapeStrategy`]; they are tried in [`RESOLUTION_ORDER`] and the first
//! candidate found wins.

use serde_json::Value;
use tracing::debug;

use crate::json::{first_text, has_any};
use crate::models::{ProgramRecord, START_KEYS, TITLE_KEYS};

const OBJECT_KEYS: [&str; 4] = ["program", "currentProgram", "event", "item"];
const ARRAY_KEYS: [&str; 4] = ["programs", "items", "events", "list"];

/// One known layout of a program-detail response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeStrategy {
    /// A record object under a known key, at the top level or under `result`
    DirectObject,
    /// First element of a record array under a known key, same scopes
    FirstOfArray,
    /// Either of the above, one level down under `channel`
    NestedUnderChannel,
    /// The response (or its `result`) is itself the record
    SelfRecord,
    /// Any top-level value that looks like a record; for an array response,
    /// its first element
    AnyTopLevel,
}

/// Strategies in priority order
pub const RESOLUTION_ORDER: [ShapeStrategy; 5] = [
    ShapeStrategy::DirectObject,
    ShapeStrategy::FirstOfArray,
    ShapeStrategy::NestedUnderChannel,
    ShapeStrategy::SelfRecord,
    ShapeStrategy::AnyTopLevel,
];

impl ShapeStrategy {
    /// Find this layout's candidate record in `root`
    pub fn locate<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        match self {
            ShapeStrategy::DirectObject => scopes(root).find_map(direct_object),
            ShapeStrategy::FirstOfArray => scopes(root).find_map(first_of_array),
            ShapeStrategy::NestedUnderChannel => scopes(root)
                .filter_map(|scope| scope.get("channel"))
                .find_map(|channel| direct_object(channel).or_else(|| first_of_array(channel))),
            ShapeStrategy::SelfRecord => scopes(root).find(|scope| looks_like_program(scope)),
            ShapeStrategy::AnyTopLevel => match root.as_object() {
                Some(members) => members.values().find_map(program_or_first_element),
                None => program_or_first_element(root),
            },
        }
    }
}

/// The response itself, then its `result` member
fn scopes(root: &Value) -> impl Iterator<Item = &Value> {
    [Some(root), root.get("result")].into_iter().flatten()
}

fn direct_object(scope: &Value) -> Option<&Value> {
    OBJECT_KEYS
        .iter()
        .filter_map(|key| scope.get(*key))
        .find(|candidate| has_title(candidate))
}

fn first_of_array(scope: &Value) -> Option<&Value> {
    ARRAY_KEYS
        .iter()
        .filter_map(|key| scope.get(*key)?.as_array()?.first())
        .find(|candidate| has_title(candidate))
}

/// `value` itself, or its first element when it is an array
fn program_or_first_element(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items.first().filter(|first| looks_like_program(first)),
        _ => Some(value).filter(|v| looks_like_program(v)),
    }
}

fn has_title(candidate: &Value) -> bool {
    candidate.is_object() && first_text(candidate, &TITLE_KEYS).is_some()
}

fn looks_like_program(candidate: &Value) -> bool {
    has_title(candidate) && has_any(candidate, &START_KEYS)
}

/// Locate the raw current-program object in a response
pub fn locate_program(root: &Value) -> Option<&Value> {
    RESOLUTION_ORDER.iter().find_map(|strategy| {
        let found = strategy.locate(root);
        if found.is_some() {
            debug!(?strategy, "program record located");
        }
        found
    })
}

/// Extract the current program from a response, `None` when no layout matches
pub fn extract_program(root: &Value) -> Option<ProgramRecord> {
    let program = locate_program(root).and_then(ProgramRecord::from_value);
    if program.is_none() {
        debug!("no known program layout in response");
    }
    program
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn title_of(root: Value) -> Option<String> {
        extract_program(&root).map(|p| p.title)
    }

    #[test]
    fn test_object_outranks_array() {
        let root = json!({
            "result": {
                "programs": [{"title": "From array", "startDateTime": "t"}],
                "program": {"title": "From object", "startDateTime": "t"}
            }
        });
        assert_eq!(title_of(root).as_deref(), Some("From object"));
    }

    #[test]
    fn test_fallback_any_top_level() {
        let root = json!({"foo": {"title": "X", "startDateTime": "2024-05-01T19:00:00+09:00"}});
        let located = locate_program(&root).unwrap();
        assert_eq!(located, &root["foo"]);
        assert_eq!(title_of(root).as_deref(), Some("X"));
    }

    #[test]
    fn test_array_response_first_element() {
        let root = json!([{"title": "Bare array", "startDateTime": "t"}, {"title": "Later"}]);
        assert_eq!(locate_program(&root), Some(&root[0]));
        assert_eq!(title_of(root).as_deref(), Some("Bare array"));
    }

    #[rstest]
    #[case(json!({"currentProgram": {"name": "Direct"}}), "Direct")]
    #[case(json!({"result": {"event": {"programTitle": "Under result"}}}), "Under result")]
    #[case(json!({"items": [{"title": "First"}, {"title": "Second"}]}), "First")]
    #[case(json!({"channel": {"program": {"title": "Channel object"}}}), "Channel object")]
    #[case(json!({"result": {"channel": {"events": [{"title": "Channel array"}]}}}), "Channel array")]
    #[case(json!({"title": "Self", "startTime": "t", "errorCode": 0}), "Self")]
    #[case(json!({"result": {"title": "Result self", "start": "t"}}), "Result self")]
    #[case(json!({"errorCode": 0, "data": [{"title": "Array fallback", "startDateTime": "t"}]}), "Array fallback")]
    fn test_layouts(#[case] root: Value, #[case] expected: &str) {
        assert_eq!(title_of(root).as_deref(), Some(expected));
    }

    #[test]
    fn test_top_level_outranks_result_scope() {
        let root = json!({
            "program": {"title": "Top"},
            "result": {"program": {"title": "Nested"}}
        });
        assert_eq!(title_of(root).as_deref(), Some("Top"));
    }

    #[test]
    fn test_channel_wrapper_outranks_self_record() {
        let root = json!({
            "title": "Channel 4",
            "startDateTime": "t",
            "channel": {"program": {"title": "Real program"}}
        });
        assert_eq!(title_of(root).as_deref(), Some("Real program"));
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!(null))]
    #[case(json!({"errorCode": 0}))]
    #[case(json!({"program": {"startDateTime": "t"}}))]
    #[case(json!({"programs": []}))]
    #[case(json!({"foo": {"title": "No time"}}))]
    #[case(json!([{"title": "No time"}]))]
    #[case(json!([{"errorCode": 0}, {"title": "Second", "startDateTime": "t"}]))]
    fn test_unresolved(#[case] root: Value) {
        assert_eq!(extract_program(&root), None);
    }
}
