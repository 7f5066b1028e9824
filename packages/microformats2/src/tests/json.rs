use super::*;
use crate::error::ParseError;

#[test]
fn round_trip_is_fixpoint_stable() {
    let document = crate::parse(
        r#"<div class="h-entry"><h1 class="p-name">T</h1><span class="p-author h-card">Bob</span></div>"#,
        Some(url::Url::parse("http://ex.com/").unwrap()),
    );
    let first = document.as_json();
    let reloaded = Document::new_from_json(&first).unwrap();
    let second = reloaded.as_json();
    assert_eq!(first, second);
}

#[test]
fn missing_type_array_is_an_error() {
    let err = Document::new_from_json(r#"{"items":[{"type":[],"properties":{}}],"rels":{},"rel-urls":{}}"#);
    assert!(matches!(err, Err(ParseError::MissingTypes)));
}

#[test]
fn invalid_json_is_an_error() {
    let err = Document::new_from_json("not json");
    assert!(matches!(err, Err(ParseError::InvalidJson(_))));
}
