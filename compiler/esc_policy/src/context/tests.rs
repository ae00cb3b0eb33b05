use pretty_assertions::assert_eq;

use super::*;

#[test]
fn names_round_trip_through_from_str() {
    for context in Context::ALL {
        assert_eq!(context.name().parse::<Context>(), Ok(context));
    }
}

#[test]
fn unknown_name_is_returned_as_error() {
    assert_eq!("css".parse::<Context>(), Err("css".to_owned()));
    assert_eq!("HTML".parse::<Context>(), Err("HTML".to_owned()));
}

#[test]
fn serializes_lowercase() {
    assert_eq!(
        serde_json::to_string(&Context::Callback).unwrap_or_default(),
        "\"callback\""
    );
}
