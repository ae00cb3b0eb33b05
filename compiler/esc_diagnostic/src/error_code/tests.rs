use super::*;

#[test]
fn display_matches_as_str() {
    for code in ErrorCode::ALL {
        assert_eq!(code.to_string(), code.as_str());
        assert!(!code.description().is_empty());
    }
}

#[test]
fn serializes_as_code_string() {
    assert_eq!(
        serde_json::to_string(&ErrorCode::X0002).ok().as_deref(),
        Some("\"X0002\"")
    );
}
