use howsmynhs_core::{EngineConfig, MergerRegistry, NhsError};

#[test]
fn integrity_failures_are_told_apart_from_empty_pages() {
    assert!(NhsError::predecessor_not_found("AB", "A").is_integrity_failure());
    assert!(NhsError::format("x", "bad").is_integrity_failure());
    assert!(!NhsError::not_found("beds row for A").is_integrity_failure());
    assert!(
        !NhsError::InsufficientData {
            what: "waiting".into(),
            needed: 10,
            found: 2,
        }
        .is_integrity_failure()
    );
}

#[test]
fn errors_survive_a_json_round_trip() {
    let err = NhsError::predecessor_not_found("AB", "A");
    let json = serde_json::to_string(&err).unwrap();
    let back: NhsError = serde_json::from_str(&json).unwrap();
    assert_eq!(back, err);
}

#[test]
fn malformed_json_config_maps_to_invalid_arg() {
    assert!(matches!(
        EngineConfig::from_json_str("{not json"),
        Err(NhsError::InvalidArg(_))
    ));
    assert!(matches!(
        MergerRegistry::from_json_str("[]"),
        Err(NhsError::InvalidArg(_))
    ));
}
