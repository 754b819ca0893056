use super::*;

#[test]
fn defaults_validate() {
    StampbookConfig::default().validate().unwrap();
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg = StampbookConfig::from_json_str(r#"{ "progress": { "tick_step": 5.0 } }"#).unwrap();
    assert_eq!(cfg.progress.tick_step, 5.0);
    assert_eq!(cfg.progress.increment, 10.0);
    assert_eq!(cfg.preprocess.bg_tolerance, 85.0);
    assert_eq!(cfg.celebration.particle_count, 150);
}

#[test]
fn invalid_values_are_rejected() {
    let err = StampbookConfig::from_json_str(r#"{ "celebration": { "decay": 0.0 } }"#)
        .unwrap_err();
    assert!(matches!(err, StampError::Validation(_)));

    let err = StampbookConfig::from_json_str(
        r#"{ "placement": { "multiplier_min": 2.0, "multiplier_max": 1.0 } }"#,
    )
    .unwrap_err();
    assert!(matches!(err, StampError::Validation(_)));
}

#[test]
fn malformed_json_is_serde_error() {
    let err = StampbookConfig::from_json_str("{").unwrap_err();
    assert!(matches!(err, StampError::Serde(_)));
}
