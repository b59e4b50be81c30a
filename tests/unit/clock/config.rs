use super::*;
use crate::clock::format::HourCycle;
use crate::layout::options::LayoutMode;

#[test]
fn empty_json_is_the_default_config() {
    let config = ClockConfig::from_json_str("{}").unwrap();
    assert_eq!(config, ClockConfig::default());
}

#[test]
fn partial_json_fills_in_defaults() {
    let config = ClockConfig::from_json_str(
        r#"{
            "format": { "hour_cycle": "H12", "show_seconds": false },
            "layout": { "mode": "Wrapped", "spacing": 4.0 }
        }"#,
    )
    .unwrap();
    assert_eq!(config.format.hour_cycle, HourCycle::H12);
    assert!(config.format.leading_zero);
    assert!(!config.format.show_seconds);
    assert_eq!(config.layout.mode, LayoutMode::Wrapped);
    assert_eq!(config.layout.spacing, 4.0);
    assert_eq!(config.layout.morph_duration_millis, 700);
}

#[test]
fn invalid_values_are_rejected() {
    let err = ClockConfig::from_json_str(r#"{ "layout": { "spacing": -1.0 } }"#).unwrap_err();
    assert!(matches!(err, ClockError::Validation(_)), "{err}");

    let err = ClockConfig::from_json_str(r#"{ "layout": { "seconds_scale": 0.0 } }"#).unwrap_err();
    assert!(matches!(err, ClockError::Validation(_)), "{err}");

    let err = ClockConfig::from_json_str(r#"{ "palette": { "styles": [] } }"#).unwrap_err();
    assert!(matches!(err, ClockError::Validation(_)), "{err}");

    let err = ClockConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, ClockError::Serde(_)), "{err}");
}

#[test]
fn missing_file_reports_the_path() {
    let err = ClockConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("not/here.json"), "{err}");
}

#[test]
fn json_round_trips_through_pretty_output() {
    let config = ClockConfig::default();
    let text = config.to_json_pretty().unwrap();
    assert_eq!(ClockConfig::from_json_str(&text).unwrap(), config);
}

#[test]
fn stroke_padding_covers_the_palette() {
    let config = ClockConfig::default();
    assert_eq!(config.effective_layout().stroke_width, 3.0);
}
