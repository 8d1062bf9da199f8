use chart_frame::api::{FRAME_CONFIG_JSON_SCHEMA_V1, FrameConfig, GridConfig, GridConfigItem};
use chart_frame::core::FrameSize;

#[test]
fn contract_v1_round_trips() {
    let config = FrameConfig::default()
        .with_grid(GridConfig::new(
            GridConfigItem::default().with_guide(true).with_grid_ticks(8),
            GridConfigItem::default().with_bounds(Some(0.0), Some(1.0)),
        ))
        .with_y_labels_in_percent(true)
        .with_y_dimension_unit("%");

    let json = config.to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains(&format!("\"schema_version\": {FRAME_CONFIG_JSON_SCHEMA_V1}")));

    let parsed = FrameConfig::from_json_compat_str(&json).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn bare_object_uses_defaults_for_missing_fields() {
    let parsed = FrameConfig::from_json_compat_str(
        r#"{ "show_only_y": true, "grid": { "x": { "show_grid": false } } }"#,
    )
    .expect("parse");

    assert!(parsed.show_only_y);
    assert!(!parsed.grid.x.show_grid);
    assert!(parsed.grid.y.show_grid);
    assert_eq!(parsed.guide_value, 0.0);
}

#[test]
fn unknown_schema_version_is_rejected() {
    let err = FrameConfig::from_json_compat_str(r#"{ "schema_version": 2, "config": {} }"#)
        .expect_err("unsupported version");
    assert!(err.to_string().contains("schema version"));
}

#[test]
fn inverted_bounds_fail_validation() {
    let result = FrameConfig::from_json_compat_str(r#"{ "grid": { "y": { "min": 5.0, "max": 1.0 } } }"#);
    assert!(result.is_err());
}

#[test]
fn frame_size_serializes_with_field_names() {
    let json = FrameSize::new(20.0, 28.5).to_json().expect("serialize");
    assert_eq!(json, r#"{"x_axis_height":20.0,"y_axis_width":28.5}"#);
}
