//! Content domain: tests for tuning loading and validation.

use std::path::Path;

use super::loader::parse_single;
use super::{DATA_DIR, load_movement_tuning, validate_tuning};
use crate::movement::MovementTuning;

// -----------------------------------------------------------------------------
// Loading tests
// -----------------------------------------------------------------------------

#[test]
fn test_shipped_tuning_matches_defaults() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DATA_DIR);
    let tuning = load_movement_tuning(&path).expect("shipped movement.ron should parse");
    assert_eq!(tuning, MovementTuning::default());
}

#[test]
fn test_missing_fields_keep_defaults() {
    let tuning: MovementTuning =
        parse_single("inline", "(run_speed: 400.0, climb_speed: 90.0)").unwrap();
    assert_eq!(tuning.run_speed, 400.0);
    assert_eq!(tuning.climb_speed, 90.0);
    assert_eq!(tuning.gravity, MovementTuning::default().gravity);
}

#[test]
fn test_parse_error_names_file() {
    let err = parse_single::<MovementTuning>("broken.ron", "(run_speed: )").unwrap_err();
    assert_eq!(err.file, "broken.ron");
    assert!(err.to_string().starts_with("Failed to load broken.ron: Parse error"));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = load_movement_tuning(Path::new("does/not/exist")).unwrap_err();
    assert!(err.message.starts_with("IO error"));
}

// -----------------------------------------------------------------------------
// Validation tests
// -----------------------------------------------------------------------------

#[test]
fn test_default_tuning_is_valid() {
    assert!(validate_tuning(&MovementTuning::default()).is_empty());
}

#[test]
fn test_inverted_jump_horizontal_bounds_rejected() {
    let tuning = MovementTuning {
        jump_horizontal_min: 300.0,
        jump_horizontal_max: 200.0,
        ..Default::default()
    };
    let errors = validate_tuning(&tuning);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "jump_horizontal_min");
}

#[test]
fn test_non_positive_values_rejected() {
    let tuning = MovementTuning {
        gravity: 0.0,
        skin_width: -1.0,
        ..Default::default()
    };
    let fields: Vec<_> = validate_tuning(&tuning).iter().map(|e| e.field).collect();
    assert!(fields.contains(&"gravity"));
    assert!(fields.contains(&"skin_width"));
}

#[test]
fn test_nan_is_rejected() {
    let tuning = MovementTuning {
        drag: f32::NAN,
        ..Default::default()
    };
    let errors = validate_tuning(&tuning);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "drag");
    assert!(errors[0].to_string().contains("must not be negative"));
}

#[test]
fn test_run_speed_above_global_max_rejected() {
    let tuning = MovementTuning {
        run_speed: 500.0,
        ..Default::default()
    };
    let fields: Vec<_> = validate_tuning(&tuning).iter().map(|e| e.field).collect();
    assert_eq!(fields, vec!["run_speed"]);
}
