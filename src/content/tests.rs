//! Content domain: tests for profile parsing and validation.

use std::path::Path;

use super::{
    ConfigError, MovementProfileDef, PROFILE_SCHEMA_VERSION, ProfileFormat, load_movement_tuning,
    parse_profile, tuning_from_profile, validate_tuning,
};
use crate::movement::{ControllerVariant, MovementTuning};

const MINIMAL_RON: &str = r#"(
    schema_version: 1,
    movement: (
        acceleration: 70.0,
        max_speed: 12.0,
        ground_linear_drag: 7.0,
        air_linear_drag: 2.5,
    ),
    jumping: (
        jump_force: 25.0,
        extra_jumps: 1,
        extra_jump_min_height: 1.0,
        fall_multiplier: 8.0,
        low_jump_fall_multiplier: 14.0,
    ),
    timing: (
        jump_input_buffer_time: 0.2,
        coyote_jump_time: 0.2,
    ),
)"#;

fn profile_with_extra_jumps(extra_jumps: i64) -> MovementProfileDef {
    let mut def = MovementProfileDef::from(&MovementTuning::default());
    def.jumping.extra_jumps = extra_jumps;
    def
}

// -----------------------------------------------------------------------------
// Parsing
// -----------------------------------------------------------------------------

#[test]
fn test_minimal_ron_profile_fills_defaults() {
    let def = parse_profile(MINIMAL_RON, ProfileFormat::Ron, "inline.ron").unwrap();
    assert_eq!(def.schema_version, 1);
    assert_eq!(def.variant, ControllerVariant::Refined);

    let tuning = tuning_from_profile(&def).unwrap();
    assert_eq!(tuning, MovementTuning::default());
}

#[test]
fn test_json_profile_selects_variant() {
    let json = r#"{
        "schema_version": 1,
        "variant": "Basic",
        "movement": { "acceleration": 50.0, "max_speed": 8.0,
                      "ground_linear_drag": 6.0, "air_linear_drag": 2.0 },
        "jumping": { "jump_force": 20.0, "extra_jumps": 2, "extra_jump_min_height": 0.5,
                     "fall_multiplier": 6.0, "low_jump_fall_multiplier": 10.0 },
        "timing": { "jump_input_buffer_time": 0.15, "coyote_jump_time": 0.1 }
    }"#;

    let def = parse_profile(json, ProfileFormat::Json, "inline.json").unwrap();
    let tuning = tuning_from_profile(&def).unwrap();

    assert_eq!(tuning.variant, ControllerVariant::Basic);
    assert_eq!(tuning.max_move_speed, 8.0);
    assert_eq!(tuning.initial_extra_jumps, 2);
    assert_eq!(tuning.coyote_jump_time, 0.1);
}

#[test]
fn test_parse_error_names_file() {
    let err = parse_profile("(schema_version: )", ProfileFormat::Ron, "broken.ron").unwrap_err();
    assert_eq!(err.file, "broken.ron");
    assert!(err.message.starts_with("Parse error"));
    assert!(err.validation.is_none());
}

#[test]
fn test_format_from_extension() {
    assert_eq!(
        ProfileFormat::from_path(Path::new("movement.json")),
        ProfileFormat::Json
    );
    assert_eq!(
        ProfileFormat::from_path(Path::new("movement.JSON")),
        ProfileFormat::Json
    );
    assert_eq!(
        ProfileFormat::from_path(Path::new("movement.ron")),
        ProfileFormat::Ron
    );
    assert_eq!(
        ProfileFormat::from_path(Path::new("movement")),
        ProfileFormat::Ron
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let err = load_movement_tuning(Path::new("does/not/exist.ron")).unwrap_err();
    assert!(err.message.starts_with("IO error"));
}

#[test]
fn test_shipped_profiles_are_valid() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));

    let ron = load_movement_tuning(&root.join("assets/data/movement.ron")).unwrap();
    assert_eq!(ron, MovementTuning::default());

    let json = load_movement_tuning(&root.join("assets/data/movement_basic.json")).unwrap();
    assert_eq!(json.variant, ControllerVariant::Basic);
}

// -----------------------------------------------------------------------------
// Validation
// -----------------------------------------------------------------------------

#[test]
fn test_default_tuning_is_valid() {
    assert!(validate_tuning(&MovementTuning::default()).is_empty());
}

#[test]
fn test_negative_extra_jumps_rejected() {
    let err = tuning_from_profile(&profile_with_extra_jumps(-1)).unwrap_err();
    assert!(err.mentions("initial_extra_jumps"));
    assert_eq!(err.errors[0].reason, "must not be negative");
}

#[test]
fn test_unknown_schema_version_rejected() {
    let mut def = profile_with_extra_jumps(1);
    def.schema_version = PROFILE_SCHEMA_VERSION + 1;

    let err = tuning_from_profile(&def).unwrap_err();
    assert!(err.mentions("schema_version"));
    assert_eq!(err.errors.len(), 1);
    assert_eq!(err.errors[0].reason, "is not supported");
}

#[test]
fn test_zero_extra_jumps_allowed() {
    let tuning = tuning_from_profile(&profile_with_extra_jumps(0)).unwrap();
    assert_eq!(tuning.initial_extra_jumps, 0);
}

#[test]
fn test_negative_magnitudes_rejected() {
    let tuning = MovementTuning {
        max_move_speed: -1.0,
        coyote_jump_time: -0.1,
        ..Default::default()
    };
    let error = ConfigError {
        errors: validate_tuning(&tuning),
    };

    assert_eq!(error.errors.len(), 2);
    assert!(error.mentions("max_move_speed"));
    assert!(error.mentions("coyote_jump_time"));
}

#[test]
fn test_non_finite_values_rejected() {
    let tuning = MovementTuning {
        jump_force: f32::NAN,
        foot_offset: bevy::math::Vec2::new(0.0, f32::INFINITY),
        ..Default::default()
    };
    let errors = validate_tuning(&tuning);

    assert!(
        errors
            .iter()
            .any(|e| e.field == "jump_force" && e.reason == "must be finite")
    );
    assert!(errors.iter().any(|e| e.field == "foot_offset"));
}

#[test]
fn test_unit_interval_and_mask_checks() {
    let tuning = MovementTuning {
        horizontal_dead_zone: 1.5,
        flat_ground_min_normal_y: -0.1,
        ground_layer_mask: 0,
        ..Default::default()
    };
    let error = ConfigError {
        errors: validate_tuning(&tuning),
    };

    assert!(error.mentions("horizontal_dead_zone"));
    assert!(error.mentions("flat_ground_min_normal_y"));
    assert!(error.mentions("ground_layer_mask"));
}

#[test]
fn test_validation_collects_every_error() {
    let mut def = profile_with_extra_jumps(-3);
    def.movement.acceleration = -5.0;
    def.squash.duration = -1.0;

    let err = tuning_from_profile(&def).unwrap_err();
    assert_eq!(err.errors.len(), 3);

    let message = err.to_string();
    assert!(message.contains("'initial_extra_jumps' = -3 must not be negative"));
    assert!(message.contains("movement_acceleration"));
    assert!(message.contains("jump_squash.duration"));
}

#[test]
fn test_profile_round_trips_through_tuning() {
    let tuning = MovementTuning {
        variant: ControllerVariant::Basic,
        initial_extra_jumps: 3,
        max_move_speed: 9.5,
        ..Default::default()
    };
    let def = MovementProfileDef::from(&tuning);
    assert_eq!(tuning_from_profile(&def).unwrap(), tuning);
}
