//! Validation for movement tuning values.

use crate::movement::MovementTuning;

/// A validation error naming the offending field.
#[derive(Debug)]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MovementTuning field '{}' {}", self.field, self.reason)
    }
}

/// Helper macro for checking a value is strictly positive
macro_rules! check_positive {
    ($errors:expr, $tuning:expr, $($field:ident),+ $(,)?) => {
        $(
            if !($tuning.$field > 0.0) {
                $errors.push(ValidationError {
                    field: stringify!($field),
                    reason: format!("must be positive, got {}", $tuning.$field),
                });
            }
        )+
    };
}

/// Helper macro for checking a value is zero or positive
macro_rules! check_non_negative {
    ($errors:expr, $tuning:expr, $($field:ident),+ $(,)?) => {
        $(
            if !($tuning.$field >= 0.0) {
                $errors.push(ValidationError {
                    field: stringify!($field),
                    reason: format!("must not be negative, got {}", $tuning.$field),
                });
            }
        )+
    };
}

/// Helper macro for checking one field does not exceed another
macro_rules! check_order {
    ($errors:expr, $tuning:expr, $low:ident <= $high:ident) => {
        if $tuning.$low > $tuning.$high {
            $errors.push(ValidationError {
                field: stringify!($low),
                reason: format!(
                    "({}) must not exceed {} ({})",
                    $tuning.$low,
                    stringify!($high),
                    $tuning.$high
                ),
            });
        }
    };
}

/// Validate a loaded tuning.
/// Returns a list of validation errors, empty if the tuning is usable.
pub fn validate_tuning(tuning: &MovementTuning) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_positive!(
        errors,
        tuning,
        walk_speed,
        sneak_speed,
        run_speed,
        acceleration,
        gravity,
        jump_speed,
        max_velocity_x,
        max_velocity_y,
        skin_width,
        climb_speed,
        wall_slide_speed,
        bezier_rate,
    );

    check_non_negative!(
        errors,
        tuning,
        drag,
        air_drag,
        jump_duration_min,
        jump_control_time,
        jump_grace_period,
        jump_horizontal_min,
        ground_probe_inset,
        corner_save_width,
        ledge_drop_tolerance,
        wall_grab_delay,
        ledge_vault_lift,
        ledge_reach,
    );

    check_order!(errors, tuning, jump_horizontal_min <= jump_horizontal_max);
    check_order!(errors, tuning, jump_duration_min <= jump_control_time);
    check_order!(errors, tuning, run_speed <= max_velocity_x);
    check_order!(errors, tuning, jump_horizontal_max <= max_velocity_x);

    errors
}
