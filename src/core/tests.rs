//! Core domain: tests for the simulation clock.

use super::SimulationClock;

#[test]
fn test_clock_defaults_to_real_time() {
    let clock = SimulationClock::default();
    assert_eq!(clock.scaled(0.5), 0.5);
    assert!(!clock.is_paused());
}

#[test]
fn test_clock_scales_delta() {
    let clock = SimulationClock { time_scale: 0.25 };
    assert_eq!(clock.scaled(0.5), 0.125);
}

#[test]
fn test_clock_zero_or_negative_scale_pauses() {
    let frozen = SimulationClock { time_scale: 0.0 };
    assert_eq!(frozen.scaled(1.0 / 64.0), 0.0);
    assert!(frozen.is_paused());

    let reversed = SimulationClock { time_scale: -1.0 };
    assert_eq!(reversed.scaled(1.0 / 64.0), 0.0);
    assert!(reversed.is_paused());
}
