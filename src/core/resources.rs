//! Core domain: shared resources for simulation timing.

use bevy::prelude::*;

/// Multiplier applied to every fixed tick's delta. `0.0` freezes movement
/// without stopping the schedule.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SimulationClock {
    pub time_scale: f32,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self { time_scale: 1.0 }
    }
}

impl SimulationClock {
    /// Scaled tick length. Negative scales are treated as paused.
    pub fn scaled(&self, delta_secs: f32) -> f32 {
        (delta_secs * self.time_scale).max(0.0)
    }

    pub fn is_paused(&self) -> bool {
        self.time_scale <= 0.0
    }
}
