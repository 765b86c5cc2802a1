//! Movement domain: collaborators handed to every tick.

use bevy::prelude::*;

use crate::movement::{CollisionQuery, Facing, MovementInput, MovementTuning, SurfaceHit};

/// Reactions and presentation notifications raised during a tick.
///
/// Every method has a default, so implementors only override what they use.
pub trait MovementObserver {
    fn facing_changed(&mut self, _facing: Facing) {}

    /// The character is flush against a wall it was moving into.
    fn touched_wall(&mut self, _wall: &SurfaceHit) {}

    /// The character is flush against a ceiling it was moving into.
    fn touched_ceiling(&mut self, _ceiling: &SurfaceHit) {}

    /// A tick found state it cannot act on and left the character untouched.
    fn invariant_violation(&mut self, message: &str) {
        error!("Movement invariant violated: {}", message);
    }
}

/// Everything one character tick reads or writes besides its own state.
pub struct TickContext<'a> {
    pub input: &'a mut MovementInput,
    pub world: &'a dyn CollisionQuery,
    pub observer: &'a mut dyn MovementObserver,
    pub tuning: &'a MovementTuning,
    /// Seconds for this tick, already multiplied by the time scale.
    pub dt: f32,
}
