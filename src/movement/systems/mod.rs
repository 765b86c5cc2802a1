//! Movement domain: system modules for input, simulation and presentation.

pub(crate) mod input;
pub(crate) mod presentation;
pub(crate) mod simulate;

pub(crate) use input::read_input;
pub(crate) use presentation::apply_facing_to_sprite;
pub(crate) use simulate::simulate_characters;
