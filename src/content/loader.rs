//! Loader for RON tuning files at startup.

use bevy::prelude::*;
use ron::Options;
use std::fs;
use std::path::Path;

use crate::movement::MovementTuning;

/// File holding the movement tuning, relative to the data directory.
pub const MOVEMENT_FILE: &str = "movement.ron";

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse a single RON struct. `file` only labels errors.
pub fn parse_single<T>(file: &str, contents: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Load a single RON struct from disk.
fn load_single_file<T>(path: &Path) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_single(&file_name, &contents)
}

/// Load `movement.ron` from `base_path`. Fields missing from the file keep
/// their defaults.
pub fn load_movement_tuning(base_path: &Path) -> Result<MovementTuning, ContentLoadError> {
    let path = base_path.join(MOVEMENT_FILE);
    let tuning = load_single_file::<MovementTuning>(&path)?;
    debug!("Parsed movement tuning from {}", path.display());
    Ok(tuning)
}
