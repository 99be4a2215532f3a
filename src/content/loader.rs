//! Loader for movement profile files.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::MovementProfileDef;
use super::validation::{ConfigError, tuning_from_profile};
use crate::movement::MovementTuning;

/// Error type for profile loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
    /// Set when the file parsed but its values were rejected.
    pub validation: Option<ConfigError>,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ContentLoadError {}

/// On-disk encodings accepted for a movement profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFormat {
    Ron,
    Json,
}

impl ProfileFormat {
    /// Pick the format from a file extension. Anything that is not `.json`
    /// is read as RON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ProfileFormat::Json,
            _ => ProfileFormat::Ron,
        }
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse a profile from an in-memory string.
pub fn parse_profile(
    contents: &str,
    format: ProfileFormat,
    file_name: &str,
) -> Result<MovementProfileDef, ContentLoadError> {
    let parsed = match format {
        ProfileFormat::Ron => ron_options()
            .from_str::<MovementProfileDef>(contents)
            .map_err(|e| e.to_string()),
        ProfileFormat::Json => {
            serde_json::from_str::<MovementProfileDef>(contents).map_err(|e| e.to_string())
        }
    };

    parsed.map_err(|message| ContentLoadError {
        file: file_name.to_string(),
        message: format!("Parse error: {}", message),
        validation: None,
    })
}

/// Load a profile file from disk without validating its values.
pub fn load_profile(path: &Path) -> Result<MovementProfileDef, ContentLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
        validation: None,
    })?;

    parse_profile(&contents, ProfileFormat::from_path(path), &file_name)
}

/// Load and validate a profile, producing runtime tuning.
pub fn load_movement_tuning(path: &Path) -> Result<MovementTuning, ContentLoadError> {
    let def = load_profile(path)?;
    tuning_from_profile(&def).map_err(|error| ContentLoadError {
        file: path.display().to_string(),
        message: format!("Validation error: {}", error),
        validation: Some(error),
    })
}
