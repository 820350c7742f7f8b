pub mod models;

pub use models::*;

use crate::types::errors::ConfigError;
use std::fs;
use std::path::Path;

/// Load settings from a JSON file, or the built-in defaults without one.
pub fn load_settings(config_path: Option<&Path>) -> Result<RepackSettings, ConfigError> {
    let Some(path) = config_path else {
        return Ok(RepackSettings::default());
    };

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: RepackSettings =
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    log::debug!(
        "Loaded {} profiles from {}",
        settings.profiles.len(),
        path.display()
    );
    Ok(settings)
}

impl RepackSettings {
    pub fn profile(&self, name: &str) -> Result<&RepackProfile, ConfigError> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ConfigError::UnknownProfile(name.to_string()))
    }

    /// First profile whose archive extensions match `archive_path`.
    pub fn profile_for_archive(&self, archive_path: &Path) -> Result<&RepackProfile, ConfigError> {
        archive_path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.profiles.iter().find(|p| p.handles_extension(ext)))
            .ok_or_else(|| ConfigError::NoProfileForArchive(archive_path.to_path_buf()))
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;
