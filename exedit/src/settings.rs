//! Tool settings.
//!
//! Settings are read from `exedit.toml` in the working directory, or from the
//! file given with `--settings`. A missing file gives the defaults.
//!
//! ```toml
//! save_policy = "preserve-groups"
//! backup = true
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use explodeconf::SavePolicy;
use serde::Deserialize;

/// Default settings file name.
pub const SETTINGS_FILE: &str = "exedit.toml";

/// Settings that apply to every command.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// How `Groups` is written on save.
    pub save_policy: SavePolicy,
    /// Keep a timestamped copy of the file before overwriting it.
    pub backup: bool,
}

impl Default for Settings {
    /// The editor writes the in-memory document unless told otherwise.
    fn default() -> Self {
        Self {
            save_policy: SavePolicy::OverwriteAll,
            backup: false,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from [`SETTINGS_FILE`] when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE));
        if !path.exists() {
            debug!("no settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        debug!("settings loaded from {}: {settings:?}", path.display());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(Some(&dir.path().join("none.toml"))).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.save_policy, SavePolicy::OverwriteAll);
    }

    #[test]
    fn test_parse_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exedit.toml");
        std::fs::write(&path, "save_policy = \"preserve-groups\"\nbackup = true\n").unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.save_policy, SavePolicy::PreserveGroupsFromDisk);
        assert!(settings.backup);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exedit.toml");
        std::fs::write(&path, "autosave = true\n").unwrap();
        assert!(Settings::load(Some(&path)).is_err());
    }
}
