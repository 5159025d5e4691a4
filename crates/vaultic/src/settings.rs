//! Persisted presentation options.
//!
//! These settings shape how client implementations present vault
//! contents: whether entries reveal a `"user | password"` preview as
//! their subtitle, and whether lists are kept alphabetically sorted
//! (sorted-insert events) or in database order (append events). The
//! list layer itself treats subtitles and ordering mode as opaque.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors from settings persistence.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Reading or writing the settings file failed.
    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid TOML.
    #[error("settings file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The settings could not be serialized.
    #[error("settings could not be serialized: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// View-layer options, persisted as TOML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Show `"user | password"` as entry subtitles instead of leaving
    /// them empty.
    pub show_user_name_passwords_in_list_view: bool,
    /// Keep lists alphabetically sorted (groups and entries separately,
    /// groups first) instead of database order.
    pub sort_alphabetically_in_list_view: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            show_user_name_passwords_in_list_view: false,
            sort_alphabetically_in_list_view: true,
        }
    }
}

impl ViewSettings {
    /// Loads settings from a TOML file. Missing keys fall back to their
    /// defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Loads settings, falling back to defaults when the file does not
    /// exist yet. Other errors still surface.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        match Self::load(&path) {
            Ok(settings) => Ok(settings),
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Saves settings to a TOML file, written via a temporary file and
    /// rename so a crash cannot leave a half-written config behind.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        let tmp = path.with_extension("toml.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ViewSettings::default();
        assert!(!settings.show_user_name_passwords_in_list_view);
        assert!(settings.sort_alphabetically_in_list_view);
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.toml");

        let settings = ViewSettings {
            show_user_name_passwords_in_list_view: true,
            sort_alphabetically_in_list_view: false,
        };
        settings.save(&path).unwrap();

        let loaded = ViewSettings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.toml");
        fs::write(&path, "show_user_name_passwords_in_list_view = true\n").unwrap();

        let loaded = ViewSettings::load(&path).unwrap();
        assert!(loaded.show_user_name_passwords_in_list_view);
        assert!(loaded.sort_alphabetically_in_list_view);
    }

    #[test]
    fn test_load_or_default_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let loaded = ViewSettings::load_or_default(&path).unwrap();
        assert_eq!(loaded, ViewSettings::default());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.toml");
        fs::write(&path, "sort_alphabetically_in_list_view = \"yes\"\n").unwrap();

        assert!(matches!(
            ViewSettings::load(&path),
            Err(SettingsError::Parse(_))
        ));
    }
}
