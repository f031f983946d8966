//! Configuration types.
//!
//! Configuration lives in `config.toml` under the platform config directory.
//! A missing file is not an error: every section falls back to its defaults.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::display::ActionDisplayConfig;
use crate::error::ConfigError;

/// Runtime configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Hotkey configuration
    #[serde(default)]
    pub hotkey: HotkeyConfig,

    /// Search provider settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Options forwarded to the renderer
    #[serde(default)]
    pub display: ActionDisplayConfig,

    /// Extra translation entries, merged over the built-in ones.
    #[serde(default)]
    pub translations: HashMap<String, String>,
}

/// Hotkey configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotkeyConfig {
    /// Chord that opens the spotlight, e.g., "mod+."
    pub spotlight: String,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            spotlight: "mod+.".to_string(),
        }
    }
}

/// Search provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Name substituted into the section header.
    pub provider_name: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            provider_name: "actionMenuExampleComponent".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path().ok_or(ConfigError::NoConfigDir)?;
        Self::load_from(&path)
    }

    /// Load from `path`, or return defaults when the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        tracing::info!("Loading config from {:?}", path);
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&contents)
    }

    /// Parse TOML text.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("quicksearch"))
}

/// Get the path to config.toml.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{ActionStyling, TextIcon};
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.hotkey.spotlight, "mod+.");
        assert_eq!(config.search.provider_name, "actionMenuExampleComponent");
        assert_eq!(config.display.contextual.featured_count, 2);
        assert!(config.translations.is_empty());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.hotkey.spotlight, "mod+.");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[hotkey]
spotlight = "command+k"

[display.contextual]
featured_count = 3
styling = "dropdown"
button_contents = "text_and_icon"

[translations]
"power.actions" = "Power"
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.hotkey.spotlight, "command+k");
        assert_eq!(config.search.provider_name, "actionMenuExampleComponent");
        assert_eq!(config.display.contextual.featured_count, 3);
        assert_eq!(config.display.contextual.styling, ActionStyling::Dropdown);
        assert_eq!(config.display.contextual.button_contents, TextIcon::TextAndIcon);
        assert_eq!(config.translations.get("power.actions").map(String::as_str), Some("Power"));
    }

    #[test]
    fn test_unreadable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_from(dir.path());
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_parse_error() {
        let result = AppConfig::parse("[hotkey\nspotlight = 1");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_path_ends_with_file_name() {
        if let Some(path) = config_path() {
            assert!(path.ends_with("quicksearch/config.toml"));
        }
    }
}
