//! User settings stored in `config.yaml` inside the data directory.
//!
//! Every field has a default, so a missing file, a missing section or a
//! missing key all fall back silently. A malformed file is logged and
//! replaced by defaults; it never stops the journal from starting.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tradejournal_core::AccountConfig;

use crate::error::SettingsError;
use crate::util::io::atomic_write;

const SETTINGS_FILE: &str = "config.yaml";

/// Root settings document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Funded account parameters used by the statistics engine
    pub account: AccountConfig,
    /// External narrative generator
    pub narrative: NarrativeSettings,
    /// Goal celebration policy
    pub celebration: CelebrationSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeSettings {
    /// Turn the coach off entirely, even when a key is present
    pub enabled: bool,
    pub model: String,
    /// Base URL of the Gemini REST API
    pub endpoint: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// How many of the latest entries are sent with each request
    pub recent_entries: usize,
    pub timeout_secs: u64,
}

impl Default for NarrativeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            model: "gemini-3-flash-preview".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key_env: "API_KEY".to_string(),
            recent_entries: 10,
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CelebrationSettings {
    /// Clear the celebrated flag when payouts are seen below the goal, so a
    /// later crossing celebrates again
    pub rearm_below_goal: bool,
}

impl Default for CelebrationSettings {
    fn default() -> Self {
        Self {
            rearm_below_goal: true,
        }
    }
}

impl Settings {
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join(SETTINGS_FILE)
    }

    /// Load settings, returning `Ok(None)` when the file does not exist
    pub fn load(data_dir: &Path) -> Result<Option<Self>, SettingsError> {
        let path = Self::path(data_dir);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| SettingsError::Io(format!("Failed to read settings: {}", e)))?;

        Self::from_yaml(&content).map(Some)
    }

    /// Load settings, falling back to defaults on any problem.
    ///
    /// On first start the defaults are written out so there is a file to edit.
    /// A malformed file is left alone.
    pub fn load_or_init(data_dir: &Path) -> Self {
        match Self::load(data_dir) {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                let settings = Self::default();
                match settings.save(data_dir) {
                    Ok(()) => tracing::info!(
                        path = %Self::path(data_dir).display(),
                        "Wrote default settings"
                    ),
                    Err(e) => tracing::warn!(error = %e, "Failed to write default settings"),
                }
                settings
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load settings, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, SettingsError> {
        serde_saphyr::from_str(content)
            .map_err(|e| SettingsError::Parse(format!("Failed to parse settings: {}", e)))
    }

    pub fn to_yaml(&self) -> Result<String, SettingsError> {
        serde_saphyr::to_string(self)
            .map_err(|e| SettingsError::Serialize(format!("Failed to serialize settings: {}", e)))
    }

    /// Write the settings file, creating the data directory if needed
    pub fn save(&self, data_dir: &Path) -> Result<(), SettingsError> {
        std::fs::create_dir_all(data_dir)
            .map_err(|e| SettingsError::Io(format!("Failed to create data directory: {}", e)))?;

        let yaml = self.to_yaml()?;
        atomic_write(&Self::path(data_dir), &yaml)
            .map_err(|e| SettingsError::Io(format!("Failed to write settings: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.account.initial_balance, 50_000.0);
        assert_eq!(settings.account.profit_goal, 20_000.0);
        assert_eq!(settings.narrative.recent_entries, 10);
        assert_eq!(settings.narrative.api_key_env, "API_KEY");
        assert!(settings.narrative.enabled);
        assert!(settings.celebration.rearm_below_goal);
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let yaml = "account:\n  profit_goal: 10000.0\ncelebration:\n  rearm_below_goal: false\n";
        let settings = Settings::from_yaml(yaml).unwrap();

        assert_eq!(settings.account.profit_goal, 10_000.0);
        assert_eq!(settings.account.initial_balance, 50_000.0);
        assert!(!settings.celebration.rearm_below_goal);
        assert_eq!(settings.narrative, NarrativeSettings::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let mut settings = Settings::default();
        settings.narrative.model = "gemini-test".to_string();
        settings.account.initial_balance = 150_000.0;

        settings.save(dir.path()).unwrap();
        let loaded = Settings::load(dir.path()).unwrap().unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempdir().unwrap();
        assert!(Settings::load(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_first_start_writes_default_file() {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("fresh");

        assert_eq!(Settings::load_or_init(&data_dir), Settings::default());
        assert!(Settings::path(&data_dir).exists());
        assert_eq!(
            Settings::load(&data_dir).unwrap(),
            Some(Settings::default())
        );
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(Settings::path(dir.path()), "account: [not, a, map]\n").unwrap();

        assert!(Settings::load(dir.path()).is_err());
        assert_eq!(Settings::load_or_init(dir.path()), Settings::default());
        // Left for the user to fix
        assert_eq!(
            std::fs::read_to_string(Settings::path(dir.path())).unwrap(),
            "account: [not, a, map]\n"
        );
    }
}
