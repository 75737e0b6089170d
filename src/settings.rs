//! Client settings persistence.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

fn default_api_base() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_confidence() -> f64 {
    0.25
}

fn default_timeout_secs() -> u64 {
    30
}

/// Client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the detection backend.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Confidence threshold used until the operator adjusts it, in `[0, 1]`.
    #[serde(default = "default_confidence")]
    pub default_confidence: f64,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            default_confidence: default_confidence(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl Settings {
    fn settings_dir() -> PathBuf {
        if let Ok(dir) = std::env::var("XR_TRIAGE_CONFIG_DIR") {
            return PathBuf::from(dir);
        }
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".xr_triage")
    }

    fn settings_path() -> PathBuf {
        Self::settings_dir().join("settings.json")
    }

    /// Load settings from disk.
    ///
    /// Falls back to defaults if loading fails, persisting them best-effort
    /// so the file exists to edit.
    pub fn load() -> Self {
        Self::load_from(&Self::settings_path())
    }

    fn load_from(path: &Path) -> Self {
        if let Ok(content) = fs::read_to_string(path)
            && let Ok(mut settings) = serde_json::from_str::<Settings>(&content)
        {
            settings.default_confidence = settings.default_confidence.clamp(0.0, 1.0);
            return settings;
        }

        let defaults = Self::default();
        let _ = defaults.save_to(path);
        defaults
    }

    /// Save settings to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::settings_path())
    }

    fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
