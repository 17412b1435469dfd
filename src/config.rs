use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Settings key holding the browser executable used by `InternetBrowser`
pub const INTERNET_BROWSER_KEY: &str = "internet_browser";

/// An audio + visual acknowledgment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    /// Sound file to play (skipped when absent)
    #[serde(default)]
    pub audio: Option<PathBuf>,
    /// Line shown to the user
    pub visual: String,
}

/// Main application settings
///
/// Built once at startup and shared read-only (`Arc<Settings>`) by every component.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Activation
    pub keyword: String,

    // Feedback
    pub success_cue: Cue,
    pub failure_cue: Cue,

    // Collaborators
    pub listener: String,
    pub player: String,

    // Per-module values, keyed by module-specific names
    pub modules: HashMap<String, String>,

    // Meta
    pub log_level: String,
    pub audit_log: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            keyword: "computer".to_string(),
            // No sounds ship with the program; point `audio` at a file to enable them
            success_cue: Cue {
                audio: None,
                visual: "[listening]".to_string(),
            },
            failure_cue: Cue {
                audio: None,
                visual: "[not understood]".to_string(),
            },
            listener: "stdin".to_string(),
            player: "system".to_string(),
            modules: HashMap::from([(
                INTERNET_BROWSER_KEY.to_string(),
                "firefox".to_string(),
            )]),
            log_level: "info".to_string(),
            audit_log: Some(data_dir().join("audit.log")),
        }
    }
}

impl Settings {
    /// Load settings from `path` (or the default location), falling back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings_path = path.map(Path::to_path_buf).unwrap_or_else(settings_path);

        if !settings_path.exists() {
            tracing::info!(
                "📄 No settings at {}, using defaults",
                settings_path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&settings_path)?;
        match serde_json::from_str::<Self>(&content) {
            Ok(settings) => Ok(settings.normalized()),
            Err(e) => {
                // Graceful degradation: log warning and use defaults
                tracing::warn!(
                    "⚠️ Settings file corrupted or invalid, using defaults: {}",
                    e
                );
                // Keep the corrupt file around for debugging
                let backup_path = settings_path.with_extension("json.corrupt");
                let _ = std::fs::rename(&settings_path, &backup_path);
                Ok(Self::default())
            }
        }
    }

    /// Save settings to `path` (or the default location)
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let settings_path = path.map(Path::to_path_buf).unwrap_or_else(settings_path);

        if let Some(parent) = settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// Per-module configuration value
    pub fn module_value(&self, key: &str) -> Option<&str> {
        self.modules
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Keyword matching is done on lowercased utterances
    fn normalized(mut self) -> Self {
        self.keyword = self.keyword.trim().to_lowercase();
        self
    }

    /// Override the activation keyword (e.g. from the command line)
    pub fn with_keyword(mut self, keyword: &str) -> Self {
        self.keyword = keyword.to_string();
        self.normalized()
    }
}

pub fn settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("unison")
        .join("settings.json")
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("unison")
}
