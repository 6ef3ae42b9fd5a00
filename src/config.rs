//! Note settings persistence
//!
//! Stores user preferences in `~/.config/stampnote/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::redact::Redactor;

/// Settings that persist across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesConfig {
    /// Text inserted before a new timestamp
    #[serde(default = "default_prefix")]
    pub timestamp_prefix: String,
    /// Text inserted after a new timestamp
    #[serde(default = "default_suffix")]
    pub timestamp_suffix: String,
    /// Heading placed at the top of a note when the first timestamp is added
    #[serde(default = "default_text")]
    pub default_text: String,
    /// Words redacted from notes (case-insensitive)
    #[serde(default)]
    pub ng_words: Vec<String>,
    /// Whether the note panel starts hidden
    #[serde(default)]
    pub container_hidden: bool,
}

fn default_prefix() -> String {
    " - ".to_string()
}

fn default_suffix() -> String {
    "  ".to_string()
}

fn default_text() -> String {
    "タイムスタンプ（編集中）  ※ネタバレ注意".to_string()
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            timestamp_prefix: default_prefix(),
            timestamp_suffix: default_suffix(),
            default_text: default_text(),
            ng_words: Vec::new(),
            container_hidden: false,
        }
    }
}

impl NotesConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, or return defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config.normalized()
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(&self.clone().normalized())
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Trim NG words and drop empty ones
    pub fn normalized(mut self) -> Self {
        self.ng_words = self
            .ng_words
            .iter()
            .map(|w| w.trim())
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();
        self
    }

    /// Replace the NG word list from newline-separated text
    pub fn set_ng_words_text(&mut self, text: &str) {
        self.ng_words = text
            .split('\n')
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();
    }

    /// A redactor for the configured NG words
    pub fn redactor(&self) -> Redactor {
        Redactor::new(&self.ng_words)
    }

    /// Wrap a formatted time in the configured prefix and suffix
    pub fn decorate(&self, time: &str) -> String {
        format!("{}{}{}", self.timestamp_prefix, time, self.timestamp_suffix)
    }

    /// Preview line for the settings page
    pub fn format_demo(&self) -> String {
        format!("{}ここ好き", self.decorate("01:23"))
    }
}
