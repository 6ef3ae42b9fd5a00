//! YAML parsing for shortcut files
//!
//! Parses shortcuts.yaml files into Binding structs.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::action::Action;
use super::keymap::Binding;
use super::types::{KeyCode, Shortcut};

/// Root structure of a shortcuts YAML file
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ShortcutsConfig {
    #[serde(default)]
    pub bindings: Vec<BindingConfig>,
}

/// A single binding entry from YAML
#[derive(Debug, Deserialize, Serialize)]
pub struct BindingConfig {
    pub key: String,
    pub action: String,
}

/// Load bindings from a YAML file
pub fn load_shortcuts_file(path: &Path) -> Result<Vec<Binding>, ShortcutError> {
    let content = std::fs::read_to_string(path).map_err(|e| ShortcutError::Io(e.to_string()))?;

    parse_shortcuts_yaml(&content)
}

/// Parse bindings from a YAML string
pub fn parse_shortcuts_yaml(yaml: &str) -> Result<Vec<Binding>, ShortcutError> {
    let config: ShortcutsConfig =
        serde_yaml::from_str(yaml).map_err(|e| ShortcutError::Parse(e.to_string()))?;

    config
        .bindings
        .into_iter()
        .map(|entry| {
            let shortcut = parse_key_string(&entry.key)?;
            let action = Action::from_str(&entry.action)
                .map_err(|_| ShortcutError::InvalidAction(entry.action.clone()))?;
            Ok(Binding::new(shortcut, action))
        })
        .collect()
}

/// Serialize bindings to YAML
pub fn shortcuts_to_yaml(bindings: &[Binding]) -> Result<String, ShortcutError> {
    let config = ShortcutsConfig {
        bindings: bindings
            .iter()
            .map(|b| BindingConfig {
                key: b.shortcut.config_string(),
                action: b.action.name().to_string(),
            })
            .collect(),
    };
    serde_yaml::to_string(&config).map_err(|e| ShortcutError::Parse(e.to_string()))
}

/// Parse a key string like "ctrl+shift+s" into a Shortcut
pub fn parse_key_string(key_str: &str) -> Result<Shortcut, ShortcutError> {
    let mut ctrl = false;
    let mut alt = false;
    let mut shift = false;
    let mut key_part = None;

    for part in key_str.split('+').map(str::trim) {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => ctrl = true,
            "alt" | "option" | "opt" => alt = true,
            "shift" => shift = true,
            _ => {
                // This should be the key itself
                if key_part.is_some() {
                    return Err(ShortcutError::InvalidKey(format!(
                        "Multiple keys in binding: {}",
                        key_str
                    )));
                }
                let key = KeyCode::from_name(part)
                    .ok_or_else(|| ShortcutError::InvalidKey(format!("Unknown key: {}", part)))?;
                key_part = Some(key);
            }
        }
    }

    let key = key_part
        .ok_or_else(|| ShortcutError::InvalidKey(format!("No key found in binding: {}", key_str)))?;

    Ok(Shortcut {
        key,
        ctrl,
        alt,
        shift,
    })
}

/// Errors that can occur when reading shortcut files
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcutError {
    Io(String),
    Parse(String),
    InvalidKey(String),
    InvalidAction(String),
}

impl std::fmt::Display for ShortcutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShortcutError::Io(e) => write!(f, "IO error: {}", e),
            ShortcutError::Parse(e) => write!(f, "Parse error: {}", e),
            ShortcutError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
            ShortcutError::InvalidAction(a) => write!(f, "Invalid action: {}", a),
        }
    }
}

impl std::error::Error for ShortcutError {}
