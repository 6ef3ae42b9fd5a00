//! Default shortcuts
//!
//! Loaded from the shortcuts.yaml embedded at compile time, with the user's
//! shortcuts.yaml from the config directory merged on top.

use std::path::Path;

use super::action::Action;
use super::config::{load_shortcuts_file, parse_shortcuts_yaml};
use super::keymap::Binding;
use super::types::{KeyCode, Shortcut};

/// Default shortcuts YAML embedded at compile time
const DEFAULT_SHORTCUTS_YAML: &str = include_str!("../../shortcuts.yaml");

/// Load and merge shortcuts: defaults + user overrides
///
/// Loading order (each layer overrides the previous):
/// 1. Embedded default shortcuts (compiled into binary)
/// 2. `shortcuts.yaml` in the user config directory, when given
pub fn load_default_keymap(user_path: Option<&Path>) -> Vec<Binding> {
    let mut bindings = match parse_shortcuts_yaml(DEFAULT_SHORTCUTS_YAML) {
        Ok(b) => {
            tracing::debug!("Loaded embedded default shortcuts ({} bindings)", b.len());
            b
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse embedded shortcuts: {}, using hardcoded defaults",
                e
            );
            default_bindings()
        }
    };

    if let Some(user_path) = user_path.filter(|p| p.exists()) {
        match load_shortcuts_file(user_path) {
            Ok(user_bindings) => {
                tracing::info!(
                    "Merging user shortcuts from {} ({} bindings)",
                    user_path.display(),
                    user_bindings.len()
                );
                bindings = merge_bindings(bindings, user_bindings);
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to load user shortcuts from {}: {}",
                    user_path.display(),
                    e
                );
            }
        }
    }

    bindings
}

/// Merge user bindings into base bindings
///
/// A user binding replaces the base binding for the same action; bindings for
/// actions the base does not have are appended.
pub fn merge_bindings(base: Vec<Binding>, user: Vec<Binding>) -> Vec<Binding> {
    let mut result = base;

    for user_binding in user {
        match result.iter().position(|b| b.action == user_binding.action) {
            Some(idx) => result[idx] = user_binding,
            None => result.push(user_binding),
        }
    }

    result
}

/// Hardcoded default shortcuts
pub fn default_bindings() -> Vec<Binding> {
    vec![
        Binding::new(Shortcut::key(KeyCode::Enter).with_shift(), Action::AddTimestamp),
        Binding::new(Shortcut::char('p'), Action::AddTimestampAlt),
        Binding::new(Shortcut::char('g'), Action::ToggleVisibility),
        Binding::new(Shortcut::char('u'), Action::CopyTimestamp),
        Binding::new(Shortcut::char('y'), Action::PasteTimestamp),
    ]
}

/// Get the embedded default shortcuts YAML
pub fn get_default_shortcuts_yaml() -> &'static str {
    DEFAULT_SHORTCUTS_YAML
}
