//! Configurable keyboard shortcuts
//!
//! This module provides a data-driven shortcut system that:
//! - Maps key chords to note actions
//! - Enables user customization via YAML config files
//!
//! # Architecture
//!
//! ```text
//! host key event → Shortcut::from_event() → Keymap::lookup() → Action → Msg
//! ```

mod action;
mod config;
mod defaults;
#[allow(clippy::module_inception)]
mod keymap;
mod types;

pub use action::Action;
pub use config::{
    load_shortcuts_file, parse_key_string, parse_shortcuts_yaml, shortcuts_to_yaml,
    ShortcutError,
};
pub use defaults::{default_bindings, get_default_shortcuts_yaml, load_default_keymap, merge_bindings};
pub use keymap::{Binding, Keymap};
pub use types::{KeyCode, Shortcut};
