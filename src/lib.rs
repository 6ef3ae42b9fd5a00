//! stampnote - time-coded video notes
//!
//! Notes are plain text with embedded timestamps (`1:05`, `1:02:05`) and
//! stamp names. This crate renders them into a clickable tree, maps
//! selections between the tree and the text, redacts NG words, and drives
//! the editing session with the Elm Architecture pattern.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod host;
pub mod keymap;
pub mod messages;
pub mod model;
pub mod redact;
pub mod render;
pub mod runtime;
pub mod selection;
pub mod shadowban;
pub mod stamps;
pub mod store;
pub mod timecode;
pub mod tracing;
pub mod update;
pub mod video_id;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::NotesConfig;
pub use messages::Msg;
pub use model::AppModel;
pub use runtime::App;
