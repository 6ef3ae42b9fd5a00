//! Application model - the complete state of the note session
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod session;
pub mod status;

pub use session::{
    CatalogState, EditorSession, LoadPurpose, LoadTicket, Mode, Scroll, StampOverlay,
};
pub use status::{has_banned, sync_status, StatusLine, TransientMessage, BANNED_WARNING};

/// The complete application model
#[derive(Debug, Clone, Default)]
pub struct AppModel {
    pub session: EditorSession,
    pub status: StatusLine,
}

impl AppModel {
    pub fn new(config: crate::config::NotesConfig) -> Self {
        Self {
            session: EditorSession::new(config),
            status: StatusLine::default(),
        }
    }
}
