//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use crate::model::LoadTicket;

/// Side effects requested by update functions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a redraw of the note view
    Redraw,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
    /// Load a note asynchronously; the result arrives as `ServiceMsg::TextLoaded`
    LoadText { ticket: LoadTicket },
    /// Persist a note
    SaveText { video_id: String, text: String },
    /// Seek the video (best-effort)
    Seek(u64),
    /// Write text to the clipboard
    CopyToClipboard(String),
    /// Fetch the stamp catalog; the result arrives as `ServiceMsg::CatalogLoaded`
    LoadCatalog,
    /// Persist the panel visibility setting
    PersistVisibility(bool),
}

impl Cmd {
    /// Create a batch of commands, dropping no-ops
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds.into_iter().filter(|c| *c != Cmd::None).collect();
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.remove(0),
            _ => Cmd::Batch(cmds),
        }
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
            Cmd::LoadText { .. } => false,
            Cmd::SaveText { .. } => true,
            Cmd::Seek(_) => false,
            Cmd::CopyToClipboard(_) => true,
            Cmd::LoadCatalog => false,
            Cmd::PersistVisibility(_) => true,
        }
    }

    /// Flatten nested batches into a list of leaf commands
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            other => vec![other],
        }
    }
}
