//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::config::NotesConfig;
use crate::model::LoadTicket;
use crate::render::NodePath;
use crate::selection::{Boundary, LiveSelection};
use crate::stamps::StampSource;

/// Page and session lifecycle messages
#[derive(Debug, Clone)]
pub enum SessionMsg {
    /// The page now shows another video (or none)
    Navigate { video_id: Option<String> },
    /// Direct-manipulation gesture on the rendered view.
    /// `pointer` is the surface position under the pointer, if known.
    BeginEdit { pointer: Option<Boundary> },
    /// The live surface lost focus
    Blur,
    /// The host scrolled the note view
    Scrolled(u32),
    /// Show or hide the note panel
    ToggleVisibility,
    /// Clear the note (popup request)
    ClearText,
    /// Settings were changed elsewhere
    ConfigChanged(NotesConfig),
}

/// Live-surface editing messages (Edit mode)
#[derive(Debug, Clone)]
pub enum EditMsg {
    /// Typed or pasted text replacing the selection
    InsertText(String),
    /// Backspace
    DeleteBackward,
    /// Delete
    DeleteForward,
    /// The host moved the live selection
    SetSelection(LiveSelection),
    /// IME composition started
    CompositionStart,
    /// IME pre-edit text changed
    CompositionUpdate(String),
    /// IME composition committed `text`
    CompositionEnd(String),
}

/// Timestamp messages
#[derive(Debug, Clone)]
pub enum TimestampMsg {
    /// Insert the given video time
    Add { seconds: u64 },
    /// A rendered timestamp token was clicked
    Click { path: NodePath },
    /// Shift the selected token by a number of seconds
    Adjust(i64),
    /// Copy the given video time and remember it
    CopyCurrent { seconds: u64 },
    /// Append the remembered time
    PasteClip,
    /// Copy the whole note
    CopyAll,
}

/// Stamp picker overlay messages
#[derive(Debug, Clone)]
pub enum OverlayMsg {
    Open,
    /// A stamp was picked by name
    Pick(String),
    Close,
}

/// Results delivered by host services
#[derive(Debug, Clone)]
pub enum ServiceMsg {
    /// A note load completed; `text` is `None` when nothing was stored
    TextLoaded {
        ticket: LoadTicket,
        text: Option<String>,
    },
    /// The stamp catalog lookup completed
    CatalogLoaded(Result<Vec<StampSource>, String>),
}

/// Top-level message enum
#[derive(Debug, Clone)]
pub enum Msg {
    Session(SessionMsg),
    Edit(EditMsg),
    Timestamp(TimestampMsg),
    Overlay(OverlayMsg),
    Service(ServiceMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn navigate(video_id: impl Into<String>) -> Self {
        Msg::Session(SessionMsg::Navigate {
            video_id: Some(video_id.into()),
        })
    }

    pub fn insert_text(text: impl Into<String>) -> Self {
        Msg::Edit(EditMsg::InsertText(text.into()))
    }

    pub fn add_timestamp(seconds: u64) -> Self {
        Msg::Timestamp(TimestampMsg::Add { seconds })
    }
}
