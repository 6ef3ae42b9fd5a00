//! Editor session state
//!
//! One session exists per page context. Raw text is authoritative; the
//! surface tree is always derivable from it (Display mode) or is the live,
//! user-edited projection that raw text is re-extracted from (Edit mode).

use crate::config::NotesConfig;
use crate::redact::Redactor;
use crate::render::{render, NodePath, RenderNode};
use crate::selection::{restore, save, LiveSelection, SelectionOffsets};
use crate::stamps::{StampMap, StampSource};

/// Render mode of the note view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Rendered, clickable view
    #[default]
    Display,
    /// Live editable surface
    Edit,
}

/// Scroll position of the note view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scroll {
    #[default]
    Top,
    /// Offset from the top, as reported by the host
    Offset(u32),
    /// Pinned to the bottom (after appending a timestamp)
    Bottom,
}

/// State of the stamp catalog shown in the picker overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogState {
    Loading,
    Loaded(Vec<StampSource>),
    Failed(String),
}

/// Stamp picker overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampOverlay {
    /// Selection captured before the overlay took focus
    pub saved: SelectionOffsets,
    pub catalog: CatalogState,
}

/// Why a note load was requested
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPurpose {
    /// Show the stored note
    Display,
    /// Append a new timestamp, seeding an empty note with the default text
    AppendTimestamp(String),
    /// Append a pasted timestamp as-is
    AppendClip(String),
}

/// Identifies one async note load; stale tickets are discarded on arrival
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub video_id: String,
    pub generation: u64,
    pub purpose: LoadPurpose,
}

/// The note editor session
#[derive(Debug, Clone)]
pub struct EditorSession {
    /// Current video, `None` on pages without one
    pub video_id: Option<String>,
    /// Bumped on every navigation
    pub generation: u64,
    /// Authoritative note text
    pub raw: String,
    pub mode: Mode,
    /// Rendered (Display) or live (Edit) tree
    pub surface: RenderNode,
    /// Live selection on the surface (Edit mode)
    pub selection: Option<LiveSelection>,
    /// Timestamp token picked by a click (Display mode)
    pub selected_token: Option<NodePath>,
    pub overlay: Option<StampOverlay>,
    /// IME pre-edit text while a composition is in progress
    pub composition: Option<String>,
    pub scroll: Scroll,
    /// Time remembered by the copy-timestamp action
    pub clip_time: Option<String>,
    pub hidden: bool,
    pub config: NotesConfig,
    pub redactor: Redactor,
    pub stamps: StampMap,
}

impl EditorSession {
    pub fn new(config: NotesConfig) -> Self {
        Self {
            video_id: None,
            generation: 0,
            raw: String::new(),
            mode: Mode::Display,
            surface: RenderNode::empty(),
            selection: None,
            selected_token: None,
            overlay: None,
            composition: None,
            scroll: Scroll::Top,
            clip_time: None,
            hidden: config.container_hidden,
            redactor: config.redactor(),
            stamps: StampMap::new(),
            config,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.mode == Mode::Edit
    }

    pub fn is_composing(&self) -> bool {
        self.composition.is_some()
    }

    /// Replace the settings and recompile the redactor
    pub fn set_config(&mut self, config: NotesConfig) {
        self.redactor = config.redactor();
        self.hidden = config.container_hidden;
        self.config = config;
    }

    /// Replace the stamp map and re-render.
    ///
    /// Re-rendering invalidates node paths, so the token selection is dropped
    /// in Display mode; in Edit mode the live selection is carried over by
    /// offset. The live surface is left alone while a composition is running.
    pub fn set_stamps(&mut self, sources: &[StampSource]) {
        self.stamps = StampMap::from_sources(sources);
        match self.mode {
            Mode::Display => {
                self.rerender();
                self.selected_token = None;
            }
            Mode::Edit if self.is_composing() => {}
            Mode::Edit => {
                let offsets = self.selection_offsets();
                self.rerender();
                if let Some(offsets) = offsets {
                    self.set_selection_offsets(offsets);
                }
            }
        }
    }

    /// Rebuild the surface from raw text
    pub fn rerender(&mut self) {
        self.surface = render(&self.raw, &self.stamps);
    }

    /// Raw-text offsets of the live selection, if any
    pub fn selection_offsets(&self) -> Option<SelectionOffsets> {
        self.selection.as_ref().map(|sel| save(&self.surface, sel))
    }

    /// Place the live selection at raw-text offsets
    pub fn set_selection_offsets(&mut self, offsets: SelectionOffsets) {
        self.selection = Some(restore(&self.surface, offsets));
    }

    /// Show `text` in Display mode
    pub fn enter_display(&mut self, text: String) {
        self.raw = text;
        self.mode = Mode::Display;
        self.selection = None;
        self.selected_token = None;
        self.composition = None;
        self.rerender();
    }

    /// Show `text` in Edit mode with the caret at `caret` (clamped)
    pub fn enter_edit(&mut self, text: String, caret: Option<usize>) {
        self.raw = text;
        self.mode = Mode::Edit;
        self.selected_token = None;
        self.rerender();
        let caret = caret.unwrap_or(0).min(self.raw.chars().count());
        self.set_selection_offsets(SelectionOffsets::caret(caret));
    }

    /// Text of the selected timestamp token
    pub fn selected_timestamp(&self) -> Option<&str> {
        match self.surface.get(self.selected_token.as_deref()?)? {
            RenderNode::TimestampToken(text) => Some(text),
            _ => None,
        }
    }

    /// Number of characters in the note
    pub fn char_count(&self) -> usize {
        self.raw.chars().count()
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(NotesConfig::default())
    }
}
