//! Selection types: live boundaries in a render tree and raw-text offsets

use crate::render::NodePath;

/// A live selection boundary: a node path plus an offset inside that node.
///
/// For a text run the offset counts characters; for a container it is a child
/// index (a position between children). Any offset inside an atomic token
/// collapses to the token's start when mapped to raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Boundary {
    pub path: NodePath,
    pub offset: usize,
}

impl Boundary {
    pub fn new(path: NodePath, offset: usize) -> Self {
        Self { path, offset }
    }
}

/// A live selection with anchor (fixed end) and head (moving end)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveSelection {
    pub anchor: Boundary,
    pub head: Boundary,
}

impl LiveSelection {
    pub fn new(anchor: Boundary, head: Boundary) -> Self {
        Self { anchor, head }
    }

    /// Create a collapsed selection (caret)
    pub fn collapsed(at: Boundary) -> Self {
        Self {
            anchor: at.clone(),
            head: at,
        }
    }

    /// Check if anchor and head are the same boundary
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }
}

/// Character offsets into raw text, `start <= end`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SelectionOffsets {
    pub start: usize,
    pub end: usize,
}

impl SelectionOffsets {
    /// Create offsets from two positions in either order
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// A caret at `offset`
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Number of characters covered
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Clamp both ends to `max`
    pub fn clamp(self, max: usize) -> Self {
        Self {
            start: self.start.min(max),
            end: self.end.min(max),
        }
    }
}
