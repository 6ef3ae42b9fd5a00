//! Selection save/restore across re-renders, and live-surface edits

mod boundary;
mod mapper;
mod surface;

pub use boundary::{Boundary, LiveSelection, SelectionOffsets};
pub use mapper::{boundary_at, end_boundary, offset_of, restore, save};
pub use surface::{delete_backward, delete_forward, insert_text, normalize, replace_range};
