//! Live selection ⇄ raw-text offsets
//!
//! Both directions walk the tree in document order with the extractor's width
//! rules: breaks count 1, stamps the length of their name, timestamps and runs
//! the length of their text.

use super::boundary::{Boundary, LiveSelection, SelectionOffsets};
use crate::render::RenderNode;

/// Map a live selection to raw-text offsets.
pub fn save(tree: &RenderNode, selection: &LiveSelection) -> SelectionOffsets {
    SelectionOffsets::new(
        offset_of(tree, &selection.anchor),
        offset_of(tree, &selection.head),
    )
}

/// Map raw-text offsets back to a live selection.
///
/// Offsets past the end of the tree (stale offsets racing a re-render) fall
/// back to the end of the tree.
pub fn restore(tree: &RenderNode, offsets: SelectionOffsets) -> LiveSelection {
    LiveSelection::new(
        boundary_at(tree, offsets.start),
        boundary_at(tree, offsets.end),
    )
}

/// Raw-text offset of a single boundary.
///
/// A boundary inside an atomic token, or a path that descends into one,
/// maps to the token's start. Paths that run past the end of a container
/// map to the container's end.
pub fn offset_of(tree: &RenderNode, boundary: &Boundary) -> usize {
    let mut base = 0;
    let mut node = tree;

    for &idx in &boundary.path {
        let RenderNode::Container(children) = node else {
            return base;
        };
        base += width_of(&children[..idx.min(children.len())]);
        match children.get(idx) {
            Some(child) => node = child,
            None => return base,
        }
    }

    match node {
        RenderNode::TextRun(s) => base + boundary.offset.min(s.chars().count()),
        RenderNode::Container(children) => {
            base + width_of(&children[..boundary.offset.min(children.len())])
        }
        _ => base,
    }
}

/// Live boundary for a raw-text offset.
///
/// Positions inside text runs are preferred; a position on an atomic token
/// lands just before it in its parent container.
pub fn boundary_at(tree: &RenderNode, target: usize) -> Boundary {
    if target > tree.logical_len() {
        return end_boundary(tree);
    }
    let mut path = Vec::new();
    locate(tree, target, &mut path)
}

/// The boundary after the last character of the tree
pub fn end_boundary(tree: &RenderNode) -> Boundary {
    match tree {
        RenderNode::Container(children) => Boundary::new(Vec::new(), children.len()),
        RenderNode::TextRun(s) => Boundary::new(Vec::new(), s.chars().count()),
        _ => Boundary::new(Vec::new(), 0),
    }
}

fn locate(node: &RenderNode, target: usize, path: &mut Vec<usize>) -> Boundary {
    match node {
        RenderNode::TextRun(s) => Boundary::new(path.clone(), target.min(s.chars().count())),
        RenderNode::Container(children) => {
            let mut counter = 0;
            for (i, child) in children.iter().enumerate() {
                let width = child.logical_len();
                let local = target - counter;
                if child.is_atomic() {
                    if local < width {
                        return Boundary::new(path.clone(), i);
                    }
                } else if local <= width {
                    path.push(i);
                    return locate(child, local, path);
                }
                counter += width;
            }
            Boundary::new(path.clone(), children.len())
        }
        _ => Boundary::new(path.clone(), 0),
    }
}

fn width_of(nodes: &[RenderNode]) -> usize {
    nodes.iter().map(RenderNode::logical_len).sum()
}
