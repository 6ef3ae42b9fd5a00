//! Edit primitives for the live (user-editable) render tree
//!
//! The live view is edited in place while the user types; raw text is
//! recovered from it afterwards with the extractor. Edits address the tree
//! through raw-text offsets, so they work on clean and hand-mangled trees alike.

use super::boundary::SelectionOffsets;
use super::mapper::boundary_at;
use crate::render::{plain_nodes, RenderNode};

/// Replace the characters in `range` with `nodes`.
///
/// Returns the caret offset just after the inserted nodes.
///
/// Edges that fall strictly inside a timestamp turn that token back into a
/// plain run (the next render re-tokenizes it). Edges inside a stamp widen the
/// range to cover the whole stamp.
pub fn replace_range(
    tree: &mut RenderNode,
    range: SelectionOffsets,
    nodes: Vec<RenderNode>,
) -> usize {
    ensure_container_root(tree);
    let range = range.clamp(tree.logical_len());

    thaw_timestamp_at(tree, range.start);
    thaw_timestamp_at(tree, range.end);

    let start = snap_down(tree, range.start);
    let end = snap_up(tree, range.end);

    if start < end {
        let mut counter = 0;
        delete_span(tree, start, end, &mut counter);
    }

    let inserted: usize = nodes.iter().map(RenderNode::logical_len).sum();
    if !nodes.is_empty() {
        insert_at(tree, start, nodes);
    }
    normalize(tree);

    start + inserted
}

/// Replace `range` with typed text. Returns the caret offset after it.
pub fn insert_text(tree: &mut RenderNode, range: SelectionOffsets, text: &str) -> usize {
    replace_range(tree, range, plain_nodes(text))
}

/// Backspace: delete the selection, or the character before a caret.
pub fn delete_backward(tree: &mut RenderNode, range: SelectionOffsets) -> usize {
    if !range.is_collapsed() {
        return replace_range(tree, range, Vec::new());
    }
    if range.start == 0 {
        return 0;
    }
    replace_range(
        tree,
        SelectionOffsets::new(range.start - 1, range.start),
        Vec::new(),
    )
}

/// Delete: delete the selection, or the character after a caret.
pub fn delete_forward(tree: &mut RenderNode, range: SelectionOffsets) -> usize {
    if !range.is_collapsed() {
        return replace_range(tree, range, Vec::new());
    }
    if range.end >= tree.logical_len() {
        return range.start.min(tree.logical_len());
    }
    replace_range(
        tree,
        SelectionOffsets::new(range.start, range.start + 1),
        Vec::new(),
    )
}

/// Merge adjacent text runs and drop empty ones, at every level.
pub fn normalize(tree: &mut RenderNode) {
    let Some(children) = tree.children_mut() else {
        return;
    };

    let mut merged: Vec<RenderNode> = Vec::with_capacity(children.len());
    for mut child in children.drain(..) {
        normalize(&mut child);
        if let RenderNode::TextRun(s) = &child {
            if s.is_empty() {
                continue;
            }
            if let Some(RenderNode::TextRun(prev)) = merged.last_mut() {
                prev.push_str(s);
                continue;
            }
        }
        merged.push(child);
    }
    *children = merged;
}

fn ensure_container_root(tree: &mut RenderNode) {
    if !tree.is_container() {
        let old = std::mem::replace(tree, RenderNode::empty());
        *tree = RenderNode::Container(vec![old]);
    }
}

/// Leaf span `(start, width)` containing `offset` strictly inside, if any
fn leaf_strictly_containing(
    node: &RenderNode,
    offset: usize,
    base: usize,
    path: &mut Vec<usize>,
) -> Option<(Vec<usize>, usize)> {
    match node {
        RenderNode::Container(children) => {
            let mut counter = base;
            for (i, child) in children.iter().enumerate() {
                let width = child.logical_len();
                if counter < offset && offset < counter + width {
                    path.push(i);
                    return leaf_strictly_containing(child, offset, counter, path);
                }
                counter += width;
            }
            None
        }
        _ => Some((path.clone(), base)),
    }
}

fn thaw_timestamp_at(tree: &mut RenderNode, offset: usize) {
    let Some((path, _)) = leaf_strictly_containing(tree, offset, 0, &mut Vec::new()) else {
        return;
    };
    if let Some(node) = tree.get_mut(&path) {
        if let RenderNode::TimestampToken(text) = node {
            let text = std::mem::take(text);
            *node = RenderNode::TextRun(text);
        }
    }
}

fn snap_down(tree: &RenderNode, offset: usize) -> usize {
    match leaf_strictly_containing(tree, offset, 0, &mut Vec::new()) {
        Some((path, start)) if tree.get(&path).is_some_and(RenderNode::is_atomic) => start,
        _ => offset,
    }
}

fn snap_up(tree: &RenderNode, offset: usize) -> usize {
    match leaf_strictly_containing(tree, offset, 0, &mut Vec::new()) {
        Some((path, start)) => match tree.get(&path) {
            Some(node) if node.is_atomic() => start + node.logical_len(),
            _ => offset,
        },
        None => offset,
    }
}

/// Remove the characters in `[lo, hi)`. Atomic nodes overlapping the span go entirely.
fn delete_span(node: &mut RenderNode, lo: usize, hi: usize, counter: &mut usize) {
    match node {
        RenderNode::Container(children) => {
            let mut kept = Vec::with_capacity(children.len());
            for mut child in children.drain(..) {
                let start = *counter;
                let width = child.logical_len();
                *counter += width;
                let overlaps = lo.max(start) < hi.min(start + width);
                if !overlaps {
                    kept.push(child);
                    continue;
                }
                if !child.is_atomic() {
                    let mut inner = start;
                    delete_span(&mut child, lo, hi, &mut inner);
                    kept.push(child);
                }
            }
            *children = kept;
        }
        RenderNode::TextRun(s) => {
            let start = *counter;
            let width = s.chars().count();
            let from = lo.saturating_sub(start).min(width);
            let to = hi.saturating_sub(start).min(width);
            *s = s
                .chars()
                .enumerate()
                .filter(|(i, _)| *i < from || *i >= to)
                .map(|(_, c)| c)
                .collect();
            *counter = start + width;
        }
        _ => {}
    }
}

fn insert_at(tree: &mut RenderNode, offset: usize, nodes: Vec<RenderNode>) {
    let boundary = boundary_at(tree, offset);
    let Some(target) = tree.get_mut(&boundary.path) else {
        return;
    };

    match target {
        RenderNode::Container(children) => {
            let idx = boundary.offset.min(children.len());
            children.splice(idx..idx, nodes);
        }
        RenderNode::TextRun(s) => {
            let split = s
                .char_indices()
                .nth(boundary.offset)
                .map(|(b, _)| b)
                .unwrap_or(s.len());
            let right = s.split_off(split);
            let left = std::mem::take(s);

            let mut replacement = Vec::with_capacity(nodes.len() + 2);
            replacement.push(RenderNode::TextRun(left));
            replacement.extend(nodes);
            replacement.push(RenderNode::TextRun(right));

            // Text runs are never the root here, so the parent exists
            let (idx, parent_path) = match boundary.path.split_last() {
                Some((idx, parent)) => (*idx, parent.to_vec()),
                None => return,
            };
            if let Some(children) = tree.get_mut(&parent_path).and_then(RenderNode::children_mut) {
                children.splice(idx..=idx, replacement);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{extract, render};
    use crate::stamps::StampMap;

    fn tree(text: &str) -> RenderNode {
        render(text, &StampMap::from_pairs([("Sparkle", "u")]))
    }

    #[test]
    fn test_insert_into_text_run() {
        let mut t = tree("Hello world");
        let caret = insert_text(&mut t, SelectionOffsets::caret(5), ",");
        assert_eq!(caret, 6);
        assert_eq!(extract(&t), "Hello, world");
        assert_eq!(t, RenderNode::container(vec![RenderNode::text("Hello, world")]));
    }

    #[test]
    fn test_insert_stamp_splits_run() {
        let mut t = tree("Hello world");
        let caret = replace_range(
            &mut t,
            SelectionOffsets::caret(5),
            vec![RenderNode::stamp("Sparkle", "u")],
        );
        assert_eq!(caret, 12);
        assert_eq!(
            t,
            RenderNode::container(vec![
                RenderNode::text("Hello"),
                RenderNode::stamp("Sparkle", "u"),
                RenderNode::text(" world"),
            ])
        );
    }

    #[test]
    fn test_replace_selection() {
        let mut t = tree("Hello world");
        let caret = insert_text(&mut t, SelectionOffsets::new(0, 5), "Bye");
        assert_eq!(caret, 3);
        assert_eq!(extract(&t), "Bye world");
    }

    #[test]
    fn test_typing_inside_timestamp_thaws_it() {
        let mut t = tree("at 1:05 ok");
        insert_text(&mut t, SelectionOffsets::caret(5), "9");
        assert_eq!(extract(&t), "at 1:905 ok");
        assert!(t.timestamps().is_empty());
    }

    #[test]
    fn test_backspace_after_timestamp_edits_its_text() {
        let mut t = tree("at 1:05");
        let caret = delete_backward(&mut t, SelectionOffsets::caret(7));
        assert_eq!(caret, 6);
        assert_eq!(extract(&t), "at 1:0");
    }

    #[test]
    fn test_backspace_removes_whole_stamp() {
        let mut t = tree("aSparkleb");
        let caret = delete_backward(&mut t, SelectionOffsets::caret(8));
        assert_eq!(caret, 1);
        assert_eq!(extract(&t), "ab");
    }

    #[test]
    fn test_delete_across_break() {
        let mut t = tree("one\ntwo");
        let caret = delete_forward(&mut t, SelectionOffsets::caret(3));
        assert_eq!(caret, 3);
        assert_eq!(extract(&t), "onetwo");
        assert_eq!(t, RenderNode::container(vec![RenderNode::text("onetwo")]));
    }

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let mut t = tree("ab");
        assert_eq!(delete_forward(&mut t, SelectionOffsets::caret(2)), 2);
        assert_eq!(extract(&t), "ab");
    }

    #[test]
    fn test_insert_into_empty_tree() {
        let mut t = RenderNode::empty();
        let caret = insert_text(&mut t, SelectionOffsets::caret(0), "x\ny");
        assert_eq!(caret, 3);
        assert_eq!(extract(&t), "x\ny");
    }

    #[test]
    fn test_edits_in_nested_containers() {
        let mut t = RenderNode::container(vec![
            RenderNode::container(vec![RenderNode::text("abc")]),
            RenderNode::container(vec![RenderNode::text("def")]),
        ]);
        let caret = insert_text(&mut t, SelectionOffsets::new(2, 4), "-");
        assert_eq!(caret, 3);
        assert_eq!(extract(&t), "ab-ef");
    }

    #[test]
    fn test_normalize_merges_runs() {
        let mut t = RenderNode::container(vec![
            RenderNode::text("a"),
            RenderNode::text(""),
            RenderNode::text("b"),
            RenderNode::LineBreak,
            RenderNode::text("c"),
        ]);
        normalize(&mut t);
        assert_eq!(
            t,
            RenderNode::container(vec![
                RenderNode::text("ab"),
                RenderNode::LineBreak,
                RenderNode::text("c"),
            ])
        );
    }
}
