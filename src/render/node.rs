//! Render tree node types

/// Child-index path from the root of a render tree to a node
pub type NodePath = Vec<usize>;

/// A node of the rendered note view.
///
/// Every node has a *logical text*: the raw-text characters it stands for.
/// Breaks stand for `\n`, timestamps for their display text, stamps for their
/// logical name, runs for their content, containers for the concatenation of
/// their children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderNode {
    /// Plain literal text
    TextRun(String),
    /// A line break (`\n` in raw text)
    LineBreak,
    /// A clickable timestamp such as `1:05` or `1:02:05`
    TimestampToken(String),
    /// An image-backed stamp
    StampToken { name: String, url: String },
    /// Structural grouping, transparent to the raw text
    Container(Vec<RenderNode>),
}

impl RenderNode {
    pub fn text(content: impl Into<String>) -> Self {
        RenderNode::TextRun(content.into())
    }

    pub fn timestamp(display: impl Into<String>) -> Self {
        RenderNode::TimestampToken(display.into())
    }

    pub fn stamp(name: impl Into<String>, url: impl Into<String>) -> Self {
        RenderNode::StampToken {
            name: name.into(),
            url: url.into(),
        }
    }

    pub fn container(children: Vec<RenderNode>) -> Self {
        RenderNode::Container(children)
    }

    /// An empty root container
    pub fn empty() -> Self {
        RenderNode::Container(Vec::new())
    }

    /// Number of raw-text characters this node stands for
    pub fn logical_len(&self) -> usize {
        match self {
            RenderNode::TextRun(s) => s.chars().count(),
            RenderNode::LineBreak => 1,
            RenderNode::TimestampToken(s) => s.chars().count(),
            RenderNode::StampToken { name, .. } => name.chars().count(),
            RenderNode::Container(children) => children.iter().map(RenderNode::logical_len).sum(),
        }
    }

    /// Atomic nodes cannot hold a caret inside their logical span
    pub fn is_atomic(&self) -> bool {
        matches!(
            self,
            RenderNode::LineBreak | RenderNode::TimestampToken(_) | RenderNode::StampToken { .. }
        )
    }

    pub fn is_container(&self) -> bool {
        matches!(self, RenderNode::Container(_))
    }

    pub fn children(&self) -> Option<&[RenderNode]> {
        match self {
            RenderNode::Container(children) => Some(children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<RenderNode>> {
        match self {
            RenderNode::Container(children) => Some(children),
            _ => None,
        }
    }

    /// Resolve a path to a node
    pub fn get(&self, path: &[usize]) -> Option<&RenderNode> {
        let mut node = self;
        for &idx in path {
            node = node.children()?.get(idx)?;
        }
        Some(node)
    }

    /// Resolve a path to a node, mutably
    pub fn get_mut(&mut self, path: &[usize]) -> Option<&mut RenderNode> {
        let mut node = self;
        for &idx in path {
            node = node.children_mut()?.get_mut(idx)?;
        }
        Some(node)
    }

    /// All timestamp tokens in document order, with their paths
    pub fn timestamps(&self) -> Vec<(NodePath, &str)> {
        let mut out = Vec::new();
        collect_timestamps(self, &mut Vec::new(), &mut out);
        out
    }

    /// Number of leaf (non-container) nodes in the tree
    pub fn leaf_count(&self) -> usize {
        match self {
            RenderNode::Container(children) => children.iter().map(RenderNode::leaf_count).sum(),
            _ => 1,
        }
    }
}

fn collect_timestamps<'a>(
    node: &'a RenderNode,
    path: &mut NodePath,
    out: &mut Vec<(NodePath, &'a str)>,
) {
    match node {
        RenderNode::TimestampToken(text) => out.push((path.clone(), text.as_str())),
        RenderNode::Container(children) => {
            for (i, child) in children.iter().enumerate() {
                path.push(i);
                collect_timestamps(child, path, out);
                path.pop();
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_len_by_kind() {
        assert_eq!(RenderNode::text("héllo").logical_len(), 5);
        assert_eq!(RenderNode::LineBreak.logical_len(), 1);
        assert_eq!(RenderNode::timestamp("1:02:05").logical_len(), 7);
        assert_eq!(RenderNode::stamp(":wave:", "u").logical_len(), 6);
        let tree = RenderNode::container(vec![
            RenderNode::text("ab"),
            RenderNode::container(vec![RenderNode::LineBreak, RenderNode::text("c")]),
        ]);
        assert_eq!(tree.logical_len(), 4);
    }

    #[test]
    fn test_get_by_path() {
        let tree = RenderNode::container(vec![
            RenderNode::text("a"),
            RenderNode::container(vec![RenderNode::timestamp("1:05")]),
        ]);
        assert_eq!(tree.get(&[1, 0]), Some(&RenderNode::timestamp("1:05")));
        assert_eq!(tree.get(&[]), Some(&tree));
        assert!(tree.get(&[2]).is_none());
        assert!(tree.get(&[0, 0]).is_none());
    }

    #[test]
    fn test_timestamps_in_document_order() {
        let tree = RenderNode::container(vec![
            RenderNode::timestamp("0:01"),
            RenderNode::container(vec![RenderNode::text("x"), RenderNode::timestamp("0:02")]),
        ]);
        let found = tree.timestamps();
        assert_eq!(found, vec![(vec![0], "0:01"), (vec![1, 1], "0:02")]);
    }
}
