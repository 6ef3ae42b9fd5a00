//! Render tree → raw text
//!
//! Works on any tree, clean or hand-edited: containers are transparent and
//! only leaves emit text.

use super::node::RenderNode;

/// Reconstruct the raw text a tree stands for.
pub fn extract(tree: &RenderNode) -> String {
    let mut out = String::new();
    push_logical(tree, &mut out);
    out
}

fn push_logical(node: &RenderNode, out: &mut String) {
    match node {
        RenderNode::TextRun(s) => out.push_str(s),
        RenderNode::LineBreak => out.push('\n'),
        RenderNode::TimestampToken(s) => out.push_str(s),
        RenderNode::StampToken { name, .. } => out.push_str(name),
        RenderNode::Container(children) => {
            for child in children {
                push_logical(child, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;
    use crate::stamps::StampMap;

    #[test]
    fn test_extract_each_kind() {
        let tree = RenderNode::container(vec![
            RenderNode::text("a "),
            RenderNode::timestamp("1:05"),
            RenderNode::LineBreak,
            RenderNode::stamp(":wave:", "https://img/w.png"),
        ]);
        assert_eq!(extract(&tree), "a 1:05\n:wave:");
    }

    #[test]
    fn test_nested_containers_are_transparent() {
        let tree = RenderNode::container(vec![
            RenderNode::container(vec![RenderNode::text("line one")]),
            RenderNode::LineBreak,
            RenderNode::container(vec![
                RenderNode::container(vec![RenderNode::text("deep")]),
                RenderNode::container(vec![]),
            ]),
        ]);
        assert_eq!(extract(&tree), "line one\ndeep");
    }

    #[test]
    fn test_round_trip() {
        let stamps = StampMap::from_pairs([(":wave:", "u"), ("Sparkle", "v")]);
        let samples = [
            "",
            "\n",
            "plain text",
            "intro - 1:05  outro",
            "タイムスタンプ（編集中）\n\n - 1:02:03  ここ好き:wave:",
            "12:34:5 and 1:2:3:4 and 123:45",
            "Sparkle\nSparkleSparkle\n\n",
            "trailing 59:59",
        ];
        for text in samples {
            assert_eq!(extract(&render(text, &stamps)), text, "round trip of {:?}", text);
        }
    }
}
