//! Raw text → render tree
//!
//! Timestamps are recognized first, then stamp names inside the remaining
//! literal text, then newlines become breaks. The concatenated logical text
//! of the produced nodes is always exactly the input.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use super::node::RenderNode;
use crate::stamps::StampMap;

/// `h:mm:ss` first, then `m:ss`; ASCII digits only
const TIMESTAMP_PATTERN: &str = r"[0-9]+:[0-9]{2}:[0-9]{2}|[0-9]{1,2}:[0-9]{2}";

fn timestamp_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TIMESTAMP_PATTERN).expect("timestamp pattern is valid"))
}

/// Render raw note text into a tree rooted at a container.
pub fn render(text: &str, stamps: &StampMap) -> RenderNode {
    let mut children = Vec::new();
    let mut last = 0;

    for range in find_timestamps(text) {
        push_literal(&mut children, &text[last..range.start], stamps);
        children.push(RenderNode::TimestampToken(text[range.clone()].to_string()));
        last = range.end;
    }
    push_literal(&mut children, &text[last..], stamps);

    RenderNode::Container(children)
}

/// Find timestamp tokens in `text` as byte ranges, left to right.
///
/// At any start position the three-part form wins. A two-part match that is
/// immediately followed by `:` is rejected and scanning resumes one character
/// later, so `12:34:5` contains no token and `123:45` yields `23:45`.
pub fn find_timestamps(text: &str) -> Vec<Range<usize>> {
    let re = timestamp_regex();
    let mut found = Vec::new();
    let mut pos = 0;

    while pos <= text.len() {
        let Some(m) = re.find_at(text, pos) else {
            break;
        };
        let is_two_part = m.as_str().bytes().filter(|&b| b == b':').count() == 1;
        if is_two_part && text[m.end()..].starts_with(':') {
            // Match starts on an ASCII digit, so +1 stays on a char boundary
            pos = m.start() + 1;
            continue;
        }
        found.push(m.range());
        pos = m.end();
    }

    found
}

/// Literal text with stamp names recognized (no timestamp scanning)
fn push_literal(out: &mut Vec<RenderNode>, text: &str, stamps: &StampMap) {
    if text.is_empty() {
        return;
    }

    let mut last = 0;
    for range in stamps.find_all(text) {
        push_plain(out, &text[last..range.start]);
        let name = &text[range.clone()];
        let url = stamps.url(name).unwrap_or_default();
        out.push(RenderNode::stamp(name, url));
        last = range.end;
    }
    push_plain(out, &text[last..]);
}

/// Plain text: runs separated by breaks
pub(crate) fn push_plain(out: &mut Vec<RenderNode>, text: &str) {
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push(RenderNode::LineBreak);
        }
        if !line.is_empty() {
            out.push(RenderNode::TextRun(line.to_string()));
        }
    }
}

/// Nodes for text typed into the live view: runs and breaks, no tokens
pub fn plain_nodes(text: &str) -> Vec<RenderNode> {
    let mut out = Vec::new();
    push_plain(&mut out, text);
    out
}
