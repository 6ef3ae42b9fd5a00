//! Render tree → HTML markup for web-view hosts

use super::node::{NodePath, RenderNode};
use crate::shadowban::is_banned;
use crate::timecode;

/// Highlight state of a timestamp token (Selected > Banned > Normal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Normal,
    Banned,
    Selected,
}

impl Highlight {
    /// Compute the highlight for a token at `path`
    pub fn for_token(path: &[usize], text: &str, selected: Option<&[usize]>) -> Self {
        if selected == Some(path) {
            Highlight::Selected
        } else if is_banned(text) {
            Highlight::Banned
        } else {
            Highlight::Normal
        }
    }

    /// CSS class for this highlight
    pub fn class(self) -> &'static str {
        match self {
            Highlight::Normal => "ts",
            Highlight::Banned => "ts ts-banned",
            Highlight::Selected => "ts ts-selected",
        }
    }
}

/// Options for markup generation
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// Path of the currently selected timestamp token
    pub selected: Option<NodePath>,
}

/// Convert a render tree to an HTML fragment.
///
/// Text is escaped; timestamps become `<span class="ts">` with a
/// `data-seconds` attribute, stamps `<img class="stamp">`, breaks `<br>`.
/// Nested containers become `<span>` so they stay inline.
pub fn to_html(tree: &RenderNode, options: &HtmlOptions) -> String {
    let mut out = String::new();
    let mut path = Vec::new();
    match tree {
        RenderNode::Container(children) => {
            push_children(children, &mut path, options, &mut out);
        }
        other => push_node(other, &mut path, options, &mut out),
    }
    out
}

fn push_children(
    children: &[RenderNode],
    path: &mut NodePath,
    options: &HtmlOptions,
    out: &mut String,
) {
    for (i, child) in children.iter().enumerate() {
        path.push(i);
        push_node(child, path, options, out);
        path.pop();
    }
}

fn push_node(node: &RenderNode, path: &mut NodePath, options: &HtmlOptions, out: &mut String) {
    match node {
        RenderNode::TextRun(s) => out.push_str(&escape(s)),
        RenderNode::LineBreak => out.push_str("<br>"),
        RenderNode::TimestampToken(text) => {
            let highlight = Highlight::for_token(path, text, options.selected.as_deref());
            out.push_str(&format!(
                r#"<span class="{}" data-seconds="{}">{}</span>"#,
                highlight.class(),
                timecode::parse(text),
                escape(text)
            ));
        }
        RenderNode::StampToken { name, url } => {
            out.push_str(&format!(
                r#"<img class="stamp" src="{}" alt="{}" title="{}">"#,
                escape(url),
                escape(name),
                escape(name)
            ));
        }
        RenderNode::Container(children) => {
            out.push_str("<span>");
            push_children(children, path, options, out);
            out.push_str("</span>");
        }
    }
}

/// Escape text for HTML content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
