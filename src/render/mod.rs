//! Rendered note view
//!
//! Raw text is the single source of truth. The render tree is a derived,
//! regenerable projection of it:
//!
//! ```text
//! raw text ── render() ──▶ RenderNode tree ── extract() ──▶ raw text
//! ```
//!
//! `extract(&render(t, stamps)) == t` for every `t`.

pub mod html;
mod extract;
mod node;
mod renderer;

pub use extract::extract;
pub use html::{to_html, Highlight, HtmlOptions};
pub use node::{NodePath, RenderNode};
pub use renderer::{find_timestamps, plain_nodes, render};
