//! Text rendering - Flatten the visible tree to a string.
//!
//! Walks a subtree in document order collecting text from visible nodes.
//! Hidden subtrees contribute nothing. This is the observation surface the
//! behavioral tests assert against.

use super::arena::{self, NodeId};

/// Concatenated text of every visible node under (and including) `node`.
pub fn rendered_text(node: NodeId) -> String {
    let mut out = String::new();
    collect(node, &mut out);
    out
}

fn collect(node: NodeId, out: &mut String) {
    if !arena::is_visible(node) {
        return;
    }
    if let Some(text) = arena::node_text(node) {
        out.push_str(&text);
    }
    for child in arena::children(node) {
        collect(child, out);
    }
}
