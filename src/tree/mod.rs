//! Node Tree - Arena, templates, and the text view.
//!
//! This module is the structural half of the binding layer:
//! - arena - live node slots with parent/child links, flags, and removal
//!   callbacks (bindings register their effect stops here)
//! - templates - subtree blueprints built with [`element`], [`region`] and
//!   [`text`], turned live by [`instantiate`]
//! - [`rendered_text`] - the flattened text of the visible tree
//!
//! # Lifecycle
//!
//! Removal destroys a subtree depth-first: children are torn down before
//! their parent's removal callbacks run, so a region's effects always stop
//! before anything above them goes away.

mod arena;
mod render;
mod template;

pub use arena::{
    append_child, bindings, children, clear_children, create_node, is_alive, is_bound,
    is_enabled, is_visible, live_node_count, mark_bound, node_kind, node_text, on_removed,
    parent, remove_node, reset_tree, set_bindings, set_enabled, set_template_children,
    set_text, set_visible, template_children, NodeId, NodeKind,
};
pub use render::rendered_text;
pub use template::{element, instantiate, region, text, TemplateNode};
