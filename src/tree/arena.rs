//! Node arena - Slot allocation for live nodes.
//!
//! Manages the lifecycle of node slots:
//! - Free slot pool for O(1) reuse
//! - Parent/child links and per-node flags (visible, enabled, bound)
//! - Removal callbacks so bindings can stop their effects on teardown

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::value::ValueSource;

use super::template::TemplateNode;

/// Identifier of a live node slot.
pub type NodeId = usize;

/// Structural kind of a node.
///
/// `Element` and `Region` are bindable; `Region` is the containerless form
/// (a span of content with no element of its own). `Text` nodes carry
/// literal content and pass through binding application untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Tagged element node.
    Element(String),
    /// Containerless region (virtual element).
    Region,
    /// Literal text node.
    Text,
}

struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    text: Option<String>,
    visible: bool,
    enabled: bool,
    bound: bool,
    bindings: Vec<(String, Option<ValueSource>)>,
    template: Rc<Vec<TemplateNode>>,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        NodeData {
            kind,
            parent: None,
            children: Vec::new(),
            text: None,
            visible: true,
            enabled: true,
            bound: false,
            bindings: Vec::new(),
            template: Rc::new(Vec::new()),
        }
    }
}

// =============================================================================
// Arena State
// =============================================================================

thread_local! {
    /// Node slots; `None` marks a freed slot.
    static NODES: RefCell<Vec<Option<NodeData>>> = RefCell::new(Vec::new());

    /// Pool of freed slots for reuse.
    static FREE_SLOTS: RefCell<Vec<NodeId>> = RefCell::new(Vec::new());

    /// Removal callbacks registered per node.
    static REMOVAL_CALLBACKS: RefCell<HashMap<NodeId, Vec<Box<dyn FnOnce()>>>> =
        RefCell::new(HashMap::new());
}

fn with_node<R>(node: NodeId, f: impl FnOnce(&NodeData) -> R) -> Option<R> {
    NODES.with(|nodes| nodes.borrow().get(node).and_then(|slot| slot.as_ref()).map(f))
}

fn with_node_mut<R>(node: NodeId, f: impl FnOnce(&mut NodeData) -> R) -> Option<R> {
    NODES.with(|nodes| {
        nodes
            .borrow_mut()
            .get_mut(node)
            .and_then(|slot| slot.as_mut())
            .map(f)
    })
}

// =============================================================================
// Node Creation and Links
// =============================================================================

/// Allocate a node slot.
pub fn create_node(kind: NodeKind) -> NodeId {
    let data = NodeData::new(kind);
    let reused = FREE_SLOTS.with(|free| free.borrow_mut().pop());
    match reused {
        Some(index) => {
            NODES.with(|nodes| nodes.borrow_mut()[index] = Some(data));
            index
        }
        None => NODES.with(|nodes| {
            let mut nodes = nodes.borrow_mut();
            nodes.push(Some(data));
            nodes.len() - 1
        }),
    }
}

/// Whether the slot currently holds a live node.
pub fn is_alive(node: NodeId) -> bool {
    with_node(node, |_| ()).is_some()
}

/// Structural kind of a node.
pub fn node_kind(node: NodeId) -> Option<NodeKind> {
    with_node(node, |data| data.kind.clone())
}

/// Parent of a node.
pub fn parent(node: NodeId) -> Option<NodeId> {
    with_node(node, |data| data.parent).flatten()
}

/// Snapshot of a node's children.
pub fn children(node: NodeId) -> Vec<NodeId> {
    with_node(node, |data| data.children.clone()).unwrap_or_default()
}

/// Append a child to a parent node.
pub fn append_child(parent: NodeId, child: NodeId) {
    with_node_mut(child, |data| data.parent = Some(parent));
    with_node_mut(parent, |data| data.children.push(child));
}

// =============================================================================
// Node State
// =============================================================================

/// Literal or bound text content of a node.
pub fn node_text(node: NodeId) -> Option<String> {
    with_node(node, |data| data.text.clone()).flatten()
}

/// Set the text content of a node.
pub fn set_text(node: NodeId, text: &str) {
    with_node_mut(node, |data| data.text = Some(text.to_string()));
}

/// Visibility flag (freed nodes read as hidden).
pub fn is_visible(node: NodeId) -> bool {
    with_node(node, |data| data.visible).unwrap_or(false)
}

/// Set the visibility flag.
pub fn set_visible(node: NodeId, visible: bool) {
    with_node_mut(node, |data| data.visible = visible);
}

/// Enabled flag (freed nodes read as disabled).
pub fn is_enabled(node: NodeId) -> bool {
    with_node(node, |data| data.enabled).unwrap_or(false)
}

/// Set the enabled flag.
pub fn set_enabled(node: NodeId, enabled: bool) {
    with_node_mut(node, |data| data.enabled = enabled);
}

/// Whether bindings were already applied to this node.
pub fn is_bound(node: NodeId) -> bool {
    with_node(node, |data| data.bound).unwrap_or(false)
}

/// Mark a node as bound.
pub fn mark_bound(node: NodeId) {
    with_node_mut(node, |data| data.bound = true);
}

/// Bindings attached to a node, in declaration order.
pub fn bindings(node: NodeId) -> Vec<(String, Option<ValueSource>)> {
    with_node(node, |data| data.bindings.clone()).unwrap_or_default()
}

/// Attach bindings to a node.
pub fn set_bindings(node: NodeId, bindings: Vec<(String, Option<ValueSource>)>) {
    with_node_mut(node, |data| data.bindings = bindings);
}

/// Template blueprint for this node's children, kept for re-instantiation.
pub fn template_children(node: NodeId) -> Rc<Vec<TemplateNode>> {
    with_node(node, |data| data.template.clone()).unwrap_or_default()
}

/// Store the template blueprint for this node's children.
pub fn set_template_children(node: NodeId, template: Rc<Vec<TemplateNode>>) {
    with_node_mut(node, |data| data.template = template);
}

// =============================================================================
// Removal
// =============================================================================

/// Register a callback to run when `node` is removed from the tree.
pub fn on_removed(node: NodeId, callback: impl FnOnce() + 'static) {
    REMOVAL_CALLBACKS.with(|callbacks| {
        callbacks
            .borrow_mut()
            .entry(node)
            .or_default()
            .push(Box::new(callback));
    });
}

/// Detach a node from its parent and destroy its subtree.
pub fn remove_node(node: NodeId) {
    let parent = parent(node);
    if let Some(parent) = parent {
        with_node_mut(parent, |data| data.children.retain(|&child| child != node));
    }
    destroy(node);
}

/// Destroy every child subtree of a node, leaving the node itself in place.
pub fn clear_children(node: NodeId) {
    let detached = with_node_mut(node, |data| std::mem::take(&mut data.children));
    for child in detached.unwrap_or_default() {
        destroy(child);
    }
}

/// Destroy a subtree: children first, then the node's own removal
/// callbacks, then the slot itself.
fn destroy(node: NodeId) {
    if !is_alive(node) {
        return;
    }

    let children = children(node);
    for child in children {
        destroy(child);
    }

    let callbacks = REMOVAL_CALLBACKS.with(|callbacks| callbacks.borrow_mut().remove(&node));
    if let Some(callbacks) = callbacks {
        for callback in callbacks {
            callback();
        }
    }

    NODES.with(|nodes| {
        if let Some(slot) = nodes.borrow_mut().get_mut(node) {
            *slot = None;
        }
    });
    FREE_SLOTS.with(|free| free.borrow_mut().push(node));
}

// =============================================================================
// Queries and Reset
// =============================================================================

/// Count of currently live nodes.
pub fn live_node_count() -> usize {
    NODES.with(|nodes| nodes.borrow().iter().filter(|slot| slot.is_some()).count())
}

/// Reset all arena state (for testing).
pub fn reset_tree() {
    NODES.with(|nodes| nodes.borrow_mut().clear());
    FREE_SLOTS.with(|free| free.borrow_mut().clear());
    REMOVAL_CALLBACKS.with(|callbacks| callbacks.borrow_mut().clear());
}
