//! Templates - Blueprints for node subtrees.
//!
//! A template describes a subtree before it exists: node kinds, literal
//! text, attached bindings, and child templates. [`instantiate`] turns a
//! template into live (but unbound) arena nodes. Content-controlling
//! bindings keep the child blueprint around so they can re-instantiate a
//! region after it was cleared.
//!
//! # Example
//!
//! ```ignore
//! use spark_switch::{element, region, text, instantiate, Value};
//!
//! let view = element("div").children([
//!     text("xxx"),
//!     region()
//!         .binding("switch", choice.clone())
//!         .children([
//!             region().binding("case", 1).child(text("Value is 1")),
//!             region().binding("case", 2).child(text("Value is 2")),
//!             region().binding("case", Value::Default).child(text("Other")),
//!         ]),
//! ]);
//!
//! let root = instantiate(&view);
//! ```

use std::rc::Rc;

use crate::value::ValueSource;

use super::arena::{self, NodeId, NodeKind};

/// Blueprint for one node and its subtree.
#[derive(Clone)]
pub struct TemplateNode {
    kind: NodeKind,
    text: Option<String>,
    bindings: Vec<(String, Option<ValueSource>)>,
    children: Rc<Vec<TemplateNode>>,
}

/// Element template with the given tag.
pub fn element(tag: &str) -> TemplateNode {
    TemplateNode {
        kind: NodeKind::Element(tag.to_string()),
        text: None,
        bindings: Vec::new(),
        children: Rc::new(Vec::new()),
    }
}

/// Containerless region template (virtual element).
pub fn region() -> TemplateNode {
    TemplateNode {
        kind: NodeKind::Region,
        text: None,
        bindings: Vec::new(),
        children: Rc::new(Vec::new()),
    }
}

/// Literal text template.
pub fn text(content: &str) -> TemplateNode {
    TemplateNode {
        kind: NodeKind::Text,
        text: Some(content.to_string()),
        bindings: Vec::new(),
        children: Rc::new(Vec::new()),
    }
}

impl TemplateNode {
    /// Attach a binding with an expression.
    pub fn binding(mut self, name: &str, source: impl Into<ValueSource>) -> Self {
        self.bindings.push((name.to_string(), Some(source.into())));
        self
    }

    /// Attach a binding without an expression.
    ///
    /// Only meaningful for bindings whose preprocess step supplies a
    /// default, like `switch`.
    pub fn bare(mut self, name: &str) -> Self {
        self.bindings.push((name.to_string(), None));
        self
    }

    /// Append one child template.
    pub fn child(mut self, child: TemplateNode) -> Self {
        Rc::make_mut(&mut self.children).push(child);
        self
    }

    /// Append a sequence of child templates.
    pub fn children(mut self, children: impl IntoIterator<Item = TemplateNode>) -> Self {
        Rc::make_mut(&mut self.children).extend(children);
        self
    }
}

/// Instantiate a template into live, unbound arena nodes.
///
/// Every node keeps an `Rc` of its child blueprint so content-controlling
/// bindings can rebuild the subtree later.
pub fn instantiate(template: &TemplateNode) -> NodeId {
    let node = arena::create_node(template.kind.clone());
    if let Some(text) = &template.text {
        arena::set_text(node, text);
    }
    arena::set_bindings(node, template.bindings.clone());
    arena::set_template_children(node, template.children.clone());
    for child in template.children.iter() {
        let child_node = instantiate(child);
        arena::append_child(node, child_node);
    }
    node
}
