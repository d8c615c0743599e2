//! # spark-switch
//!
//! Declarative `switch`/`case` control-flow bindings for Rust UIs.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! Bindings are named handlers attached to nodes of a retained tree. The
//! `switch` handler evaluates one expression and binds its children itself,
//! handing each a context extension that carries the value. `case` and
//! `casenot` arms claim slots in document order and suppress each other
//! through a chain of skip cells:
//! ```text
//! switch expression → SwitchScope → case 0 → skip cell 0 → case 1 → ...
//! ```
//! First match wins; `$default` arms render while nothing else matches.
//! Keyed variants (`case.visible`, `casenot.enable`, ...) reuse the same
//! matching chain but drive a different effect on the node.
//!
//! ## Modules
//!
//! - [`value`] - Dynamic values, coercion rules, expression sources
//! - [`tree`] - Retained node tree, templates, text rendering
//! - [`binding`] - Contexts, handlers, effects, binding application
//! - [`flow`] - The `switch`/`case`/`casenot` handlers themselves

pub mod binding;
pub mod flow;
pub mod tree;
pub mod value;

// Re-export commonly used items
pub use value::{Value, ValueSource};

pub use tree::{
    append_child, children, create_node, element, instantiate, is_enabled, is_visible,
    node_text, region, remove_node, rendered_text, reset_tree, set_text, text, NodeId,
    NodeKind, TemplateNode,
};

pub use binding::{
    apply_bindings, binding_handler, is_rewritable, register_binding, register_effect,
    reset_bindings, BindingContext, BindingError, BindingHandler, EffectBinding, HandlerFlags,
};

pub use flow::{check_case, CaseHandler, SwitchExtension, SwitchHandler, SwitchScope};

pub use spark_signals::{signal, Signal};
