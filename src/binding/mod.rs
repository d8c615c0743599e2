//! Binding system - contexts, handlers, effects and application.
//!
//! - [`BindingContext`] chains scope extensions down the tree
//! - [`BindingHandler`] is the named behavior behind a binding declaration
//! - [`EffectBinding`] abstracts what an activation does to a node
//! - [`apply_bindings`] walks a tree and wires handlers to the reactive graph

mod apply;
mod builtins;
mod context;
mod effects;
mod error;
mod handler;

pub use apply::apply_bindings;
pub use builtins::{EffectHandler, TextHandler};
pub use context::BindingContext;
pub use effects::{
    effect_binding, register_effect, reset_effects, EffectBinding, EnableEffect, HiddenEffect,
    RenderEffect, VisibleEffect,
};
pub use error::BindingError;
pub use handler::{
    binding_handler, is_rewritable, register_binding, reset_bindings, BindingHandler,
    HandlerFlags,
};
pub(crate) use handler::registered_handler;
