//! Binding handlers - The named behaviors behind binding declarations.
//!
//! A [`BindingHandler`] owns one binding name: it validates placement via
//! [`HandlerFlags`], optionally rewrites a missing expression in
//! `preprocess`, runs one-time `init` work, and re-evaluates in `update`
//! whenever a tracked dependency changes.
//!
//! The registry maps names to handlers. Lookup of a dotted name like
//! `case.enable` that has no direct registration asks the base handler to
//! synthesize a variant for the subkey; the result is cached under the full
//! dotted name so later lookups are plain map hits.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use bitflags::bitflags;

use crate::flow::{self, CaseHandler, SwitchHandler};
use crate::tree::NodeId;
use crate::value::ValueSource;

use super::builtins::{EffectHandler, TextHandler};
use super::context::BindingContext;
use super::effects::{EnableEffect, HiddenEffect, RenderEffect, VisibleEffect};
use super::error::BindingError;

// =============================================================================
// Handler Flags
// =============================================================================

bitflags! {
    /// Placement and rewrite capabilities of a binding handler.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct HandlerFlags: u8 {
        /// The handler binds its own descendants; application must not
        /// descend past the node.
        const CONTROLS_DESCENDANTS = 1 << 0;
        /// The binding may be attached to a containerless region.
        const ALLOW_VIRTUAL = 1 << 1;
        /// Syntactic preprocessors must leave this binding's expression
        /// untouched (control-flow bindings).
        const NO_REWRITE = 1 << 2;
    }
}

// =============================================================================
// Binding Handler
// =============================================================================

/// Behavior registered under a binding name.
pub trait BindingHandler {
    /// Placement and rewrite capabilities.
    fn flags(&self) -> HandlerFlags {
        HandlerFlags::empty()
    }

    /// Rewrite hook for the raw expression. Returning `None` for a missing
    /// expression makes the binding an error; handlers with a natural
    /// default (like `switch`) substitute it here.
    fn preprocess(&self, source: Option<ValueSource>) -> Option<ValueSource> {
        source
    }

    /// One-time setup when bindings are applied to the node.
    fn init(
        &self,
        node: NodeId,
        source: &ValueSource,
        ctx: &Rc<BindingContext>,
    ) -> Result<(), BindingError> {
        let _ = (node, source, ctx);
        Ok(())
    }

    /// Whether the handler has reactive update work. Handlers returning
    /// false get no update effect.
    fn has_update(&self) -> bool {
        true
    }

    /// Re-evaluate the binding. Runs once synchronously at setup and again
    /// whenever a dependency tracked during the previous run changes.
    fn update(
        &self,
        node: NodeId,
        source: &ValueSource,
        ctx: &Rc<BindingContext>,
    ) -> Result<(), BindingError> {
        let _ = (node, source, ctx);
        Ok(())
    }

    /// Synthesize a variant of this handler for a dotted subkey, e.g. the
    /// `enable` in `case.enable`. `None` means this handler has no keyed
    /// variants.
    fn make_subkey_handler(&self, subkey: &str) -> Option<Rc<dyn BindingHandler>> {
        let _ = subkey;
        None
    }
}

// =============================================================================
// Handler Registry
// =============================================================================

thread_local! {
    static HANDLERS: RefCell<HashMap<String, Rc<dyn BindingHandler>>> =
        RefCell::new(HashMap::new());

    static HANDLERS_SEEDED: Cell<bool> = const { Cell::new(false) };
}

fn ensure_default_handlers() {
    if HANDLERS_SEEDED.with(|seeded| seeded.get()) {
        return;
    }
    HANDLERS_SEEDED.with(|seeded| seeded.set(true));
    HANDLERS.with(|handlers| {
        let mut handlers = handlers.borrow_mut();
        handlers.insert(
            "switch".to_string(),
            Rc::new(SwitchHandler) as Rc<dyn BindingHandler>,
        );
        handlers.insert(
            "case".to_string(),
            Rc::new(CaseHandler::new(false, Rc::new(RenderEffect))),
        );
        handlers.insert(
            "casenot".to_string(),
            Rc::new(CaseHandler::new(true, Rc::new(RenderEffect))),
        );
        handlers.insert(
            "if".to_string(),
            Rc::new(EffectHandler::new(Rc::new(RenderEffect))),
        );
        handlers.insert(
            "visible".to_string(),
            Rc::new(EffectHandler::new(Rc::new(VisibleEffect))),
        );
        handlers.insert(
            "hidden".to_string(),
            Rc::new(EffectHandler::new(Rc::new(HiddenEffect))),
        );
        handlers.insert(
            "enable".to_string(),
            Rc::new(EffectHandler::new(Rc::new(EnableEffect))),
        );
        handlers.insert("text".to_string(), Rc::new(TextHandler));
    });
}

/// Register a binding handler under a name, replacing any previous one.
pub fn register_binding(name: &str, handler: Rc<dyn BindingHandler>) {
    ensure_default_handlers();
    HANDLERS.with(|handlers| {
        handlers.borrow_mut().insert(name.to_string(), handler);
    });
}

/// Exact-name lookup with no keyed synthesis.
pub(crate) fn registered_handler(name: &str) -> Option<Rc<dyn BindingHandler>> {
    ensure_default_handlers();
    HANDLERS.with(|handlers| handlers.borrow().get(name).cloned())
}

/// Look up the handler for a binding name.
///
/// A dotted name with no direct registration is resolved through the keyed
/// variant resolver and the synthesized handler is cached.
pub fn binding_handler(name: &str) -> Option<Rc<dyn BindingHandler>> {
    if let Some(handler) = registered_handler(name) {
        return Some(handler);
    }
    let synthesized = flow::resolve_variant(name)?;
    HANDLERS.with(|handlers| {
        handlers
            .borrow_mut()
            .insert(name.to_string(), synthesized.clone());
    });
    Some(synthesized)
}

/// Whether a syntactic preprocessor may rewrite this binding's expression.
/// Unregistered names are rewritable by default.
pub fn is_rewritable(name: &str) -> bool {
    binding_handler(name).is_none_or(|handler| !handler.flags().contains(HandlerFlags::NO_REWRITE))
}

/// Reset the handler and effect registries to their default contents
/// (for testing).
pub fn reset_bindings() {
    HANDLERS.with(|handlers| handlers.borrow_mut().clear());
    HANDLERS_SEEDED.with(|seeded| seeded.set(false));
    super::effects::reset_effects();
}
