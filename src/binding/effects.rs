//! Effect bindings - What happens to a region when its condition changes.
//!
//! An [`EffectBinding`] is the strategy behind every conditional binding:
//! the condition logic (a plain `if`, or a case inside a switch) computes a
//! boolean, and the effect binding turns that boolean into a change on the
//! node. Four ship by default:
//! - `"if"` - instantiate the region's template children when active,
//!   destroy them when not (controls descendants)
//! - `"visible"` - toggle the node's visibility flag
//! - `"hidden"` - toggle the node's visibility flag, reversed
//! - `"enable"` - toggle the node's enabled flag
//!
//! Case bindings pick their effect by name (`case` wraps `"if"`,
//! `case.visible` wraps `"visible"`, and so on), so registering a new
//! effect automatically makes the keyed case variant available.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::tree::{self, NodeId};

use super::apply::apply_bindings;
use super::context::BindingContext;
use super::error::BindingError;

// =============================================================================
// Effect Binding Strategy
// =============================================================================

/// Strategy applied to a node when its controlling condition changes.
pub trait EffectBinding {
    /// Whether this effect renders the node's content itself, so binding
    /// application must not descend into the children.
    fn controls_descendants(&self) -> bool {
        false
    }

    /// Whether this effect makes sense on a containerless region.
    fn allow_virtual(&self) -> bool {
        false
    }

    /// One-time preparation when the owning binding initializes.
    fn setup(&self, node: NodeId, ctx: &Rc<BindingContext>) -> Result<(), BindingError> {
        let _ = (node, ctx);
        Ok(())
    }

    /// Apply the current condition to the node.
    fn update(&self, node: NodeId, active: bool, ctx: &Rc<BindingContext>)
        -> Result<(), BindingError>;
}

// =============================================================================
// Render Effect ("if")
// =============================================================================

/// Instantiates the region's template children while active, destroys them
/// while inactive. Content is rebuilt at most once per rising edge.
pub struct RenderEffect;

impl EffectBinding for RenderEffect {
    fn controls_descendants(&self) -> bool {
        true
    }

    fn allow_virtual(&self) -> bool {
        true
    }

    fn setup(&self, node: NodeId, _ctx: &Rc<BindingContext>) -> Result<(), BindingError> {
        // The eagerly instantiated children are unbound placeholders; the
        // template blueprint kept on the node is the source of truth.
        tree::clear_children(node);
        Ok(())
    }

    fn update(
        &self,
        node: NodeId,
        active: bool,
        ctx: &Rc<BindingContext>,
    ) -> Result<(), BindingError> {
        if active {
            if !tree::children(node).is_empty() {
                return Ok(());
            }
            let blueprint = tree::template_children(node);
            for child_template in blueprint.iter() {
                let child = tree::instantiate(child_template);
                tree::append_child(node, child);
                apply_bindings(ctx, child)?;
            }
        } else {
            tree::clear_children(node);
        }
        Ok(())
    }
}

// =============================================================================
// Flag Effects ("visible", "hidden", "enable")
// =============================================================================

/// Toggles the node's visibility flag.
pub struct VisibleEffect;

impl EffectBinding for VisibleEffect {
    fn update(
        &self,
        node: NodeId,
        active: bool,
        _ctx: &Rc<BindingContext>,
    ) -> Result<(), BindingError> {
        tree::set_visible(node, active);
        Ok(())
    }
}

/// Clears the node's visibility flag while active. The reversal happens at
/// the node, not in the condition, so a `case.hidden` arm still counts as
/// the match for its siblings.
pub struct HiddenEffect;

impl EffectBinding for HiddenEffect {
    fn update(
        &self,
        node: NodeId,
        active: bool,
        _ctx: &Rc<BindingContext>,
    ) -> Result<(), BindingError> {
        tree::set_visible(node, !active);
        Ok(())
    }
}

/// Toggles the node's enabled flag.
pub struct EnableEffect;

impl EffectBinding for EnableEffect {
    fn update(
        &self,
        node: NodeId,
        active: bool,
        _ctx: &Rc<BindingContext>,
    ) -> Result<(), BindingError> {
        tree::set_enabled(node, active);
        Ok(())
    }
}

// =============================================================================
// Effect Registry
// =============================================================================

thread_local! {
    static EFFECTS: RefCell<HashMap<String, Rc<dyn EffectBinding>>> =
        RefCell::new(HashMap::new());

    static EFFECTS_SEEDED: Cell<bool> = const { Cell::new(false) };
}

fn ensure_default_effects() {
    if EFFECTS_SEEDED.with(|seeded| seeded.get()) {
        return;
    }
    EFFECTS_SEEDED.with(|seeded| seeded.set(true));
    EFFECTS.with(|effects| {
        let mut effects = effects.borrow_mut();
        effects.insert("if".to_string(), Rc::new(RenderEffect) as Rc<dyn EffectBinding>);
        effects.insert("visible".to_string(), Rc::new(VisibleEffect));
        effects.insert("hidden".to_string(), Rc::new(HiddenEffect));
        effects.insert("enable".to_string(), Rc::new(EnableEffect));
    });
}

/// Register an effect binding under a name, making `case.<name>` and
/// `casenot.<name>` available.
pub fn register_effect(name: &str, effect: Rc<dyn EffectBinding>) {
    ensure_default_effects();
    EFFECTS.with(|effects| {
        effects.borrow_mut().insert(name.to_string(), effect);
    });
}

/// Look up an effect binding by name.
pub fn effect_binding(name: &str) -> Option<Rc<dyn EffectBinding>> {
    ensure_default_effects();
    EFFECTS.with(|effects| effects.borrow().get(name).cloned())
}

/// Reset the effect registry to its default contents (for testing).
pub fn reset_effects() {
    EFFECTS.with(|effects| effects.borrow_mut().clear());
    EFFECTS_SEEDED.with(|seeded| seeded.set(false));
}
