//! Binding application - walks a node tree and activates handlers.
//!
//! `apply_bindings` resolves every declared binding on a node, validates
//! placement, runs all inits, then installs one reactive update effect per
//! handler. Descent stops at nodes whose handlers control their own
//! descendants (`switch`, `if`, `case` arms); those bind their children
//! themselves.
//!
//! Update effects run once synchronously at install time. An error on that
//! first run aborts the whole application; an error on a later re-run
//! cannot propagate anywhere useful, so it is reported to stderr and the
//! node's content is cleared.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_signals::effect;

use crate::tree::{self, NodeId, NodeKind};
use crate::value::ValueSource;

use super::context::BindingContext;
use super::error::BindingError;
use super::handler::{binding_handler, BindingHandler, HandlerFlags};

/// Apply bindings to a node and its descendants.
///
/// # Arguments
/// * `ctx` - Binding context for the subtree root
/// * `node` - Node to bind; fails with `AlreadyBound` when bound before
///
/// # Example
/// ```ignore
/// let panel = instantiate(
///     &element("panel").binding("visible", flag.clone()),
/// );
/// apply_bindings(&BindingContext::root(), panel)?;
/// ```
pub fn apply_bindings(ctx: &Rc<BindingContext>, node: NodeId) -> Result<(), BindingError> {
    if tree::is_bound(node) {
        return Err(BindingError::AlreadyBound);
    }
    apply_node(ctx, node)
}

fn apply_node(ctx: &Rc<BindingContext>, node: NodeId) -> Result<(), BindingError> {
    if tree::node_kind(node) == Some(NodeKind::Text) {
        return Ok(());
    }
    tree::mark_bound(node);

    let is_region = tree::node_kind(node) == Some(NodeKind::Region);
    let mut resolved: Vec<(String, Rc<dyn BindingHandler>, ValueSource)> = Vec::new();
    let mut controls = false;

    for (name, expression) in tree::bindings(node) {
        let handler =
            binding_handler(&name).ok_or_else(|| BindingError::UnknownBinding(name.clone()))?;
        let flags = handler.flags();
        if is_region && !flags.contains(HandlerFlags::ALLOW_VIRTUAL) {
            return Err(BindingError::NotAllowedOnVirtual(name.clone()));
        }
        let source = handler
            .preprocess(expression)
            .ok_or_else(|| BindingError::MissingExpression(name.clone()))?;
        if flags.contains(HandlerFlags::CONTROLS_DESCENDANTS) {
            controls = true;
        }
        resolved.push((name, handler, source));
    }

    // Every init on the node runs before the first update effect, so
    // handlers see the same pre-update state regardless of declaration
    // order.
    for (_, handler, source) in &resolved {
        handler.init(node, source, ctx)?;
    }

    for (name, handler, source) in &resolved {
        if handler.has_update() {
            install_update_effect(name, handler.clone(), node, source.clone(), ctx.clone())?;
        }
    }

    if !controls {
        for child in tree::children(node) {
            apply_node(ctx, child)?;
        }
    }
    Ok(())
}

fn install_update_effect(
    name: &str,
    handler: Rc<dyn BindingHandler>,
    node: NodeId,
    source: ValueSource,
    ctx: Rc<BindingContext>,
) -> Result<(), BindingError> {
    let failure: Rc<RefCell<Option<BindingError>>> = Rc::new(RefCell::new(None));
    let first_run = Rc::new(Cell::new(true));
    let name = name.to_string();

    let stop = {
        let failure = failure.clone();
        let first_run = first_run.clone();
        effect(move || {
            if let Err(err) = handler.update(node, &source, &ctx) {
                if first_run.get() {
                    *failure.borrow_mut() = Some(err);
                } else {
                    eprintln!("[spark-switch] '{}' binding update failed: {}", name, err);
                    tree::clear_children(node);
                }
            }
            first_run.set(false);
        })
    };

    if let Some(err) = failure.borrow_mut().take() {
        stop();
        return Err(err);
    }
    tree::on_removed(node, stop);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::handler::{register_binding, reset_bindings};
    use crate::tree::{children, element, instantiate, node_text, region, reset_tree, text};
    use crate::value::Value;
    use spark_signals::{signal, Signal};

    #[test]
    fn test_text_binding_updates_reactively() {
        reset_tree();
        reset_bindings();

        let status = signal(Value::from("idle"));
        let node = instantiate(&element("label").binding("text", status.clone()));

        apply_bindings(&BindingContext::root(), node).unwrap();
        assert_eq!(node_text(node), Some("idle".into()));

        status.set(Value::from("busy"));
        assert_eq!(
            node_text(node),
            Some("busy".into()),
            "text should follow the signal"
        );
    }

    #[test]
    fn test_unknown_binding_is_an_error() {
        reset_tree();
        reset_bindings();

        let node = instantiate(&element("panel").binding("sparkle", Value::Bool(true)));
        let result = apply_bindings(&BindingContext::root(), node);
        assert_eq!(
            result,
            Err(BindingError::UnknownBinding("sparkle".to_string()))
        );
    }

    #[test]
    fn test_missing_expression_is_an_error() {
        reset_tree();
        reset_bindings();

        let node = instantiate(&element("panel").bare("visible"));
        let result = apply_bindings(&BindingContext::root(), node);
        assert_eq!(
            result,
            Err(BindingError::MissingExpression("visible".to_string()))
        );

        // Handlers with a natural default rewrite the bare form instead
        let node = instantiate(&region().bare("switch"));
        assert!(apply_bindings(&BindingContext::root(), node).is_ok());
    }

    #[test]
    fn test_element_only_binding_rejected_on_region() {
        reset_tree();
        reset_bindings();

        let node = instantiate(&region().binding("visible", Value::Bool(true)));
        let result = apply_bindings(&BindingContext::root(), node);
        assert_eq!(
            result,
            Err(BindingError::NotAllowedOnVirtual("visible".to_string()))
        );

        let node = instantiate(&region().binding("text", Value::from("ok")));
        assert!(apply_bindings(&BindingContext::root(), node).is_ok());
    }

    #[test]
    fn test_double_application_rejected() {
        reset_tree();
        reset_bindings();

        let node = instantiate(&element("panel").binding("visible", Value::Bool(true)));
        apply_bindings(&BindingContext::root(), node).unwrap();
        assert_eq!(
            apply_bindings(&BindingContext::root(), node),
            Err(BindingError::AlreadyBound)
        );
    }

    #[test]
    fn test_descent_skips_controlled_subtrees() {
        reset_tree();
        reset_bindings();

        // The inner unknown binding is only reached when "if" renders it.
        let node = instantiate(
            &element("panel")
                .binding("if", Value::Bool(false))
                .child(element("inner").binding("sparkle", Value::Bool(true))),
        );
        assert!(
            apply_bindings(&BindingContext::root(), node).is_ok(),
            "unrendered content must not be validated"
        );
    }

    #[test]
    fn test_update_failure_after_first_run_clears_node() {
        reset_tree();
        reset_bindings();

        struct Tripwire {
            trip: Signal<Value>,
        }
        impl BindingHandler for Tripwire {
            fn update(
                &self,
                _node: NodeId,
                _source: &ValueSource,
                _ctx: &Rc<BindingContext>,
            ) -> Result<(), BindingError> {
                if self.trip.get() == Value::Int(2) {
                    Err(BindingError::UnknownBinding("tripwire".to_string()))
                } else {
                    Ok(())
                }
            }
        }

        let trip = signal(Value::Int(1));
        register_binding("tripwire", Rc::new(Tripwire { trip: trip.clone() }));

        let node = instantiate(
            &element("panel")
                .binding("tripwire", Value::Null)
                .child(text("payload")),
        );
        apply_bindings(&BindingContext::root(), node).unwrap();
        assert_eq!(children(node).len(), 1);

        trip.set(Value::Int(2));
        assert!(
            children(node).is_empty(),
            "a failing re-run should clear the node's content"
        );
    }
}
