//! Built-in handlers that adapt effects and simple node updates to the
//! binding protocol.

use std::rc::Rc;

use crate::tree::{self, NodeId};
use crate::value::ValueSource;

use super::context::BindingContext;
use super::effects::EffectBinding;
use super::error::BindingError;
use super::handler::{BindingHandler, HandlerFlags};

// =============================================================================
// Effect Handler
// =============================================================================

/// Adapts an [`EffectBinding`] into a standalone truthiness-driven handler.
/// Powers `if`, `visible` and `enable`.
pub struct EffectHandler {
    effect: Rc<dyn EffectBinding>,
}

impl EffectHandler {
    pub fn new(effect: Rc<dyn EffectBinding>) -> Self {
        Self { effect }
    }
}

impl BindingHandler for EffectHandler {
    fn flags(&self) -> HandlerFlags {
        let mut flags = HandlerFlags::empty();
        if self.effect.controls_descendants() {
            flags |= HandlerFlags::CONTROLS_DESCENDANTS;
        }
        if self.effect.allow_virtual() {
            flags |= HandlerFlags::ALLOW_VIRTUAL;
        }
        flags
    }

    fn init(
        &self,
        node: NodeId,
        _source: &ValueSource,
        ctx: &Rc<BindingContext>,
    ) -> Result<(), BindingError> {
        self.effect.setup(node, ctx)
    }

    fn update(
        &self,
        node: NodeId,
        source: &ValueSource,
        ctx: &Rc<BindingContext>,
    ) -> Result<(), BindingError> {
        let active = source.get(ctx).truthy();
        self.effect.update(node, active, ctx)
    }
}

// =============================================================================
// Text Handler
// =============================================================================

/// Writes the expression's display form into the node's text content.
pub struct TextHandler;

impl BindingHandler for TextHandler {
    fn flags(&self) -> HandlerFlags {
        HandlerFlags::ALLOW_VIRTUAL
    }

    fn update(
        &self,
        node: NodeId,
        source: &ValueSource,
        ctx: &Rc<BindingContext>,
    ) -> Result<(), BindingError> {
        let value = source.get(ctx);
        tree::set_text(node, &value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::effects::VisibleEffect;
    use crate::tree::{create_node, is_visible, node_text, reset_tree, NodeKind};
    use crate::value::Value;

    #[test]
    fn test_effect_handler_drives_effect() {
        reset_tree();

        let node = create_node(NodeKind::Element("panel".to_string()));
        let handler = EffectHandler::new(Rc::new(VisibleEffect));
        let ctx = BindingContext::root();

        let source = ValueSource::from(Value::Bool(false));
        handler.init(node, &source, &ctx).unwrap();
        handler.update(node, &source, &ctx).unwrap();
        assert!(!is_visible(node));

        let source = ValueSource::from(Value::Int(1));
        handler.update(node, &source, &ctx).unwrap();
        assert!(is_visible(node));
    }

    #[test]
    fn test_text_handler_writes_display_form() {
        reset_tree();

        let node = create_node(NodeKind::Text);
        let handler = TextHandler;
        let ctx = BindingContext::root();

        handler.update(node, &ValueSource::from("ready"), &ctx).unwrap();
        assert_eq!(node_text(node), Some("ready".into()));

        handler.update(node, &ValueSource::from(3.5), &ctx).unwrap();
        assert_eq!(node_text(node), Some("3.5".into()));
    }
}
