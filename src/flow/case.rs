//! `case` / `casenot` bindings - one arm of a switch chain.
//!
//! Each case claims a slot in the enclosing switch at setup. On every
//! update it reads its predecessor's skip cell first: when an earlier
//! sibling already matched, the case stands down without evaluating its own
//! expression. Otherwise it matches its value against the switch value (or
//! the default flag for `$default` arms), drives its effect with the
//! outcome, and publishes its own skip cell for the next sibling.

use std::rc::Rc;

use crate::binding::{
    effect_binding, BindingContext, BindingError, BindingHandler, EffectBinding, HandlerFlags,
};
use crate::tree::NodeId;
use crate::value::{Value, ValueSource};

// =============================================================================
// Case Matching
// =============================================================================

/// Match one case value against the current switch value.
///
/// A boolean switch value turns every case into a truthiness test of the
/// matching polarity. A boolean case value answers for itself. A list case
/// matches when any element equals the switch value exactly, with no
/// coercion. Everything else falls through to loose equality.
pub fn check_case(case_value: &Value, switch_value: &Value) -> bool {
    if let Value::Bool(sw) = switch_value {
        return if case_value.truthy() { *sw } else { !*sw };
    }
    match case_value {
        Value::Bool(b) => *b,
        Value::List(items) => items.iter().any(|item| item.strict_eq(switch_value)),
        _ => case_value.loose_eq(switch_value),
    }
}

// =============================================================================
// Case Handler
// =============================================================================

/// Handler for `case`, `casenot` and their keyed variants.
///
/// The wrapped effect decides what a match does to the node: the plain
/// bindings render or clear descendants, `case.visible` toggles visibility,
/// `case.enable` toggles the enabled flag.
pub struct CaseHandler {
    negate: bool,
    effect: Rc<dyn EffectBinding>,
}

impl CaseHandler {
    pub fn new(negate: bool, effect: Rc<dyn EffectBinding>) -> Self {
        Self { negate, effect }
    }
}

impl BindingHandler for CaseHandler {
    fn flags(&self) -> HandlerFlags {
        let mut flags = HandlerFlags::NO_REWRITE;
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
        let ext = ctx
            .nearest_switch()
            .ok_or(BindingError::CaseOutsideSwitch)?;
        ext.claim_index()?;
        self.effect.setup(node, ctx)
    }

    fn update(
        &self,
        node: NodeId,
        source: &ValueSource,
        ctx: &Rc<BindingContext>,
    ) -> Result<(), BindingError> {
        let Some(ext) = ctx.nearest_switch() else {
            return Ok(());
        };
        let Some(index) = ext.claimed() else {
            return Ok(());
        };
        let scope = ext.scope();

        // The chain is complete before the first update runs, so the
        // length read needs no tracking.
        let is_last = index + 1 == scope.case_count();

        let suppressed = index > 0 && scope.skip_cell(index - 1).get();
        let (result, skip_next, no_default) = if suppressed {
            (false, true, false)
        } else {
            let case_value = source.get(ctx);
            if case_value.is_default() {
                // Default arms render while nothing else matches. A default
                // in last position closes the chain unconditionally.
                (scope.matched_default().get() || is_last, false, false)
            } else {
                let mut matched = check_case(&case_value, &ext.value_cell().get());
                if self.negate {
                    matched = !matched;
                }
                (matched, matched, matched)
            }
        };

        self.effect.update(node, result, ctx)?;

        scope.skip_cell(index).set(skip_next);
        if no_default {
            scope.matched_default().set(false);
        } else if !skip_next && is_last {
            scope.matched_default().set(true);
        }
        Ok(())
    }

    fn make_subkey_handler(&self, subkey: &str) -> Option<Rc<dyn BindingHandler>> {
        let effect = effect_binding(subkey)?;
        Some(Rc::new(CaseHandler::new(self.negate, effect)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_case_boolean_switch_polarity() {
        let truthy = Value::Str("yes".into());
        let falsy = Value::Str("".into());

        assert!(check_case(&truthy, &Value::Bool(true)));
        assert!(!check_case(&falsy, &Value::Bool(true)));
        assert!(!check_case(&truthy, &Value::Bool(false)));
        assert!(check_case(&falsy, &Value::Bool(false)));
    }

    #[test]
    fn test_check_case_boolean_case_answers_for_itself() {
        assert!(check_case(&Value::Bool(true), &Value::Str("anything".into())));
        assert!(!check_case(&Value::Bool(false), &Value::Str("anything".into())));
    }

    #[test]
    fn test_check_case_list_matches_exactly() {
        let list = Value::from(vec![Value::Int(2), Value::Int(3)]);

        assert!(check_case(&list, &Value::Int(3)));
        assert!(!check_case(&list, &Value::Int(4)));
        assert!(
            !check_case(&list, &Value::Str("2".into())),
            "list membership must not coerce"
        );
    }

    #[test]
    fn test_check_case_falls_through_to_loose_equality() {
        assert!(check_case(&Value::Str("2".into()), &Value::Int(2)));
        assert!(check_case(&Value::Int(5), &Value::Int(5)));
        assert!(!check_case(&Value::Str("a".into()), &Value::Str("b".into())));
        assert!(check_case(&Value::Null, &Value::Null));
    }
}
