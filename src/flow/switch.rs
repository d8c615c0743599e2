//! `switch` binding - scoped value dispatch over sibling cases.
//!
//! The switch handler evaluates its control expression, hands every direct
//! child a context extension carrying that value, and binds the children
//! itself. Children with a `case`/`casenot` binding claim slots in document
//! order; a chain of skip cells between consecutive slots is how an earlier
//! match suppresses everything after it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_signals::{effect, signal, Signal};

use crate::binding::{
    apply_bindings, BindingContext, BindingError, BindingHandler, HandlerFlags,
};
use crate::tree::{self, NodeId, NodeKind};
use crate::value::{Value, ValueSource};

// =============================================================================
// Switch Scope
// =============================================================================

/// Shared state for one `switch` binding and the cases beneath it.
pub struct SwitchScope {
    /// One cell per registered case. Cell `i` is true when case `i` or any
    /// earlier case claimed the value; case `i + 1` reads it to stand down.
    skip_next: RefCell<Vec<Signal<bool>>>,
    value_fn: Rc<dyn Fn() -> Value>,
    /// True while no non-default case matches. Default cases render exactly
    /// when this holds (or when they close the chain).
    matched_default: Signal<bool>,
}

impl SwitchScope {
    pub fn new(value_fn: Rc<dyn Fn() -> Value>) -> Rc<Self> {
        Rc::new(Self {
            skip_next: RefCell::new(Vec::new()),
            value_fn,
            matched_default: signal(true),
        })
    }

    /// Evaluate the switch control expression. Tracked when called inside
    /// an effect.
    pub fn value(&self) -> Value {
        (self.value_fn)()
    }

    /// Append a skip cell and return its slot. Cases register in document
    /// order during the switch's child pass.
    pub fn register_case(&self) -> usize {
        let mut cells = self.skip_next.borrow_mut();
        cells.push(signal(false));
        cells.len() - 1
    }

    /// Number of registered cases. Read non-reactively; the chain is fixed
    /// once the switch's child pass finishes.
    pub fn case_count(&self) -> usize {
        self.skip_next.borrow().len()
    }

    pub fn skip_cell(&self, index: usize) -> Signal<bool> {
        self.skip_next.borrow()[index].clone()
    }

    pub fn matched_default(&self) -> Signal<bool> {
        self.matched_default.clone()
    }
}

// =============================================================================
// Switch Extension
// =============================================================================

/// Per-child view of a switch scope, carried on the binding context chain.
///
/// Every bindable child of the switch node gets one. Only children whose
/// bindings include a case claim a slot; the rest keep the seeded value and
/// never hear about later changes.
pub struct SwitchExtension {
    scope: Rc<SwitchScope>,
    index: Cell<Option<usize>>,
    /// Latest switch value, read by descendants as `$value`.
    value_cell: Signal<Value>,
}

impl SwitchExtension {
    pub fn new(scope: Rc<SwitchScope>, initial: Value) -> Rc<Self> {
        Rc::new(Self {
            scope,
            index: Cell::new(None),
            value_cell: signal(initial),
        })
    }

    /// Claim a case slot. A second claim means two case bindings share one
    /// context, which only happens when a case is nested inside another
    /// case without an intervening switch.
    pub fn claim_index(&self) -> Result<usize, BindingError> {
        if self.index.get().is_some() {
            return Err(BindingError::NestedCase);
        }
        let index = self.scope.register_case();
        self.index.set(Some(index));
        Ok(index)
    }

    pub fn claimed(&self) -> Option<usize> {
        self.index.get()
    }

    pub fn scope(&self) -> &Rc<SwitchScope> {
        &self.scope
    }

    pub fn value_cell(&self) -> Signal<Value> {
        self.value_cell.clone()
    }

    /// Push a fresh switch value to this child's descendants.
    pub fn refresh_value(&self, value: Value) {
        self.value_cell.set(value);
    }
}

// =============================================================================
// Switch Handler
// =============================================================================

/// Handler for the `switch` binding.
///
/// Controls its descendants: the child pass below replaces the normal
/// recursive application, so each child is bound exactly once, under a
/// context that carries the switch extension.
pub struct SwitchHandler;

impl BindingHandler for SwitchHandler {
    fn flags(&self) -> HandlerFlags {
        HandlerFlags::CONTROLS_DESCENDANTS | HandlerFlags::ALLOW_VIRTUAL | HandlerFlags::NO_REWRITE
    }

    fn preprocess(&self, source: Option<ValueSource>) -> Option<ValueSource> {
        // A bare `switch` dispatches on the truthiness of each case.
        Some(source.unwrap_or_else(|| ValueSource::from(Value::Bool(true))))
    }

    fn has_update(&self) -> bool {
        // The value-push effect below replaces the update phase.
        false
    }

    fn init(
        &self,
        node: NodeId,
        source: &ValueSource,
        ctx: &Rc<BindingContext>,
    ) -> Result<(), BindingError> {
        let scope = {
            let source = source.clone();
            let ctx = ctx.clone();
            SwitchScope::new(Rc::new(move || source.get(&ctx)))
        };

        // One up-front read seeds every child context with the current value.
        let initial = scope.value();

        let mut registered: Vec<Rc<SwitchExtension>> = Vec::new();
        for child in tree::children(node) {
            if tree::node_kind(child) == Some(NodeKind::Text) {
                continue;
            }
            let ext = SwitchExtension::new(scope.clone(), initial.clone());
            let child_ctx = ctx.extend_with_switch(ext.clone());
            apply_bindings(&child_ctx, child)?;
            if ext.claimed().is_some() {
                registered.push(ext);
            }
        }

        // Only contexts claimed by a case keep seeing fresh values.
        let stop = {
            let scope = scope.clone();
            effect(move || {
                let value = scope.value();
                for ext in &registered {
                    ext.refresh_value(value.clone());
                }
            })
        };
        tree::on_removed(node, stop);

        Ok(())
    }
}
