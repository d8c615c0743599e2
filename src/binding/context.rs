//! Binding contexts - The environment a binding evaluates in.
//!
//! Contexts form an immutable chain: applying bindings under a context
//! never mutates it, and a switch binding extends the chain with one fresh
//! link per child region. Getter expressions receive the context, which is
//! how `$value` (the enclosing switch value) reaches them.

use std::rc::Rc;

use crate::flow::SwitchExtension;
use crate::value::Value;

/// One link in the binding context chain.
///
/// # Example
///
/// ```ignore
/// use spark_switch::{BindingContext, ValueSource, Value};
///
/// // A case expression that matches while the switch value is small
/// let small = ValueSource::getter(|ctx| {
///     Value::Bool(ctx.switch_value().to_number().is_some_and(|n| n < 5.0))
/// });
/// ```
pub struct BindingContext {
    parent: Option<Rc<BindingContext>>,
    switch_ext: Option<Rc<SwitchExtension>>,
}

impl BindingContext {
    /// Root context with no enclosing switch.
    pub fn root() -> Rc<BindingContext> {
        Rc::new(BindingContext {
            parent: None,
            switch_ext: None,
        })
    }

    /// Child context carrying a per-region switch extension.
    pub fn extend_with_switch(self: &Rc<Self>, ext: Rc<SwitchExtension>) -> Rc<BindingContext> {
        Rc::new(BindingContext {
            parent: Some(self.clone()),
            switch_ext: Some(ext),
        })
    }

    /// Parent link, if any.
    pub fn parent(&self) -> Option<&Rc<BindingContext>> {
        self.parent.as_ref()
    }

    /// Nearest switch extension on the chain.
    pub fn nearest_switch(&self) -> Option<Rc<SwitchExtension>> {
        if let Some(ext) = &self.switch_ext {
            return Some(ext.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.nearest_switch())
    }

    /// Current value of the enclosing switch (`$value`).
    ///
    /// Reading this inside an update effect creates a reactive dependency;
    /// the switch refreshes it whenever its own value changes. Outside any
    /// switch this is [`Value::Null`].
    pub fn switch_value(&self) -> Value {
        self.nearest_switch()
            .map(|ext| ext.value_cell().get())
            .unwrap_or(Value::Null)
    }

    /// The default-case marker (`$default` / `$else`).
    pub fn default_marker(&self) -> Value {
        Value::Default
    }
}
