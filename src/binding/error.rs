//! Binding errors - Usage failures raised while applying bindings.
//!
//! All of these are programmer errors in the view definition, raised
//! synchronously during the initial binding pass. Reactive re-evaluation
//! after setup never raises; update-path faults are reported to stderr and
//! the affected region is cleared instead.

use thiserror::Error;

/// Failure while applying bindings to a node tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// A case or casenot binding was used outside any switch scope.
    #[error("case binding must only be used with a switch binding")]
    CaseOutsideSwitch,

    /// A case or casenot binding was nested inside another case region
    /// without an intervening switch.
    #[error("case binding cannot be nested")]
    NestedCase,

    /// No handler is registered under this binding name.
    #[error("unknown binding: {0}")]
    UnknownBinding(String),

    /// The binding cannot be attached to a containerless region.
    #[error("the {0} binding cannot be used on a virtual element")]
    NotAllowedOnVirtual(String),

    /// Bindings were already applied to this node.
    #[error("bindings cannot be applied to the same node twice")]
    AlreadyBound,

    /// The binding was attached without an expression and its handler
    /// supplies no default.
    #[error("the {0} binding requires a value")]
    MissingExpression(String),
}
