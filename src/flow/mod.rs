//! Control-flow bindings - `switch`, `case`, `casenot` and keyed variants.
//!
//! - [`SwitchHandler`] evaluates one expression and shares it with the cases
//!   on its child nodes through [`SwitchScope`] / [`SwitchExtension`]
//! - [`CaseHandler`] renders (or toggles) one arm, first match wins
//! - [`check_case`] is the value-matching rule shared by all case arms
//! - keyed variants (`case.visible`, ...) are synthesized on first lookup

mod case;
mod keyed;
mod switch;

pub use case::{check_case, CaseHandler};
pub(crate) use keyed::resolve_variant;
pub use switch::{SwitchExtension, SwitchHandler, SwitchScope};
