//! Keyed binding variants - `case.visible`, `casenot.enable` and friends.
//!
//! A dotted binding name that misses the registry is split at the first dot
//! and the base handler is asked to build a variant for the subkey. Case
//! handlers answer with a copy of themselves wrapping the effect registered
//! under the subkey; everything else declines.

use std::rc::Rc;

use crate::binding::{registered_handler, BindingHandler};

/// Resolve a dotted binding name through the base handler's variant factory.
pub(crate) fn resolve_variant(name: &str) -> Option<Rc<dyn BindingHandler>> {
    let (base, subkey) = name.split_once('.')?;
    if subkey.is_empty() {
        return None;
    }
    let base_handler = registered_handler(base)?;
    base_handler.make_subkey_handler(subkey)
}
