//! Binding values - The dynamic value domain of binding expressions.
//!
//! Binding expressions produce [`Value`]s: loosely-typed scalars, lists, and
//! the reserved default marker used by case bindings. [`ValueSource`] wraps
//! the three ways an expression can be supplied (static value, signal,
//! getter), mirroring how component props work elsewhere in this family.
//!
//! # Equality
//!
//! Case matching needs two notions of equality:
//! - [`Value::strict_eq`] - same kind, equal payload (integers and floats
//!   count as one numeric kind)
//! - [`Value::loose_eq`] - adds the documented coercions: numeric strings
//!   compare numerically, booleans convert to 0/1, null only equals null,
//!   and lists or the default marker never coerce across kinds

use std::fmt;
use std::rc::Rc;

use spark_signals::Signal;

use crate::binding::BindingContext;

// =============================================================================
// Value
// =============================================================================

/// A dynamic binding value.
///
/// The reserved [`Value::Default`] variant marks a default case; it is
/// compared by tag only and never matches user data.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Absent value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer number.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// String.
    Str(String),
    /// List of values (used for multi-value case matching).
    List(Vec<Value>),
    /// The default-case marker (`$default` / `$else`).
    Default,
}

impl Value {
    /// Whether this value counts as true in a boolean position.
    ///
    /// Null, false, zero, NaN and the empty string are falsy; everything
    /// else (including empty lists and the default marker) is truthy.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::List(_) => true,
            Value::Default => true,
        }
    }

    /// Whether this is the reserved default-case marker.
    pub fn is_default(&self) -> bool {
        matches!(self, Value::Default)
    }

    /// Strict equality: same kind and equal payload.
    ///
    /// Integers and floats are one numeric kind and compare numerically.
    /// Lists compare element-wise strictly.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Default, Value::Default) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                self.as_number() == other.as_number()
            }
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.strict_eq(y))
            }
            _ => false,
        }
    }

    /// Loose equality with documented coercions.
    ///
    /// - same kind: payload equality (numbers compare numerically)
    /// - number vs string: the string is trimmed and read as a number
    ///   (empty string reads as 0, unparseable strings never match)
    /// - bool vs number or string: the bool converts to 0/1 and the
    ///   comparison recurses
    /// - null only equals null; lists and the default marker never
    ///   loosely equal another kind
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Default, Value::Default) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Bool(b), rhs) => Value::Int(i64::from(*b)).loose_eq(rhs),
            (lhs, Value::Bool(b)) => lhs.loose_eq(&Value::Int(i64::from(*b))),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                self.as_number() == other.as_number()
            }
            (Value::Int(_) | Value::Float(_), Value::Str(s)) => {
                matches!((self.as_number(), parse_number(s)), (Some(a), Some(b)) if a == b)
            }
            (Value::Str(s), Value::Int(_) | Value::Float(_)) => {
                matches!((parse_number(s), other.as_number()), (Some(a), Some(b)) if a == b)
            }
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loose_eq(y))
            }
            _ => false,
        }
    }

    /// Numeric view of Int/Float values.
    fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view including string coercion (used by getter expressions
    /// that compare the switch value numerically).
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Value::Str(s) => parse_number(s),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => self.as_number(),
        }
    }
}

/// Numeric reading of a string: trimmed, empty reads as zero.
fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            Value::Default => f.write_str("$default"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

// =============================================================================
// Value Source - Reactive expression wrapper
// =============================================================================

/// A binding expression: static value, signal, or getter.
///
/// Reading a `Signal` or `Getter` source inside an update effect creates a
/// reactive dependency, so the binding re-evaluates when the underlying
/// state changes. Getters receive the binding context, which gives them
/// access to the enclosing switch value.
///
/// # Example
///
/// ```ignore
/// use spark_switch::{signal, Value, ValueSource};
///
/// let chosen = signal(Value::from(1));
///
/// let fixed: ValueSource = 1.into();
/// let live: ValueSource = chosen.into();
/// let derived = ValueSource::getter(|ctx| {
///     Value::Bool(ctx.switch_value().to_number().is_some_and(|n| n < 5.0))
/// });
/// ```
#[derive(Clone)]
pub enum ValueSource {
    /// Fixed value (not reactive).
    Static(Value),
    /// Reactive signal (changes propagate automatically).
    Signal(Signal<Value>),
    /// Getter closure (called with the binding context on each read).
    Getter(Rc<dyn Fn(&BindingContext) -> Value>),
}

impl ValueSource {
    /// Wrap a getter closure.
    pub fn getter(f: impl Fn(&BindingContext) -> Value + 'static) -> Self {
        ValueSource::Getter(Rc::new(f))
    }

    /// Read the current value under the given context.
    pub fn get(&self, ctx: &BindingContext) -> Value {
        match self {
            ValueSource::Static(v) => v.clone(),
            ValueSource::Signal(s) => s.get(),
            ValueSource::Getter(f) => f(ctx),
        }
    }
}

impl From<Value> for ValueSource {
    fn from(value: Value) -> Self {
        ValueSource::Static(value)
    }
}

impl From<Signal<Value>> for ValueSource {
    fn from(signal: Signal<Value>) -> Self {
        ValueSource::Signal(signal)
    }
}

impl From<bool> for ValueSource {
    fn from(value: bool) -> Self {
        ValueSource::Static(Value::Bool(value))
    }
}

impl From<i64> for ValueSource {
    fn from(value: i64) -> Self {
        ValueSource::Static(Value::Int(value))
    }
}

impl From<i32> for ValueSource {
    fn from(value: i32) -> Self {
        ValueSource::Static(Value::Int(value as i64))
    }
}

impl From<f64> for ValueSource {
    fn from(value: f64) -> Self {
        ValueSource::Static(Value::Float(value))
    }
}

impl From<&str> for ValueSource {
    fn from(value: &str) -> Self {
        ValueSource::Static(Value::Str(value.to_string()))
    }
}

impl From<String> for ValueSource {
    fn from(value: String) -> Self {
        ValueSource::Static(Value::Str(value))
    }
}

impl From<Vec<Value>> for ValueSource {
    fn from(value: Vec<Value>) -> Self {
        ValueSource::Static(Value::List(value))
    }
}

// =============================================================================
// Tests
// =============================================================================
