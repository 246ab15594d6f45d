//! Number conversion strategies.
//!
//! Decoding strategies are fallbacks consulted, in declaration order, when a
//! numeric target meets a node that is not a `Number`. The first strategy that
//! matches wins; a strategy that does not match is silent and yields to the
//! next one. Encoding strategies are the mirror image, consulted when a number
//! is boxed into the tree.

use crate::value::{Number, NumberPrimitive, Value};

/// Result of trying one decoding strategy against one node.
#[derive(Debug, Clone, PartialEq)]
pub enum StrategyOutcome<T> {
    /// The strategy converted the node.
    Matched(T),
    /// The strategy recognized the node's shape but its content is not a
    /// valid value of the target kind (e.g. `"abc"` for an integer).
    Malformed(String),
    /// The strategy does not apply to this node.
    NoMatch,
}

/// A fallback rule for decoding a number from a non-number node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberDecodingStrategy {
    /// Parse a string payload as the target kind: `"42"` → `42`.
    ConvertFromString,
    /// `true` → `1`.
    ConvertFromTrue,
    /// `false` → `0`.
    ConvertFromFalse,
}

impl NumberDecodingStrategy {
    /// Try this strategy on `value` for target type `T`.
    pub fn attempt<T: NumberPrimitive>(&self, value: &Value) -> StrategyOutcome<T> {
        match (self, value) {
            (NumberDecodingStrategy::ConvertFromString, Value::String(s)) => match T::parse_literal(s) {
                Some(n) => StrategyOutcome::Matched(n),
                None => StrategyOutcome::Malformed(format!(
                    "string {s:?} is not a valid {} literal",
                    T::NAME
                )),
            },
            (NumberDecodingStrategy::ConvertFromTrue, Value::True) => {
                T::from_number(&Number::from(1u8)).map_or(StrategyOutcome::NoMatch, StrategyOutcome::Matched)
            }
            (NumberDecodingStrategy::ConvertFromFalse, Value::False) => {
                T::from_number(&Number::from(0u8)).map_or(StrategyOutcome::NoMatch, StrategyOutcome::Matched)
            }
            _ => StrategyOutcome::NoMatch,
        }
    }

    /// Like [`attempt`](Self::attempt), collapsing both failure kinds.
    pub fn apply<T: NumberPrimitive>(&self, value: &Value) -> Option<T> {
        match self.attempt(value) {
            StrategyOutcome::Matched(n) => Some(n),
            _ => None,
        }
    }
}

/// A rule for boxing a number as something other than a plain `Number` node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NumberEncodingStrategy {
    /// Every number is stored as its decimal string: `42` → `"42"`.
    ConvertToString,
    /// Non-finite floats are stored as the given strings; finite numbers are
    /// left to the next strategy.
    ConvertNonFiniteToString {
        positive_infinity: String,
        negative_infinity: String,
        nan: String,
    },
}

impl NumberEncodingStrategy {
    /// The boxed value, or `None` when this strategy does not apply.
    pub fn apply(&self, number: &Number) -> Option<Value> {
        match self {
            NumberEncodingStrategy::ConvertToString => Some(Value::String(number.to_string())),
            NumberEncodingStrategy::ConvertNonFiniteToString {
                positive_infinity,
                negative_infinity,
                nan,
            } => {
                let f = number.as_f64();
                if number.is_finite() {
                    None
                } else if f.is_nan() {
                    Some(Value::String(nan.clone()))
                } else if f > 0.0 {
                    Some(Value::String(positive_infinity.clone()))
                } else {
                    Some(Value::String(negative_infinity.clone()))
                }
            }
        }
    }
}
