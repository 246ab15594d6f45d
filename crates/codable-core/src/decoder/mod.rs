//! Decoding engine — turns a [`Value`] tree into typed data.
//!
//! The engine is a recursive descent with one [`Decoder`] frame per nesting
//! level. Each frame holds the node it decodes, its [`CodingPath`], and a
//! shared borrow of the call's [`DecodingOptions`]. Frames present one of three
//! containers depending on the node:
//!
//! - [`KeyedContainer`] for objects
//! - [`UnkeyedContainer`] for arrays
//! - [`SingleValueContainer`] for everything else
//!
//! `Decoder` is also a [`serde::Deserializer`], so any `T: Deserialize` can be
//! decoded; derived structures see their fields through the keyed container
//! (with the key-naming strategy applied) and their numeric fields through the
//! primitive unboxing algorithm ([`Decoder::unbox_number`]).
//!
//! # Example
//! ```
//! use codable_core::{JsonDecoder, NumberDecodingStrategy};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Repo {
//!     name: String,
//!     stars: u32,
//! }
//!
//! let decoder = JsonDecoder::new().with_number_strategies([NumberDecodingStrategy::ConvertFromString]);
//! let repo: Repo = decoder.decode(br#"{"name":"codable","stars":"42"}"#).unwrap();
//! assert_eq!(repo.stars, 42);
//! ```

mod container;
mod de;

use tracing::{debug, trace};

use serde::de::{Deserialize, DeserializeOwned};

use crate::bridge;
use crate::error::{CodableError, Result};
use crate::key::KeyNamingStrategy;
use crate::options::DecodingOptions;
use crate::path::CodingPath;
use crate::strategy::{NumberDecodingStrategy, StrategyOutcome};
use crate::value::{NumberPrimitive, Value};

pub use container::{Container, KeyedContainer, SingleValueContainer, UnkeyedContainer};

/// Top-level entry point for decoding. Configure it once, then decode as many
/// documents as needed; every call takes a read-only snapshot of the options.
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
    options: DecodingOptions,
}

impl JsonDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number-decoding fallbacks, tried in the given order.
    pub fn with_number_strategies<I>(self, strategies: I) -> Self
    where
        I: IntoIterator<Item = NumberDecodingStrategy>,
    {
        let key_naming = *self.options.key_naming();
        Self {
            options: DecodingOptions::new(strategies.into_iter().collect(), key_naming),
        }
    }

    pub fn with_key_naming(self, key_naming: KeyNamingStrategy) -> Self {
        let strategies = self.options.number_strategies().to_vec();
        Self {
            options: DecodingOptions::new(strategies, key_naming),
        }
    }

    pub fn options(&self) -> &DecodingOptions {
        &self.options
    }

    /// Parse `bytes` and decode the resulting tree as `T`.
    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        let value = bridge::parse(bytes)?;
        self.decode_value(&value)
    }

    /// Decode an existing tree as `T`. Strings may be borrowed from `value`.
    pub fn decode_value<'de, T: Deserialize<'de>>(&self, value: &'de Value) -> Result<T> {
        let decoder = Decoder::root(value, &self.options);
        T::deserialize(decoder).map_err(|err| failed(err.anchored(&CodingPath::root())))
    }

    /// Decode with hand-written logic expressed over the container API.
    ///
    /// ```
    /// use codable_core::{JsonDecoder, Value};
    ///
    /// let value = Value::from_iter([("a", Value::True), ("b", Value::Null)]);
    /// let (a, b, c) = JsonDecoder::new()
    ///     .decode_with(&value, |decoder| {
    ///         let container = decoder.keyed_container()?;
    ///         let a: bool = container.decode("a")?;
    ///         let b: Option<bool> = container.decode_if_present("b")?;
    ///         let c: Option<bool> = container.get("c");
    ///         Ok((a, b, c))
    ///     })
    ///     .unwrap();
    /// assert_eq!((a, b, c), (true, None, None));
    /// ```
    pub fn decode_with<'de, T, F>(&self, value: &'de Value, f: F) -> Result<T>
    where
        F: for<'o> FnOnce(&Decoder<'de, 'o>) -> Result<T>,
    {
        let decoder = Decoder::root(value, &self.options);
        f(&decoder).map_err(|err| failed(err.anchored(&CodingPath::root())))
    }
}

fn failed(err: CodableError) -> CodableError {
    debug!(error = %err, "decode failed");
    err
}

/// One frame of the decoding engine.
#[derive(Debug, Clone)]
pub struct Decoder<'de, 'o> {
    value: &'de Value,
    path: CodingPath,
    options: &'o DecodingOptions,
}

impl<'de, 'o> Decoder<'de, 'o> {
    /// A frame for the document root.
    pub fn root(value: &'de Value, options: &'o DecodingOptions) -> Self {
        Self {
            value,
            path: CodingPath::root(),
            options,
        }
    }

    /// The node this frame decodes.
    pub fn value(&self) -> &'de Value {
        self.value
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.path
    }

    pub fn options(&self) -> &'o DecodingOptions {
        self.options
    }

    /// The container matching the node's variant.
    pub fn container(&self) -> Container<'de, 'o> {
        match self.value {
            Value::Object(object) => {
                Container::Keyed(KeyedContainer::new(object, self.path.clone(), self.options))
            }
            Value::Array(array) => {
                Container::Unkeyed(UnkeyedContainer::new(array, self.path.clone(), self.options))
            }
            _ => Container::SingleValue(self.single_value_container()),
        }
    }

    /// The node as a keyed container; fails unless it is an object.
    pub fn keyed_container(&self) -> Result<KeyedContainer<'de, 'o>> {
        match self.value {
            Value::Object(object) => Ok(KeyedContainer::new(object, self.path.clone(), self.options)),
            _ => Err(self.mismatch("object")),
        }
    }

    /// The node as an unkeyed container; fails unless it is an array.
    pub fn unkeyed_container(&self) -> Result<UnkeyedContainer<'de, 'o>> {
        match self.value {
            Value::Array(array) => Ok(UnkeyedContainer::new(array, self.path.clone(), self.options)),
            _ => Err(self.mismatch("array")),
        }
    }

    /// The node as a single value. Available for every variant.
    pub fn single_value_container(&self) -> SingleValueContainer<'de, 'o> {
        SingleValueContainer::new(self.clone())
    }

    /// Unbox the node as a number of type `T`.
    ///
    /// A `Number` node is taken as is when it fits `T` (integral floats fit
    /// integer types) and is `DataCorrupted` otherwise. Any other node goes
    /// through the configured [`NumberDecodingStrategy`]s in order; the first
    /// match wins. When none matches the error is `DataCorrupted` if some
    /// strategy recognized the node but rejected its content, `ValueNotFound`
    /// for `null`, and `TypeMismatch` for everything else.
    pub fn unbox_number<T: NumberPrimitive>(&self) -> Result<T> {
        if let Value::Number(number) = self.value {
            return T::from_number(number).ok_or_else(|| CodableError::DataCorrupted {
                detail: format!("number {number} does not fit in {}", T::NAME),
                path: self.path.clone(),
            });
        }

        let mut malformed = None;
        for strategy in self.options.number_strategies() {
            match strategy.attempt::<T>(self.value) {
                StrategyOutcome::Matched(n) => {
                    trace!(?strategy, path = %self.path, kind = T::NAME, "number resolved by fallback strategy");
                    return Ok(n);
                }
                StrategyOutcome::Malformed(detail) => {
                    malformed.get_or_insert(detail);
                }
                StrategyOutcome::NoMatch => {}
            }
        }

        match malformed {
            Some(detail) => Err(CodableError::DataCorrupted {
                detail,
                path: self.path.clone(),
            }),
            None => Err(self.mismatch(T::NAME)),
        }
    }

    /// Unbox the node as a boolean. Only `true` and `false` qualify.
    pub fn unbox_bool(&self) -> Result<bool> {
        self.value.as_bool().ok_or_else(|| self.mismatch("bool"))
    }

    /// Unbox the node as a string, borrowed from the tree.
    pub fn unbox_str(&self) -> Result<&'de str> {
        match self.value {
            Value::String(s) => Ok(s),
            _ => Err(self.mismatch("string")),
        }
    }

    /// The error for a node that cannot satisfy `expected`.
    pub(crate) fn mismatch(&self, expected: &str) -> CodableError {
        if self.value.is_null() {
            CodableError::ValueNotFound {
                expected: format!("{expected}, found null"),
                path: self.path.clone(),
            }
        } else {
            CodableError::TypeMismatch {
                expected: expected.to_string(),
                found: found(self.value),
                path: self.path.clone(),
            }
        }
    }
}

/// Scalars are described in full; containers only by size, so error messages
/// stay readable for large documents.
fn found(value: &Value) -> String {
    match value {
        Value::Object(object) => format!("object with {} keys", object.len()),
        Value::Array(array) => format!("array of {} elements", array.len()),
        scalar => scalar.description(),
    }
}
