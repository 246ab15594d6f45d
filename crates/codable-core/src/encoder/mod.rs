//! Encoding engine: typed data → [`Value`] tree.
//!
//! The mirror of the [decoding engine](crate::decoder). Derived structures go
//! through a `serde::Serializer` that renames struct fields with the active
//! key-naming strategy and boxes every number through the configured
//! [`NumberEncodingStrategy`]s. Hand-written shapes use [`JsonEncoder::encode_with`]
//! and the three encoding containers on an [`Encoder`] frame.
//!
//! ```
//! use codable_core::{JsonEncoder, KeyNamingStrategy};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! #[serde(rename_all = "camelCase")]
//! struct Profile {
//!     display_name: String,
//!     follower_count: u32,
//! }
//!
//! let encoder = JsonEncoder::new().with_key_naming(KeyNamingStrategy::SnakeCase);
//! let bytes = encoder
//!     .encode(&Profile { display_name: "kit".into(), follower_count: 3 })
//!     .unwrap();
//! assert_eq!(bytes, br#"{"display_name":"kit","follower_count":3}"#);
//! ```

mod container;
mod ser;

use serde::Serialize;
use tracing::debug;

use crate::bridge;
use crate::error::{CodableError, Result};
use crate::key::KeyNamingStrategy;
use crate::options::EncodingOptions;
use crate::path::CodingPath;
use crate::strategy::NumberEncodingStrategy;
use crate::value::{Map, Number, Value};

pub use container::{KeyedEncodingContainer, SingleValueEncodingContainer, UnkeyedEncodingContainer};

/// Top-level entry point for encoding.
#[derive(Debug, Clone, Default)]
pub struct JsonEncoder {
    options: EncodingOptions,
}

impl JsonEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number-boxing strategies, tried in the given order.
    pub fn with_number_strategies<I>(self, strategies: I) -> Self
    where
        I: IntoIterator<Item = NumberEncodingStrategy>,
    {
        let key_naming = *self.options.key_naming();
        Self {
            options: EncodingOptions::new(strategies.into_iter().collect(), key_naming),
        }
    }

    pub fn with_key_naming(self, key_naming: KeyNamingStrategy) -> Self {
        let strategies = self.options.number_strategies().to_vec();
        Self {
            options: EncodingOptions::new(strategies, key_naming),
        }
    }

    pub fn options(&self) -> &EncodingOptions {
        &self.options
    }

    /// Encode `value` and serialize the tree as compact JSON.
    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        bridge::serialize(&self.encode_value(value)?)
    }

    /// Encode `value` and serialize the tree as indented JSON.
    pub fn encode_pretty<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        bridge::serialize_pretty(&self.encode_value(value)?)
    }

    /// Encode `value` into a tree.
    pub fn encode_value<T: Serialize + ?Sized>(&self, value: &T) -> Result<Value> {
        ser::encode_at(value, CodingPath::root(), &self.options).map_err(failed)
    }

    /// Encode with hand-written logic expressed over the container API.
    ///
    /// ```
    /// use codable_core::{JsonEncoder, Value};
    ///
    /// let value = JsonEncoder::new()
    ///     .encode_with(|encoder| {
    ///         let mut container = encoder.keyed_container()?;
    ///         container.encode("id", &7)?;
    ///         container.encode_if_present("nickname", None::<&String>)?;
    ///         let mut tags = container.nested_unkeyed_container("tags")?;
    ///         tags.encode("a")?;
    ///         Ok(())
    ///     })
    ///     .unwrap();
    /// assert_eq!(value["id"], Value::from(7));
    /// assert!(value.get("nickname").is_none());
    /// assert_eq!(value["tags"], Value::from(vec![Value::from("a")]));
    /// ```
    pub fn encode_with<F>(&self, f: F) -> Result<Value>
    where
        F: FnOnce(&mut Encoder<'_>) -> Result<()>,
    {
        let root = CodingPath::root();
        let mut encoder = Encoder::new(root.clone(), &self.options);
        f(&mut encoder)
            .and_then(|()| encoder.finish())
            .map_err(|err| failed(err.anchored(&root)))
    }
}

fn failed(err: CodableError) -> CodableError {
    debug!(error = %err, "encode failed");
    err
}

/// One frame of the encoding engine. Holds the node being built, which is
/// empty until a container writes to it.
#[derive(Debug)]
pub struct Encoder<'o> {
    storage: Option<Value>,
    path: CodingPath,
    options: &'o EncodingOptions,
}

impl<'o> Encoder<'o> {
    pub(crate) fn new(path: CodingPath, options: &'o EncodingOptions) -> Self {
        Self {
            storage: None,
            path,
            options,
        }
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.path
    }

    pub fn options(&self) -> &'o EncodingOptions {
        self.options
    }

    /// Present the frame as an object. Requesting it again returns a view of
    /// the same object; fails if the frame already holds another kind.
    pub fn keyed_container(&mut self) -> Result<KeyedEncodingContainer<'_, 'o>> {
        let storage = self.storage.get_or_insert_with(|| Value::Object(Map::new()));
        match storage {
            Value::Object(object) => Ok(KeyedEncodingContainer::new(object, self.path.clone(), self.options)),
            other => Err(conflict("keyed", other, &self.path)),
        }
    }

    /// Present the frame as an array. Requesting it again appends to the
    /// same array; fails if the frame already holds another kind.
    pub fn unkeyed_container(&mut self) -> Result<UnkeyedEncodingContainer<'_, 'o>> {
        let storage = self.storage.get_or_insert_with(|| Value::Array(Vec::new()));
        match storage {
            Value::Array(array) => Ok(UnkeyedEncodingContainer::new(array, self.path.clone(), self.options)),
            other => Err(conflict("unkeyed", other, &self.path)),
        }
    }

    /// Present the frame as a single value.
    pub fn single_value_container(&mut self) -> SingleValueEncodingContainer<'_, 'o> {
        SingleValueEncodingContainer::new(&mut self.storage, self.path.clone(), self.options)
    }

    /// Box a number as it would be stored at this frame.
    pub fn box_number(&self, number: impl Into<Number>) -> Result<Value> {
        ser::box_number(number.into(), &self.path, self.options)
    }

    pub(crate) fn finish(self) -> Result<Value> {
        self.storage.ok_or_else(|| CodableError::InvalidValue {
            detail: "the frame did not encode any values".to_string(),
            path: self.path,
        })
    }
}

fn conflict(requested: &str, found: &Value, path: &CodingPath) -> CodableError {
    CodableError::InvalidValue {
        detail: format!("a {requested} container was requested for a node already holding {}", found.kind()),
        path: path.clone(),
    }
}
