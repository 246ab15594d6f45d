//! The three decoding containers.

use std::any::type_name;
use std::borrow::Cow;

use serde::de::Deserialize;

use super::Decoder;
use crate::error::{CodableError, Result};
use crate::key::CodingKey;
use crate::options::DecodingOptions;
use crate::path::CodingPath;
use crate::value::{Map, Value};

/// The container a frame presents for its node.
#[derive(Debug)]
pub enum Container<'de, 'o> {
    Keyed(KeyedContainer<'de, 'o>),
    Unkeyed(UnkeyedContainer<'de, 'o>),
    SingleValue(SingleValueContainer<'de, 'o>),
}

/// View of an object node, addressed by [`CodingKey`]s.
///
/// Every lookup translates the native key through the key-naming strategy
/// before indexing into the object.
#[derive(Debug, Clone)]
pub struct KeyedContainer<'de, 'o> {
    object: &'de Map,
    path: CodingPath,
    options: &'o DecodingOptions,
}

impl<'de, 'o> KeyedContainer<'de, 'o> {
    pub(super) fn new(object: &'de Map, path: CodingPath, options: &'o DecodingOptions) -> Self {
        Self {
            object,
            path,
            options,
        }
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.object.len()
    }

    pub fn is_empty(&self) -> bool {
        self.object.is_empty()
    }

    /// Native names of every key in the object, in document order.
    pub fn all_keys(&self) -> Vec<String> {
        let naming = self.options.key_naming();
        self.object
            .keys()
            .map(|wire| naming.wire_to_native(wire).into_owned())
            .collect()
    }

    pub fn contains_key<K: CodingKey + ?Sized>(&self, key: &K) -> bool {
        self.object.contains_key(self.wire_key(key).as_ref())
    }

    /// Decode the value for `key`. Fails with `KeyNotFound` if the key is
    /// absent; a `null` value only succeeds for targets that accept it.
    pub fn decode<T, K>(&self, key: &K) -> Result<T>
    where
        T: Deserialize<'de>,
        K: CodingKey + ?Sized,
    {
        let decoder = self.decoder_for(key)?;
        T::deserialize(decoder)
    }

    /// Decode the value for `key`, treating an absent key and an explicit
    /// `null` alike as `None`. Any other failure propagates.
    pub fn decode_if_present<T, K>(&self, key: &K) -> Result<Option<T>>
    where
        T: Deserialize<'de>,
        K: CodingKey + ?Sized,
    {
        let wire = self.wire_key(key);
        match self.object.get(wire.as_ref()) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => {
                let decoder = self.nested(value, &wire);
                T::deserialize(decoder).map(Some)
            }
        }
    }

    /// Lenient lookup: `None` for an absent key, `null`, or a value that does
    /// not decode as `T`. Use [`decode_if_present`](Self::decode_if_present)
    /// to see why a present value was rejected.
    pub fn get<T, K>(&self, key: &K) -> Option<T>
    where
        T: Deserialize<'de>,
        K: CodingKey + ?Sized,
    {
        self.decode_if_present(key).ok().flatten()
    }

    /// Decode the value for `key` with hand-written logic.
    pub fn decode_with<T, K, F>(&self, key: &K, f: F) -> Result<T>
    where
        K: CodingKey + ?Sized,
        F: FnOnce(&Decoder<'de, 'o>) -> Result<T>,
    {
        let decoder = self.decoder_for(key)?;
        f(&decoder).map_err(|err| err.anchored(decoder.coding_path()))
    }

    pub fn nested_keyed_container<K: CodingKey + ?Sized>(&self, key: &K) -> Result<KeyedContainer<'de, 'o>> {
        self.decoder_for(key)?.keyed_container()
    }

    pub fn nested_unkeyed_container<K: CodingKey + ?Sized>(
        &self,
        key: &K,
    ) -> Result<UnkeyedContainer<'de, 'o>> {
        self.decoder_for(key)?.unkeyed_container()
    }

    /// A frame for the value under `key`.
    pub fn decoder_for<K: CodingKey + ?Sized>(&self, key: &K) -> Result<Decoder<'de, 'o>> {
        let wire = self.wire_key(key);
        match self.object.get(wire.as_ref()) {
            Some(value) => Ok(self.nested(value, &wire)),
            None => Err(CodableError::KeyNotFound {
                key: wire.into_owned(),
                path: self.path.clone(),
            }),
        }
    }

    fn wire_key<'k, K: CodingKey + ?Sized>(&self, key: &'k K) -> Cow<'k, str> {
        self.options.key_naming().native_to_wire(key.string_value())
    }

    fn nested(&self, value: &'de Value, wire: &str) -> Decoder<'de, 'o> {
        Decoder {
            value,
            path: self.path.appending_key(wire),
            options: self.options,
        }
    }
}

/// Sequential view of an array node.
///
/// The cursor only advances when an element decodes successfully, so a failed
/// element can be retried as a different type.
#[derive(Debug, Clone)]
pub struct UnkeyedContainer<'de, 'o> {
    array: &'de [Value],
    cursor: usize,
    path: CodingPath,
    options: &'o DecodingOptions,
}

impl<'de, 'o> UnkeyedContainer<'de, 'o> {
    pub(super) fn new(array: &'de [Value], path: CodingPath, options: &'o DecodingOptions) -> Self {
        Self {
            array,
            cursor: 0,
            path,
            options,
        }
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.path
    }

    /// Total number of elements.
    pub fn count(&self) -> usize {
        self.array.len()
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.array.len()
    }

    /// Index of the next element to decode.
    pub fn current_index(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.array.len().saturating_sub(self.cursor)
    }

    /// Decode the next element and advance. Fails with `ValueNotFound` when
    /// the container is at its end.
    pub fn decode_next<T: Deserialize<'de>>(&mut self) -> Result<T> {
        let decoder = self.next_decoder(type_name::<T>())?;
        let decoded = T::deserialize(decoder)?;
        self.cursor += 1;
        Ok(decoded)
    }

    /// Like [`decode_next`](Self::decode_next), but a `null` element yields
    /// `None` (and is consumed).
    pub fn decode_next_if_present<T: Deserialize<'de>>(&mut self) -> Result<Option<T>> {
        let decoder = self.next_decoder(type_name::<T>())?;
        let decoded = if decoder.value().is_null() {
            None
        } else {
            Some(T::deserialize(decoder)?)
        };
        self.cursor += 1;
        Ok(decoded)
    }

    /// Decode the next element with hand-written logic and advance.
    pub fn decode_next_with<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&Decoder<'de, 'o>) -> Result<T>,
    {
        let decoder = self.next_decoder(type_name::<T>())?;
        let decoded = f(&decoder).map_err(|err| err.anchored(decoder.coding_path()))?;
        self.cursor += 1;
        Ok(decoded)
    }

    pub fn nested_keyed_container(&mut self) -> Result<KeyedContainer<'de, 'o>> {
        let container = self.next_decoder("object")?.keyed_container()?;
        self.cursor += 1;
        Ok(container)
    }

    pub fn nested_unkeyed_container(&mut self) -> Result<UnkeyedContainer<'de, 'o>> {
        let container = self.next_decoder("array")?.unkeyed_container()?;
        self.cursor += 1;
        Ok(container)
    }

    /// A frame for the element under the cursor, without advancing.
    pub(super) fn next_decoder(&self, expected: &str) -> Result<Decoder<'de, 'o>> {
        let path = self.path.appending_index(self.cursor);
        match self.array.get(self.cursor) {
            Some(value) => Ok(Decoder {
                value,
                path,
                options: self.options,
            }),
            None => Err(CodableError::ValueNotFound {
                expected: format!("{expected}, but the unkeyed container is at its end"),
                path,
            }),
        }
    }

    pub(super) fn advance(&mut self) {
        self.cursor += 1;
    }
}

/// View of any node as one value.
#[derive(Debug, Clone)]
pub struct SingleValueContainer<'de, 'o> {
    decoder: Decoder<'de, 'o>,
}

impl<'de, 'o> SingleValueContainer<'de, 'o> {
    pub(super) fn new(decoder: Decoder<'de, 'o>) -> Self {
        Self { decoder }
    }

    pub fn coding_path(&self) -> &CodingPath {
        self.decoder.coding_path()
    }

    /// Whether the node is `null`.
    pub fn decode_nil(&self) -> bool {
        self.decoder.value().is_null()
    }

    /// Decode the node as `T`: a primitive through unboxing, or a nested
    /// structure through the engine.
    pub fn decode<T: Deserialize<'de>>(&self) -> Result<T> {
        T::deserialize(self.decoder.clone())
    }

    /// The underlying frame, for direct unboxing.
    pub fn decoder(&self) -> &Decoder<'de, 'o> {
        &self.decoder
    }
}
