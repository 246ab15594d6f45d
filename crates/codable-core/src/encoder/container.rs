//! The three encoding containers.

use std::borrow::Cow;

use serde::Serialize;

use super::{conflict, ser, Encoder};
use crate::error::{CodableError, Result};
use crate::key::CodingKey;
use crate::options::EncodingOptions;
use crate::path::CodingPath;
use crate::value::{Map, Value};

/// Writes entries into an object node. Keys go through the key-naming
/// strategy before insertion; inserting an existing key replaces its value.
#[derive(Debug)]
pub struct KeyedEncodingContainer<'a, 'o> {
    object: &'a mut Map,
    path: CodingPath,
    options: &'o EncodingOptions,
}

impl<'a, 'o> KeyedEncodingContainer<'a, 'o> {
    pub(super) fn new(object: &'a mut Map, path: CodingPath, options: &'o EncodingOptions) -> Self {
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

    pub fn encode<K, T>(&mut self, key: &K, value: &T) -> Result<()>
    where
        K: CodingKey + ?Sized,
        T: Serialize + ?Sized,
    {
        let wire = self.wire_key(key);
        let encoded = ser::encode_at(value, self.path.appending_key(wire.as_str()), self.options)?;
        self.object.insert(wire, encoded);
        Ok(())
    }

    /// Encode `value` when present; `None` leaves the key out entirely.
    pub fn encode_if_present<K, T>(&mut self, key: &K, value: Option<&T>) -> Result<()>
    where
        K: CodingKey + ?Sized,
        T: Serialize + ?Sized,
    {
        match value {
            Some(value) => self.encode(key, value),
            None => Ok(()),
        }
    }

    pub fn encode_nil<K: CodingKey + ?Sized>(&mut self, key: &K) -> Result<()> {
        let wire = self.wire_key(key);
        self.object.insert(wire, Value::Null);
        Ok(())
    }

    /// Encode the value under `key` with hand-written logic.
    pub fn encode_with<K, F>(&mut self, key: &K, f: F) -> Result<()>
    where
        K: CodingKey + ?Sized,
        F: FnOnce(&mut Encoder<'o>) -> Result<()>,
    {
        let wire = self.wire_key(key);
        let encoded = encode_frame(self.path.appending_key(wire.as_str()), self.options, f)?;
        self.object.insert(wire, encoded);
        Ok(())
    }

    /// An object stored under `key`, created empty if absent.
    pub fn nested_keyed_container<K: CodingKey + ?Sized>(
        &mut self,
        key: &K,
    ) -> Result<KeyedEncodingContainer<'_, 'o>> {
        let wire = self.wire_key(key);
        let path = self.path.appending_key(wire.as_str());
        match self.object.entry(wire).or_insert_with(|| Value::Object(Map::new())) {
            Value::Object(object) => Ok(KeyedEncodingContainer::new(object, path, self.options)),
            other => Err(conflict("keyed", other, &path)),
        }
    }

    /// An array stored under `key`, created empty if absent.
    pub fn nested_unkeyed_container<K: CodingKey + ?Sized>(
        &mut self,
        key: &K,
    ) -> Result<UnkeyedEncodingContainer<'_, 'o>> {
        let wire = self.wire_key(key);
        let path = self.path.appending_key(wire.as_str());
        match self.object.entry(wire).or_insert_with(|| Value::Array(Vec::new())) {
            Value::Array(array) => Ok(UnkeyedEncodingContainer::new(array, path, self.options)),
            other => Err(conflict("unkeyed", other, &path)),
        }
    }

    fn wire_key<K: CodingKey + ?Sized>(&self, key: &K) -> String {
        match self.options.key_naming().native_to_wire(key.string_value()) {
            Cow::Borrowed(wire) => wire.to_owned(),
            Cow::Owned(wire) => wire,
        }
    }
}

/// Appends elements to an array node.
#[derive(Debug)]
pub struct UnkeyedEncodingContainer<'a, 'o> {
    array: &'a mut Vec<Value>,
    path: CodingPath,
    options: &'o EncodingOptions,
}

impl<'a, 'o> UnkeyedEncodingContainer<'a, 'o> {
    pub(super) fn new(array: &'a mut Vec<Value>, path: CodingPath, options: &'o EncodingOptions) -> Self {
        Self { array, path, options }
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.path
    }

    /// Number of elements encoded so far.
    pub fn count(&self) -> usize {
        self.array.len()
    }

    pub fn encode<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        let encoded = ser::encode_at(value, self.next_path(), self.options)?;
        self.array.push(encoded);
        Ok(())
    }

    pub fn encode_nil(&mut self) -> Result<()> {
        self.array.push(Value::Null);
        Ok(())
    }

    /// Append an element built with hand-written logic.
    pub fn encode_with<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Encoder<'o>) -> Result<()>,
    {
        let encoded = encode_frame(self.next_path(), self.options, f)?;
        self.array.push(encoded);
        Ok(())
    }

    /// Append an empty object and return a container writing into it.
    pub fn nested_keyed_container(&mut self) -> Result<KeyedEncodingContainer<'_, 'o>> {
        let path = self.next_path();
        self.array.push(Value::Object(Map::new()));
        match self.array.last_mut() {
            Some(Value::Object(object)) => Ok(KeyedEncodingContainer::new(object, path, self.options)),
            _ => Err(CodableError::InvalidValue {
                detail: "nested object was not appended".to_string(),
                path,
            }),
        }
    }

    /// Append an empty array and return a container writing into it.
    pub fn nested_unkeyed_container(&mut self) -> Result<UnkeyedEncodingContainer<'_, 'o>> {
        let path = self.next_path();
        self.array.push(Value::Array(Vec::new()));
        match self.array.last_mut() {
            Some(Value::Array(array)) => Ok(UnkeyedEncodingContainer::new(array, path, self.options)),
            _ => Err(CodableError::InvalidValue {
                detail: "nested array was not appended".to_string(),
                path,
            }),
        }
    }

    fn next_path(&self) -> CodingPath {
        self.path.appending_index(self.array.len())
    }
}

/// Sets the frame's node to exactly one value.
#[derive(Debug)]
pub struct SingleValueEncodingContainer<'a, 'o> {
    slot: &'a mut Option<Value>,
    path: CodingPath,
    options: &'o EncodingOptions,
}

impl<'a, 'o> SingleValueEncodingContainer<'a, 'o> {
    pub(super) fn new(slot: &'a mut Option<Value>, path: CodingPath, options: &'o EncodingOptions) -> Self {
        Self { slot, path, options }
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.path
    }

    pub fn encode<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.check_vacant()?;
        *self.slot = Some(ser::encode_at(value, self.path.clone(), self.options)?);
        Ok(())
    }

    pub fn encode_nil(&mut self) -> Result<()> {
        self.check_vacant()?;
        *self.slot = Some(Value::Null);
        Ok(())
    }

    fn check_vacant(&self) -> Result<()> {
        match &*self.slot {
            Some(existing) => Err(CodableError::InvalidValue {
                detail: format!("a single value was already encoded here ({})", existing.kind()),
                path: self.path.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn encode_frame<'o, F>(path: CodingPath, options: &'o EncodingOptions, f: F) -> Result<Value>
where
    F: FnOnce(&mut Encoder<'o>) -> Result<()>,
{
    let mut encoder = Encoder::new(path, options);
    f(&mut encoder).map_err(|err| err.anchored(encoder.coding_path()))?;
    encoder.finish()
}
