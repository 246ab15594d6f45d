//! serde glue: the decoding frame as a `Deserializer`.
//!
//! Objects are visited through [`KeyedAccess`] (struct fields matched via the
//! key-naming strategy, plain map keys untouched), arrays through the
//! [`UnkeyedContainer`], and scalars through the unboxing routines on
//! [`Decoder`]. Every method anchors visitor errors at the frame's path.

use std::borrow::Cow;

use serde::de::value::BorrowedStrDeserializer;
use serde::de::{self, DeserializeSeed, MapAccess, SeqAccess, Visitor};
use serde::forward_to_deserialize_any;
use tracing::trace;

use super::{Decoder, UnkeyedContainer};
use crate::error::{CodableError, Result};
use crate::options::DecodingOptions;
use crate::path::CodingPath;
use crate::value::{Map, Number, Value};

macro_rules! deserialize_number {
    ($($method:ident => $visit:ident: $t:ty),* $(,)?) => {$(
        fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
            let n = self.unbox_number::<$t>()?;
            visitor
                .$visit::<CodableError>(n)
                .map_err(|err| err.anchored(&self.path))
        }
    )*};
}

impl<'de> de::Deserializer<'de> for Decoder<'de, '_> {
    type Error = CodableError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let result = match self.value {
            Value::Null => visitor.visit_unit(),
            Value::True => visitor.visit_bool(true),
            Value::False => visitor.visit_bool(false),
            Value::Number(n) => visit_number(n, visitor),
            Value::String(s) => visitor.visit_borrowed_str(s),
            Value::Array(array) => {
                visitor.visit_seq(UnkeyedContainer::new(array, self.path.clone(), self.options))
            }
            Value::Object(object) => visitor.visit_map(KeyedAccess::new(object, &self.path, self.options)),
        };
        result.map_err(|err| err.anchored(&self.path))
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let b = self.unbox_bool()?;
        visitor.visit_bool::<CodableError>(b).map_err(|err| err.anchored(&self.path))
    }

    deserialize_number! {
        deserialize_i8 => visit_i8: i8,
        deserialize_i16 => visit_i16: i16,
        deserialize_i32 => visit_i32: i32,
        deserialize_i64 => visit_i64: i64,
        deserialize_u8 => visit_u8: u8,
        deserialize_u16 => visit_u16: u16,
        deserialize_u32 => visit_u32: u32,
        deserialize_u64 => visit_u64: u64,
        deserialize_f32 => visit_f32: f32,
        deserialize_f64 => visit_f64: f64,
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let s = self.unbox_str()?;
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char::<CodableError>(c).map_err(|err| err.anchored(&self.path)),
            _ => Err(CodableError::DataCorrupted {
                detail: format!("expected a single character, found {s:?}"),
                path: self.path.clone(),
            }),
        }
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let s = self.unbox_str()?;
        visitor.visit_borrowed_str::<CodableError>(s).map_err(|err| err.anchored(&self.path))
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let result = match self.value {
            Value::String(s) => visitor.visit_borrowed_bytes(s.as_bytes()),
            Value::Array(array) => {
                visitor.visit_seq(UnkeyedContainer::new(array, self.path.clone(), self.options))
            }
            _ => return Err(self.mismatch("bytes")),
        };
        result.map_err(|err| err.anchored(&self.path))
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.value {
            Value::Null => visitor.visit_none::<CodableError>().map_err(|err| err.anchored(&self.path)),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.value {
            Value::Null => visitor.visit_unit::<CodableError>().map_err(|err| err.anchored(&self.path)),
            _ => Err(self.mismatch("null")),
        }
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(self, _name: &'static str, visitor: V) -> Result<V::Value> {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.value {
            Value::Array(array) => visitor
                .visit_seq(UnkeyedContainer::new(array, self.path.clone(), self.options))
                .map_err(|err| err.anchored(&self.path)),
            _ => Err(self.mismatch("array")),
        }
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, len: usize, visitor: V) -> Result<V::Value> {
        let Value::Array(array) = self.value else {
            return Err(self.mismatch("array"));
        };
        let mut container = UnkeyedContainer::new(array, self.path.clone(), self.options);
        let decoded = visitor
            .visit_seq(&mut container)
            .map_err(|err| err.anchored(&self.path))?;
        if !container.is_at_end() {
            return Err(CodableError::DataCorrupted {
                detail: format!("expected a tuple of {len} elements, found {}", container.count()),
                path: self.path.clone(),
            });
        }
        Ok(decoded)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value> {
        self.deserialize_tuple(len, visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.value {
            Value::Object(object) => visitor
                .visit_map(KeyedAccess::new(object, &self.path, self.options))
                .map_err(|err| err.anchored(&self.path)),
            _ => Err(self.mismatch("object")),
        }
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        let result = match self.value {
            Value::Object(object) => {
                visitor.visit_map(KeyedAccess::for_struct(object, &self.path, self.options, fields))
            }
            Value::Array(array) => {
                visitor.visit_seq(UnkeyedContainer::new(array, self.path.clone(), self.options))
            }
            _ => return Err(self.mismatch("object")),
        };
        let naming = self.options.key_naming();
        result.map_err(|err| {
            err.with_wire_key(|native| naming.native_to_wire(native).into_owned())
                .anchored(&self.path)
        })
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        let (variant, content) = match self.value {
            Value::String(variant) => (variant, None),
            Value::Object(object) if object.len() == 1 => match object.first() {
                Some((variant, content)) => (variant, Some(content)),
                None => return Err(self.mismatch("enum")),
            },
            _ => return Err(self.mismatch("enum as a string or a single-key object")),
        };
        let access = EnumAccess {
            variant,
            content,
            path: &self.path,
            options: self.options,
        };
        visitor.visit_enum(access).map_err(|err| err.anchored(&self.path))
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }
}

fn visit_number<'de, V: Visitor<'de>>(n: &Number, visitor: V) -> Result<V::Value> {
    if let Some(u) = n.as_u64() {
        visitor.visit_u64(u)
    } else if let Some(i) = n.as_i64() {
        visitor.visit_i64(i)
    } else {
        visitor.visit_f64(n.as_f64())
    }
}

impl<'de> SeqAccess<'de> for UnkeyedContainer<'de, '_> {
    type Error = CodableError;

    fn next_element_seed<T: DeserializeSeed<'de>>(&mut self, seed: T) -> Result<Option<T::Value>> {
        if self.is_at_end() {
            return Ok(None);
        }
        let decoder = self.next_decoder("element")?;
        let decoded = seed.deserialize(decoder)?;
        self.advance();
        Ok(Some(decoded))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.remaining())
    }
}

/// Walks an object's entries for `visit_map`.
///
/// For structs, each wire key is reported to the visitor as the field whose
/// `native_to_wire` form it equals. Keys matching no field are reported as is,
/// except keys spelled like a native field name: those are never valid wire
/// keys under a renaming strategy and are skipped, so serde cannot bind them.
struct KeyedAccess<'a, 'de, 'o> {
    entries: indexmap::map::Iter<'de, String, Value>,
    path: &'a CodingPath,
    options: &'o DecodingOptions,
    fields: Option<Vec<(Cow<'static, str>, &'static str)>>,
    pending: Option<(&'de Value, CodingPath)>,
}

impl<'a, 'de, 'o> KeyedAccess<'a, 'de, 'o> {
    fn new(object: &'de Map, path: &'a CodingPath, options: &'o DecodingOptions) -> Self {
        Self {
            entries: object.iter(),
            path,
            options,
            fields: None,
            pending: None,
        }
    }

    fn for_struct(
        object: &'de Map,
        path: &'a CodingPath,
        options: &'o DecodingOptions,
        fields: &'static [&'static str],
    ) -> Self {
        let naming = options.key_naming();
        let fields = (!naming.is_identity()).then(|| {
            fields
                .iter()
                .map(|&native| (naming.native_to_wire(native), native))
                .collect()
        });
        Self {
            fields,
            ..Self::new(object, path, options)
        }
    }

    /// The key to report for `wire`, or `None` when the entry must be skipped.
    fn native_key(&self, wire: &'de str) -> Option<&'de str> {
        let Some(fields) = &self.fields else {
            return Some(wire);
        };
        if let Some((_, native)) = fields.iter().find(|(candidate, _)| candidate.as_ref() == wire) {
            return Some(*native);
        }
        if fields.iter().any(|(_, native)| *native == wire) {
            trace!(key = wire, path = %self.path, "skipped native-spelled key");
            return None;
        }
        Some(wire)
    }
}

impl<'de> MapAccess<'de> for KeyedAccess<'_, 'de, '_> {
    type Error = CodableError;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>> {
        let (wire, value, native) = loop {
            let Some((wire, value)) = self.entries.next() else {
                return Ok(None);
            };
            if let Some(native) = self.native_key(wire) {
                break (wire, value, native);
            }
        };
        let path = self.path.appending_key(wire.as_str());
        let key = seed.deserialize(KeyDecoder {
            key: native,
            path: &path,
        })?;
        self.pending = Some((value, path));
        Ok(Some(key))
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value> {
        let (value, path) = self.pending.take().ok_or_else(|| CodableError::DataCorrupted {
            detail: "map value requested before its key".to_string(),
            path: self.path.clone(),
        })?;
        seed.deserialize(Decoder {
            value,
            path,
            options: self.options,
        })
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

macro_rules! deserialize_parsed_key {
    ($($method:ident => $visit:ident: $t:ty),* $(,)?) => {$(
        fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
            match self.key.parse::<$t>() {
                Ok(n) => visitor.$visit(n),
                Err(_) => Err(CodableError::DataCorrupted {
                    detail: format!("object key {:?} is not a valid {}", self.key, stringify!($t)),
                    path: self.path.clone(),
                }),
            }
        }
    )*};
}

/// Object keys are always strings; numeric and boolean map keys are parsed
/// from them.
struct KeyDecoder<'a, 'de> {
    key: &'de str,
    path: &'a CodingPath,
}

impl<'de> de::Deserializer<'de> for KeyDecoder<'_, 'de> {
    type Error = CodableError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_borrowed_str(self.key)
    }

    deserialize_parsed_key! {
        deserialize_bool => visit_bool: bool,
        deserialize_i8 => visit_i8: i8,
        deserialize_i16 => visit_i16: i16,
        deserialize_i32 => visit_i32: i32,
        deserialize_i64 => visit_i64: i64,
        deserialize_u8 => visit_u8: u8,
        deserialize_u16 => visit_u16: u16,
        deserialize_u32 => visit_u32: u32,
        deserialize_u64 => visit_u64: u64,
        deserialize_f32 => visit_f32: f32,
        deserialize_f64 => visit_f64: f64,
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        let key: BorrowedStrDeserializer<'de, CodableError> = BorrowedStrDeserializer::new(self.key);
        de::Deserializer::deserialize_enum(key, name, variants, visitor)
    }

    forward_to_deserialize_any! {
        char str string bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

struct EnumAccess<'a, 'de, 'o> {
    variant: &'de str,
    content: Option<&'de Value>,
    path: &'a CodingPath,
    options: &'o DecodingOptions,
}

impl<'de, 'o> de::EnumAccess<'de> for EnumAccess<'_, 'de, 'o> {
    type Error = CodableError;
    type Variant = VariantAccess<'de, 'o>;

    fn variant_seed<V: DeserializeSeed<'de>>(self, seed: V) -> Result<(V::Value, Self::Variant)> {
        let name: BorrowedStrDeserializer<'de, CodableError> = BorrowedStrDeserializer::new(self.variant);
        let variant = seed.deserialize(name)?;
        let access = VariantAccess {
            content: self.content,
            path: self.path.appending_key(self.variant),
            options: self.options,
        };
        Ok((variant, access))
    }
}

struct VariantAccess<'de, 'o> {
    content: Option<&'de Value>,
    path: CodingPath,
    options: &'o DecodingOptions,
}

impl<'de, 'o> VariantAccess<'de, 'o> {
    fn content(self, expected: &str) -> Result<Decoder<'de, 'o>> {
        match self.content {
            Some(value) => Ok(Decoder {
                value,
                path: self.path,
                options: self.options,
            }),
            None => Err(CodableError::TypeMismatch {
                expected: expected.to_string(),
                found: "unit variant".to_string(),
                path: self.path,
            }),
        }
    }
}

impl<'de> de::VariantAccess<'de> for VariantAccess<'de, '_> {
    type Error = CodableError;

    fn unit_variant(self) -> Result<()> {
        match self.content {
            None | Some(Value::Null) => Ok(()),
            Some(_) => {
                let decoder = self.content("unit variant")?;
                Err(decoder.mismatch("unit variant"))
            }
        }
    }

    fn newtype_variant_seed<T: DeserializeSeed<'de>>(self, seed: T) -> Result<T::Value> {
        seed.deserialize(self.content("newtype variant")?)
    }

    fn tuple_variant<V: Visitor<'de>>(self, len: usize, visitor: V) -> Result<V::Value> {
        de::Deserializer::deserialize_tuple(self.content("tuple variant")?, len, visitor)
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        de::Deserializer::deserialize_struct(self.content("struct variant")?, "", fields, visitor)
    }
}
