//! serde glue: any `Serialize` value boxed into a [`Value`] tree.

use serde::ser::{self, Impossible, Serialize};
use tracing::trace;

use crate::error::{CodableError, Result};
use crate::options::EncodingOptions;
use crate::path::CodingPath;
use crate::value::{Map, Number, Value};

/// Encode `value` as the node at `path`, anchoring visitor errors there.
pub(crate) fn encode_at<T>(value: &T, path: CodingPath, options: &EncodingOptions) -> Result<Value>
where
    T: Serialize + ?Sized,
{
    let anchor = path.clone();
    value
        .serialize(ValueSerializer { path, options })
        .map_err(|err| err.anchored(&anchor))
}

/// Box a number through the encoding strategies, falling back to a plain
/// `Number` node for finite values.
pub(crate) fn box_number(number: Number, path: &CodingPath, options: &EncodingOptions) -> Result<Value> {
    for strategy in options.number_strategies() {
        if let Some(boxed) = strategy.apply(&number) {
            trace!(?strategy, %path, "number boxed by encoding strategy");
            return Ok(boxed);
        }
    }
    if number.is_finite() {
        Ok(Value::Number(number))
    } else {
        Err(CodableError::InvalidValue {
            detail: format!("{number} is not representable in JSON without a non-finite encoding strategy"),
            path: path.clone(),
        })
    }
}

struct ValueSerializer<'o> {
    path: CodingPath,
    options: &'o EncodingOptions,
}

macro_rules! serialize_number {
    ($($method:ident: $t:ty),* $(,)?) => {$(
        fn $method(self, v: $t) -> Result<Value> {
            box_number(Number::from(v), &self.path, self.options)
        }
    )*};
}

impl<'o> ser::Serializer for ValueSerializer<'o> {
    type Ok = Value;
    type Error = CodableError;

    type SerializeSeq = SerializeArray<'o>;
    type SerializeTuple = SerializeArray<'o>;
    type SerializeTupleStruct = SerializeArray<'o>;
    type SerializeTupleVariant = SerializeTupleVariant<'o>;
    type SerializeMap = SerializeObject<'o>;
    type SerializeStruct = SerializeObject<'o>;
    type SerializeStructVariant = SerializeStructVariant<'o>;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::from(v))
    }

    serialize_number! {
        serialize_i8: i8,
        serialize_i16: i16,
        serialize_i32: i32,
        serialize_i64: i64,
        serialize_u8: u8,
        serialize_u16: u16,
        serialize_u32: u32,
        serialize_u64: u64,
        serialize_f32: f32,
        serialize_f64: f64,
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_owned()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        v.iter()
            .enumerate()
            .map(|(i, &byte)| box_number(Number::from(byte), &self.path.appending_index(i), self.options))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Value> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(self, _name: &'static str, _index: u32, variant: &'static str) -> Result<Value> {
        Ok(Value::String(variant.to_owned()))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(self, _name: &'static str, value: &T) -> Result<Value> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value> {
        let content = encode_at(value, self.path.appending_key(variant), self.options)?;
        let mut object = Map::new();
        object.insert(variant.to_owned(), content);
        Ok(Value::Object(object))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeArray<'o>> {
        Ok(SerializeArray {
            items: Vec::with_capacity(len.unwrap_or(0)),
            path: self.path,
            options: self.options,
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeArray<'o>> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeArray<'o>> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant<'o>> {
        Ok(SerializeTupleVariant {
            variant,
            inner: SerializeArray {
                items: Vec::with_capacity(len),
                path: self.path.appending_key(variant),
                options: self.options,
            },
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeObject<'o>> {
        Ok(SerializeObject {
            object: Map::with_capacity(len.unwrap_or(0)),
            pending_key: None,
            path: self.path,
            options: self.options,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeObject<'o>> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant<'o>> {
        Ok(SerializeStructVariant {
            variant,
            inner: SerializeObject {
                object: Map::with_capacity(len),
                pending_key: None,
                path: self.path.appending_key(variant),
                options: self.options,
            },
        })
    }
}

struct SerializeArray<'o> {
    items: Vec<Value>,
    path: CodingPath,
    options: &'o EncodingOptions,
}

impl SerializeArray<'_> {
    fn push<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        let path = self.path.appending_index(self.items.len());
        self.items.push(encode_at(value, path, self.options)?);
        Ok(())
    }
}

impl ser::SerializeSeq for SerializeArray<'_> {
    type Ok = Value;
    type Error = CodableError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.items))
    }
}

impl ser::SerializeTuple for SerializeArray<'_> {
    type Ok = Value;
    type Error = CodableError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.items))
    }
}

impl ser::SerializeTupleStruct for SerializeArray<'_> {
    type Ok = Value;
    type Error = CodableError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.items))
    }
}

struct SerializeTupleVariant<'o> {
    variant: &'static str,
    inner: SerializeArray<'o>,
}

impl ser::SerializeTupleVariant for SerializeTupleVariant<'_> {
    type Ok = Value;
    type Error = CodableError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.inner.push(value)
    }

    fn end(self) -> Result<Value> {
        let mut object = Map::new();
        object.insert(self.variant.to_owned(), Value::Array(self.inner.items));
        Ok(Value::Object(object))
    }
}

/// Builds an object. Struct fields are renamed through the key-naming
/// strategy; map keys are stringified and kept as they are.
struct SerializeObject<'o> {
    object: Map,
    pending_key: Option<String>,
    path: CodingPath,
    options: &'o EncodingOptions,
}

impl SerializeObject<'_> {
    fn insert<T: Serialize + ?Sized>(&mut self, key: String, value: &T) -> Result<()> {
        let path = self.path.appending_key(key.as_str());
        let value = encode_at(value, path, self.options)?;
        self.object.insert(key, value);
        Ok(())
    }
}

impl ser::SerializeMap for SerializeObject<'_> {
    type Ok = Value;
    type Error = CodableError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<()> {
        self.pending_key = Some(key.serialize(MapKeySerializer { path: &self.path })?);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        let key = self.pending_key.take().ok_or_else(|| CodableError::InvalidValue {
            detail: "map value serialized before its key".to_string(),
            path: self.path.clone(),
        })?;
        self.insert(key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.object))
    }
}

impl ser::SerializeStruct for SerializeObject<'_> {
    type Ok = Value;
    type Error = CodableError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, key: &'static str, value: &T) -> Result<()> {
        let wire = self.options.key_naming().native_to_wire(key).into_owned();
        self.insert(wire, value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.object))
    }
}

struct SerializeStructVariant<'o> {
    variant: &'static str,
    inner: SerializeObject<'o>,
}

impl ser::SerializeStructVariant for SerializeStructVariant<'_> {
    type Ok = Value;
    type Error = CodableError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, key: &'static str, value: &T) -> Result<()> {
        ser::SerializeStruct::serialize_field(&mut self.inner, key, value)
    }

    fn end(self) -> Result<Value> {
        let mut object = Map::new();
        object.insert(self.variant.to_owned(), Value::Object(self.inner.object));
        Ok(Value::Object(object))
    }
}

struct MapKeySerializer<'a> {
    path: &'a CodingPath,
}

impl MapKeySerializer<'_> {
    fn reject(&self, found: &str) -> CodableError {
        CodableError::InvalidValue {
            detail: format!("object keys must be strings, found {found}"),
            path: self.path.clone(),
        }
    }
}

macro_rules! serialize_key_display {
    ($($method:ident: $t:ty),* $(,)?) => {$(
        fn $method(self, v: $t) -> Result<String> {
            Ok(v.to_string())
        }
    )*};
}

impl ser::Serializer for MapKeySerializer<'_> {
    type Ok = String;
    type Error = CodableError;

    type SerializeSeq = Impossible<String, CodableError>;
    type SerializeTuple = Impossible<String, CodableError>;
    type SerializeTupleStruct = Impossible<String, CodableError>;
    type SerializeTupleVariant = Impossible<String, CodableError>;
    type SerializeMap = Impossible<String, CodableError>;
    type SerializeStruct = Impossible<String, CodableError>;
    type SerializeStructVariant = Impossible<String, CodableError>;

    serialize_key_display! {
        serialize_bool: bool,
        serialize_i8: i8,
        serialize_i16: i16,
        serialize_i32: i32,
        serialize_i64: i64,
        serialize_u8: u8,
        serialize_u16: u16,
        serialize_u32: u32,
        serialize_u64: u64,
        serialize_char: char,
        serialize_str: &str,
    }

    fn serialize_f32(self, _v: f32) -> Result<String> {
        Err(self.reject("f32"))
    }

    fn serialize_f64(self, _v: f64) -> Result<String> {
        Err(self.reject("f64"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String> {
        Err(self.reject("bytes"))
    }

    fn serialize_none(self) -> Result<String> {
        Err(self.reject("none"))
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<String> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<String> {
        Err(self.reject("unit"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<String> {
        Err(self.reject(name))
    }

    fn serialize_unit_variant(self, _name: &'static str, _index: u32, variant: &'static str) -> Result<String> {
        Ok(variant.to_owned())
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(self, _name: &'static str, value: &T) -> Result<String> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String> {
        Err(self.reject("newtype variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(self.reject("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(self.reject("tuple"))
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeTupleStruct> {
        Err(self.reject("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(self.reject("tuple variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(self.reject("map"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(self.reject("struct"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(self.reject("struct variant"))
    }
}
