//! Conversions into and out of [`Value`].

use std::any::Any;
use std::collections::{BTreeMap, HashMap};

use super::{Map, Number, Value};

macro_rules! from_number {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Number(Number::from(n))
            }
        }
    )*};
}

from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<Number> for Value {
    fn from(number: Number) -> Self {
        Value::Number(number)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        if b {
            Value::True
        } else {
            Value::False
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

/// `()` is the null marker.
impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Value::Null, Into::into)
    }
}

impl From<Vec<Value>> for Value {
    fn from(array: Vec<Value>) -> Self {
        Value::Array(array)
    }
}

impl From<Map> for Value {
    fn from(object: Map) -> Self {
        Value::Object(object)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Value {
    /// Convert a dynamically-typed value by inspecting its runtime type.
    ///
    /// Accepted shapes: `Value`, `bool`, every integer type, `f32`, `f64`,
    /// `String`, `&'static str`, `()`, `Vec<Value>`, `Vec<Box<dyn Any>>`,
    /// `Map`, and `HashMap`/`BTreeMap` from `String` to `Value` or to
    /// `Box<dyn Any>`. Containers convert recursively; a single unsupported
    /// element rejects the whole value. Anything else yields `None`.
    ///
    /// ```rust
    /// use std::any::Any;
    /// use codable_core::Value;
    ///
    /// let items: Vec<Box<dyn Any>> = vec![Box::new(1u8), Box::new("two")];
    /// assert_eq!(
    ///     Value::from_any(&items),
    ///     Some(Value::from(vec![Value::from(1), Value::from("two")]))
    /// );
    /// assert_eq!(Value::from_any(&std::time::Duration::ZERO), None);
    /// ```
    pub fn from_any(value: &dyn Any) -> Option<Value> {
        macro_rules! scalar {
            ($($t:ty),*) => {$(
                if let Some(v) = value.downcast_ref::<$t>() {
                    return Some(Value::from(*v));
                }
            )*};
        }

        if let Some(v) = value.downcast_ref::<Value>() {
            return Some(v.clone());
        }
        scalar!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, &'static str);
        if let Some(s) = value.downcast_ref::<String>() {
            return Some(Value::String(s.clone()));
        }
        if value.is::<()>() {
            return Some(Value::Null);
        }
        if let Some(array) = value.downcast_ref::<Vec<Value>>() {
            return Some(Value::Array(array.clone()));
        }
        if let Some(array) = value.downcast_ref::<Vec<Box<dyn Any>>>() {
            return array
                .iter()
                .map(|element| Value::from_any(&**element))
                .collect::<Option<Vec<_>>>()
                .map(Value::Array);
        }
        if let Some(object) = value.downcast_ref::<Map>() {
            return Some(Value::Object(object.clone()));
        }
        if let Some(object) = value.downcast_ref::<HashMap<String, Value>>() {
            return Some(object_of(object.iter().map(|(k, v)| (k, v.clone()))));
        }
        if let Some(object) = value.downcast_ref::<BTreeMap<String, Value>>() {
            return Some(object_of(object.iter().map(|(k, v)| (k, v.clone()))));
        }
        if let Some(object) = value.downcast_ref::<HashMap<String, Box<dyn Any>>>() {
            return dynamic_object(object.iter());
        }
        if let Some(object) = value.downcast_ref::<BTreeMap<String, Box<dyn Any>>>() {
            return dynamic_object(object.iter());
        }
        None
    }

    /// Convert into a `serde_json::Value`. Non-finite numbers become `null`,
    /// as JSON cannot carry them.
    pub fn into_json(self) -> serde_json::Value {
        serde_json::Value::from(self)
    }
}

fn object_of<'a, I>(entries: I) -> Value
where
    I: Iterator<Item = (&'a String, Value)>,
{
    Value::Object(entries.map(|(k, v)| (k.clone(), v)).collect())
}

fn dynamic_object<'a, I>(entries: I) -> Option<Value>
where
    I: Iterator<Item = (&'a String, &'a Box<dyn Any>)>,
{
    entries
        .map(|(k, v)| Value::from_any(&**v).map(|v| (k.clone(), v)))
        .collect::<Option<Map>>()
        .map(Value::Object)
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::from(b),
            serde_json::Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Value::from(u)
                } else if let Some(i) = n.as_i64() {
                    Value::from(i)
                } else {
                    Value::from(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(array) => array.into_iter().map(Value::from).collect(),
            serde_json::Value::Object(object) => Value::Object(
                object
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::True => serde_json::Value::Bool(true),
            Value::False => serde_json::Value::Bool(false),
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    serde_json::Value::from(u)
                } else if let Some(i) = n.as_i64() {
                    serde_json::Value::from(i)
                } else {
                    serde_json::Number::from_f64(n.as_f64())
                        .map_or(serde_json::Value::Null, serde_json::Value::Number)
                }
            }
            Value::String(s) => serde_json::Value::String(s),
            Value::Array(array) => {
                serde_json::Value::Array(array.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Object(object) => serde_json::Value::Object(
                object
                    .into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}
