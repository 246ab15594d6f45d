//! The pivot tree: an immutable, closed representation of every JSON value.
//!
//! Values are produced by the Byte-Tree Bridge ([`crate::bridge::parse`]), by
//! the encoding engine, or directly through the `From` conversions in this
//! module. Equality is structural and variant-exact: `True` never equals
//! `Number(1)`, while `Number(1)` equals `Number(1.0)`.
//!
//! ```rust
//! use codable_core::Value;
//!
//! let value = Value::from(vec![Value::from(42), Value::from("text")]);
//! assert!(value.is_array());
//! assert_eq!(value.at(0), Some(&Value::from(42.0)));
//! assert_eq!(value.to_string(), r#"array([number(42), string("text")])"#);
//! ```

mod convert;
mod impls;
mod number;

use std::fmt;
use std::ops::Index;

use indexmap::IndexMap;

pub use number::{Number, NumberPrimitive};

/// Object payload. Keeps insertion order for output; equality ignores order.
pub type Map = IndexMap<String, Value>;

/// A JSON value. See the [module docs](self).
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    Object(Map),
    Array(Vec<Value>),
    Number(Number),
    String(String),
    True,
    False,
    #[default]
    Null,
}

impl Value {
    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    pub fn is_true(&self) -> bool {
        matches!(self, Value::True)
    }

    #[inline]
    pub fn is_false(&self) -> bool {
        matches!(self, Value::False)
    }

    #[inline]
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::True | Value::False)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(number) => Some(number),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(string) => Some(string),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::True => Some(true),
            Value::False => Some(false),
            _ => None,
        }
    }

    /// Look up `key` in an object. Any other variant, or a missing key,
    /// yields `None`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|object| object.get(key))
    }

    /// Element `index` of an array; `None` for every other variant.
    ///
    /// # Panics
    ///
    /// Panics if `self` is an array and `index` is out of range. Unlike a
    /// missing object key, an out-of-range index is a programmer error.
    pub fn at(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(array) => Some(&array[index]),
            _ => None,
        }
    }

    /// The diagnostic rendering used in error messages, e.g.
    /// `string("abc")` or `number(42)`. Not a wire format.
    pub fn description(&self) -> String {
        self.to_string()
    }

    /// Short name of the variant, e.g. `"object"` or `"true"`.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Object(_) => "object",
            Value::Array(_) => "array",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::True => "true",
            Value::False => "false",
            Value::Null => "null",
        }
    }
}

static NULL: Value = Value::Null;

/// `value["key"]` is `Null` for a missing key or a non-object.
impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&NULL)
    }
}

/// `value[i]` is `Null` for a non-array and panics when `i` is out of range.
impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.at(index).unwrap_or(&NULL)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(string) => write!(f, "string({string:?})"),
            Value::Number(number) => write!(f, "number({number})"),
            Value::Object(object) => {
                f.write_str("object({")?;
                for (i, (key, value)) in object.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?}: {value}")?;
                }
                f.write_str("})")
            }
            Value::Array(array) => {
                f.write_str("array([")?;
                for (i, value) in array.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("])")
            }
            Value::True => f.write_str("true"),
            Value::False => f.write_str("false"),
            Value::Null => f.write_str("null"),
        }
    }
}
