//! Coding keys and key-naming strategies.
//!
//! A structure's native property names are translated to the keys stored in
//! an object by the active [`KeyNamingStrategy`]: `native_to_wire` on the way
//! out (and when looking a key up), `wire_to_native` when listing the keys a
//! container holds.
//!
//! ```rust
//! use codable_core::KeyNamingStrategy;
//!
//! let naming = KeyNamingStrategy::SnakeCase;
//! assert_eq!(naming.native_to_wire("camelCasedProperty"), "camel_cased_property");
//! assert_eq!(naming.native_to_wire("abcHTTPNice"), "abc_http_nice");
//! assert_eq!(naming.native_to_wire("abc_def_ghi"), "abc_def_ghi");
//! ```

use std::borrow::Cow;
use std::fmt;

use heck::{ToLowerCamelCase, ToSnakeCase};

/// Identifies a property inside a keyed container.
///
/// Implemented for `str` and `String`; hand-written structures typically use
/// a closed enum:
///
/// ```rust
/// use codable_core::CodingKey;
///
/// enum Keys {
///     FirstName,
///     Age,
/// }
///
/// impl CodingKey for Keys {
///     fn string_value(&self) -> &str {
///         match self {
///             Keys::FirstName => "firstName",
///             Keys::Age => "age",
///         }
///     }
/// }
///
/// assert_eq!(Keys::FirstName.string_value(), "firstName");
/// ```
pub trait CodingKey {
    /// The native (pre-strategy) name of the key.
    fn string_value(&self) -> &str;
}

impl CodingKey for str {
    fn string_value(&self) -> &str {
        self
    }
}

impl CodingKey for String {
    fn string_value(&self) -> &str {
        self
    }
}

impl<K: CodingKey + ?Sized> CodingKey for &K {
    fn string_value(&self) -> &str {
        (**self).string_value()
    }
}

/// Bidirectional mapping between native property names and wire keys.
#[derive(Clone, Copy, Default)]
pub enum KeyNamingStrategy {
    /// Keys are stored exactly as declared.
    #[default]
    UseDefaultKeys,
    /// `camelCase` properties are stored as `snake_case` keys.
    ///
    /// The forward transform inserts `_` at word boundaries, treats a run of
    /// uppercase letters as one word and lower-cases everything; it is a no-op
    /// on snake_case input. The reverse transform (lowerCamelCase) is only
    /// guaranteed to invert keys produced from lowerCamelCase names.
    SnakeCase,
    /// Caller-supplied transform pair.
    Custom {
        native_to_wire: fn(&str) -> String,
        wire_to_native: fn(&str) -> String,
    },
}

impl KeyNamingStrategy {
    /// The wire key for a native property name.
    pub fn native_to_wire<'a>(&self, native: &'a str) -> Cow<'a, str> {
        match self {
            KeyNamingStrategy::UseDefaultKeys => Cow::Borrowed(native),
            KeyNamingStrategy::SnakeCase => snake_case(native),
            KeyNamingStrategy::Custom { native_to_wire, .. } => Cow::Owned(native_to_wire(native)),
        }
    }

    /// The native property name for a wire key.
    pub fn wire_to_native<'a>(&self, wire: &'a str) -> Cow<'a, str> {
        match self {
            KeyNamingStrategy::UseDefaultKeys => Cow::Borrowed(wire),
            KeyNamingStrategy::SnakeCase => lower_camel_case(wire),
            KeyNamingStrategy::Custom { wire_to_native, .. } => Cow::Owned(wire_to_native(wire)),
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, KeyNamingStrategy::UseDefaultKeys)
    }
}

/// Input that is already snake_case comes back untouched, underscore runs
/// included. Otherwise leading underscores are kept and heck converts the rest.
fn snake_case(native: &str) -> Cow<'_, str> {
    if native.chars().all(|c| c == '_' || c.is_lowercase() || c.is_numeric()) {
        return Cow::Borrowed(native);
    }
    let (prefix, rest) = split_leading_underscores(native);
    Cow::Owned(format!("{prefix}{}", rest.to_snake_case()))
}

fn lower_camel_case(wire: &str) -> Cow<'_, str> {
    let (prefix, rest) = split_leading_underscores(wire);
    Cow::Owned(format!("{prefix}{}", rest.to_lower_camel_case()))
}

fn split_leading_underscores(s: &str) -> (&str, &str) {
    let rest = s.trim_start_matches('_');
    s.split_at(s.len() - rest.len())
}

impl fmt::Debug for KeyNamingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyNamingStrategy::UseDefaultKeys => f.write_str("UseDefaultKeys"),
            KeyNamingStrategy::SnakeCase => f.write_str("SnakeCase"),
            KeyNamingStrategy::Custom { .. } => f.write_str("Custom"),
        }
    }
}
