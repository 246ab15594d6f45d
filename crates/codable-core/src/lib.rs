//! # codable-core
//!
//! Typed data ⇄ JSON through an immutable tree value.
//!
//! Decoding parses bytes into a [`Value`] and walks it with a recursive
//! [`Decoder`] that any `serde::Deserialize` type can read from. Encoding is
//! the mirror image. Both directions can opt into lenient number handling
//! ([`NumberDecodingStrategy`], [`NumberEncodingStrategy`]) and an alternate
//! key convention ([`KeyNamingStrategy`]) without touching the type
//! definitions.
//!
//! ## Quick start
//!
//! ```rust
//! use codable_core::{JsonDecoder, JsonEncoder, KeyNamingStrategy};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! #[serde(rename_all = "camelCase")]
//! struct Release {
//!     tag_name: String,
//!     download_count: u64,
//! }
//!
//! let json = br#"{"tag_name":"v1.2.0","download_count":"1200"}"#;
//!
//! let decoder = JsonDecoder::new()
//!     .with_key_naming(KeyNamingStrategy::SnakeCase)
//!     .with_number_strategies([codable_core::NumberDecodingStrategy::ConvertFromString]);
//! let release: Release = decoder.decode(json).unwrap();
//! assert_eq!(release.download_count, 1200);
//!
//! let encoder = JsonEncoder::new().with_key_naming(KeyNamingStrategy::SnakeCase);
//! let bytes = encoder.encode(&release).unwrap();
//! assert_eq!(bytes, br#"{"tag_name":"v1.2.0","download_count":1200}"#);
//! ```
//!
//! ## Modules
//!
//! - [`value`] — `Value` tree, `Number`, conversions
//! - [`decoder`] — decoding engine and its keyed / unkeyed / single-value containers
//! - [`encoder`] — encoding engine and its containers
//! - [`strategy`] — number decoding and encoding strategies
//! - [`key`] — `CodingKey` and `KeyNamingStrategy`
//! - [`path`] — `CodingPath` carried by every error
//! - [`bridge`] — JSON bytes ⇄ `Value`
//! - [`error`] — `CodableError`

pub mod bridge;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod key;
pub mod options;
pub mod path;
pub mod strategy;
pub mod value;

use serde::de::{Deserialize, DeserializeOwned};
use serde::Serialize;

pub use decoder::{Container, Decoder, JsonDecoder, KeyedContainer, SingleValueContainer, UnkeyedContainer};
pub use encoder::{
    Encoder, JsonEncoder, KeyedEncodingContainer, SingleValueEncodingContainer, UnkeyedEncodingContainer,
};
pub use error::{CodableError, Result};
pub use key::{CodingKey, KeyNamingStrategy};
pub use options::{DecodingOptions, EncodingOptions};
pub use path::{CodingPath, PathComponent};
pub use strategy::{NumberDecodingStrategy, NumberEncodingStrategy, StrategyOutcome};
pub use value::{Map, Number, NumberPrimitive, Value};

/// Decode a tree with default options.
pub fn from_value<'de, T: Deserialize<'de>>(value: &'de Value) -> Result<T> {
    JsonDecoder::new().decode_value(value)
}

/// Parse and decode JSON bytes with default options.
pub fn from_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    JsonDecoder::new().decode(bytes)
}

/// Parse and decode a JSON string with default options.
pub fn from_str<T: DeserializeOwned>(json: &str) -> Result<T> {
    from_slice(json.as_bytes())
}

/// Encode into a tree with default options.
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    JsonEncoder::new().encode_value(value)
}

/// Encode as compact JSON bytes with default options.
pub fn to_vec<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    JsonEncoder::new().encode(value)
}

/// Encode as a compact JSON string with default options.
pub fn to_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let bytes = to_vec(value)?;
    // serde_json only emits UTF-8.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
