//! Error types for decoding and encoding operations.
//!
//! Every engine error carries the [`CodingPath`] of the node where it was
//! raised. Errors produced by serde visitors (`missing_field`, `invalid_type`,
//! custom messages from hand-written impls) start out without a location and
//! are anchored by the innermost engine frame they propagate through.

use std::fmt;

use thiserror::Error;

use crate::path::CodingPath;

/// Errors that can occur while decoding, encoding, parsing or serializing.
#[derive(Error, Debug)]
pub enum CodableError {
    /// A node was present but of the wrong kind, and every configured
    /// strategy declined it.
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        expected: String,
        found: String,
        path: CodingPath,
    },

    /// A keyed lookup found no entry for the (wire) key.
    #[error("key not found at {path}: no value associated with key \"{key}\"")]
    KeyNotFound { key: String, path: CodingPath },

    /// An indexed container ran past its end, or a non-optional target
    /// received `null`.
    #[error("value not found at {path}: expected {expected}")]
    ValueNotFound { expected: String, path: CodingPath },

    /// The node had the right kind but its content is invalid for the target.
    #[error("data corrupted at {path}: {detail}")]
    DataCorrupted { detail: String, path: CodingPath },

    /// The encoding engine cannot represent a value.
    #[error("invalid value at {path}: {detail}")]
    InvalidValue { detail: String, path: CodingPath },

    /// The Byte-Tree Bridge rejected the input bytes.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used throughout codable-core.
pub type Result<T> = std::result::Result<T, CodableError>;

impl CodableError {
    /// The coding path attached to this error, if it has one.
    pub fn coding_path(&self) -> Option<&CodingPath> {
        match self {
            CodableError::TypeMismatch { path, .. }
            | CodableError::KeyNotFound { path, .. }
            | CodableError::ValueNotFound { path, .. }
            | CodableError::DataCorrupted { path, .. }
            | CodableError::InvalidValue { path, .. } => Some(path),
            CodableError::Serialization(_) => None,
        }
    }

    fn coding_path_mut(&mut self) -> Option<&mut CodingPath> {
        match self {
            CodableError::TypeMismatch { path, .. }
            | CodableError::KeyNotFound { path, .. }
            | CodableError::ValueNotFound { path, .. }
            | CodableError::DataCorrupted { path, .. }
            | CodableError::InvalidValue { path, .. } => Some(path),
            CodableError::Serialization(_) => None,
        }
    }

    /// Attach `path` if the error has not been located yet. Errors raised by
    /// the engine itself are already located and pass through unchanged.
    pub(crate) fn anchored(mut self, path: &CodingPath) -> Self {
        if let Some(slot) = self.coding_path_mut() {
            if slot.is_detached() {
                *slot = path.clone();
            }
        }
        self
    }

    /// Translate the key of a not-yet-located `KeyNotFound` (raised by a serde
    /// visitor with a native field name) into its wire form.
    pub(crate) fn with_wire_key<F>(self, to_wire: F) -> Self
    where
        F: FnOnce(&str) -> String,
    {
        match self {
            CodableError::KeyNotFound { key, path } if path.is_detached() => {
                CodableError::KeyNotFound {
                    key: to_wire(&key),
                    path,
                }
            }
            other => other,
        }
    }
}

impl serde::de::Error for CodableError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        CodableError::DataCorrupted {
            detail: msg.to_string(),
            path: CodingPath::detached(),
        }
    }

    fn invalid_type(unexp: serde::de::Unexpected<'_>, exp: &dyn serde::de::Expected) -> Self {
        CodableError::TypeMismatch {
            expected: exp.to_string(),
            found: unexp.to_string(),
            path: CodingPath::detached(),
        }
    }

    fn missing_field(field: &'static str) -> Self {
        CodableError::KeyNotFound {
            key: field.to_string(),
            path: CodingPath::detached(),
        }
    }
}

impl serde::ser::Error for CodableError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        CodableError::InvalidValue {
            detail: msg.to_string(),
            path: CodingPath::detached(),
        }
    }
}
