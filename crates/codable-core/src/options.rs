//! Immutable configuration snapshots for a single decode or encode call.
//!
//! Options are frozen before traversal starts and every frame borrows the same
//! snapshot; nothing below the top-level call can change them.

use crate::key::KeyNamingStrategy;
use crate::strategy::{NumberDecodingStrategy, NumberEncodingStrategy};

/// Configuration seen by every decoding frame.
#[derive(Debug, Clone, Default)]
pub struct DecodingOptions {
    number_strategies: Vec<NumberDecodingStrategy>,
    key_naming: KeyNamingStrategy,
}

impl DecodingOptions {
    pub fn new(number_strategies: Vec<NumberDecodingStrategy>, key_naming: KeyNamingStrategy) -> Self {
        Self {
            number_strategies,
            key_naming,
        }
    }

    /// Fallbacks for numeric targets, in the order they are tried.
    pub fn number_strategies(&self) -> &[NumberDecodingStrategy] {
        &self.number_strategies
    }

    pub fn key_naming(&self) -> &KeyNamingStrategy {
        &self.key_naming
    }
}

/// Configuration seen by every encoding frame.
#[derive(Debug, Clone, Default)]
pub struct EncodingOptions {
    number_strategies: Vec<NumberEncodingStrategy>,
    key_naming: KeyNamingStrategy,
}

impl EncodingOptions {
    pub fn new(number_strategies: Vec<NumberEncodingStrategy>, key_naming: KeyNamingStrategy) -> Self {
        Self {
            number_strategies,
            key_naming,
        }
    }

    /// Boxing rules for numbers, in the order they are tried.
    pub fn number_strategies(&self) -> &[NumberEncodingStrategy] {
        &self.number_strategies
    }

    pub fn key_naming(&self) -> &KeyNamingStrategy {
        &self.key_naming
    }
}
