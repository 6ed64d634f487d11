// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for scale and key operations.

use thiserror::Error;

/// Errors raised by the scale/key engine and its building blocks
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScaleKeyError {
    /// Key is not one of the 12 chromatic pitch classes
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Scale type is not present in the pattern catalog
    #[error("Invalid scale type: {0}")]
    InvalidScaleType(String),

    /// Note string does not match `[A-G](#|b)?<digits>`
    #[error("Invalid note string: {0}")]
    InvalidFormat(String),

    /// Note name is not one of the 12 chromatic pitch classes
    #[error("Invalid note: {0}")]
    InvalidNote(String),

    /// Adapter does not provide its own `adapt_scale`
    #[error("adapt_scale is not implemented for the {0} adapter")]
    NotImplemented(String),
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, ScaleKeyError>;
