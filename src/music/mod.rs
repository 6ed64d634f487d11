// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory building blocks.
//!
//! This module provides the scale pattern catalog, note utilities, scale
//! generation, key signatures and chord suggestions used by the engine.

pub mod catalog;
pub mod chord;
pub mod key_signature;
pub mod note;
pub mod scale;

pub use catalog::{ScaleCategory, ScalePatternDefinition, ScaleType};
pub use chord::{suggest_chords, Chord, ChordQuality};
pub use key_signature::KeySignature;
pub use note::{Note, ParsedNote, PitchClass};
pub use scale::{PatternMetadata, ScalePattern};
