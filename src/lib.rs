// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale and key engine.
//!
//! Generates scales from a root key and a catalog of scale patterns,
//! computes equal-tempered frequencies, transposes notes between keys,
//! derives relative keys, key signatures and triads, and adapts scales to
//! instrument layouts such as the circular hand pan.
//!
//! ```no_run
//! use scalekey::{EngineConfig, GenerationOptions, ScaleKeyEngine};
//!
//! let mut engine = ScaleKeyEngine::new(EngineConfig::default())?;
//! let scale = engine.generate_scale("D", "minor", GenerationOptions::new())?;
//! println!("{:?}", scale.note_strings());
//! # Ok::<(), scalekey::ScaleKeyError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod instruments;
pub mod music;

pub use config::{ConfigFile, EngineConfig};
pub use engine::{
    CacheStats, EngineState, GenerationOptions, RelativeKey, ScaleKeyEngine, ScaleKeyEvent,
    ScaleResult,
};
pub use error::{Result, ScaleKeyError};
pub use instruments::{HandPanAdapter, Instrument, InstrumentAdapter};
pub use music::{Chord, KeySignature, Note, PitchClass, ScaleCategory, ScalePattern, ScaleType};
