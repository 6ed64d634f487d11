// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Generation options and the scale result returned by the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::instruments::{AdaptedLayout, AdapterOptions, Instrument, InstrumentConfig};
use crate::music::{KeySignature, Note, PitchClass, ScaleCategory, ScalePattern, ScaleType};

/// Options accepted by scale generation
///
/// Serialized (as JSON) into the cache key, so two option sets that
/// serialize identically share one cache entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    /// Starting octave (engine default when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub octave: Option<i32>,
    /// Instrument to adapt for (engine default when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument: Option<Instrument>,
    /// Requested note count for the instrument layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_count: Option<usize>,
    /// Caller-specific extras; ignored by generation, kept in insertion order
    #[serde(flatten)]
    pub extras: Map<String, Value>,
}

impl GenerationOptions {
    /// Empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting octave
    pub fn with_octave(mut self, octave: i32) -> Self {
        self.octave = Some(octave);
        self
    }

    /// Set the instrument
    pub fn with_instrument(mut self, instrument: Instrument) -> Self {
        self.instrument = Some(instrument);
        self
    }

    /// Set the requested note count
    pub fn with_note_count(mut self, note_count: usize) -> Self {
        self.note_count = Some(note_count);
        self
    }

    /// Attach an extra value
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }
}

/// Descriptive data attached to every generated scale
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleMetadata {
    /// Catalog category of the pattern
    pub category: ScaleCategory,
    /// Pattern description
    pub description: String,
    /// When the result was built
    pub generated_at: DateTime<Utc>,
    /// Options as passed by the caller
    pub options: GenerationOptions,
    /// Configuration of the instrument the scale was adapted for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument_config: Option<InstrumentConfig>,
    /// Adapter options after merging with instrument defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adaptation_options: Option<AdapterOptions>,
}

/// A generated scale, optionally adapted to an instrument layout
///
/// Results are handed out as `Arc<ScaleResult>` and may be shared with the
/// cache; they are never modified after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleResult {
    /// Root key
    pub key: PitchClass,
    /// Scale type
    pub scale_type: ScaleType,
    /// Pattern name, e.g. "Major Scale"
    pub pattern: String,
    /// One pass of the pattern from the starting octave
    pub notes: Vec<Note>,
    /// Key signature for key and scale type
    pub key_signature: KeySignature,
    /// Category, description, timestamp, options
    pub metadata: ScaleMetadata,
    /// Instrument layout, when an adapter was applied
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub adaptation: Option<AdaptedLayout>,
}

impl ScaleResult {
    /// Generate the notes of `key` / `scale_type` from `octave`, without an
    /// instrument layout
    pub fn build(
        key: PitchClass,
        scale_type: ScaleType,
        octave: i32,
        options: GenerationOptions,
    ) -> Self {
        let pattern = ScalePattern::from_definition(scale_type.definition());
        Self::from_pattern(&pattern, key, scale_type, octave, options)
    }

    /// Same as [`ScaleResult::build`] with an explicit pattern
    pub fn from_pattern(
        pattern: &ScalePattern,
        key: PitchClass,
        scale_type: ScaleType,
        octave: i32,
        options: GenerationOptions,
    ) -> Self {
        Self {
            key,
            scale_type,
            notes: pattern.generate_notes(key, octave),
            pattern: pattern.name().to_string(),
            key_signature: KeySignature::new(key, scale_type),
            metadata: ScaleMetadata {
                category: pattern.category(),
                description: pattern.description(),
                generated_at: Utc::now(),
                options,
                instrument_config: None,
                adaptation_options: None,
            },
            adaptation: None,
        }
    }

    /// Attach an instrument layout, recording its config and options in
    /// the metadata
    pub fn with_adaptation(mut self, layout: AdaptedLayout) -> Self {
        self.metadata.instrument_config = Some(layout.instrument_config);
        self.metadata.adaptation_options = Some(layout.adaptation_options.clone());
        self.adaptation = Some(layout);
        self
    }

    /// Note strings in scale order ("C4", "D4", ...)
    pub fn note_strings(&self) -> Vec<String> {
        self.notes.iter().map(|n| n.note_string.clone()).collect()
    }

    /// Pitch classes in scale order
    pub fn pitch_classes(&self) -> Vec<PitchClass> {
        self.notes.iter().map(|n| n.note).collect()
    }

    /// Whether an instrument layout is attached
    pub fn is_adapted(&self) -> bool {
        self.adaptation.is_some()
    }

    /// Equality ignoring the generation timestamp
    pub fn same_content(&self, other: &ScaleResult) -> bool {
        let mut other = other.clone();
        other.metadata.generated_at = self.metadata.generated_at;
        *self == other
    }
}
