// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Instrument adapters.
//!
//! An adapter turns a generated scale into a layout for one physical or
//! visual instrument. All adapters share the provided helpers of
//! [`InstrumentAdapter`], which are driven entirely by the adapter's
//! [`InstrumentConfig`]. Only `adapt_scale` differs per instrument; the
//! default implementation reports that no layout is available.

pub mod config;
pub mod hand_pan;

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

pub use config::{
    Instrument, InstrumentConfig, InstrumentDetails, NoteCount, NoteFormatting, NoteLayout,
    OctaveSetting, PreferredScales,
};
pub use hand_pan::{HandPanAdapter, LayoutSuggestions};

use crate::engine::{GenerationOptions, ScaleResult};
use crate::error::{Result, ScaleKeyError};
use crate::music::{Note, PitchClass, ScaleType};

/// Adapter options after merging caller options over instrument defaults
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterOptions {
    pub octave: OctaveSetting,
    pub note_count: NoteCount,
    pub layout: NoteLayout,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_note: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circular_layout: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symmetrical: Option<bool>,
    /// Caller extras carried through unchanged
    #[serde(flatten)]
    pub extras: Map<String, Value>,
}

/// Placement of a note within a circular layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionKind {
    Center,
    Surrounding,
}

/// Where a note sits on the instrument
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NotePosition {
    #[serde(rename = "type")]
    pub kind: PositionKind,
    /// Index into the adapted note list
    pub index: usize,
    /// Degrees clockwise from the first surrounding note
    pub angle: f64,
    /// 0 for the center, 1 for the ring
    pub radius: f64,
    /// Position on the ring, absent for the center
    #[serde(rename = "position", skip_serializing_if = "Option::is_none")]
    pub ring_position: Option<usize>,
}

/// A scale note placed on an instrument
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptedNote {
    #[serde(flatten)]
    pub note: Note,
    /// Note as the instrument labels it
    pub formatted: String,
    pub position: NotePosition,
}

/// Instrument layout attached to a scale result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptedLayout {
    pub adapted_notes: Vec<AdaptedNote>,
    pub layout: NoteLayout,
    pub instrument: Instrument,
    pub note_count: usize,
    pub center_note: Option<AdaptedNote>,
    /// Serialized under the result metadata, see [`ScaleResult::with_adaptation`]
    #[serde(skip)]
    pub instrument_config: InstrumentConfig,
    #[serde(skip)]
    pub adaptation_options: AdapterOptions,
}

/// Adapts generated scales to an instrument's layout
pub trait InstrumentAdapter: Send {
    /// Static configuration of the instrument
    fn config(&self) -> &InstrumentConfig;

    /// Build the instrument layout for a generated scale
    fn adapt_scale(&self, _scale: &ScaleResult, _options: &GenerationOptions) -> Result<AdaptedLayout> {
        Err(ScaleKeyError::NotImplemented(self.instrument().to_string()))
    }

    /// Instrument this adapter serves
    fn instrument(&self) -> Instrument {
        self.config().instrument
    }

    /// Format a note the way the instrument labels it
    fn format_note(&self, note: PitchClass, octave: i32) -> String {
        self.config().note_formatting.format(note, octave)
    }

    /// Preferred scale types; empty when every scale is preferred
    fn preferred_scales(&self) -> Vec<ScaleType> {
        match self.config().preferred_scales {
            PreferredScales::All => Vec::new(),
            PreferredScales::Only(list) => list.to_vec(),
        }
    }

    fn is_preferred_scale(&self, scale_type: ScaleType) -> bool {
        match self.config().preferred_scales {
            PreferredScales::All => true,
            PreferredScales::Only(list) => list.contains(&scale_type),
        }
    }

    /// Inclusive `(min, max)` octave range
    fn octave_range(&self) -> (i32, i32) {
        self.config().octave_range
    }

    fn is_octave_in_range(&self, octave: i32) -> bool {
        let (min, max) = self.octave_range();
        (min..=max).contains(&octave)
    }

    /// Keep only notes whose octave lies in range
    fn filter_notes_by_octave_range(&self, notes: &[Note]) -> Vec<Note> {
        notes
            .iter()
            .filter(|n| self.is_octave_in_range(n.octave))
            .cloned()
            .collect()
    }

    fn default_octave(&self) -> OctaveSetting {
        self.config().default_octave
    }

    fn note_layout(&self) -> NoteLayout {
        self.config().note_layout
    }

    fn layout_description(&self) -> &'static str {
        self.config().layout_description
    }

    /// Check merged options
    ///
    /// Advisory only: adapters log unusual values and keep going. Callers
    /// are not required to act on a `false` result.
    fn validate_options(&self, _options: &AdapterOptions) -> bool {
        true
    }

    /// Defaults taken from the instrument config
    fn default_options(&self) -> AdapterOptions {
        let config = self.config();
        AdapterOptions {
            octave: config.default_octave,
            note_count: config.note_count,
            layout: config.note_layout,
            center_note: None,
            circular_layout: None,
            symmetrical: None,
            extras: Map::new(),
        }
    }

    /// Caller options layered over [`InstrumentAdapter::default_options`]
    fn merge_options(&self, options: &GenerationOptions) -> AdapterOptions {
        let mut merged = self.default_options();
        if let Some(octave) = options.octave {
            merged.octave = OctaveSetting::Fixed(octave);
        }
        // A zero count means "use the instrument default"
        if let Some(count) = options.note_count.filter(|&n| n > 0) {
            merged.note_count = NoteCount::Fixed(count);
        }
        merged.extras = options.extras.clone();
        merged
    }
}

/// Adapter backed only by a configuration, with no layout of its own
#[derive(Debug, Clone)]
pub struct ConfigOnlyAdapter {
    config: InstrumentConfig,
}

impl ConfigOnlyAdapter {
    pub fn new(instrument: Instrument) -> Self {
        Self {
            config: instrument.config(),
        }
    }
}

impl InstrumentAdapter for ConfigOnlyAdapter {
    fn config(&self) -> &InstrumentConfig {
        &self.config
    }
}

/// Registry of adapters keyed by instrument
pub struct AdapterRegistry {
    adapters: HashMap<Instrument, Box<dyn InstrumentAdapter>>,
}

impl AdapterRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            adapters: HashMap::new(),
        }
    }

    /// Registry holding the built-in hand-pan adapter
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(HandPanAdapter::new()));
        registry
    }

    /// Register an adapter, replacing any previous one for its instrument
    pub fn register(&mut self, adapter: Box<dyn InstrumentAdapter>) {
        self.adapters.insert(adapter.instrument(), adapter);
    }

    pub fn get(&self, instrument: Instrument) -> Option<&dyn InstrumentAdapter> {
        self.adapters.get(&instrument).map(|a| a.as_ref())
    }

    pub fn contains(&self, instrument: Instrument) -> bool {
        self.adapters.contains_key(&instrument)
    }

    /// Registered instruments, in declaration order
    pub fn instruments(&self) -> Vec<Instrument> {
        Instrument::ALL
            .iter()
            .copied()
            .filter(|i| self.adapters.contains_key(i))
            .collect()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::ScalePattern;

    fn c_major(octave: i32) -> Vec<Note> {
        ScalePattern::from_definition(ScaleType::Major.definition()).generate_notes(PitchClass::C, octave)
    }

    #[test]
    fn test_preferred_scales_all_is_empty_list() {
        let piano = ConfigOnlyAdapter::new(Instrument::Piano);
        assert!(piano.preferred_scales().is_empty());
        assert!(piano.is_preferred_scale(ScaleType::Locrian));

        let fretboard = ConfigOnlyAdapter::new(Instrument::Fretboard);
        assert!(fretboard.is_preferred_scale(ScaleType::Blues));
        assert!(!fretboard.is_preferred_scale(ScaleType::Locrian));
    }

    #[test]
    fn test_octave_range_is_inclusive() {
        let adapter = ConfigOnlyAdapter::new(Instrument::HandPan);
        assert!(adapter.is_octave_in_range(3));
        assert!(adapter.is_octave_in_range(5));
        assert!(!adapter.is_octave_in_range(6));
        assert!(!adapter.is_octave_in_range(2));
    }

    #[test]
    fn test_filter_notes_by_octave_range() {
        let adapter = ConfigOnlyAdapter::new(Instrument::HandPan);
        let mut notes = c_major(5);
        notes.extend(c_major(6));
        let kept = adapter.filter_notes_by_octave_range(&notes);
        assert_eq!(kept.len(), 7);
        assert!(kept.iter().all(|n| n.octave == 5));
    }

    #[test]
    fn test_merge_options_overrides_defaults() {
        let adapter = ConfigOnlyAdapter::new(Instrument::HandPan);
        let options = GenerationOptions::new()
            .with_octave(3)
            .with_note_count(10)
            .with_extra("label", "demo");
        let merged = adapter.merge_options(&options);
        assert_eq!(merged.octave, OctaveSetting::Fixed(3));
        assert_eq!(merged.note_count, NoteCount::Fixed(10));
        assert_eq!(merged.layout, NoteLayout::Circular);
        assert_eq!(merged.extras.get("label"), Some(&Value::from("demo")));
    }

    #[test]
    fn test_zero_note_count_keeps_default() {
        let adapter = ConfigOnlyAdapter::new(Instrument::HandPan);
        let merged = adapter.merge_options(&GenerationOptions::new().with_note_count(0));
        assert_eq!(merged.note_count, NoteCount::Fixed(8));
    }

    #[test]
    fn test_default_adapt_scale_is_not_implemented() {
        let adapter = ConfigOnlyAdapter::new(Instrument::Fretboard);
        let scale = ScaleResult::build(PitchClass::C, ScaleType::Major, 4, GenerationOptions::new());
        let err = adapter.adapt_scale(&scale, &GenerationOptions::new()).unwrap_err();
        assert_eq!(err, ScaleKeyError::NotImplemented("fretboard".to_string()));
    }

    #[test]
    fn test_registry_defaults() {
        let mut registry = AdapterRegistry::with_defaults();
        assert!(registry.contains(Instrument::HandPan));
        assert!(registry.get(Instrument::Piano).is_none());

        registry.register(Box::new(ConfigOnlyAdapter::new(Instrument::Piano)));
        assert_eq!(registry.instruments(), vec![Instrument::HandPan, Instrument::Piano]);
        assert_eq!(
            registry.get(Instrument::Piano).map(|a| a.layout_description()),
            Some("Traditional piano keyboard layout")
        );
    }
}
