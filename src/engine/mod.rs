// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The scale/key engine.
//!
//! [`ScaleKeyEngine`] ties the pieces together: it validates requests,
//! consults the cache, generates notes from the pattern catalog, attaches
//! key signatures, applies instrument adapters and reports what happened
//! to subscribers.
//!
//! Every failure of [`ScaleKeyEngine::generate_scale`] or
//! [`ScaleKeyEngine::transpose_key`] is reported twice: as the returned
//! error and as a `validation-error` event.

pub mod cache;
pub mod events;
pub mod result;

use std::collections::HashMap;
use std::sync::mpsc::Receiver;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, warn};

pub use cache::{cache_key, CacheStats, ScaleCache};
pub use events::{EventBus, FailedCall, ScaleKeyEvent};
pub use result::{GenerationOptions, ScaleMetadata, ScaleResult};

use crate::config::EngineConfig;
use crate::error::{Result, ScaleKeyError};
use crate::instruments::{AdapterRegistry, Instrument, InstrumentAdapter};
use crate::music::note::{
    format_note_string, interval_semitones, is_valid_note, parse_note_string,
};
use crate::music::{
    suggest_chords, Chord, KeySignature, PitchClass, ScaleCategory, ScalePattern, ScaleType,
};

/// Key and scale type the engine last generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineState {
    pub key: PitchClass,
    pub scale_type: ScaleType,
    pub instrument: Option<Instrument>,
}

/// Relative major or minor of a key
///
/// The key may be a flat spelling ("Bb") when the relative major is
/// conventionally written with flats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelativeKey {
    pub key: &'static str,
    pub scale_type: ScaleType,
}

/// Scale and key engine
pub struct ScaleKeyEngine {
    config: EngineConfig,
    current_key: PitchClass,
    current_scale: ScaleType,
    instrument: Option<Instrument>,
    cache: Option<ScaleCache>,
    patterns: HashMap<ScaleType, ScalePattern>,
    adapters: AdapterRegistry,
    events: EventBus,
}

impl ScaleKeyEngine {
    /// Create an engine and generate its default scale
    pub fn new(config: EngineConfig) -> Result<Self> {
        let current_key = PitchClass::from_name(&config.default_key)
            .ok_or_else(|| ScaleKeyError::InvalidKey(config.default_key.clone()))?;
        let current_scale = ScaleType::from_key(&config.default_scale)
            .ok_or_else(|| ScaleKeyError::InvalidScaleType(config.default_scale.clone()))?;

        let patterns = ScaleType::ALL
            .iter()
            .map(|&t| (t, ScalePattern::from_definition(t.definition())))
            .collect();

        let mut engine = Self {
            cache: config.cache.then(|| ScaleCache::new(config.cache_size)),
            instrument: config.instrument,
            current_key,
            current_scale,
            patterns,
            adapters: AdapterRegistry::with_defaults(),
            events: EventBus::new(),
            config,
        };

        engine.generate(current_key, current_scale, GenerationOptions::new())?;
        Ok(engine)
    }

    /// Settings the engine was built with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Subscribe to engine events
    pub fn subscribe(&mut self) -> Receiver<ScaleKeyEvent> {
        self.events.subscribe()
    }

    /// Register an instrument adapter, replacing any existing one
    pub fn register_adapter(&mut self, adapter: Box<dyn InstrumentAdapter>) {
        self.adapters.register(adapter);
    }

    /// Adapter registered for an instrument
    pub fn adapter(&self, instrument: Instrument) -> Option<&dyn InstrumentAdapter> {
        self.adapters.get(instrument)
    }

    /// Generate a scale from a key name and scale type name
    ///
    /// Results are cached by key, scale type and serialized options. A
    /// cache hit updates the current state but does not emit
    /// `scale-generated`.
    pub fn generate_scale(
        &mut self,
        key: &str,
        scale_type: &str,
        options: GenerationOptions,
    ) -> Result<Arc<ScaleResult>> {
        match self.try_generate(key, scale_type, &options) {
            Ok(result) => Ok(result),
            Err(err) => {
                warn!(%err, key, scale_type, "scale generation failed");
                self.events.emit(ScaleKeyEvent::ValidationError {
                    error: err.to_string(),
                    call: FailedCall::GenerateScale {
                        key: key.to_string(),
                        scale_type: scale_type.to_string(),
                        options,
                    },
                    timestamp: Utc::now(),
                });
                Err(err)
            }
        }
    }

    /// Typed form of [`ScaleKeyEngine::generate_scale`]
    pub fn generate(
        &mut self,
        key: PitchClass,
        scale_type: ScaleType,
        options: GenerationOptions,
    ) -> Result<Arc<ScaleResult>> {
        self.generate_scale(key.name(), scale_type.key(), options)
    }

    fn try_generate(
        &mut self,
        key: &str,
        scale_type: &str,
        options: &GenerationOptions,
    ) -> Result<Arc<ScaleResult>> {
        let root = PitchClass::from_name(key)
            .ok_or_else(|| ScaleKeyError::InvalidKey(key.to_string()))?;
        let scale = ScaleType::from_key(scale_type)
            .filter(|t| self.patterns.contains_key(t))
            .ok_or_else(|| ScaleKeyError::InvalidScaleType(scale_type.to_string()))?;

        let cache_key = cache_key(key, scale_type, options);
        if let Some(cached) = self.cache.as_ref().and_then(|c| c.get(&cache_key)) {
            debug!(key = %cache_key, "cache hit");
            self.update_current_state(root, scale, &cached);
            return Ok(cached);
        }

        let result = Arc::new(self.build_result(root, scale, options)?);
        if let Some(cache) = self.cache.as_mut() {
            debug!(key = %cache_key, "cache miss");
            cache.set(cache_key, Arc::clone(&result));
        }

        self.update_current_state(root, scale, &result);
        self.events.emit(ScaleKeyEvent::ScaleGenerated {
            scale: Arc::clone(&result),
            timestamp: Utc::now(),
        });
        Ok(result)
    }

    fn build_result(
        &self,
        key: PitchClass,
        scale_type: ScaleType,
        options: &GenerationOptions,
    ) -> Result<ScaleResult> {
        let pattern = self
            .patterns
            .get(&scale_type)
            .ok_or_else(|| ScaleKeyError::InvalidScaleType(scale_type.key().to_string()))?;
        let octave = options.octave.unwrap_or(self.config.default_octave);

        let result = ScaleResult::from_pattern(pattern, key, scale_type, octave, options.clone());
        debug!(%key, %scale_type, octave, notes = result.notes.len(), "generated scale");

        let instrument = options.instrument.or(self.instrument);
        match instrument.and_then(|i| self.adapters.get(i)) {
            Some(adapter) => {
                let layout = adapter.adapt_scale(&result, options)?;
                Ok(result.with_adaptation(layout))
            }
            None => Ok(result),
        }
    }

    fn update_current_state(&mut self, key: PitchClass, scale_type: ScaleType, scale: &Arc<ScaleResult>) {
        let key_changed = self.current_key != key;
        let scale_changed = self.current_scale != scale_type;

        self.current_key = key;
        self.current_scale = scale_type;

        if key_changed {
            self.events.emit(ScaleKeyEvent::KeyChanged {
                key,
                scale_type,
                scale: Arc::clone(scale),
                timestamp: Utc::now(),
            });
        }
        if scale_changed {
            self.events.emit(ScaleKeyEvent::ScaleChanged {
                key,
                scale_type,
                scale: Arc::clone(scale),
                timestamp: Utc::now(),
            });
        }
    }

    /// Note strings of a scale starting at `octave`
    pub fn scale_notes(&mut self, key: &str, scale_type: &str, octave: i32) -> Result<Vec<String>> {
        let result = self.generate_scale(key, scale_type, GenerationOptions::new().with_octave(octave))?;
        Ok(result.note_strings())
    }

    /// Transpose note strings by the interval from `from_key` up to `to_key`
    ///
    /// Octave numbers are kept as written, so a note that wraps past B keeps
    /// its original octave.
    pub fn transpose_key<S: AsRef<str>>(
        &mut self,
        from_key: &str,
        to_key: &str,
        notes: &[S],
    ) -> Result<Vec<String>> {
        let original: Vec<String> = notes.iter().map(|n| n.as_ref().to_string()).collect();

        match transpose_notes(from_key, to_key, &original) {
            Ok((from, to, transposed)) => {
                self.events.emit(ScaleKeyEvent::TranspositionComplete {
                    from_key: from,
                    to_key: to,
                    original_notes: original,
                    transposed_notes: transposed.clone(),
                    timestamp: Utc::now(),
                });
                Ok(transposed)
            }
            Err(err) => {
                warn!(%err, from_key, to_key, "transposition failed");
                self.events.emit(ScaleKeyEvent::ValidationError {
                    error: err.to_string(),
                    call: FailedCall::TransposeKey {
                        from_key: from_key.to_string(),
                        to_key: to_key.to_string(),
                        notes: original,
                    },
                    timestamp: Utc::now(),
                });
                Err(err)
            }
        }
    }

    /// Relative minor of a major key, relative major of a minor key
    ///
    /// Other scale types, and keys without a table entry, map to themselves.
    pub fn relative_key(&self, key: PitchClass, scale_type: ScaleType) -> RelativeKey {
        let signature = KeySignature::new(key, scale_type);
        if scale_type == ScaleType::Major {
            RelativeKey {
                key: signature.relative_minor(),
                scale_type: ScaleType::NaturalMinor,
            }
        } else if scale_type.is_natural_minor() {
            RelativeKey {
                key: signature.relative_major(),
                scale_type: ScaleType::Major,
            }
        } else {
            RelativeKey {
                key: key.name(),
                scale_type,
            }
        }
    }

    /// Diatonic triads of a scale
    ///
    /// The scale is generated through the engine, so state and events
    /// update as for [`ScaleKeyEngine::generate_scale`].
    pub fn chord_suggestions(&mut self, key: &str, scale_type: &str) -> Result<Vec<Chord>> {
        let result = self.generate_scale(key, scale_type, GenerationOptions::new())?;
        Ok(suggest_chords(&result.notes))
    }

    /// Key signature of a key and scale type
    pub fn key_signature(&self, key: &str, scale_type: &str) -> Result<KeySignature> {
        let key = PitchClass::from_name(key).ok_or_else(|| ScaleKeyError::InvalidKey(key.to_string()))?;
        let scale_type = ScaleType::from_key(scale_type)
            .ok_or_else(|| ScaleKeyError::InvalidScaleType(scale_type.to_string()))?;
        Ok(KeySignature::new(key, scale_type))
    }

    /// Pattern registered for a scale type name
    pub fn scale_pattern(&self, scale_type: &str) -> Option<&ScalePattern> {
        ScaleType::from_key(scale_type).and_then(|t| self.patterns.get(&t))
    }

    /// Frequency of a note string such as "A4"
    pub fn note_frequency(&self, note_string: &str) -> Result<f64> {
        let parsed = parse_note_string(note_string)?;
        Ok(parsed.pitch_class()?.frequency(parsed.octave))
    }

    /// Upward interval in semitones from `root` to `target`
    pub fn interval_from_root(&self, root: &str, target: &str) -> Result<u8> {
        interval_semitones(root, target)
    }

    pub fn is_valid_key(&self, key: &str) -> bool {
        is_valid_note(key)
    }

    pub fn is_valid_scale(&self, scale_type: &str) -> bool {
        ScaleType::from_key(scale_type).is_some_and(|t| self.patterns.contains_key(&t))
    }

    pub fn validate_key_scale(&self, key: &str, scale_type: &str) -> bool {
        self.is_valid_key(key) && self.is_valid_scale(scale_type)
    }

    /// All chromatic keys
    pub fn all_keys(&self) -> Vec<PitchClass> {
        PitchClass::ALL.to_vec()
    }

    /// All registered scale types, in catalog order
    pub fn all_scale_types(&self) -> Vec<ScaleType> {
        ScaleType::ALL
            .iter()
            .copied()
            .filter(|t| self.patterns.contains_key(t))
            .collect()
    }

    /// Scale types whose pattern falls in `category`
    pub fn scale_types_by_category(&self, category: ScaleCategory) -> Vec<ScaleType> {
        self.all_scale_types()
            .into_iter()
            .filter(|t| self.patterns.get(t).map(|p| p.category()) == Some(category))
            .collect()
    }

    pub fn current_state(&self) -> EngineState {
        EngineState {
            key: self.current_key,
            scale_type: self.current_scale,
            instrument: self.instrument,
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        match &self.cache {
            Some(cache) => cache.stats(),
            None => CacheStats {
                enabled: false,
                size: None,
                max_size: None,
            },
        }
    }

    pub fn clear_cache(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
    }
}

fn transpose_notes(
    from_key: &str,
    to_key: &str,
    notes: &[String],
) -> Result<(PitchClass, PitchClass, Vec<String>)> {
    let from: PitchClass = from_key.parse()?;
    let to: PitchClass = to_key.parse()?;
    let semitones = from.interval_to(to) as i32;

    let transposed = notes
        .iter()
        .map(|note| {
            let parsed = parse_note_string(note)?;
            let pitch = parsed.pitch_class()?.transpose(semitones);
            Ok(format_note_string(pitch, parsed.octave))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((from, to, transposed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::{ConfigOnlyAdapter, NoteLayout};

    fn engine() -> ScaleKeyEngine {
        ScaleKeyEngine::new(EngineConfig::default()).unwrap()
    }

    fn drain(rx: &Receiver<ScaleKeyEvent>) -> Vec<&'static str> {
        rx.try_iter().map(|e| e.name()).collect()
    }

    #[test]
    fn test_new_generates_default_scale() {
        let engine = engine();
        assert_eq!(engine.current_state().key, PitchClass::C);
        assert_eq!(engine.current_state().scale_type, ScaleType::Major);
        assert_eq!(engine.current_state().instrument, Some(Instrument::HandPan));
        assert_eq!(engine.cache_stats().size, Some(1));
    }

    #[test]
    fn test_new_rejects_invalid_defaults() {
        let config = EngineConfig {
            default_key: "H".to_string(),
            ..EngineConfig::default()
        };
        assert_eq!(
            ScaleKeyEngine::new(config).err(),
            Some(ScaleKeyError::InvalidKey("H".to_string()))
        );
    }

    #[test]
    fn test_generate_c_major_adapted_for_hand_pan() {
        let mut engine = engine();
        let result = engine.generate_scale("C", "major", GenerationOptions::new()).unwrap();
        assert_eq!(result.note_strings(), vec!["C4", "D4", "E4", "F4", "G4", "A4", "B4"]);

        let layout = result.adaptation.as_ref().unwrap();
        assert_eq!(layout.layout, NoteLayout::Circular);
        assert_eq!(layout.note_count, 8);
    }

    #[test]
    fn test_no_instrument_leaves_scale_unadapted() {
        let config = EngineConfig {
            instrument: None,
            ..EngineConfig::default()
        };
        let mut engine = ScaleKeyEngine::new(config).unwrap();
        let result = engine.generate_scale("G", "mixolydian", GenerationOptions::new()).unwrap();
        assert!(!result.is_adapted());
    }

    #[test]
    fn test_unregistered_instrument_leaves_scale_unadapted() {
        let mut engine = engine();
        let options = GenerationOptions::new().with_instrument(Instrument::Piano);
        let result = engine.generate_scale("C", "major", options).unwrap();
        assert!(!result.is_adapted());
    }

    #[test]
    fn test_registered_config_only_adapter_fails() {
        let mut engine = engine();
        engine.register_adapter(Box::new(ConfigOnlyAdapter::new(Instrument::Fretboard)));
        let events = engine.subscribe();

        let options = GenerationOptions::new().with_instrument(Instrument::Fretboard);
        let err = engine.generate_scale("E", "minor", options).unwrap_err();
        assert_eq!(err, ScaleKeyError::NotImplemented("fretboard".to_string()));
        assert_eq!(drain(&events), vec!["validation-error"]);
    }

    #[test]
    fn test_default_octave_from_config() {
        let config = EngineConfig {
            default_octave: 3,
            instrument: None,
            ..EngineConfig::default()
        };
        let mut engine = ScaleKeyEngine::new(config).unwrap();
        let notes = engine.generate_scale("A", "minorPentatonic", GenerationOptions::new()).unwrap();
        assert_eq!(notes.note_strings(), vec!["A3", "C4", "D4", "E4", "G4"]);
    }

    #[test]
    fn test_events_on_miss_and_hit() {
        let mut engine = engine();
        let events = engine.subscribe();

        engine.generate_scale("D", "minor", GenerationOptions::new()).unwrap();
        assert_eq!(drain(&events), vec!["key-changed", "scale-changed", "scale-generated"]);

        engine.generate_scale("C", "minor", GenerationOptions::new()).unwrap();
        assert_eq!(drain(&events), vec!["key-changed", "scale-generated"]);

        // Cached: state changes are reported, generation is not
        engine.generate_scale("D", "minor", GenerationOptions::new()).unwrap();
        assert_eq!(drain(&events), vec!["key-changed"]);

        engine.generate_scale("D", "minor", GenerationOptions::new()).unwrap();
        assert!(drain(&events).is_empty());

        engine.generate_scale("D", "dorian", GenerationOptions::new()).unwrap();
        assert_eq!(drain(&events), vec!["scale-changed", "scale-generated"]);

        engine.generate_scale("D", "minor", GenerationOptions::new()).unwrap();
        assert_eq!(drain(&events), vec!["scale-changed"]);
    }

    #[test]
    fn test_extreme_octaves_do_not_panic() {
        let mut engine = engine();
        let events = engine.subscribe();

        assert!(engine.note_frequency("C999999999").unwrap().is_infinite());

        let options = GenerationOptions::new().with_octave(200_000_000);
        let result = engine.generate_scale("C", "major", options).unwrap();
        assert_eq!(result.notes[0].note_string, "C200000000");
        assert!(result.notes.iter().all(|n| n.frequency.is_infinite()));
        assert_eq!(result.adaptation.as_ref().map(|a| a.note_count), Some(0));
        assert!(drain(&events).contains(&"scale-generated"));
    }

    #[test]
    fn test_validation_error_event_matches_error() {
        let mut engine = engine();
        let events = engine.subscribe();

        let err = engine.generate_scale("C", "bebop", GenerationOptions::new()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid scale type: bebop");

        match events.try_recv().unwrap() {
            ScaleKeyEvent::ValidationError { error, call, .. } => {
                assert_eq!(error, "Invalid scale type: bebop");
                assert_eq!(
                    call,
                    FailedCall::GenerateScale {
                        key: "C".to_string(),
                        scale_type: "bebop".to_string(),
                        options: GenerationOptions::new(),
                    }
                );
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(engine.current_state().scale_type, ScaleType::Major);
    }

    #[test]
    fn test_flat_keys_are_rejected() {
        let mut engine = engine();
        assert!(!engine.is_valid_key("Bb"));
        assert_eq!(
            engine.generate_scale("Bb", "major", GenerationOptions::new()).unwrap_err(),
            ScaleKeyError::InvalidKey("Bb".to_string())
        );
    }

    #[test]
    fn test_transpose_key() {
        let mut engine = engine();
        let events = engine.subscribe();

        let notes = engine.transpose_key("C", "D", &["C4", "E4", "G4"]).unwrap();
        assert_eq!(notes, vec!["D4", "F#4", "A4"]);
        assert_eq!(drain(&events), vec!["transposition-complete"]);

        let notes = engine.transpose_key("A", "C", &["A4", "B4"]).unwrap();
        assert_eq!(notes, vec!["C4", "D4"]);
    }

    #[test]
    fn test_transpose_invalid_note_reports_error() {
        let mut engine = engine();
        let events = engine.subscribe();

        let err = engine.transpose_key("C", "D", &["C4", "X9"]).unwrap_err();
        assert_eq!(err, ScaleKeyError::InvalidFormat("X9".to_string()));

        match events.try_recv().unwrap() {
            ScaleKeyEvent::ValidationError { call, .. } => {
                assert_eq!(
                    call,
                    FailedCall::TransposeKey {
                        from_key: "C".to_string(),
                        to_key: "D".to_string(),
                        notes: vec!["C4".to_string(), "X9".to_string()],
                    }
                );
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_relative_keys() {
        let engine = engine();
        assert_eq!(
            engine.relative_key(PitchClass::C, ScaleType::Major),
            RelativeKey { key: "A", scale_type: ScaleType::NaturalMinor }
        );
        assert_eq!(
            engine.relative_key(PitchClass::D, ScaleType::Minor),
            RelativeKey { key: "F", scale_type: ScaleType::Major }
        );
        assert_eq!(
            engine.relative_key(PitchClass::G, ScaleType::NaturalMinor),
            RelativeKey { key: "Bb", scale_type: ScaleType::Major }
        );
        assert_eq!(
            engine.relative_key(PitchClass::E, ScaleType::Dorian),
            RelativeKey { key: "E", scale_type: ScaleType::Dorian }
        );
    }

    #[test]
    fn test_chord_suggestions_update_state() {
        let mut engine = engine();
        let chords = engine.chord_suggestions("G", "major").unwrap();
        assert_eq!(chords.len(), 7);
        assert_eq!(chords[0].notes, vec![PitchClass::G, PitchClass::B, PitchClass::D]);
        assert_eq!(engine.current_state().key, PitchClass::G);
    }

    #[test]
    fn test_lookups() {
        let mut engine = engine();
        assert!((engine.note_frequency("A4").unwrap() - 440.0).abs() < 1e-9);
        assert!(engine.note_frequency("A").is_err());
        assert_eq!(engine.interval_from_root("C", "G").unwrap(), 7);
        assert_eq!(engine.interval_from_root("G", "C").unwrap(), 5);
        assert_eq!(engine.scale_pattern("dorian").map(|p| p.name()), Some("Dorian Mode"));
        assert!(engine.scale_pattern("bebop").is_none());
        assert_eq!(engine.key_signature("D", "major").unwrap().sharps(), &["F#", "C#"]);
        assert_eq!(
            engine.scale_notes("E", "minorPentatonic", 2).unwrap(),
            vec!["E2", "G2", "A2", "B2", "D3"]
        );
    }

    #[test]
    fn test_catalog_listing() {
        let engine = engine();
        assert_eq!(engine.all_keys().len(), 12);
        assert_eq!(engine.all_scale_types().len(), 14);
        assert_eq!(
            engine.scale_types_by_category(ScaleCategory::Pentatonic),
            vec![ScaleType::MajorPentatonic, ScaleType::MinorPentatonic]
        );
        assert!(engine.validate_key_scale("F#", "lydian"));
        assert!(!engine.validate_key_scale("F#", "Lydian"));
    }

    #[test]
    fn test_cache_disabled() {
        let config = EngineConfig {
            cache: false,
            ..EngineConfig::default()
        };
        let mut engine = ScaleKeyEngine::new(config).unwrap();
        assert_eq!(
            engine.cache_stats(),
            CacheStats { enabled: false, size: None, max_size: None }
        );

        let a = engine.generate_scale("C", "blues", GenerationOptions::new()).unwrap();
        let b = engine.generate_scale("C", "blues", GenerationOptions::new()).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert!(a.same_content(&b));
    }

    #[test]
    fn test_clear_cache() {
        let mut engine = engine();
        engine.generate_scale("E", "lydian", GenerationOptions::new()).unwrap();
        assert_eq!(engine.cache_stats().size, Some(2));
        engine.clear_cache();
        assert_eq!(engine.cache_stats().size, Some(0));
        assert_eq!(engine.cache_stats().max_size, Some(100));
    }
}
