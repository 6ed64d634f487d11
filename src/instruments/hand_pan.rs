// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Hand-pan adapter.
//!
//! A hand pan has a central "ding" note surrounded by a ring of tone
//! fields. The first scale note goes to the center; the rest are spaced
//! evenly around the ring.

use serde::Serialize;
use tracing::warn;

use super::config::{Instrument, InstrumentConfig, NoteCount};
use super::{
    AdaptedLayout, AdaptedNote, AdapterOptions, InstrumentAdapter, NotePosition, PositionKind,
};
use crate::engine::{GenerationOptions, ScaleResult};
use crate::error::Result;
use crate::music::{Note, ScaleType};

/// Tone field counts common on real instruments
const SUGGESTED_NOTE_COUNTS: [usize; 4] = [7, 8, 9, 10];

/// Note counts outside this range are unusual and logged
const PLAYABLE_NOTE_COUNTS: std::ops::RangeInclusive<usize> = 5..=12;

/// Scale types that sit well on a hand pan
const WELL_SUITED: [ScaleType; 7] = [
    ScaleType::Minor,
    ScaleType::NaturalMinor,
    ScaleType::Dorian,
    ScaleType::MajorPentatonic,
    ScaleType::MinorPentatonic,
    ScaleType::Phrygian,
    ScaleType::Mixolydian,
];

/// Advisory layout information for a generated scale
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSuggestions {
    pub note_counts: Vec<usize>,
    pub center_note: Option<Note>,
    pub well_suited: bool,
    pub description: &'static str,
}

/// Circular hand-pan layout
#[derive(Debug, Clone)]
pub struct HandPanAdapter {
    config: InstrumentConfig,
}

impl HandPanAdapter {
    pub fn new() -> Self {
        Self {
            config: Instrument::HandPan.config(),
        }
    }

    /// Common tone field counts
    pub fn suggested_note_counts(&self) -> Vec<usize> {
        SUGGESTED_NOTE_COUNTS.to_vec()
    }

    pub fn is_well_suited_scale(&self, scale_type: ScaleType) -> bool {
        WELL_SUITED.contains(&scale_type)
    }

    /// One-line assessment of a scale type on the hand pan
    pub fn scale_description(&self, scale_type: ScaleType) -> &'static str {
        match scale_type {
            ScaleType::Minor => "Excellent for HandPan - creates meditative, flowing melodies",
            ScaleType::NaturalMinor => "Perfect for HandPan - natural minor scales are ideal",
            ScaleType::Dorian => "Great for HandPan - offers both minor and bright qualities",
            ScaleType::MajorPentatonic => "Very good - pentatonic scales avoid dissonance",
            ScaleType::MinorPentatonic => "Excellent - classic choice for HandPan music",
            ScaleType::Major => "Good but less common - creates brighter, more uplifting tones",
            ScaleType::Blues => "Interesting choice - adds blue notes for expressive playing",
            _ => "Suitable for HandPan with careful arrangement",
        }
    }

    /// Suggestions for laying out `scale` on a hand pan
    pub fn layout_suggestions(&self, scale: &ScaleResult) -> LayoutSuggestions {
        LayoutSuggestions {
            note_counts: self.suggested_note_counts(),
            center_note: scale.notes.first().cloned(),
            well_suited: self.is_well_suited_scale(scale.scale_type),
            description: self.scale_description(scale.scale_type),
        }
    }

    /// Repeat the pattern upward an octave per pass until `target` notes
    /// are collected or the notes leave the instrument's range
    fn extend_scale_to_fill(&self, notes: &[Note], target: usize) -> Vec<Note> {
        let mut extended = self.filter_notes_by_octave_range(notes);
        let Some(highest) = notes.iter().map(|n| n.octave).max() else {
            return extended;
        };

        let (min, max) = self.octave_range();
        let (min_octave, max_octave) = (i64::from(min), i64::from(max));
        // Passes that leave every note below the range add nothing
        let mut pass = (min_octave - i64::from(highest)).max(1);

        'fill: while extended.len() < target {
            for base in notes {
                if extended.len() >= target {
                    break 'fill;
                }
                let octave = i64::from(base.octave) + pass;
                if octave > max_octave {
                    break 'fill;
                }
                if octave >= min_octave {
                    extended.push(base.with_octave(octave as i32));
                }
            }
            pass += 1;
        }

        extended.truncate(target);
        extended
    }
}

impl Default for HandPanAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// Center for index 0, evenly spaced ring positions for the rest
fn circular_position(index: usize, count: usize) -> NotePosition {
    if index == 0 {
        return NotePosition {
            kind: PositionKind::Center,
            index,
            angle: 0.0,
            radius: 0.0,
            ring_position: None,
        };
    }

    let ring = (count - 1) as f64;
    NotePosition {
        kind: PositionKind::Surrounding,
        index,
        angle: (index - 1) as f64 * 360.0 / ring,
        radius: 1.0,
        ring_position: Some(index - 1),
    }
}

impl InstrumentAdapter for HandPanAdapter {
    fn config(&self) -> &InstrumentConfig {
        &self.config
    }

    fn default_options(&self) -> AdapterOptions {
        let config = self.config();
        AdapterOptions {
            octave: config.default_octave,
            note_count: config.note_count,
            layout: config.note_layout,
            center_note: Some(true),
            circular_layout: Some(true),
            symmetrical: Some(false),
            extras: Default::default(),
        }
    }

    fn validate_options(&self, options: &AdapterOptions) -> bool {
        if let NoteCount::Fixed(count) = options.note_count {
            if !PLAYABLE_NOTE_COUNTS.contains(&count) {
                warn!(
                    count,
                    "HandPan layouts usually have 5 to 12 notes; continuing anyway"
                );
            }
        }
        true
    }

    fn adapt_scale(&self, scale: &ScaleResult, options: &GenerationOptions) -> Result<AdaptedLayout> {
        let merged = self.merge_options(options);
        // Advisory: unusual counts are logged and still laid out
        self.validate_options(&merged);

        let notes = &scale.notes;
        let target = match merged.note_count {
            NoteCount::Fixed(count) => count,
            NoteCount::Variable => notes.len(),
        };

        let mut selected = self.filter_notes_by_octave_range(&notes[..target.min(notes.len())]);
        if selected.len() < target {
            selected = self.extend_scale_to_fill(notes, target);
        }

        let count = selected.len();
        let adapted_notes: Vec<AdaptedNote> = selected
            .into_iter()
            .enumerate()
            .map(|(index, note)| AdaptedNote {
                formatted: self.format_note(note.note, note.octave),
                position: circular_position(index, count),
                note,
            })
            .collect();

        Ok(AdaptedLayout {
            center_note: adapted_notes.first().cloned(),
            note_count: adapted_notes.len(),
            adapted_notes,
            layout: self.note_layout(),
            instrument: self.instrument(),
            instrument_config: *self.config(),
            adaptation_options: merged,
        })
    }
}
