// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale patterns and note generation.
//!
//! A [`ScalePattern`] wraps an interval/degree pattern (usually a catalog
//! entry) and turns it into concrete notes for a root key and octave.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::catalog::{ScaleCategory, ScalePatternDefinition};
use super::note::{Note, PitchClass};

/// Optional descriptive data attached to a pattern
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternMetadata {
    /// Catalog grouping
    #[serde(default)]
    pub category: Option<ScaleCategory>,
    /// Short description
    #[serde(default)]
    pub description: Option<String>,
    /// Modes derived from this pattern
    #[serde(default)]
    pub modes: Vec<String>,
    /// Key signature follows the relative major
    #[serde(default)]
    pub relative_to_major: bool,
}

/// A named interval pattern that can generate notes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalePattern {
    name: String,
    intervals: Vec<u8>,
    degrees: Vec<String>,
    #[serde(default)]
    metadata: PatternMetadata,
}

impl ScalePattern {
    /// Create a pattern from raw intervals and degree labels
    ///
    /// No validation happens here; use [`ScalePattern::is_valid`] to check
    /// the pattern invariants.
    pub fn new(
        name: impl Into<String>,
        intervals: Vec<u8>,
        degrees: Vec<String>,
        metadata: PatternMetadata,
    ) -> Self {
        Self {
            name: name.into(),
            intervals,
            degrees,
            metadata,
        }
    }

    /// Create a pattern from a catalog entry
    pub fn from_definition(def: &ScalePatternDefinition) -> Self {
        Self {
            name: def.name.to_string(),
            intervals: def.intervals.to_vec(),
            degrees: def.degrees.iter().map(|d| d.to_string()).collect(),
            metadata: PatternMetadata {
                category: Some(def.category),
                description: Some(def.description.to_string()),
                modes: def.modes.iter().map(|m| m.to_string()).collect(),
                relative_to_major: def.relative_to_major,
            },
        }
    }

    /// Get the pattern name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the intervals (semitones from root)
    pub fn intervals(&self) -> &[u8] {
        &self.intervals
    }

    /// Get the degree labels
    pub fn degrees(&self) -> &[String] {
        &self.degrees
    }

    /// Get the metadata
    pub fn metadata(&self) -> &PatternMetadata {
        &self.metadata
    }

    /// Number of notes in one octave of this pattern
    pub fn note_count(&self) -> usize {
        self.intervals.len()
    }

    /// Check whether the pattern contains an interval
    pub fn has_interval(&self, interval: u8) -> bool {
        self.intervals.contains(&interval)
    }

    /// Category, or `Uncategorized` when none was given
    pub fn category(&self) -> ScaleCategory {
        self.metadata.category.unwrap_or(ScaleCategory::Uncategorized)
    }

    /// Description, falling back to a generated one
    pub fn description(&self) -> String {
        match &self.metadata.description {
            Some(description) => description.clone(),
            None => format!("{} with {} notes", self.name, self.note_count()),
        }
    }

    /// Generate one pass of the pattern starting at `octave`
    ///
    /// Notes whose absolute index passes B roll over into the next octave.
    /// The roll-over saturates at `i32::MAX`.
    pub fn generate_notes(&self, root: PitchClass, octave: i32) -> Vec<Note> {
        let root_index = root.index() as i32;

        self.intervals
            .iter()
            .zip(self.degrees.iter())
            .map(|(&interval, degree)| {
                let absolute = root_index + interval as i32;
                let note = PitchClass::from_index(absolute);
                let final_octave = octave.saturating_add(absolute.div_euclid(12));
                Note::new(note, final_octave, degree.clone(), interval)
            })
            .collect()
    }

    /// All pattern notes whose octave lies within `[start_octave, end_octave]`
    pub fn notes_in_range(&self, root: PitchClass, start_octave: i32, end_octave: i32) -> Vec<Note> {
        let mut notes = Vec::new();

        for octave in start_octave..=end_octave {
            notes.extend(
                self.generate_notes(root, octave)
                    .into_iter()
                    .filter(|n| n.octave >= start_octave && n.octave <= end_octave),
            );
        }

        notes
    }

    /// Check the pattern invariants
    ///
    /// Name is non-empty, one degree per interval, root at 0 and intervals
    /// strictly ascending.
    pub fn is_valid(&self) -> bool {
        if self.name.is_empty() || self.intervals.is_empty() {
            return false;
        }

        if self.intervals.len() != self.degrees.len() {
            return false;
        }

        if self.intervals.windows(2).any(|w| w[1] <= w[0]) {
            return false;
        }

        self.intervals[0] == 0
    }
}

impl fmt::Display for ScalePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
