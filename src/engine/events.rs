// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Engine notifications.
//!
//! Subscribers receive events over `std::sync::mpsc` channels. Sending never
//! blocks the engine; subscribers whose receiver was dropped are removed on
//! the next emit.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::result::{GenerationOptions, ScaleResult};
use crate::music::{PitchClass, ScaleType};

/// Arguments of the call that failed, carried by validation errors
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "operation")]
pub enum FailedCall {
    GenerateScale {
        key: String,
        scale_type: String,
        options: GenerationOptions,
    },
    TransposeKey {
        from_key: String,
        to_key: String,
        notes: Vec<String>,
    },
}

/// Events emitted by [`ScaleKeyEngine`](super::ScaleKeyEngine)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "event")]
pub enum ScaleKeyEvent {
    /// A scale was generated (not emitted for cache hits)
    ScaleGenerated {
        scale: Arc<ScaleResult>,
        timestamp: DateTime<Utc>,
    },
    /// The current key changed
    KeyChanged {
        key: PitchClass,
        scale_type: ScaleType,
        scale: Arc<ScaleResult>,
        timestamp: DateTime<Utc>,
    },
    /// The current scale type changed
    ScaleChanged {
        key: PitchClass,
        scale_type: ScaleType,
        scale: Arc<ScaleResult>,
        timestamp: DateTime<Utc>,
    },
    /// A note list was transposed between keys
    TranspositionComplete {
        from_key: PitchClass,
        to_key: PitchClass,
        original_notes: Vec<String>,
        transposed_notes: Vec<String>,
        timestamp: DateTime<Utc>,
    },
    /// A generation or transposition call failed
    ValidationError {
        error: String,
        call: FailedCall,
        timestamp: DateTime<Utc>,
    },
}

impl ScaleKeyEvent {
    /// Kebab-case event name, e.g. "scale-generated"
    pub fn name(&self) -> &'static str {
        match self {
            ScaleKeyEvent::ScaleGenerated { .. } => "scale-generated",
            ScaleKeyEvent::KeyChanged { .. } => "key-changed",
            ScaleKeyEvent::ScaleChanged { .. } => "scale-changed",
            ScaleKeyEvent::TranspositionComplete { .. } => "transposition-complete",
            ScaleKeyEvent::ValidationError { .. } => "validation-error",
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ScaleKeyEvent::ScaleGenerated { timestamp, .. }
            | ScaleKeyEvent::KeyChanged { timestamp, .. }
            | ScaleKeyEvent::ScaleChanged { timestamp, .. }
            | ScaleKeyEvent::TranspositionComplete { timestamp, .. }
            | ScaleKeyEvent::ValidationError { timestamp, .. } => *timestamp,
        }
    }
}

/// Fan-out of events to any number of subscribers
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<Sender<ScaleKeyEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber
    pub fn subscribe(&mut self) -> Receiver<ScaleKeyEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver an event to every live subscriber
    pub fn emit(&mut self, event: ScaleKeyEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
