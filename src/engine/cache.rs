// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Bounded FIFO cache of generated scales.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::result::{GenerationOptions, ScaleResult};

/// Cache key for a generation request: `"{key}-{scale_type}-{options as JSON}"`
///
/// Options serialize with extras in insertion order, so equal option sets
/// built in a different order produce different keys.
pub fn cache_key(key: &str, scale_type: &str, options: &GenerationOptions) -> String {
    let options = serde_json::to_string(options).unwrap_or_else(|_| "{}".to_string());
    format!("{}-{}-{}", key, scale_type, options)
}

/// Cache statistics as reported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<usize>,
}

/// Insertion-ordered cache; when full, the oldest insertion is evicted
#[derive(Debug)]
pub struct ScaleCache {
    entries: HashMap<String, Arc<ScaleResult>>,
    order: VecDeque<String>,
    max_size: usize,
}

impl ScaleCache {
    /// Create a cache holding at most `max_size` entries (minimum 1)
    pub fn new(max_size: usize) -> Self {
        let max_size = max_size.max(1);
        Self {
            entries: HashMap::with_capacity(max_size),
            order: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    pub fn get(&self, key: &str) -> Option<Arc<ScaleResult>> {
        self.entries.get(key).cloned()
    }

    /// Store a result, evicting the oldest entry first if the cache is full
    ///
    /// Re-inserting an existing key replaces its value but keeps its
    /// original position in the eviction order.
    pub fn set(&mut self, key: String, result: Arc<ScaleResult>) {
        if self.entries.contains_key(&key) {
            self.entries.insert(key, result);
            return;
        }

        if self.entries.len() >= self.max_size {
            if let Some(oldest) = self.order.pop_front() {
                debug!(key = %oldest, "evicting cached scale");
                self.entries.remove(&oldest);
            }
        }

        self.order.push_back(key.clone());
        self.entries.insert(key, result);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            enabled: true,
            size: Some(self.len()),
            max_size: Some(self.max_size),
        }
    }
}
