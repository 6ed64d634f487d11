// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for the scale/key engine.
//!
//! Engine settings can be loaded from YAML or TOML files. Every field has a
//! default, so an empty `engine:` section (or no file at all) yields the
//! stock engine: C major, hand-pan adaptation, a 100-entry cache.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::instruments::Instrument;
use crate::music::{PitchClass, ScaleType};

/// Root of a configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfigFile {
    /// Engine settings
    #[serde(default)]
    pub engine: EngineConfig,
}

impl ConfigFile {
    /// Load a configuration file, choosing the format by extension
    ///
    /// `.toml` files are parsed as TOML; anything else as YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config = if is_toml(path) {
            Self::from_toml(&contents)?
        } else {
            Self::from_yaml(&contents)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Parse a configuration from a TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML configuration")
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize configuration to TOML")
    }

    /// Save the configuration, choosing the format by extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = if is_toml(path) {
            self.to_toml()?
        } else {
            self.to_yaml()?
        };
        fs::write(path, text).with_context(|| format!("Failed to write config file: {:?}", path))
    }

    /// Check the engine settings
    pub fn validate(&self) -> Result<()> {
        self.engine.validate()
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false)
}

/// Engine settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Key generated at startup (e.g., "C", "F#")
    #[serde(default = "default_key")]
    pub default_key: String,
    /// Scale type generated at startup (e.g., "major", "dorian")
    #[serde(default = "default_scale")]
    pub default_scale: String,
    /// Instrument applied when a request names none
    #[serde(default = "default_instrument")]
    pub instrument: Option<Instrument>,
    /// Cache generated scales
    #[serde(default = "default_cache")]
    pub cache: bool,
    /// Maximum cached scales
    #[serde(default = "default_cache_size")]
    pub cache_size: usize,
    /// Octave used when a request names none
    #[serde(default = "default_octave")]
    pub default_octave: i32,
    /// Log filter used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_key() -> String {
    "C".to_string()
}
fn default_scale() -> String {
    "major".to_string()
}
fn default_instrument() -> Option<Instrument> {
    Some(Instrument::HandPan)
}
fn default_cache() -> bool {
    true
}
fn default_cache_size() -> usize {
    100
}
fn default_octave() -> i32 {
    4
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_key: default_key(),
            default_scale: default_scale(),
            instrument: default_instrument(),
            cache: default_cache(),
            cache_size: default_cache_size(),
            default_octave: default_octave(),
            log_level: default_log_level(),
        }
    }
}

impl EngineConfig {
    /// Reject settings the engine cannot start with
    pub fn validate(&self) -> Result<()> {
        if PitchClass::from_name(&self.default_key).is_none() {
            bail!("Invalid default key: {}", self.default_key);
        }
        if ScaleType::from_key(&self.default_scale).is_none() {
            bail!("Invalid default scale: {}", self.default_scale);
        }
        if self.cache && self.cache_size == 0 {
            bail!("cache_size must be at least 1 when caching is enabled");
        }
        Ok(())
    }
}
