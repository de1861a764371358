//! Engine configuration and patch files.
//!
//! A config file is TOML with two optional tables:
//!
//! ```toml
//! [engine]
//! sample_rate = 48000.0
//! max_voices = 5
//! stealing = "off"        # "off" | "oldest_releasing" | "oldest"
//!
//! [patch]
//! level = 0.5
//! aTime = 0.1
//! sTime = 0.5
//! waveform = "Saw"
//! ```
//!
//! Anything omitted keeps its default.

#[cfg(feature = "serde")]
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, synth::allocator::VoiceStealing, DEFAULT_POLYPHONY, MAX_VOICES};
#[cfg(feature = "serde")]
use crate::params::{ParamId, ParamSnapshot};

/// Construction-time settings for [`PolySynth`](crate::PolySynth).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Initial sample rate; `prepare` overrides it with the device rate.
    pub sample_rate: f32,
    /// Pool size, 1..=`MAX_VOICES`
    pub max_voices: usize,
    pub stealing: VoiceStealing,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(ConfigError::Invalid {
                field: "sample_rate",
                reason: format!("must be positive, got {}", self.sample_rate),
            });
        }
        if !(1..=MAX_VOICES).contains(&self.max_voices) {
            return Err(ConfigError::Invalid {
                field: "max_voices",
                reason: format!("must be between 1 and {MAX_VOICES}, got {}", self.max_voices),
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            max_voices: DEFAULT_POLYPHONY,
            stealing: VoiceStealing::Off,
        }
    }
}

/// Engine settings plus the patch to start with.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    pub engine: EngineConfig,
    pub patch: ParamSnapshot,
}

#[cfg(feature = "serde")]
impl SynthConfig {
    /// Parse and validate. Patch values are clamped into range.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let mut config: SynthConfig = toml::from_str(source)?;
        config.engine.validate()?;
        config.patch = config.patch.clamped();
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::info!(
            path = %path.display(),
            voices = config.engine.max_voices,
            waveform = %config.patch.waveform,
            "loaded synth config"
        );
        Ok(config)
    }

    /// Apply a `name=value` override to the patch, e.g. `aTime=0.2` or
    /// `waveform=Square`.
    pub fn apply_override(&mut self, assignment: &str) -> Result<(), ConfigError> {
        let Some((name, value)) = assignment.split_once('=') else {
            return Err(ConfigError::Invalid {
                field: "override",
                reason: format!("expected name=value, got '{assignment}'"),
            });
        };
        let (name, value) = (name.trim(), value.trim());

        if name == "waveform" {
            self.patch.waveform = value.parse()?;
            return Ok(());
        }

        let param: ParamId = name.parse()?;
        let value: f32 = value.parse().map_err(|_| ConfigError::Invalid {
            field: "override",
            reason: format!("'{value}' is not a number"),
        })?;
        self.patch.set(param, value);
        Ok(())
    }
}
