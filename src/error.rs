//! Error types for the control side of the engine.
//!
//! The render path never returns errors; these only surface when parameters
//! are addressed by name or configuration is loaded.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised when addressing parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    /// No parameter with this id exists
    #[error("unknown parameter: {0}")]
    UnknownParam(String),

    /// Waveform name did not match any known shape
    #[error("unknown waveform: {0}")]
    UnknownWaveform(String),

    /// Waveform choice index outside 0..=3
    #[error("waveform index out of range: {0}")]
    WaveformIndex(u8),
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[cfg(feature = "serde")]
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A field holds a value the engine cannot run with
    #[error("invalid value for '{field}': {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A patch entry named an unknown parameter or waveform
    #[error(transparent)]
    Param(#[from] ParamError),
}
