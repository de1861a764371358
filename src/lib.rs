//! Realtime-safe polyphonic voice engine.
//!
//! Note events go in, a mono mix comes out (duplicated to every output
//! channel). The layers, leaf to root:
//!
//! - [`dsp`]: waveform oscillator and linear ADSR envelope
//! - [`synth`]: voices, the voice pool and the block renderer
//! - [`params`]: parameter ids, snapshots and the lock-free parameter store
//! - [`io`]: MIDI decoding and output buffers
//! - [`config`]: engine configuration and patch loading

pub mod config;
pub mod dsp;
pub mod error;
pub mod io;
pub mod params;
pub mod synth; // Voice management and polyphony

pub use config::EngineConfig;
#[cfg(feature = "serde")]
pub use config::SynthConfig;
pub use error::{ConfigError, ParamError};
pub use params::{ParamId, ParamSnapshot, SharedParams};
pub use synth::{
    allocator::VoiceStealing,
    event::{NoteEvent, NoteEventKind},
    poly::PolySynth,
};

/// Shortest stage duration in seconds. Every time parameter is clamped to this.
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;

/// Default pool size, matching the five voices of the classic patch.
pub const DEFAULT_POLYPHONY: usize = 5;

/// Upper bound accepted for `EngineConfig::max_voices`.
pub const MAX_VOICES: usize = 64;
