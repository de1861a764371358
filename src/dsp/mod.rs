//! Low-level DSP primitives used by the voices.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside voice structs. They stay focused on the
//! signal-processing math; the voice layer handles note bookkeeping.

/// Attack/decay/sustain/release envelope generator.
pub mod envelope;
/// Oscillator waveforms and phase accumulation.
pub mod oscillator;

pub use envelope::{Envelope, EnvelopeShape, EnvelopeState};
pub use oscillator::{waveform_sample, OscillatorBlock, Waveform};
