use std::{f32::consts::TAU, fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParamError;

/*
Audio Oscillator
================

The oscillator is the raw sound source of a voice. It keeps a phase in
[0, 1) that advances by `frequency / sample_rate` every sample and wraps back
around at 1.0. The waveform is a pure function of that phase:

    phase   0.0        0.25       0.5        0.75       1.0
            |          |          |          |          |
  Sine      0    →     1    →     0    →    -1    →     0
  Square    1          1         -1         -1          1
  Triangle  1    →     0    →    -1    →     0    →     1
  Saw      -1    →   -0.5   →     0    →    0.5   →     1

Sine: a single frequency, no harmonics. Smooth and hollow.
Square: odd harmonics falling off as 1/n. Woody, clarinet-like.
Triangle: odd harmonics falling off as 1/n². Soft, between sine and square.
Saw: every harmonic falling off as 1/n. Bright and buzzy.

None of these are band-limited. Square and saw alias audibly in the top
octaves, which is the sound of the original plugin.

Phase Accumulation
------------------

    increment = frequency / sample_rate

At 440 Hz and 48 kHz that is 0.009166..., so one cycle takes ~109 samples.
`next_sample` advances first and then reads the waveform, so a freshly reset
sine oscillator produces a non-zero first sample.
*/

/// Waveform shapes, in the order of the host-facing choice parameter.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Triangle,
    Saw,
}

impl Waveform {
    pub const ALL: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Triangle,
        Waveform::Saw,
    ];

    /// Index of this shape in the choice parameter (Sine = 0 … Saw = 3).
    pub fn index(self) -> u8 {
        match self {
            Waveform::Sine => 0,
            Waveform::Square => 1,
            Waveform::Triangle => 2,
            Waveform::Saw => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "Sine",
            Waveform::Square => "Square",
            Waveform::Triangle => "Triangle",
            Waveform::Saw => "Saw",
        }
    }
}

impl TryFrom<u8> for Waveform {
    type Error = ParamError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Waveform::ALL
            .get(index as usize)
            .copied()
            .ok_or(ParamError::WaveformIndex(index))
    }
}

impl FromStr for Waveform {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Waveform::ALL
            .into_iter()
            .find(|w| w.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParamError::UnknownWaveform(s.to_string()))
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One sample of `waveform` at `phase` (expected in [0, 1)). Output is in [-1, 1].
#[inline]
pub fn waveform_sample(waveform: Waveform, phase: f32) -> f32 {
    match waveform {
        Waveform::Sine => (TAU * phase).sin(),
        Waveform::Square => {
            if phase < 0.5 {
                1.0
            } else {
                -1.0
            }
        }
        Waveform::Triangle => 4.0 * (phase - 0.5).abs() - 1.0,
        Waveform::Saw => 2.0 * phase - 1.0,
    }
}

/// Phase accumulator feeding [`waveform_sample`].
#[derive(Debug, Clone, Default)]
pub struct OscillatorBlock {
    phase: f32,
}

impl OscillatorBlock {
    pub fn new() -> Self {
        Self { phase: 0.0 }
    }

    /// Restart the cycle at phase 0.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Advance by one sample and return the waveform at the new phase.
    #[inline]
    pub fn next_sample(&mut self, waveform: Waveform, frequency: f32, sample_rate: f32) -> f32 {
        let increment = frequency / sample_rate;
        // fract() also covers increments above 1.0 (pitch above Nyquist)
        self.phase = (self.phase + increment).fract();
        waveform_sample(waveform, self.phase)
    }

    /// Fill `out` with consecutive samples at a fixed frequency.
    pub fn render(&mut self, out: &mut [f32], waveform: Waveform, frequency: f32, sample_rate: f32) {
        for sample in out.iter_mut() {
            *sample = self.next_sample(waveform, frequency, sample_rate);
        }
    }
}
