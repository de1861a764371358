use crate::{params::ParamSnapshot, MIN_TIME};

/*
ADSR Envelope Implementation
============================

This module implements a linear ADSR envelope generator - the amplitude
control of every voice.

Vocabulary
----------

  level       The envelope's current output value (0.0 to 1.0). This multiplies
              the oscillator signal to control its amplitude over time.

  stage       Which phase of the envelope we're in: Idle, Attack, Decay,
              Sustain, or Release. A state machine governs transitions.

  peak        The level the attack ramps up to (the `aVel` parameter).

  sustain     The level held while the key stays down (the `sTime` parameter,
              which the patch reuses as a level rather than a duration).

  shape       The stage durations and levels for one sample, read from the
              live parameter snapshot.


The Shape: Linear Ramps
-----------------------

  Level
   peak ┐     ╱╲
        │    ╱  ╲___________
    S   │   ╱               ╲
        │  ╱                 ╲
    0.0 └─╱───────────────────╲──→ Time
        Attack Decay  Sustain  Release
         (A)   (D)      (S)      (R)


Counting Samples
----------------

Each timed stage is a fixed number of samples:

    stage_samples = round(time_seconds * sample_rate), at least 1

and the level is interpolated from where the stage started:

    level = start + (target - start) * elapsed / stage_samples

Counting samples instead of accumulating an increment means the attack lands
on the peak after exactly `aTime * sample_rate` samples, with no float drift
leaving it one sample short or long. The shape is re-read every sample, so
automating a stage time while it runs bends the remaining ramp rather than
restarting it.


The State Machine
-----------------

    Idle ──note_on──→ Attack ──elapsed──→ Decay ──elapsed──→ Sustain
      ↑                  │                  │                   │
      │                  └──── note_off ────┴──── note_off ─────┤
      │                                                         ↓
      └───────────── elapsed or level ≤ floor ─────────────  Release

note_off enters Release from ANY sounding stage, starting from the CURRENT
level. Releasing halfway through the attack ramps down from there instead of
jumping to the sustain level, which would click.
*/

/// Level below which a releasing envelope is treated as silent.
pub const SILENCE_FLOOR: f32 = 1.0e-5;

/// The current stage of the envelope state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Idle,    // Gate low, envelope inactive, level = 0
    Attack,  // Gate just went high, ramping up to the peak
    Decay,   // Reached peak, ramping to sustain level
    Sustain, // Holding at sustain level while gate is high
    Release, // Gate went low, ramping down to 0
}

/// Stage durations and levels, sampled from the parameter snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeShape {
    pub attack_time: f32,   // seconds to ramp 0 → peak
    pub peak_level: f32,    // attack target
    pub decay_time: f32,    // seconds to ramp peak → sustain
    pub sustain_level: f32, // level to hold
    pub release_time: f32,  // seconds to ramp current → 0
}

impl EnvelopeShape {
    pub fn adsr(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack_time: attack.max(MIN_TIME),
            peak_level: 1.0,
            decay_time: decay.max(MIN_TIME),
            sustain_level: sustain.clamp(0.0, 1.0),
            release_time: release.max(MIN_TIME),
        }
    }

    pub fn with_peak(mut self, peak: f32) -> Self {
        self.peak_level = peak.clamp(0.0, 1.0);
        self
    }

    /// `aVel` is the peak, `sTime` the sustain level; `dVel`, `sVel` and `rVel`
    /// do not shape the amplitude.
    pub fn from_params(params: &ParamSnapshot) -> Self {
        Self::adsr(
            params.attack_time,
            params.decay_time,
            params.sustain_time,
            params.release_time,
        )
        .with_peak(params.attack_vel)
    }
}

impl Default for EnvelopeShape {
    fn default() -> Self {
        Self::from_params(&ParamSnapshot::default())
    }
}

#[inline]
fn stage_samples(time: f32, sample_rate: f32) -> u32 {
    (time.max(MIN_TIME) * sample_rate).round().max(1.0) as u32
}

#[derive(Debug, Clone)]
pub struct Envelope {
    // Runtime state (changes every sample)
    stage: EnvelopeState, // current stage of the state machine
    level: f32,           // current output value (0.0 - 1.0)

    // Ramp bookkeeping for the current stage
    start_level: f32,     // level when the stage began
    elapsed_samples: u32, // samples elapsed since the stage began
}

impl Envelope {
    pub fn new() -> Self {
        Self {
            stage: EnvelopeState::Idle,
            level: 0.0,
            start_level: 0.0,
            elapsed_samples: 0,
        }
    }

    /// Gate high: start the attack phase from zero.
    ///
    /// This resets the envelope for a clean retrigger - essential for
    /// repeated notes to sound distinct rather than "tied together".
    pub fn note_on(&mut self) {
        self.level = 0.0;
        self.enter(EnvelopeState::Attack);
    }

    /// Gate low: start the release phase from current level.
    pub fn note_off(&mut self) {
        if matches!(self.stage, EnvelopeState::Idle | EnvelopeState::Release) {
            return;
        }
        self.enter(EnvelopeState::Release);
    }

    fn enter(&mut self, stage: EnvelopeState) {
        self.stage = stage;
        self.start_level = self.level;
        self.elapsed_samples = 0;
    }

    /// Advance one timed stage; returns true once the stage has run its length.
    #[inline]
    fn ramp(&mut self, target: f32, time: f32, sample_rate: f32) -> bool {
        let total = stage_samples(time, sample_rate);
        self.elapsed_samples = self.elapsed_samples.saturating_add(1);

        if self.elapsed_samples >= total {
            self.level = target;
            return true;
        }

        let progress = self.elapsed_samples as f32 / total as f32;
        self.level = self.start_level + (target - self.start_level) * progress;
        false
    }

    /// Advance the envelope by one sample and return the new level.
    pub fn next_sample(&mut self, shape: &EnvelopeShape, sample_rate: f32) -> f32 {
        match self.stage {
            EnvelopeState::Idle => {
                self.level = 0.0;
            }

            EnvelopeState::Attack => {
                if self.ramp(shape.peak_level, shape.attack_time, sample_rate) {
                    self.enter(EnvelopeState::Decay);
                }
            }

            EnvelopeState::Decay => {
                if self.ramp(shape.sustain_level, shape.decay_time, sample_rate) {
                    self.enter(EnvelopeState::Sustain);
                }
            }

            EnvelopeState::Sustain => {
                // Hold at sustain level until gate goes low
                self.level = shape.sustain_level;
            }

            EnvelopeState::Release => {
                let done = self.ramp(0.0, shape.release_time, sample_rate);
                if done || self.level <= SILENCE_FLOOR {
                    self.level = 0.0;
                    self.enter(EnvelopeState::Idle);
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
        self.level
    }

    /// Render a block of envelope values into the buffer.
    pub fn render(&mut self, buffer: &mut [f32], shape: &EnvelopeShape, sample_rate: f32) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(shape, sample_rate);
        }
    }

    /// Returns true if the envelope is producing output (not idle).
    pub fn is_active(&self) -> bool {
        !matches!(self.stage, EnvelopeState::Idle)
    }

    /// Reset to idle state.
    pub fn reset(&mut self) {
        self.level = 0.0;
        self.enter(EnvelopeState::Idle);
    }

    /// Get the current envelope level (0.0 to 1.0)
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Get the current envelope stage
    pub fn state(&self) -> EnvelopeState {
        self.stage
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new()
    }
}
