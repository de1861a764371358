use crate::{
    dsp::{
        envelope::{Envelope, EnvelopeState},
        oscillator::OscillatorBlock,
    },
    io::converter::midi_note_to_freq,
    synth::context::RenderCtx,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Free,      // Available for allocation
    Active,    // Playing, envelope in attack/decay/sustain
    Releasing, // Key released, envelope in release phase
}

/// A single voice: one oscillator shaped by one envelope.
#[derive(Debug, Clone)]
pub struct Voice {
    pitch: Option<u8>,
    velocity: f32,
    frequency: f32,
    age: u64,
    osc: OscillatorBlock,
    env: Envelope,
}

impl Voice {
    pub fn new() -> Self {
        Self {
            pitch: None,
            velocity: 0.0,
            frequency: 0.0,
            age: 0,
            osc: OscillatorBlock::new(),
            env: Envelope::new(),
        }
    }

    /// Start playing `pitch`. Returns false and changes nothing if the voice
    /// is still sounding.
    pub fn assign(&mut self, pitch: u8, velocity: f32, age: u64) -> bool {
        if !self.is_free() {
            return false;
        }

        self.pitch = Some(pitch);
        self.velocity = velocity.clamp(0.0, 1.0);
        self.frequency = midi_note_to_freq(pitch);
        self.age = age;

        self.osc.reset();
        self.env.note_on();
        true
    }

    /// Gate low. Only affects a voice still in attack, decay or sustain.
    pub fn release(&mut self) {
        if self.state() == VoiceState::Active {
            self.env.note_off();
        }
    }

    /// Advance one sample and return `oscillator * envelope * level`.
    #[inline]
    pub fn render_sample(&mut self, ctx: &RenderCtx) -> f32 {
        if self.is_free() {
            return 0.0;
        }

        let amplitude = self.env.next_sample(&ctx.shape, ctx.sample_rate);
        let sample = self
            .osc
            .next_sample(ctx.params.waveform, self.frequency, ctx.sample_rate);

        // Envelope finished: hand the voice back to the pool
        if !self.env.is_active() {
            self.pitch = None;
        }

        sample * amplitude * ctx.params.level
    }

    /// Silence immediately and return to the pool.
    pub fn reset(&mut self) {
        self.env.reset();
        self.osc.reset();
        self.pitch = None;
        self.velocity = 0.0;
    }

    pub fn is_free(&self) -> bool {
        self.pitch.is_none()
    }

    pub fn is_active(&self) -> bool {
        self.env.is_active()
    }

    pub fn state(&self) -> VoiceState {
        match self.env.state() {
            EnvelopeState::Idle => VoiceState::Free,
            EnvelopeState::Release => VoiceState::Releasing,
            _ => VoiceState::Active,
        }
    }

    pub fn pitch(&self) -> Option<u8> {
        self.pitch
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn envelope_level(&self) -> f32 {
        self.env.level()
    }

    pub fn envelope_state(&self) -> EnvelopeState {
        self.env.state()
    }

    pub fn phase(&self) -> f32 {
        self.osc.phase()
    }
}

impl Default for Voice {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ParamId, ParamSnapshot};

    const SAMPLE_RATE: f32 = 1_000.0;

    fn ctx(params: ParamSnapshot) -> RenderCtx {
        RenderCtx::new(SAMPLE_RATE, params)
    }

    #[test]
    fn assign_only_takes_free_voices() {
        let mut voice = Voice::new();
        assert!(voice.assign(60, 0.7, 3));
        assert_eq!(voice.pitch(), Some(60));
        assert_eq!(voice.state(), VoiceState::Active);

        assert!(!voice.assign(64, 1.0, 4));
        assert_eq!(voice.pitch(), Some(60));
        assert_eq!(voice.age(), 3);
    }

    #[test]
    fn output_is_scaled_by_envelope_and_level() {
        let params = ParamSnapshot::default()
            .with(ParamId::AttackTime, 0.0)
            .with(ParamId::AttackVel, 1.0)
            .with(ParamId::DecayTime, 1.0)
            .with(ParamId::Level, 0.5);
        let ctx = ctx(params);

        let mut voice = Voice::new();
        voice.assign(69, 1.0, 0);
        for _ in 0..200 {
            let s = voice.render_sample(&ctx);
            assert!(s.abs() <= 0.5 + 1e-6);
        }
    }

    #[test]
    fn voice_frees_itself_after_release() {
        let params = ParamSnapshot::default()
            .with(ParamId::AttackTime, 0.01)
            .with(ParamId::ReleaseTime, 0.05);
        let ctx = ctx(params);

        let mut voice = Voice::new();
        voice.assign(60, 1.0, 0);
        for _ in 0..20 {
            voice.render_sample(&ctx);
        }

        voice.release();
        assert_eq!(voice.state(), VoiceState::Releasing);
        assert_eq!(voice.pitch(), Some(60), "pitch held through release");

        for _ in 0..50 {
            voice.render_sample(&ctx);
        }
        assert!(voice.is_free());
        assert!(!voice.is_active());
        assert_eq!(voice.render_sample(&ctx), 0.0);
    }

    #[test]
    fn release_on_a_free_voice_is_a_no_op() {
        let mut voice = Voice::new();
        voice.release();
        assert_eq!(voice.state(), VoiceState::Free);
        assert!(voice.is_free());
    }

    #[test]
    fn assign_resets_phase() {
        let ctx = ctx(ParamSnapshot::default());
        let mut voice = Voice::new();
        voice.assign(72, 1.0, 0);
        for _ in 0..37 {
            voice.render_sample(&ctx);
        }
        voice.reset();
        assert_eq!(voice.phase(), 0.0);
        assert!(voice.assign(48, 1.0, 1));
        assert_eq!(voice.phase(), 0.0);
    }
}
