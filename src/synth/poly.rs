use std::sync::Arc;

use crate::{
    config::EngineConfig,
    io::{converter::velocity_to_gain, AudioOutput},
    params::SharedParams,
    synth::{
        allocator::{allocate, VoiceStealing},
        context::RenderCtx,
        event::{midi_pitch, NoteEvent, NoteEventKind},
        message::{MessageReceiver, SynthMessage},
        voice::Voice,
    },
};

/// Fixed-size voice pool and block renderer.
///
/// All voices are allocated up front; nothing on the render path allocates,
/// locks or logs. Parameters come from a shared [`SharedParams`] and are
/// re-read once per rendered sample, so automation lands with sample accuracy.
pub struct PolySynth {
    voices: Vec<Voice>,
    params: Arc<SharedParams>,
    sample_rate: f32,
    stealing: VoiceStealing,
    frame_counter: u64,
    dropped_notes: u64,
}

impl PolySynth {
    pub fn new(config: &EngineConfig, params: Arc<SharedParams>) -> Self {
        let voices = (0..config.max_voices.max(1)).map(|_| Voice::new()).collect();

        Self {
            voices,
            params,
            sample_rate: usable_rate(config.sample_rate).unwrap_or(DEFAULT_SAMPLE_RATE),
            stealing: config.stealing,
            frame_counter: 0,
            dropped_notes: 0,
        }
    }

    /// Set the sample rate and silence every voice. Call before rendering and
    /// whenever the host changes rate.
    ///
    /// A rate that is not finite and positive is ignored and the previous
    /// rate kept; voices are still silenced.
    pub fn prepare(&mut self, sample_rate: f32) {
        match usable_rate(sample_rate) {
            Some(rate) => self.sample_rate = rate,
            None => tracing::warn!(sample_rate, kept = self.sample_rate, "ignoring unusable sample rate"),
        }
        for voice in &mut self.voices {
            voice.reset();
        }
        self.frame_counter = 0;
        tracing::debug!(sample_rate = self.sample_rate, voices = self.voices.len(), "synth prepared");
    }

    /// Start a note on the first free voice. Returns whether a voice took it.
    ///
    /// Pitches outside 0..=127 are ignored. With a full pool the note is
    /// dropped unless a stealing policy is configured.
    pub fn note_on(&mut self, pitch: i32, velocity: f32) -> bool {
        let Some(pitch) = midi_pitch(pitch) else {
            return false;
        };

        let Some(idx) = allocate(&self.voices, self.stealing) else {
            self.dropped_notes += 1;
            return false;
        };

        let voice = &mut self.voices[idx];
        if !voice.is_free() {
            voice.reset();
        }
        voice.assign(pitch, velocity, self.frame_counter)
    }

    /// Release every voice holding `pitch`.
    pub fn note_off(&mut self, pitch: i32) {
        let Some(pitch) = midi_pitch(pitch) else {
            return;
        };

        for voice in &mut self.voices {
            if voice.pitch() == Some(pitch) {
                voice.release();
            }
        }
    }

    pub fn all_notes_off(&mut self) {
        for voice in &mut self.voices {
            voice.release();
        }
    }

    pub fn apply(&mut self, event: &NoteEvent) {
        match event.kind {
            NoteEventKind::NoteOn => {
                self.note_on(event.pitch, event.velocity);
            }
            NoteEventKind::NoteOff => self.note_off(event.pitch),
        }
    }

    pub fn handle_message(&mut self, msg: SynthMessage) {
        match msg {
            SynthMessage::NoteOn { note, velocity } => {
                self.note_on(note as i32, velocity_to_gain(velocity));
            }
            SynthMessage::NoteOff { note, .. } => self.note_off(note as i32),
            SynthMessage::AllNotesOff => self.all_notes_off(),
        }
    }

    /// Apply every queued control message. Call at the start of a block.
    pub fn drain_messages<R: MessageReceiver + ?Sized>(&mut self, rx: &mut R) {
        while let Some(msg) = rx.pop() {
            self.handle_message(msg);
        }
    }

    /// Render one sample of the mix.
    #[inline]
    pub fn render_sample(&mut self) -> f32 {
        let ctx = RenderCtx::new(self.sample_rate, self.params.snapshot());

        let mut sum = 0.0;
        for voice in &mut self.voices {
            if voice.is_active() {
                sum += voice.render_sample(&ctx);
            }
        }

        self.frame_counter += 1;
        sum
    }

    /// Walk `frames` samples, applying each event at its offset before the
    /// sample it lands on is rendered.
    #[inline]
    fn render_frames(
        &mut self,
        events: &[NoteEvent],
        frames: usize,
        mut write: impl FnMut(usize, f32),
    ) {
        let mut pending = events.iter().peekable();

        for i in 0..frames {
            while let Some(event) = pending.next_if(|e| e.offset <= i) {
                self.apply(event);
            }
            write(i, self.render_sample());
        }
        // events at or past `frames` fall outside this block and are ignored
    }

    /// Render `block_len` samples into every channel of `output`.
    ///
    /// The mono mix is duplicated to all channels. Rendering stops at the
    /// shorter of `block_len` and the output's length.
    ///
    /// Events whose offset is at or past the rendered length are dropped,
    /// including note-offs: a host that schedules one there leaves the note
    /// sounding until it is released again.
    pub fn render_block(&mut self, events: &[NoteEvent], output: &mut AudioOutput, block_len: usize) {
        let frames = block_len.min(output.frames());
        let buffers = &mut output.buffers;

        self.render_frames(events, frames, |i, sample| {
            for channel in buffers.iter_mut() {
                channel[i] = sample;
            }
        });
    }

    /// Render into an interleaved buffer of `channels` channels, as delivered
    /// by audio device callbacks.
    pub fn render_interleaved(&mut self, events: &[NoteEvent], data: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        let frames = data.len() / channels;

        self.render_frames(events, frames, |i, sample| {
            data[i * channels..(i + 1) * channels].fill(sample);
        });
    }

    /// Number of voices currently sounding.
    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn max_voices(&self) -> usize {
        self.voices.len()
    }

    /// Note-ons lost to a full pool since construction.
    pub fn dropped_notes(&self) -> u64 {
        self.dropped_notes
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn set_stealing(&mut self, stealing: VoiceStealing) {
        self.stealing = stealing;
    }
}

const DEFAULT_SAMPLE_RATE: f32 = 48_000.0;

fn usable_rate(sample_rate: f32) -> Option<f32> {
    (sample_rate.is_finite() && sample_rate > 0.0).then_some(sample_rate)
}
