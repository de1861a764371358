//! Benchmarks for the voice pool.

use std::{hint::black_box, sync::Arc};

use criterion::{BenchmarkId, Criterion};
use saavy_synth::{
    dsp::Waveform, io::AudioOutput, EngineConfig, NoteEvent, ParamId, ParamSnapshot, PolySynth,
    SharedParams,
};

use crate::BLOCK_SIZES;

const NO_EVENTS: &[NoteEvent] = &[];

fn sustained_pool(waveform: Waveform, notes: &[i32]) -> PolySynth {
    let patch = ParamSnapshot::default()
        .with(ParamId::AttackTime, 0.01)
        .with_waveform(waveform);
    let mut synth = PolySynth::new(
        &EngineConfig::default(),
        Arc::new(SharedParams::from_snapshot(&patch)),
    );
    synth.prepare(48_000.0);
    for &note in notes {
        synth.note_on(note, 1.0);
    }
    synth
}

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");

    for &size in BLOCK_SIZES {
        let mut output = AudioOutput::new(2, size);

        // === IDLE POOL ===
        // Baseline: parameter reads and an empty voice scan
        let mut idle = sustained_pool(Waveform::Sine, &[]);
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| {
                idle.render_block(black_box(NO_EVENTS), &mut output, size);
            })
        });

        // === SINGLE NOTE ===
        let mut single = sustained_pool(Waveform::Sine, &[69]);
        group.bench_with_input(BenchmarkId::new("single_sine", size), &size, |b, _| {
            b.iter(|| {
                single.render_block(black_box(NO_EVENTS), &mut output, size);
            })
        });

        // === FULL POOL ===
        // Five sustained voices, the default polyphony
        let mut chord = sustained_pool(Waveform::Sine, &[57, 60, 64, 67, 72]);
        group.bench_with_input(BenchmarkId::new("full_pool_sine", size), &size, |b, _| {
            b.iter(|| {
                chord.render_block(black_box(NO_EVENTS), &mut output, size);
            })
        });

        let mut saws = sustained_pool(Waveform::Saw, &[57, 60, 64, 67, 72]);
        group.bench_with_input(BenchmarkId::new("full_pool_saw", size), &size, |b, _| {
            b.iter(|| {
                saws.render_block(black_box(NO_EVENTS), &mut output, size);
            })
        });

        // === RETRIGGERING ===
        // Note-on/note-off pairs inside every block
        let mut busy = sustained_pool(Waveform::Triangle, &[]);
        let events = [
            NoteEvent::note_on(60, 1.0, 0),
            NoteEvent::note_on(64, 1.0, size / 4),
            NoteEvent::note_off(60, size / 2),
            NoteEvent::note_off(64, size - 1),
        ];
        group.bench_with_input(BenchmarkId::new("retrigger", size), &size, |b, _| {
            b.iter(|| {
                busy.render_block(black_box(&events), &mut output, size);
            })
        });
    }

    group.finish();
}
