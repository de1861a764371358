//! Benchmarks for ADSR envelope generator.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_synth::dsp::envelope::{Envelope, EnvelopeShape};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Attack phase (ramping up)
        let shape = EnvelopeShape::adsr(10.0, 0.1, 0.7, 0.3);
        let mut env = Envelope::new();
        env.note_on();
        group.bench_with_input(BenchmarkId::new("attack", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer), &shape, SAMPLE_RATE);
            })
        });

        // Sustain phase (holding steady)
        let shape = EnvelopeShape::adsr(0.001, 0.001, 0.7, 0.3);
        let mut env = Envelope::new();
        env.note_on();
        // Advance past attack/decay
        for _ in 0..200 {
            env.next_sample(&shape, SAMPLE_RATE);
        }
        group.bench_with_input(BenchmarkId::new("sustain", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer), &shape, SAMPLE_RATE);
            })
        });

        // Release phase (ramping down)
        let shape = EnvelopeShape::adsr(0.001, 0.001, 0.7, 10.0);
        let mut env = Envelope::new();
        env.note_on();
        for _ in 0..200 {
            env.next_sample(&shape, SAMPLE_RATE);
        }
        env.note_off();
        group.bench_with_input(BenchmarkId::new("release", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer), &shape, SAMPLE_RATE);
            })
        });
    }

    group.finish();
}
