//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_synth::dsp::oscillator::{OscillatorBlock, Waveform};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Sine uses the sin() transcendental; square, triangle and saw are
        // a branch, an abs and a multiply-add respectively
        for waveform in Waveform::ALL {
            let mut osc = OscillatorBlock::new();
            let name = waveform.name().to_lowercase();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    osc.render(black_box(&mut buffer), waveform, black_box(440.0), SAMPLE_RATE);
                })
            });
        }
    }

    group.finish();
}
