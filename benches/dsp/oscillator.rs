//! Benchmarks for waveform lookup.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ugen_graph::dsp::{Waveform, Waves, Wavetable};

use crate::BLOCK_SIZES;

fn render<W: Waveform>(wave: &W, phase: &mut f32, step: f32, buffer: &mut [f32]) {
    for sample in buffer.iter_mut() {
        *sample = wave.value(*phase);
        *phase = (*phase + step).fract();
    }
}

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let step = 440.0 / 48_000.0;

    let waves = [
        ("sine", Waves::Sine),
        ("saw", Waves::Saw),
        ("square", Waves::Square),
        ("triangle", Waves::Triangle),
        ("pulse", Waves::Pulse(0.25)),
    ];
    // Same shape as Waves::Sine, but interpolated from a table
    let table = Wavetable::gen10(4096, &[1.0]);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for (name, wave) in &waves {
            let mut phase = 0.0;
            group.bench_with_input(BenchmarkId::new(*name, size), &size, |b, _| {
                b.iter(|| render(black_box(wave), &mut phase, step, black_box(&mut buffer)))
            });
        }

        let mut phase = 0.0;
        group.bench_with_input(BenchmarkId::new("wavetable", size), &size, |b, _| {
            b.iter(|| render(black_box(&table), &mut phase, step, black_box(&mut buffer)))
        });
    }

    group.finish();
}
