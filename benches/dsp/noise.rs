//! Benchmarks for the noise generators.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ugen_graph::dsp::noise::NoiseGenerator;
use ugen_graph::dsp::Tint;

use crate::BLOCK_SIZES;

pub fn bench_noise(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/noise");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for (name, tint) in [
            ("white", Tint::White),
            ("pink", Tint::Pink),
            ("brown", Tint::Brown),
        ] {
            let mut generator = NoiseGenerator::new(7);
            generator.set_sample_rate(48_000.0);
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for sample in buffer.iter_mut() {
                        *sample = generator.next(black_box(tint));
                    }
                })
            });
        }
    }

    group.finish();
}
