//! Benchmarks for waveshaping.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ugen_graph::dsp::distortion::{table_shape, Shape};
use ugen_graph::dsp::Wavetable;

use crate::BLOCK_SIZES;

pub fn bench_distortion(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/distortion");
    let drive = 4.0;

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32 * std::f32::consts::TAU).sin())
            .collect();
        let mut buffer = input.clone();

        for (name, shape) in [
            ("soft", Shape::Soft),
            ("hard", Shape::Hard { threshold: 0.7 }),
            ("foldback", Shape::Foldback { threshold: 0.5 }),
        ] {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for (out, &x) in buffer.iter_mut().zip(&input) {
                        *out = shape.apply(black_box(x), drive);
                    }
                })
            });
        }

        let table = Wavetable::gen7(1024, &[-1.0, 0.0, 1.0], &[512, 512]);
        group.bench_with_input(BenchmarkId::new("table", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(&input) {
                    *out = table_shape(black_box(x), drive, &table);
                }
            })
        });
    }

    group.finish();
}
