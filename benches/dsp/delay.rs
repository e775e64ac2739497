//! Benchmarks for delay line operations.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ugen_graph::dsp::delay::DelayLine;

use crate::BLOCK_SIZES;

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    let delay_times: &[usize] = &[
        480,   // 10ms at 48kHz
        4800,  // 100ms at 48kHz
        48000, // 1 second at 48kHz
    ];

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();
        let mut buffer = input.clone();

        for &delay_samples in delay_times {
            let delay_ms = delay_samples as f32 / 48.0;
            let mut delay = DelayLine::new(48_000);
            group.bench_with_input(
                BenchmarkId::new(format!("render_{}ms", delay_ms as u32), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        for (out, &x) in buffer.iter_mut().zip(&input) {
                            *out = delay.next_sample(black_box(x), black_box(delay_samples));
                        }
                    })
                },
            );
        }

        // Echo with feedback, the way the Delay node runs it
        let mut delay = DelayLine::new(48_000);
        group.bench_with_input(BenchmarkId::new("feedback", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(&input) {
                    let wet = x + 0.5 * delay.read(black_box(4800));
                    delay.write(wet);
                    *out = wet;
                }
            })
        });
    }

    group.finish();
}
