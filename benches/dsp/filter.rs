//! Benchmarks for the filter cores.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ugen_graph::dsp::filter::{FilterType, Iir, ResonantLowpass, SVFilter};

use crate::BLOCK_SIZES;

const RATE: f32 = 48_000.0;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Sawtooth-like ramp
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();
        let mut buffer = input.clone();

        for (name, filter_type) in [
            ("svf_lowpass", FilterType::LowPass),
            ("svf_highpass", FilterType::HighPass),
            ("svf_bandpass", FilterType::BandPass),
            ("svf_notch", FilterType::Notch),
        ] {
            let mut filter = SVFilter::new(filter_type, 1000.0, RATE);
            filter.set_resonance(0.5);
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for (out, &x) in buffer.iter_mut().zip(&input) {
                        *out = filter.process(black_box(x));
                    }
                })
            });
        }

        let mut filter = Iir::one_pole_lowpass(1000.0, RATE);
        group.bench_with_input(BenchmarkId::new("one_pole", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(&input) {
                    *out = filter.process(black_box(x));
                }
            })
        });

        // Two cascaded biquads
        let mut filter = ResonantLowpass::new(1000.0, 0.3, RATE);
        group.bench_with_input(BenchmarkId::new("resonant_lowpass", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(&input) {
                    *out = filter.process(black_box(x));
                }
            })
        });
    }

    group.finish();
}
