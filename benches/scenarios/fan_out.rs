//! Benchmarks for shared producers and wide mixes.
//!
//! One oscillator feeding many consumers should cost about the same as one
//! oscillator feeding one, since it generates once per frame either way.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ugen_graph::dsp::Tint;
use ugen_graph::graph::{LowPass, Noise, Oscil, Ring, Summer};
use ugen_graph::{Graph, OutputConfig, PortId};

use crate::BLOCK_SIZES;

const FAN_WIDTHS: &[usize] = &[1, 4, 16];

fn graph() -> Graph {
    Graph::new(OutputConfig::new(48_000.0, 2)).expect("valid output config")
}

pub fn bench_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/fan_out");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size * 2];

        // === SHARED MODULATOR ===
        // One LFO ring-modulating `width` independent noise voices
        for &width in FAN_WIDTHS {
            let mut shared = graph();
            let lfo = shared.add(Oscil::sine(2.0, 1.0));
            let bus = shared.add(Summer::new());
            for seed in 0..width {
                let noise = shared.add(Noise::with_seed(Tint::Pink, 0.1, seed as u64));
                let ring = shared.add(Ring::new());
                shared.patch(noise, ring).unwrap();
                shared
                    .patch_port(lfo, PortId::new(ring, Ring::MODULATOR))
                    .unwrap();
                shared.patch(ring, bus).unwrap();
            }
            shared.patch_output(bus).unwrap();

            group.bench_with_input(
                BenchmarkId::new(format!("shared_lfo_x{width}"), size),
                &size,
                |b, _| b.iter(|| shared.render_interleaved(black_box(&mut buffer))),
            );
        }

        // === INDEPENDENT VOICES ===
        // `width` oscillators, each through its own filter, summed
        for &width in FAN_WIDTHS {
            let mut mix = graph();
            let bus = mix.add(Summer::new());
            for voice in 0..width {
                let osc = mix.add(Oscil::saw(110.0 * (voice + 1) as f32, 0.1));
                let filter = mix.add(LowPass::new(3_000.0));
                mix.patch(osc, filter).unwrap();
                mix.patch(filter, bus).unwrap();
            }
            mix.patch_output(bus).unwrap();

            group.bench_with_input(
                BenchmarkId::new(format!("voices_x{width}"), size),
                &size,
                |b, _| b.iter(|| mix.render_interleaved(black_box(&mut buffer))),
            );
        }
    }

    group.finish();
}
