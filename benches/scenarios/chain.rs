//! Benchmarks for serial effect chains.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ugen_graph::dsp::Waves;
use ugen_graph::graph::{Delay, Disto, Granulator, Line, Oscil, ResonantLowPass};
use ugen_graph::{Graph, OutputConfig, PortId};

use crate::BLOCK_SIZES;

fn graph() -> Graph {
    Graph::new(OutputConfig::new(48_000.0, 2)).expect("valid output config")
}

pub fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/chain");

    for &size in BLOCK_SIZES {
        // Interleaved stereo
        let mut buffer = vec![0.0f32; size * 2];

        // === BARE OSCILLATOR ===
        // Baseline cost of one node plus the output bus
        let mut bare = graph();
        let osc = bare.add(Oscil::sine(440.0, 0.5));
        bare.patch_output(osc).unwrap();

        group.bench_with_input(BenchmarkId::new("oscil", size), &size, |b, _| {
            b.iter(|| bare.render_interleaved(black_box(&mut buffer)))
        });

        // === SWEPT FILTER ===
        // Line → Oscil.frequency, Oscil → ResonantLowPass
        let mut swept = graph();
        let sweep = swept.add(Line::new(10.0, 110.0, 880.0));
        let osc = swept.add(Oscil::new(220.0, 0.5, Waves::Saw));
        let filter = swept.add(ResonantLowPass::new(1_500.0, 0.4));
        swept
            .patch_port(sweep, PortId::new(osc, Oscil::FREQUENCY))
            .unwrap();
        swept.patch(osc, filter).unwrap();
        swept.patch_output(filter).unwrap();
        swept.node_mut::<Line>(sweep).unwrap().activate();

        group.bench_with_input(BenchmarkId::new("swept_filter", size), &size, |b, _| {
            b.iter(|| swept.render_interleaved(black_box(&mut buffer)))
        });

        // === FULL CHAIN ===
        // Oscil → ResonantLowPass → Disto → Granulator → Delay
        let mut full = graph();
        let osc = full.add(Oscil::new(110.0, 0.5, Waves::Saw));
        let filter = full.add(ResonantLowPass::new(2_000.0, 0.5));
        let drive = full.add(Disto::soft(3.0));
        let grains = full.add(Granulator::new(0.02, 0.01, 0.004));
        let echo = full.add(Delay::echo(0.25, 0.4));
        full.patch(osc, filter).unwrap();
        full.patch(filter, drive).unwrap();
        full.patch(drive, grains).unwrap();
        full.patch(grains, echo).unwrap();
        full.patch_output(echo).unwrap();

        group.bench_with_input(BenchmarkId::new("full_chain", size), &size, |b, _| {
            b.iter(|| full.render_interleaved(black_box(&mut buffer)))
        });
    }

    group.finish();
}
