//! ugen - plays a small patch on the default output device
//!
//! Run with: cargo run --features cpal-output --bin ugen

use std::time::Duration;

use color_eyre::eyre::WrapErr;
use tracing::info;
use ugen_graph::dsp::{Tint, Waves};
use ugen_graph::graph::{Granulator, Line, Noise, Oscil, ResonantLowPass, Ring, Summer};
use ugen_graph::io::{command_queue, cpal, GraphCommand};
use ugen_graph::{Graph, OutputConfig, PortId};

const SWEEP_SECONDS: f32 = 4.0;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut graph = Graph::new(OutputConfig::default())?;

    //   sweep ──▶ osc.frequency
    //   osc ──▶ lowpass ──▶ granulator ──┐
    //   noise ──▶ ring (× fade) ─────────┼──▶ mix ──▶ out
    //   fade ──▶ ring.modulator ─────────┘
    let sweep = graph.add(Line::new(SWEEP_SECONDS, 110.0, 880.0));
    let osc = graph.add(Oscil::new(110.0, 0.4, Waves::Saw));
    let lowpass = graph.add(ResonantLowPass::new(1_200.0, 0.4));
    let grains = graph.add(Granulator::new(0.04, 0.02, 0.01));
    let noise = graph.add(Noise::new(Tint::Pink, 0.15));
    let fade = graph.add(Line::new(SWEEP_SECONDS, 1.0, 0.0));
    let ring = graph.add(Ring::new());
    let mix = graph.add(Summer::new());

    graph.patch_port(sweep, PortId::new(osc, Oscil::FREQUENCY))?;
    graph.patch(osc, lowpass)?;
    graph.patch(lowpass, grains)?;
    graph.patch(grains, mix)?;
    graph.patch(noise, ring)?;
    graph.patch_port(fade, PortId::new(ring, Ring::MODULATOR))?;
    graph.patch(ring, mix)?;
    graph.patch_output(mix)?;

    let (mut tx, rx) = command_queue(64);
    let output = cpal::play(graph, rx).wrap_err("failed to start audio output")?;
    info!(
        "playing at {} Hz, {} channel(s); Ctrl+C to stop",
        output.config().sample_rate,
        output.config().channels
    );

    loop {
        tx.send(GraphCommand::edit(move |graph: &mut Graph| {
            for line in [sweep, fade] {
                if let Some(line) = graph.node_mut::<Line>(line) {
                    line.activate();
                }
            }
        }))?;
        std::thread::sleep(Duration::from_secs_f32(SWEEP_SECONDS + 1.0));
    }
}
