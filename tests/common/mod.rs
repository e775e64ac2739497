//! Instrumented leaves shared by the integration tests.
#![allow(dead_code)]

use ugen_graph::graph::{InputSpec, Ports, UGen};

/// Emits 1, 2, 3, ... and counts how often `generate` ran.
#[derive(Debug, Default)]
pub struct Counter {
    pub calls: usize,
}

impl UGen for Counter {
    fn generate(&mut self, _inputs: &Ports, out: &mut [f32]) {
        self.calls += 1;
        out.fill(self.calls as f32);
    }
}

/// Passes its audio input through and records every hook call.
#[derive(Debug, Default)]
pub struct Recorder {
    pub rate_changes: Vec<f32>,
    pub channel_changes: Vec<usize>,
}

impl Recorder {
    pub const AUDIO: usize = 0;
    pub const CONTROL: usize = 1;
}

impl UGen for Recorder {
    fn inputs(&self) -> Vec<InputSpec> {
        vec![
            InputSpec::audio("audio"),
            InputSpec::control("control", 0.0),
        ]
    }

    fn generate(&mut self, inputs: &Ports, out: &mut [f32]) {
        for (sample, input) in out.iter_mut().zip(inputs.values(Self::AUDIO)) {
            *sample = *input;
        }
    }

    fn sample_rate_changed(&mut self, sample_rate: f32) {
        self.rate_changes.push(sample_rate);
    }

    fn channel_count_changed(&mut self, channels: usize) {
        self.channel_changes.push(channels);
    }
}

/// Sums two audio inputs and records channel changes.
#[derive(Debug, Default)]
pub struct Splitter {
    pub channel_changes: Vec<usize>,
}

impl Splitter {
    pub const LEFT: usize = 0;
    pub const RIGHT: usize = 1;
}

impl UGen for Splitter {
    fn inputs(&self) -> Vec<InputSpec> {
        vec![InputSpec::audio("left"), InputSpec::audio("right")]
    }

    fn generate(&mut self, inputs: &Ports, out: &mut [f32]) {
        let left = inputs.values(Self::LEFT);
        let right = inputs.values(Self::RIGHT);
        for (channel, sample) in out.iter_mut().enumerate() {
            *sample = left.get(channel).copied().unwrap_or(0.0)
                + right.get(channel).copied().unwrap_or(0.0);
        }
    }

    fn channel_count_changed(&mut self, channels: usize) {
        self.channel_changes.push(channels);
    }
}
