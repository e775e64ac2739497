use crate::dsp::waveform::{Waveform, Waves, Wavetable};
use crate::graph::node::UGen;
use crate::graph::port::{InputSpec, Ports};

/*
Audio Oscillator
================

An oscillator is the fundamental sound source. It walks a phase accumulator
around one cycle and asks its waveform for the value at that point:

    phase ──▶ waveform.value(phase) ──▶ × amplitude ──▶ every channel

    phase += frequency / sample_rate        (once per generated frame)
    phase -= floor(phase)                   (wrap back into [0, 1))

Both parameters are CONTROL ports. Left unpatched they hold the constants
given at construction; patch a Line into `frequency` for a sweep or another
Oscil into `amplitude` for tremolo.

Fan-out does not speed the oscillator up: the graph only calls generate()
once per frame however many consumers pull it.

Example:
  let osc = graph.add(Oscil::new(440.0, 0.5, Waves::Sine));
  graph.patch_output(osc)?;
*/

pub struct Oscil {
    waveform: Box<dyn Waveform>,
    frequency: f32,
    amplitude: f32,
    phase: f32,
    sample_rate: f32,
}

impl Oscil {
    /// Default port: patching a node into an Oscil drives its amplitude.
    pub const AMPLITUDE: usize = 0;
    pub const FREQUENCY: usize = 1;

    pub fn new<W: Waveform + 'static>(frequency: f32, amplitude: f32, waveform: W) -> Self {
        Self {
            waveform: Box::new(waveform),
            frequency,
            amplitude,
            phase: 0.0,
            sample_rate: 0.0,
        }
    }

    pub fn sine(frequency: f32, amplitude: f32) -> Self {
        Self::new(frequency, amplitude, Waves::Sine)
    }

    pub fn saw(frequency: f32, amplitude: f32) -> Self {
        Self::new(frequency, amplitude, Waves::Saw)
    }

    pub fn table(frequency: f32, amplitude: f32, table: Wavetable) -> Self {
        Self::new(frequency, amplitude, table)
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Jump to `phase` (wrapped into `[0, 1)`).
    pub fn set_phase(&mut self, phase: f32) {
        self.phase = phase - phase.floor();
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    pub fn set_waveform<W: Waveform + 'static>(&mut self, waveform: W) {
        self.waveform = Box::new(waveform);
    }
}

impl UGen for Oscil {
    fn inputs(&self) -> Vec<InputSpec> {
        vec![
            InputSpec::control("amplitude", self.amplitude),
            InputSpec::control("frequency", self.frequency),
        ]
    }

    fn generate(&mut self, inputs: &Ports, out: &mut [f32]) {
        let sample = inputs.value(Self::AMPLITUDE) * self.waveform.value(self.phase);
        out.fill(sample);

        if self.sample_rate > 0.0 {
            self.phase += inputs.value(Self::FREQUENCY) / self.sample_rate;
            self.phase -= self.phase.floor();
        }
    }

    fn sample_rate_changed(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }
}
