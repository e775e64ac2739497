use crate::graph::node::UGen;
use crate::graph::port::{InputSpec, Ports};

/*
Ring Modulator
==============

Multiplies two audio signals sample by sample:

    audio     ──┐
                ├──▶ (×) ──▶ out
    modulator ──┘

With two audio-rate oscillators this is classic ring modulation: the output
holds the sum and difference frequencies and neither original. With a slow
unipolar modulator (an envelope or a Line) it is a VCA.

An unpatched modulator holds its constant, 1.0 unless set, so a Ring with
nothing on `modulator` passes its audio through.
*/

#[derive(Debug, Default)]
pub struct Ring;

impl Ring {
    pub const AUDIO: usize = 0;
    pub const MODULATOR: usize = 1;

    pub fn new() -> Self {
        Self
    }
}

impl UGen for Ring {
    fn inputs(&self) -> Vec<InputSpec> {
        vec![
            InputSpec::audio("audio"),
            InputSpec {
                initial: 1.0,
                ..InputSpec::audio("modulator")
            },
        ]
    }

    fn generate(&mut self, inputs: &Ports, out: &mut [f32]) {
        let audio = inputs.values(Self::AUDIO);
        let modulator = inputs.values(Self::MODULATOR);
        for ((sample, a), m) in out.iter_mut().zip(audio).zip(modulator) {
            *sample = a * m;
        }
    }
}
