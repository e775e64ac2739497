use crate::dsp::filter::{one_pole_coefficients, FilterType, Iir, ResonantLowpass, SVFilter};
use crate::graph::node::UGen;
use crate::graph::port::{InputSpec, Ports};

/*
Filter Nodes
============

Each filter node keeps one filter core per channel so a stereo signal is
filtered independently left and right. Cores are rebuilt when the channel
count changes and re-tuned when the sample rate changes:

    audio[0] ──▶ core[0] ──▶ out[0]
    audio[1] ──▶ core[1] ──▶ out[1]

Cutoff and resonance are plain parameters, not ports. set_cutoff() recomputes
coefficients immediately, never on the per-sample path.

| node            | core            | slope     | notes                      |
| --------------- | --------------- | --------- | -------------------------- |
| LowPass         | one-pole IIR    | 6 dB/oct  | gentle smoothing           |
| ResonantLowPass | 2 × biquad      | 24 dB/oct | damping < 1 adds resonance |
| SvFilter        | state-variable  | 12 dB/oct | LP / HP / BP / notch       |
*/

const AUDIO: InputSpec = InputSpec::audio("audio");

/// Single-pole lowpass.
pub struct LowPass {
    cutoff: f32,
    sample_rate: f32,
    cores: Vec<Iir>,
}

impl LowPass {
    pub const AUDIO: usize = 0;

    pub fn new(cutoff: f32) -> Self {
        Self {
            cutoff,
            sample_rate: 0.0,
            cores: vec![Iir::one_pole_lowpass(cutoff, 0.0)],
        }
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    pub fn set_cutoff(&mut self, cutoff: f32) {
        self.cutoff = cutoff;
        self.retune();
    }

    fn retune(&mut self) {
        let (a, b) = one_pole_coefficients(self.cutoff, self.sample_rate);
        for core in &mut self.cores {
            core.set_coefficients(&[a], &[b]);
        }
    }
}

impl UGen for LowPass {
    fn inputs(&self) -> Vec<InputSpec> {
        vec![AUDIO]
    }

    fn generate(&mut self, inputs: &Ports, out: &mut [f32]) {
        let audio = inputs.values(Self::AUDIO);
        for ((sample, input), core) in out.iter_mut().zip(audio).zip(&mut self.cores) {
            *sample = core.process(*input);
        }
    }

    fn sample_rate_changed(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.retune();
    }

    fn channel_count_changed(&mut self, channels: usize) {
        let (cutoff, rate) = (self.cutoff, self.sample_rate);
        self.cores
            .resize_with(channels, || Iir::one_pole_lowpass(cutoff, rate));
    }
}

/// 24 dB/octave lowpass with adjustable damping.
pub struct ResonantLowPass {
    cutoff: f32,
    damping: f32,
    sample_rate: f32,
    cores: Vec<ResonantLowpass>,
}

impl ResonantLowPass {
    pub const AUDIO: usize = 0;

    /// `damping` of 1.0 is flat; lower values resonate at the cutoff.
    pub fn new(cutoff: f32, damping: f32) -> Self {
        Self {
            cutoff,
            damping,
            sample_rate: 0.0,
            cores: vec![ResonantLowpass::new(cutoff, damping, 0.0)],
        }
    }

    pub fn set_cutoff(&mut self, cutoff: f32) {
        self.cutoff = cutoff;
        for core in &mut self.cores {
            core.set_cutoff(cutoff);
        }
    }

    pub fn set_resonance(&mut self, damping: f32) {
        self.damping = damping;
        for core in &mut self.cores {
            core.set_damping(damping);
        }
    }
}

impl UGen for ResonantLowPass {
    fn inputs(&self) -> Vec<InputSpec> {
        vec![AUDIO]
    }

    fn generate(&mut self, inputs: &Ports, out: &mut [f32]) {
        let audio = inputs.values(Self::AUDIO);
        for ((sample, input), core) in out.iter_mut().zip(audio).zip(&mut self.cores) {
            *sample = core.process(*input);
        }
    }

    fn sample_rate_changed(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        for core in &mut self.cores {
            core.set_sample_rate(sample_rate);
        }
    }

    fn channel_count_changed(&mut self, channels: usize) {
        let (cutoff, damping, rate) = (self.cutoff, self.damping, self.sample_rate);
        self.cores
            .resize_with(channels, || ResonantLowpass::new(cutoff, damping, rate));
    }
}

/// State-variable filter with a selectable response.
pub struct SvFilter {
    filter_type: FilterType,
    cutoff: f32,
    resonance: f32,
    sample_rate: f32,
    cores: Vec<SVFilter>,
}

impl SvFilter {
    pub const AUDIO: usize = 0;

    pub fn new(filter_type: FilterType, cutoff: f32) -> Self {
        let mut filter = Self {
            filter_type,
            cutoff,
            resonance: 0.0,
            sample_rate: 0.0,
            cores: Vec::new(),
        };
        filter.channel_count_changed(1);
        filter
    }

    pub fn lowpass(cutoff: f32) -> Self {
        Self::new(FilterType::LowPass, cutoff)
    }

    pub fn highpass(cutoff: f32) -> Self {
        Self::new(FilterType::HighPass, cutoff)
    }

    pub fn bandpass(cutoff: f32) -> Self {
        Self::new(FilterType::BandPass, cutoff)
    }

    pub fn notch(cutoff: f32) -> Self {
        Self::new(FilterType::Notch, cutoff)
    }

    pub fn set_cutoff(&mut self, cutoff: f32) {
        self.cutoff = cutoff;
        for core in &mut self.cores {
            core.set_cutoff(cutoff);
        }
    }

    /// 0.0 is flat, values toward 1.0 ring.
    pub fn set_resonance(&mut self, resonance: f32) {
        self.resonance = resonance;
        for core in &mut self.cores {
            core.set_resonance(resonance);
        }
    }
}

impl UGen for SvFilter {
    fn inputs(&self) -> Vec<InputSpec> {
        vec![AUDIO]
    }

    fn generate(&mut self, inputs: &Ports, out: &mut [f32]) {
        let audio = inputs.values(Self::AUDIO);
        for ((sample, input), core) in out.iter_mut().zip(audio).zip(&mut self.cores) {
            *sample = core.process(*input);
        }
    }

    fn sample_rate_changed(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        for core in &mut self.cores {
            core.set_sample_rate(sample_rate);
        }
    }

    fn channel_count_changed(&mut self, channels: usize) {
        let (filter_type, cutoff, resonance, rate) =
            (self.filter_type, self.cutoff, self.resonance, self.sample_rate);
        self.cores.resize_with(channels, || {
            let mut core = SVFilter::new(filter_type, cutoff, rate);
            core.set_resonance(resonance);
            core
        });
    }
}
