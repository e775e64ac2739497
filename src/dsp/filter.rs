use std::f32::consts::{PI, TAU};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
| type              | constructed by       | passes          | rejects      |
| ----------------- | -------------------- | --------------- | ------------ |
| low-pass          | LPF                  | below cutoff    | above cutoff |
| high-pass         | HPF                  | above cutoff    | below cutoff |
| band-pass         | LPF ∘ HPF (series)   | between cutoffs | outside      |
| notch / band-stop | LPF + HPF (parallel) | outside         | between      |

Three filter cores live here:

  SVFilter         trapezoidal state-variable filter, all four responses
  Iir              direct-form IIR with fixed-size history, built from
                   coefficient arrays (one-pole lowpass is the stock recipe)
  ResonantLowpass  4th-order lowpass, two cascaded biquads

All of them cache their coefficients; set_cutoff / set_resonance / a rate
change recompute them, the per-sample path only does multiply-adds.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    LowPass,
    HighPass,
    BandPass,
    Notch,
}

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
    pub notch: f32,
}

#[derive(Debug, Clone)]
pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    cutoff_hz: f32,
    resonance: f32,
    sample_rate: f32,
    filter_type: FilterType,

    g: f32,
    k: f32,
}

impl SVFilter {
    pub fn new(filter_type: FilterType, cutoff_hz: f32, sample_rate: f32) -> Self {
        let mut filter = Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz,
            resonance: 0.0,
            sample_rate,
            filter_type,
            g: 0.0,
            k: 2.0,
        };
        filter.update_coefficients();
        filter
    }

    pub fn lowpass(cutoff_hz: f32, sample_rate: f32) -> Self {
        Self::new(FilterType::LowPass, cutoff_hz, sample_rate)
    }

    pub fn highpass(cutoff_hz: f32, sample_rate: f32) -> Self {
        Self::new(FilterType::HighPass, cutoff_hz, sample_rate)
    }

    fn update_coefficients(&mut self) {
        if self.sample_rate <= 0.0 {
            self.g = 0.0;
            return;
        }
        // Keep the prewarped frequency below Nyquist so tan() stays finite.
        let nyquist = 0.5 * self.sample_rate;
        let cutoff = self.cutoff_hz.clamp(1.0, nyquist * 0.99);
        let wd = TAU * cutoff;
        let wa = (2.0 * self.sample_rate) * (wd / (2.0 * self.sample_rate)).tan();
        self.g = wa / (2.0 * self.sample_rate);
        self.k = 2.0 - (2.0 * self.resonance);
    }

    #[inline]
    pub fn next_sample(&mut self, sample: f32) -> FilterOutputs {
        let (g, k) = (self.g, self.k);
        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        FilterOutputs {
            lowpass: v2,
            bandpass: v1,
            highpass: sample - k * v1 - v2,
            notch: sample - k * v1,
        }
    }

    /// Filter one sample, returning the configured response.
    #[inline]
    pub fn process(&mut self, sample: f32) -> f32 {
        let outputs = self.next_sample(sample);
        match self.filter_type {
            FilterType::LowPass => outputs.lowpass,
            FilterType::HighPass => outputs.highpass,
            FilterType::BandPass => outputs.bandpass,
            FilterType::Notch => outputs.notch,
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff_hz
    }

    pub fn resonance(&self) -> f32 {
        self.resonance
    }

    pub fn set_cutoff(&mut self, cutoff: f32) {
        self.cutoff_hz = cutoff;
        self.update_coefficients();
    }

    /// 0.0 is flat, values toward 1.0 self-oscillate.
    pub fn set_resonance(&mut self, resonance: f32) {
        self.resonance = resonance.clamp(0.0, 0.99);
        self.update_coefficients();
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.update_coefficients();
    }
}

/// Direct-form IIR section: `y[n] = Σ a[j]·x[n-j] + Σ b[j]·y[n-1-j]`.
///
/// `a` holds feed-forward taps, `b` feedback taps (already sign-adjusted so
/// they are added). History buffers are sized once from the coefficient
/// arrays and never reallocated.
#[derive(Debug, Clone)]
pub struct Iir {
    a: Vec<f32>,
    b: Vec<f32>,
    input: Vec<f32>,
    output: Vec<f32>,
}

impl Iir {
    pub fn new(a: Vec<f32>, b: Vec<f32>) -> Self {
        let input = vec![0.0; a.len()];
        let output = vec![0.0; b.len()];
        Self {
            a,
            b,
            input,
            output,
        }
    }

    /// One-pole lowpass: `x = e^(-2π·fc/fs)`, `a = [1 - x]`, `b = [x]`.
    pub fn one_pole_lowpass(cutoff_hz: f32, sample_rate: f32) -> Self {
        let (a, b) = one_pole_coefficients(cutoff_hz, sample_rate);
        Self::new(vec![a], vec![b])
    }

    /// Replace the taps. History is kept; it only reallocates if a tap
    /// count changes.
    pub fn set_coefficients(&mut self, a: &[f32], b: &[f32]) {
        self.a.clear();
        self.a.extend_from_slice(a);
        self.b.clear();
        self.b.extend_from_slice(b);
        self.input.resize(a.len(), 0.0);
        self.output.resize(b.len(), 0.0);
    }

    #[inline]
    pub fn process(&mut self, sample: f32) -> f32 {
        if !self.input.is_empty() {
            let last = self.input.len() - 1;
            self.input.copy_within(0..last, 1);
            self.input[0] = sample;
        }

        let feed_forward: f32 = self.a.iter().zip(&self.input).map(|(a, x)| a * x).sum();
        let feedback: f32 = self.b.iter().zip(&self.output).map(|(b, y)| b * y).sum();
        let result = feed_forward + feedback;

        if !self.output.is_empty() {
            let last = self.output.len() - 1;
            self.output.copy_within(0..last, 1);
            self.output[0] = result;
        }
        result
    }

    pub fn reset(&mut self) {
        self.input.fill(0.0);
        self.output.fill(0.0);
    }
}

/// Feed-forward and feedback gain for a one-pole lowpass.
pub fn one_pole_coefficients(cutoff_hz: f32, sample_rate: f32) -> (f32, f32) {
    if sample_rate <= 0.0 {
        return (1.0, 0.0);
    }
    let x = (-TAU * cutoff_hz.max(0.0) / sample_rate).exp();
    (1.0 - x, x)
}

/*
Resonant 4th-order lowpass
==========================

Two bilinear-transformed 2-pole sections in series, run in transposed
direct form II:

    in ──▶ [ biquad, damping 0.765·d ] ──▶ [ biquad, damping 1.848·d ] ──▶ out

With d = 1 the pole pairs land on a 4th-order Butterworth response.
Smaller d narrows both sections and raises a resonant peak at the cutoff.
Each section is normalized by its own a0, so DC gain stays at unity.
*/

#[derive(Debug, Clone, Copy, Default)]
struct Biquad {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,
    s1: f32,
    s2: f32,
}

impl Biquad {
    fn design(&mut self, k: f32, damping: f32) {
        let k2 = k * k;
        let a0 = k2 + damping * k + 1.0;
        self.b0 = k2 / a0;
        self.b1 = 2.0 * k2 / a0;
        self.b2 = k2 / a0;
        self.a1 = 2.0 * (1.0 - k2) / a0;
        self.a2 = (damping * k - k2 - 1.0) / a0;
    }

    #[inline]
    fn process(&mut self, x: f32) -> f32 {
        let y = self.b0 * x + self.s1;
        self.s1 = self.b1 * x + self.a1 * y + self.s2;
        self.s2 = self.b2 * x + self.a2 * y;
        y
    }

    fn reset(&mut self) {
        self.s1 = 0.0;
        self.s2 = 0.0;
    }
}

#[derive(Debug, Clone)]
pub struct ResonantLowpass {
    cutoff_hz: f32,
    damping: f32,
    sample_rate: f32,
    first: Biquad,
    second: Biquad,
}

impl ResonantLowpass {
    pub const MIN_DAMPING: f32 = 0.05;

    pub fn new(cutoff_hz: f32, damping: f32, sample_rate: f32) -> Self {
        let mut filter = Self {
            cutoff_hz,
            damping: damping.max(Self::MIN_DAMPING),
            sample_rate,
            first: Biquad::default(),
            second: Biquad::default(),
        };
        filter.update_coefficients();
        filter
    }

    fn update_coefficients(&mut self) {
        if self.sample_rate <= 0.0 {
            return;
        }
        let cutoff = self.cutoff_hz.clamp(1.0, 0.49 * self.sample_rate);
        let k = (PI * cutoff / self.sample_rate).tan();
        self.first.design(k, 0.765_367 * self.damping);
        self.second.design(k, 1.847_759 * self.damping);
    }

    #[inline]
    pub fn process(&mut self, sample: f32) -> f32 {
        let stage = self.first.process(sample);
        self.second.process(stage)
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff_hz
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }

    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        self.cutoff_hz = cutoff_hz;
        self.update_coefficients();
    }

    /// 1.0 is flat (Butterworth); lower values resonate.
    pub fn set_damping(&mut self, damping: f32) {
        self.damping = damping.max(Self::MIN_DAMPING);
        self.update_coefficients();
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.update_coefficients();
    }

    pub fn reset(&mut self) {
        self.first.reset();
        self.second.reset();
    }
}
