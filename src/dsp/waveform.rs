//! Waveform providers: pure functions of a phase in `[0, 1)`.

use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Waveforms
=========

An oscillator owns a phase accumulator; a waveform only answers "what is the
value at this point of the cycle?". Keeping the two apart lets the same Oscil
play an analytic shape or an arbitrary lookup table.

  phase   0.0 ─────────────── 0.5 ─────────────── 1.0
  Sine     0 ╱‾‾‾╲ 1 ...     0 ╲___╱ -1 ...       0
  Saw     -1 ───────────────── 0 ─────────────── ▶ +1
  Square  -1 ────────────────┐+1 ─────────────────
  Triangle-1 ╱──────────────+1 ╲──────────────── -1

Wavetables are built the way classic Music-N "GEN" routines do it:

  gen7   straight line segments between breakpoints
  gen10  sum of harmonics with given amplitudes

Lookups interpolate linearly and wrap, so a table of a few thousand points is
smooth enough for audio-rate oscillators.
*/

/// A periodic shape sampled by phase.
pub trait Waveform: Send {
    /// Value at `phase`, where one cycle spans `[0, 1)`.
    fn value(&self, phase: f32) -> f32;
}

/// Closed-form waveforms.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Waves {
    Sine,
    Saw,
    Square,
    Triangle,
    /// High for `duty` of the cycle, low for the rest.
    Pulse(f32),
}

impl Waveform for Waves {
    #[inline]
    fn value(&self, phase: f32) -> f32 {
        let phase = phase - phase.floor();
        match *self {
            Waves::Sine => (TAU * phase).sin(),
            Waves::Saw => 2.0 * phase - 1.0,
            Waves::Square => {
                if phase < 0.5 {
                    -1.0
                } else {
                    1.0
                }
            }
            Waves::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
            Waves::Pulse(duty) => {
                if phase < duty.clamp(0.0, 1.0) {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }
}

/// A single cycle stored as samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Wavetable {
    samples: Vec<f32>,
}

impl Wavetable {
    pub fn new(samples: Vec<f32>) -> Self {
        debug_assert!(!samples.is_empty(), "wavetable needs at least one sample");
        Self { samples }
    }

    /// Line segments through `values`, the i-th segment spanning
    /// `lengths[i]` samples. Missing tail samples hold the last value.
    pub fn gen7(size: usize, values: &[f32], lengths: &[usize]) -> Self {
        let mut samples = Vec::with_capacity(size);
        for (segment, &len) in lengths.iter().enumerate() {
            let (Some(&start), Some(&end)) = (values.get(segment), values.get(segment + 1)) else {
                break;
            };
            for step in 0..len {
                if samples.len() == size {
                    break;
                }
                let t = step as f32 / len as f32;
                samples.push(start + (end - start) * t);
            }
        }
        let tail = values.last().copied().unwrap_or(0.0);
        samples.resize(size.max(1), tail);
        Self { samples }
    }

    /// Sum of sine harmonics; `amplitudes[k]` scales harmonic `k + 1`.
    pub fn gen10(size: usize, amplitudes: &[f32]) -> Self {
        let size = size.max(1);
        let samples = (0..size)
            .map(|n| {
                let phase = n as f32 / size as f32;
                amplitudes
                    .iter()
                    .enumerate()
                    .map(|(k, amp)| amp * (TAU * (k + 1) as f32 * phase).sin())
                    .sum()
            })
            .collect();
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Scale so the largest magnitude is 1.0. Silent tables are left alone.
    pub fn normalize(&mut self) {
        let peak = self.samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
        if peak > 0.0 {
            for sample in &mut self.samples {
                *sample /= peak;
            }
        }
    }

    /// Flip the sign of every sample.
    pub fn invert(&mut self) {
        for sample in &mut self.samples {
            *sample = -*sample;
        }
    }
}

impl Waveform for Wavetable {
    #[inline]
    fn value(&self, phase: f32) -> f32 {
        let len = self.samples.len();
        if len == 0 {
            return 0.0;
        }
        let position = (phase - phase.floor()) * len as f32;
        let index = (position as usize).min(len - 1);
        let frac = position - index as f32;
        let a = self.samples[index];
        let b = self.samples[(index + 1) % len];
        a + (b - a) * frac
    }
}
