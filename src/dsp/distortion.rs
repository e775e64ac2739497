//! Distortion / Waveshaping
//!
//! Distortion adds harmonics by reshaping the waveform. The "drive" parameter
//! controls how aggressively the signal is pushed into the nonlinear region.
//!
//! # How Waveshaping Works
//!
//! A waveshaper applies a transfer function to each sample:
//!   output = f(input * drive)
//!
//! When drive is low (1.0), the signal stays in the linear region of f()
//! and passes through mostly unchanged. As drive increases, the signal hits
//! the nonlinear parts of f(), creating harmonic distortion.
//!
//! # Transfer Functions
//!
//! Soft Clip:
//!   f(x) = x / (1 + |x|)
//!
//! Hard Clip:
//!   f(x) = clamp(x, -threshold, threshold)
//!
//! Foldback:
//!   When x exceeds threshold, it "folds" back on itself
//!
//! Table:
//!   |x| > 1  -> sign(x)
//!   else     -> table((x + 1) / 2), output divided by drive
//!
//!   The table maps [-1, 1] onto a single cycle lookup, so any Wavetable
//!   can serve as a transfer curve.
//!
//! # Drive Values
//!
//!   1.0  = Clean (no distortion)
//!   2-4  = Warm saturation
//!   5-10 = Obvious distortion
//!   10+  = Heavy, aggressive

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::waveform::Waveform;

/// Soft clipping using x / (1 + |x|) transfer function.
#[inline]
pub fn soft_clip(sample: f32, drive: f32) -> f32 {
    let x = sample * drive;
    x / (1.0 + x.abs())
}

/// Hard clipping - simply clamps the signal at a threshold.
#[inline]
pub fn hard_clip(sample: f32, drive: f32, threshold: f32) -> f32 {
    let x = sample * drive;
    x.clamp(-threshold.abs(), threshold.abs())
}

/// Foldback distortion - signal folds back when exceeding threshold.
///
/// Closed form, so arbitrarily hot input costs the same as a quiet one.
#[inline]
pub fn foldback(sample: f32, drive: f32, threshold: f32) -> f32 {
    let x = sample * drive;
    if !x.is_finite() {
        return 0.0;
    }
    let t = threshold.abs().max(1e-3);
    if x.abs() <= t {
        return x;
    }
    let mut folded = (x + t).rem_euclid(4.0 * t);
    if folded > 2.0 * t {
        folded = 4.0 * t - folded;
    }
    folded - t
}

/// Shape through a lookup table, then divide by `drive` to keep levels
/// comparable as drive rises.
#[inline]
pub fn table_shape<W: Waveform + ?Sized>(sample: f32, drive: f32, table: &W) -> f32 {
    let x = sample * drive;
    let shaped = if x > 1.0 {
        1.0
    } else if x < -1.0 {
        -1.0
    } else {
        table.value(x * 0.5 + 0.5)
    };
    if drive.abs() > f32::EPSILON {
        shaped / drive
    } else {
        shaped
    }
}

/// Transfer curve selector for the analytic shapers.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Soft,
    Hard { threshold: f32 },
    Foldback { threshold: f32 },
}

impl Shape {
    #[inline]
    pub fn apply(self, sample: f32, drive: f32) -> f32 {
        match self {
            Shape::Soft => soft_clip(sample, drive),
            Shape::Hard { threshold } => hard_clip(sample, drive, threshold),
            Shape::Foldback { threshold } => foldback(sample, drive, threshold),
        }
    }
}
