//! Low-level DSP primitives used by the graph's unit generators.
//!
//! These components are allocation-free once constructed and realtime-safe,
//! so leaves can embed them directly. They stay focused on the
//! signal-processing math; ports, caching and propagation belong to the graph.

/// Circular delay line.
pub mod delay;
/// Waveshaping transfer functions.
pub mod distortion;
/// State-variable, IIR and resonant lowpass filter cores.
pub mod filter;
/// Seeded white, pink and brown noise.
pub mod noise;
/// Analytic waveforms and lookup tables.
pub mod waveform;

pub use noise::Tint;
pub use waveform::{Waveform, Waves, Wavetable};
