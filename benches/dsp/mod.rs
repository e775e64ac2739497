//! Benchmarks for low-level DSP primitives.

mod delay;
mod distortion;
mod filter;
mod noise;
mod oscillator;

pub use delay::bench_delay;
pub use distortion::bench_distortion;
pub use filter::bench_filter;
pub use noise::bench_noise;
pub use oscillator::bench_oscillator;
