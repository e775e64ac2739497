//! Graph scenario benchmarks.
//!
//! These pull whole patches through the engine the way the audio callback
//! does, so the numbers include port buffer swaps and tick bookkeeping.

mod chain;
mod fan_out;

pub use chain::bench_chain;
pub use fan_out::bench_fan_out;
