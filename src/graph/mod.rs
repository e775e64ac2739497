//! Pull-based unit generator graph.
//!
//! A [`Graph`] owns every node and the root output bus. Leaves implement
//! [`UGen`] and only describe their ports and how to produce one frame. The
//! engine owns the wiring and makes sure a shared node generates once per
//! frame no matter how many consumers pull it.
//!
//! ```ignore
//! let mut graph = Graph::new(OutputConfig::default())?;
//! let sweep = graph.add(Line::new(2.0, 110.0, 880.0));
//! let osc = graph.add(Oscil::saw(110.0, 0.4));
//! let filter = graph.add(SvFilter::lowpass(1_200.0));
//!
//! graph.patch_port(sweep, PortId::new(osc, Oscil::FREQUENCY))?;
//! graph.patch(osc, filter)?;
//! graph.patch_output(filter)?;
//! graph.node_mut::<Line>(sweep).map(Line::activate);
//! ```

/// Feedback delay / echo.
pub mod delay;
/// Waveshaping distortion.
pub mod distortion;
/// Arena, patching, propagation and the tick algorithm.
pub mod engine;
/// One-pole, resonant and state-variable filter nodes.
pub mod filter;
/// Steady granular chopper.
pub mod granulate;
/// Linear ramp generator.
pub mod line;
/// Node handles and the `UGen` trait.
pub mod node;
/// Colored noise source.
pub mod noise;
/// Phase-accumulating oscillator.
pub mod oscillator;
/// Input ports and port lists.
pub mod port;
/// Ring modulator / VCA.
pub mod ring;
/// Append-port summing mixer.
pub mod summer;

pub use delay::Delay;
pub use distortion::{Curve, Disto};
pub use engine::Graph;
pub use filter::{LowPass, ResonantLowPass, SvFilter};
pub use granulate::{GrainState, Granulator};
pub use line::{Line, LineState};
pub use node::{NodeId, UGen};
pub use noise::Noise;
pub use oscillator::Oscil;
pub use port::{Connection, InputKind, InputPort, InputSpec, PortId, Ports};
pub use ring::Ring;
pub use summer::Summer;
