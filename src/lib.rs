pub mod config;
pub mod dsp; // Allocation-free signal primitives
pub mod error;
pub mod graph; // Nodes, ports and the pull engine
pub mod io; // Commands, renderer, output device

pub use config::OutputConfig;
pub use error::{GraphError, Result};
pub use graph::{Graph, NodeId, PortId, UGen};

pub const MAX_BLOCK_SIZE: usize = 2048;
