use std::any::Any;
use std::fmt;

use crate::error::Result;
use crate::graph::port::{Connection, InputSpec, Ports};

/// Handle to a node owned by a [`Graph`](crate::graph::Graph).
///
/// Handles are never reused: once a node is removed, its id keeps resolving
/// to `NodeNotFound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lets the graph hand back concrete leaf types (`graph.node_mut::<Line>(id)`).
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A unit generator: the per-node behavior plugged into the graph engine.
///
/// The graph owns the bookkeeping every node shares (ports, cached output,
/// sample rate, channel count, fan-out counter). Implementors only describe
/// their inputs and how to turn them into one frame.
pub trait UGen: AsAny + Send {
    /// Ports this node exposes, in declaration order. Read once when the node
    /// is added; index 0 is the default port.
    fn inputs(&self) -> Vec<InputSpec> {
        Vec::new()
    }

    /// Produce one frame into `out`.
    ///
    /// Must assign every element of `out` rather than accumulate onto it.
    /// `inputs` holds the frame each port received this tick (or its constant).
    /// Realtime path: no allocation, no panics on ordinary numeric input.
    fn generate(&mut self, inputs: &Ports, out: &mut [f32]);

    /// Called when the sample rate actually changes.
    fn sample_rate_changed(&mut self, _sample_rate: f32) {
        // Default: nothing derived from the rate
    }

    /// Called when the channel count actually changes.
    fn channel_count_changed(&mut self, _channels: usize) {
        // Default: nothing sized per channel
    }

    /// Fan-in strategy used when a node (not a specific port) is patched here.
    ///
    /// Default: overwrite port 0. Mixers override this to grow a new port.
    fn add_input(&mut self, ports: &mut Ports, source: NodeId) -> Result<Connection> {
        ports.connect_default(source)
    }

    /// Inverse of [`add_input`](Self::add_input). Returns the port index that
    /// was cleared or removed, or `None` if `source` was not patched here.
    fn remove_input(&mut self, ports: &mut Ports, source: NodeId) -> Option<usize> {
        ports.disconnect(source)
    }

    /// Short label used in logs.
    fn name(&self) -> &'static str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }
}

impl fmt::Debug for dyn UGen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UGen").field("name", &self.name()).finish()
    }
}
