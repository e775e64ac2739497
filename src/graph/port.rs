use std::fmt;

use crate::error::{GraphError, Result};
use crate::graph::node::NodeId;

/*
Input Ports
===========

A port is a typed socket on a node. It caches the most recent frame it
received (or the constant the owner left in it) so that `generate` can read
its inputs without caring whether they are patched.

    upstream node ──tick──▶ [ port.values ] ──read──▶ owner.generate()

  AUDIO    values.len() == owner's channel count. Channel changes on the
           owner resize the port and cascade to the upstream node.
  CONTROL  values.len() == 1, always. Meant for slow parameters
           (frequency, grain length, drive).

An unpatched port keeps whatever value was last written into it, so leaves
read "the constant" and "the modulated value" through the same call.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Audio,
    Control,
}

/// Port declaration returned by [`UGen::inputs`](crate::graph::UGen::inputs).
#[derive(Debug, Clone, Copy)]
pub struct InputSpec {
    pub name: &'static str,
    pub kind: InputKind,
    pub initial: f32,
}

impl InputSpec {
    pub const fn audio(name: &'static str) -> Self {
        Self {
            name,
            kind: InputKind::Audio,
            initial: 0.0,
        }
    }

    pub const fn control(name: &'static str, initial: f32) -> Self {
        Self {
            name,
            kind: InputKind::Control,
            initial,
        }
    }
}

/// Handle to one input port of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortId {
    pub node: NodeId,
    pub index: usize,
}

impl PortId {
    pub fn new(node: NodeId, index: usize) -> Self {
        Self { node, index }
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.node, self.index)
    }
}

#[derive(Debug, Clone)]
pub struct InputPort {
    name: &'static str,
    kind: InputKind,
    owner: NodeId,
    values: Vec<f32>,
    incoming: Option<NodeId>,
}

impl InputPort {
    pub(crate) fn new(owner: NodeId, spec: InputSpec, channels: usize) -> Self {
        let len = match spec.kind {
            InputKind::Audio => channels.max(1),
            InputKind::Control => 1,
        };
        Self {
            name: spec.name,
            kind: spec.kind,
            owner,
            values: vec![spec.initial; len],
            incoming: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    /// The node this port belongs to.
    pub fn owner(&self) -> NodeId {
        self.owner
    }

    pub fn incoming(&self) -> Option<NodeId> {
        self.incoming
    }

    pub fn is_patched(&self) -> bool {
        self.incoming.is_some()
    }

    pub fn last_value(&self) -> f32 {
        self.values.first().copied().unwrap_or(0.0)
    }

    pub fn last_values(&self) -> &[f32] {
        &self.values
    }

    pub fn channel_count(&self) -> usize {
        self.values.len()
    }

    /// Overwrite every cached channel with `value`.
    pub fn set_last_value(&mut self, value: f32) {
        self.values.fill(value);
    }

    /// Resize the cache, broadcasting the previous first value into the new
    /// buffer. Returns true if the length changed.
    pub(crate) fn set_channel_count(&mut self, channels: usize) -> bool {
        if self.values.len() == channels {
            return false;
        }
        let held = self.values.first().copied().unwrap_or(0.0);
        self.values.clear();
        self.values.resize(channels, held);
        true
    }

    pub(crate) fn set_incoming(&mut self, source: Option<NodeId>) -> Option<NodeId> {
        std::mem::replace(&mut self.incoming, source)
    }

    /// Swap the value buffer out so the upstream node can be ticked into it
    /// while the graph is mutably borrowed. `Vec::new` does not allocate.
    pub(crate) fn take_values(&mut self) -> Vec<f32> {
        std::mem::take(&mut self.values)
    }

    pub(crate) fn restore_values(&mut self, values: Vec<f32>) {
        self.values = values;
    }
}

/// Result of wiring a producer into a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub port: usize,
    /// Producer that previously fed this port, if the patch overwrote one.
    pub replaced: Option<NodeId>,
}

/// The ordered input ports of one node.
///
/// Index 0 is the default port targeted by node-to-node patches.
#[derive(Debug, Clone)]
pub struct Ports {
    owner: NodeId,
    channels: usize,
    list: Vec<InputPort>,
}

impl Ports {
    pub(crate) fn new(owner: NodeId, specs: &[InputSpec], channels: usize) -> Self {
        let list = specs
            .iter()
            .map(|spec| InputPort::new(owner, *spec, channels))
            .collect();
        Self {
            owner,
            channels,
            list,
        }
    }

    pub fn owner(&self) -> NodeId {
        self.owner
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&InputPort> {
        self.list.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputPort> {
        self.list.iter()
    }

    /// First cached value of port `index` (0.0 if there is no such port).
    #[inline]
    pub fn value(&self, index: usize) -> f32 {
        self.list.get(index).map_or(0.0, InputPort::last_value)
    }

    /// Cached frame of port `index` (empty if there is no such port).
    #[inline]
    pub fn values(&self, index: usize) -> &[f32] {
        self.list
            .get(index)
            .map_or(&[][..], InputPort::last_values)
    }

    pub fn is_patched(&self, index: usize) -> bool {
        self.list.get(index).is_some_and(InputPort::is_patched)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.list.iter().position(|port| port.name == name)
    }

    /// Set the upstream of `index` to `source`.
    pub fn connect(&mut self, index: usize, source: NodeId) -> Result<Connection> {
        let port = self
            .list
            .get_mut(index)
            .ok_or(GraphError::PortNotFound {
                node: self.owner,
                index,
            })?;
        let replaced = port.set_incoming(Some(source));
        Ok(Connection {
            port: index,
            replaced,
        })
    }

    /// Default fan-in: overwrite port 0.
    pub fn connect_default(&mut self, source: NodeId) -> Result<Connection> {
        if self.list.is_empty() {
            return Err(GraphError::NoDefaultInput(self.owner));
        }
        self.connect(0, source)
    }

    /// Append a fresh port and patch `source` into it.
    pub fn push_connected(&mut self, spec: InputSpec, source: NodeId) -> Connection {
        let mut port = InputPort::new(self.owner, spec, self.channels);
        port.set_incoming(Some(source));
        self.list.push(port);
        Connection {
            port: self.list.len() - 1,
            replaced: None,
        }
    }

    /// Index of the port that `remove_input` should clear for `source`:
    /// port 0 if it holds `source`, otherwise the first match.
    pub fn find_incoming(&self, source: NodeId) -> Option<usize> {
        match self.list.first() {
            Some(port) if port.incoming == Some(source) => Some(0),
            _ => self
                .list
                .iter()
                .position(|port| port.incoming == Some(source)),
        }
    }

    /// Default unpatch: clear one port fed by `source`.
    pub fn disconnect(&mut self, source: NodeId) -> Option<usize> {
        let index = self.find_incoming(source)?;
        self.list[index].set_incoming(None);
        Some(index)
    }

    /// Remove a port entirely, compacting the list.
    pub fn remove(&mut self, index: usize) -> Option<InputPort> {
        (index < self.list.len()).then(|| self.list.remove(index))
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut InputPort> {
        self.list.get_mut(index)
    }

    pub(crate) fn set_channels(&mut self, channels: usize) {
        self.channels = channels;
    }
}
