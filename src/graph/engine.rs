use tracing::{debug, trace, warn};

use crate::config::OutputConfig;
use crate::error::{GraphError, Result};
use crate::graph::node::{NodeId, UGen};
use crate::graph::port::{Connection, InputKind, InputPort, PortId, Ports};
use crate::graph::summer::Summer;

/*
Pull-Based Evaluation
=====================

The graph is an arena of nodes. Edges live in the consumer's ports as
non-owning `NodeId`s pointing at the producer. Rendering starts at the root
bus and pulls upstream:

    driver ──tick──▶ bus ──▶ summer ──▶ filter ──▶ osc
                         └──▶ delay ─────────────┘

Here `osc` has two consumers (filter and delay), so it gets ticked twice per
frame. Without care it would advance its phase twice.

Fan-out counter
---------------

Every node counts the edges it produces into (`output_count`) and keeps a
round-robin cursor (`current_tick`):

    tick():
        fresh = current_tick == 0
        if output_count > 0:
            current_tick = (current_tick + 1) % output_count
        if fresh:
            tick inputs, generate into the cache
        copy cache → caller

With k consumers the first pull of a frame generates and the next k-1 read
the cache, so every consumer sees the same sample and side effects run once.
After k pulls the cursor is back at 0. Nodes with no consumers (the bus)
always generate.

This relies on each node being pulled exactly `output_count` times per frame.
`patch`/`unpatch` keep the counter in lockstep with the edges:

  - every edge created increments the producer's count,
  - every edge removed (explicitly or by being overwritten) decrements it,
  - any topology change resets the cursor to 0,
  - edges that would close a cycle are rejected up front.

Rate and channel propagation
----------------------------

Both flow from consumer to producer. The side closest to the hardware is
authoritative: patching into a configured node copies its rate onto the
producer, and AUDIO ports push their width onto whatever feeds them.
*/

struct NodeEntry {
    ugen: Box<dyn UGen>,
    ports: Ports,
    last_values: Vec<f32>,
    sample_rate: f32,
    output_count: usize,
    current_tick: usize,
}

/// Owner of every node, edge and the root output bus.
pub struct Graph {
    nodes: Vec<Option<NodeEntry>>,
    bus: NodeId,
    config: OutputConfig,
}

impl Graph {
    /// Create a graph whose root bus renders in `config`'s format.
    pub fn new(config: OutputConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: OutputConfig) -> Self {
        let mut graph = Self {
            nodes: Vec::new(),
            bus: NodeId::from_raw(0),
            config,
        };
        graph.bus = graph.add(Summer::new());
        graph.set_rate_unchecked(graph.bus, config.sample_rate);
        graph.cascade_channels(graph.bus, config.channels);
        graph
    }

    /// The root bus the output driver ticks once per frame.
    pub fn output(&self) -> NodeId {
        self.bus
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Adopt a new output format and cascade it through everything patched
    /// into the bus. Called by the backend when it opens a device.
    pub fn configure_output(&mut self, config: OutputConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.set_rate_unchecked(self.bus, config.sample_rate);
        self.cascade_channels(self.bus, config.channels);
        debug!(
            "output configured: {} Hz, {} channel(s)",
            config.sample_rate, config.channels
        );
        Ok(())
    }

    // -----------------------------------------------------------------
    // Nodes
    // -----------------------------------------------------------------

    /// Insert a node. It is silent until patched somewhere reachable.
    pub fn add<U: UGen>(&mut self, ugen: U) -> NodeId {
        self.add_boxed(Box::new(ugen))
    }

    pub fn add_boxed(&mut self, mut ugen: Box<dyn UGen>) -> NodeId {
        let id = NodeId::from_raw(self.nodes.len() as u32);
        let ports = Ports::new(id, &ugen.inputs(), 1);
        ugen.channel_count_changed(1);
        trace!("added {} as {}", ugen.name(), id);
        self.nodes.push(Some(NodeEntry {
            ugen,
            ports,
            last_values: vec![0.0; 1],
            sample_rate: 0.0,
            output_count: 0,
            current_tick: 0,
        }));
        id
    }

    /// Remove a node that no longer feeds anything, releasing the edges it
    /// consumes. Returns the leaf so callers can inspect or reuse it.
    pub fn remove(&mut self, id: NodeId) -> Result<Box<dyn UGen>> {
        if id == self.bus {
            return Err(GraphError::OutputBus(id));
        }
        let outputs = self.entry(id)?.output_count;
        if outputs > 0 {
            return Err(GraphError::NodeInUse { node: id, outputs });
        }
        let entry = self.nodes[id.index()]
            .take()
            .ok_or(GraphError::NodeNotFound(id))?;
        for source in entry.ports.iter().filter_map(InputPort::incoming) {
            self.release_output(source);
        }
        debug!("removed {} ({})", id, entry.ugen.name());
        Ok(entry.ugen)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.entry(id).is_ok()
    }

    /// Number of live nodes, the bus included.
    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow a leaf as its concrete type.
    pub fn node<T: UGen>(&self, id: NodeId) -> Option<&T> {
        let ugen: &dyn UGen = &*self.entry(id).ok()?.ugen;
        ugen.as_any().downcast_ref::<T>()
    }

    /// Mutably borrow a leaf as its concrete type (e.g. to `activate` a Line).
    pub fn node_mut<T: UGen>(&mut self, id: NodeId) -> Option<&mut T> {
        let ugen: &mut dyn UGen = &mut *self.entry_mut(id).ok()?.ugen;
        ugen.as_any_mut().downcast_mut::<T>()
    }

    pub fn sample_rate(&self, id: NodeId) -> Result<f32> {
        Ok(self.entry(id)?.sample_rate)
    }

    pub fn channel_count(&self, id: NodeId) -> Result<usize> {
        Ok(self.entry(id)?.last_values.len())
    }

    /// Number of edges `id` currently produces into.
    pub fn output_count(&self, id: NodeId) -> Result<usize> {
        Ok(self.entry(id)?.output_count)
    }

    /// The frame `id` produced on its last real generation.
    pub fn last_values(&self, id: NodeId) -> Result<&[f32]> {
        Ok(&self.entry(id)?.last_values)
    }

    // -----------------------------------------------------------------
    // Ports
    // -----------------------------------------------------------------

    pub fn ports(&self, id: NodeId) -> Result<&Ports> {
        Ok(&self.entry(id)?.ports)
    }

    /// Handle to port `index` of `node`, checked.
    pub fn input(&self, node: NodeId, index: usize) -> Result<PortId> {
        self.port(PortId::new(node, index)).map(|_| PortId::new(node, index))
    }

    /// Handle to the port of `node` declared as `name`.
    pub fn input_named(&self, node: NodeId, name: &str) -> Result<PortId> {
        let index = self
            .entry(node)?
            .ports
            .position(name)
            .ok_or_else(|| GraphError::UnknownPort {
                node,
                name: name.to_owned(),
            })?;
        Ok(PortId::new(node, index))
    }

    pub fn port(&self, port: PortId) -> Result<&InputPort> {
        self.entry(port.node)?
            .ports
            .get(port.index)
            .ok_or(GraphError::PortNotFound {
                node: port.node,
                index: port.index,
            })
    }

    /// Set the constant an unpatched port holds. On a patched port the value
    /// is overwritten by the next pull.
    pub fn set_input(&mut self, port: PortId, value: f32) -> Result<()> {
        self.port_mut(port)?.set_last_value(value);
        Ok(())
    }

    pub fn input_value(&self, port: PortId) -> Result<f32> {
        Ok(self.port(port)?.last_value())
    }

    // -----------------------------------------------------------------
    // Patching
    // -----------------------------------------------------------------

    /// Patch `from`'s output into `to`, using `to`'s fan-in strategy
    /// (port 0 by default, a fresh port for mixers). Returns `to` so calls
    /// can be chained.
    pub fn patch(&mut self, from: NodeId, to: NodeId) -> Result<NodeId> {
        self.entry(from)?;
        self.ensure_acyclic(from, to)?;
        let entry = self.entry_mut(to)?;
        let connection = {
            let NodeEntry { ugen, ports, .. } = entry;
            ugen.add_input(ports, from)?
        };
        self.finish_patch(from, to, connection);
        Ok(to)
    }

    /// Patch `from`'s output into one specific port. Returns the port's owner.
    pub fn patch_port(&mut self, from: NodeId, port: PortId) -> Result<NodeId> {
        self.entry(from)?;
        self.port(port)?;
        self.ensure_acyclic(from, port.node)?;
        let connection = self
            .entry_mut(port.node)?
            .ports
            .connect(port.index, from)?;
        self.finish_patch(from, port.node, connection);
        Ok(port.node)
    }

    /// Adopt the output format and patch `from` into the root bus.
    pub fn patch_output(&mut self, from: NodeId) -> Result<()> {
        self.entry(from)?;
        self.set_rate_unchecked(from, self.config.sample_rate);
        self.cascade_channels(from, self.config.channels);
        self.patch(from, self.bus)?;
        Ok(())
    }

    /// Remove one edge from `from` into `to`, using `to`'s fan-in strategy.
    pub fn unpatch(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        self.entry(from)?;
        let entry = self.entry_mut(to)?;
        let removed = {
            let NodeEntry { ugen, ports, .. } = entry;
            ugen.remove_input(ports, from)
        };
        let port = removed.ok_or(GraphError::EdgeNotFound { from, to })?;
        self.release_output(from);
        debug!("unpatched {} from {} port {}", from, to, port);
        Ok(())
    }

    /// Remove the edge from `from` into a specific port.
    pub fn unpatch_port(&mut self, from: NodeId, port: PortId) -> Result<()> {
        self.entry(from)?;
        let input = self.port_mut(port)?;
        if input.incoming() != Some(from) {
            return Err(GraphError::EdgeNotFound {
                from,
                to: port.node,
            });
        }
        input.set_incoming(None);
        self.release_output(from);
        debug!("unpatched {} from port {}", from, port);
        Ok(())
    }

    pub fn unpatch_output(&mut self, from: NodeId) -> Result<()> {
        self.unpatch(from, self.bus)
    }

    fn finish_patch(&mut self, from: NodeId, to: NodeId, connection: Connection) {
        if let Some(previous) = connection.replaced {
            self.release_output(previous);
            debug!("{} replaced {} at {} port {}", from, previous, to, connection.port);
        }

        let (kind, width, rate) = match self.entry(to) {
            Ok(entry) => match entry.ports.get(connection.port) {
                Some(port) => (port.kind(), port.channel_count(), entry.sample_rate),
                None => return,
            },
            Err(_) => return,
        };
        if kind == InputKind::Audio {
            self.cascade_channels(from, width);
        }
        if rate > 0.0 {
            self.set_rate_unchecked(from, rate);
        }

        if let Ok(producer) = self.entry_mut(from) {
            producer.output_count += 1;
            producer.current_tick = 0;
            debug!(
                "patched {} -> {} port {} (outputs = {})",
                from, to, connection.port, producer.output_count
            );
        }
    }

    fn release_output(&mut self, id: NodeId) {
        if let Ok(entry) = self.entry_mut(id) {
            entry.output_count = entry.output_count.saturating_sub(1);
            entry.current_tick = 0;
        }
    }

    fn ensure_acyclic(&self, from: NodeId, to: NodeId) -> Result<()> {
        self.entry(to)?;
        if self.depends_on(from, to) {
            return Err(GraphError::CycleDetected { from, to });
        }
        Ok(())
    }

    /// True if `target` is `start` or feeds it, directly or transitively.
    fn depends_on(&self, start: NodeId, target: NodeId) -> bool {
        let mut visited = vec![false; self.nodes.len()];
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            if id == target {
                return true;
            }
            if std::mem::replace(&mut visited[id.index()], true) {
                continue;
            }
            if let Ok(entry) = self.entry(id) {
                stack.extend(entry.ports.iter().filter_map(InputPort::incoming));
            }
        }
        false
    }

    // -----------------------------------------------------------------
    // Rate and channel propagation
    // -----------------------------------------------------------------

    /// Set `id`'s sample rate and push it to every node feeding it.
    ///
    /// No-op when the rate is unchanged. Non-positive or non-finite rates are
    /// ignored.
    ///
    /// On the root bus this is [`configure_output`](Self::configure_output)
    /// with the new rate, so the bus and the output format never disagree.
    pub fn set_sample_rate(&mut self, id: NodeId, sample_rate: f32) -> Result<()> {
        self.entry(id)?;
        if id == self.bus && sample_rate.is_finite() && sample_rate > 0.0 {
            return self.configure_output(OutputConfig {
                sample_rate,
                ..self.config
            });
        }
        self.set_rate_unchecked(id, sample_rate);
        Ok(())
    }

    fn set_rate_unchecked(&mut self, id: NodeId, sample_rate: f32) {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            warn!("ignoring sample rate {} for {}", sample_rate, id);
            return;
        }
        let Ok(entry) = self.entry_mut(id) else {
            return;
        };
        if entry.sample_rate == sample_rate {
            return;
        }
        entry.sample_rate = sample_rate;
        entry.ugen.sample_rate_changed(sample_rate);
        trace!("{} ({}) now runs at {} Hz", id, entry.ugen.name(), sample_rate);

        for index in 0..entry.ports.len() {
            if let Some(source) = self.incoming(id, index) {
                self.set_rate_unchecked(source, sample_rate);
            }
        }
    }

    /// Set `id`'s channel count, resizing its AUDIO ports and pushing the
    /// count to whatever feeds them. CONTROL ports stay one value wide.
    ///
    /// On the root bus this goes through
    /// [`configure_output`](Self::configure_output) like `set_sample_rate`.
    pub fn set_channel_count(&mut self, id: NodeId, channels: usize) -> Result<()> {
        self.entry(id)?;
        if id == self.bus && channels > 0 {
            return self.configure_output(OutputConfig {
                channels,
                ..self.config
            });
        }
        self.cascade_channels(id, channels);
        Ok(())
    }

    /// Stops at nodes that already have `channels` everywhere, so a producer
    /// shared by several ports is only walked once.
    fn cascade_channels(&mut self, id: NodeId, channels: usize) {
        if channels == 0 {
            warn!("ignoring channel count 0 for {}", id);
            return;
        }
        let Ok(entry) = self.entry_mut(id) else {
            return;
        };
        entry.ports.set_channels(channels);
        let settled = entry.last_values.len() == channels
            && entry
                .ports
                .iter()
                .all(|port| port.kind() != InputKind::Audio || port.channel_count() == channels);
        if settled {
            return;
        }
        let port_count = entry.ports.len();

        for index in 0..port_count {
            let Ok(entry) = self.entry_mut(id) else {
                return;
            };
            let Some(port) = entry.ports.get_mut(index) else {
                continue;
            };
            if port.kind() != InputKind::Audio {
                continue;
            }
            port.set_channel_count(channels);
            if let Some(source) = port.incoming() {
                self.cascade_channels(source, channels);
            }
        }

        let Ok(entry) = self.entry_mut(id) else {
            return;
        };
        if entry.last_values.len() != channels {
            entry.last_values.clear();
            entry.last_values.resize(channels, 0.0);
            entry.ugen.channel_count_changed(channels);
            trace!("{} ({}) now has {} channel(s)", id, entry.ugen.name(), channels);
        }
    }

    // -----------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------

    /// Advance `id` by one frame, writing up to `channel_count` samples
    /// into `out`. Anything past the node's width is zeroed.
    ///
    /// Generates at most once per frame however many consumers pull it;
    /// see the module notes. Never allocates.
    pub fn tick(&mut self, id: NodeId, out: &mut [f32]) {
        let Ok(entry) = self.entry_mut(id) else {
            return;
        };
        let fresh = entry.current_tick == 0;
        if entry.output_count > 0 {
            entry.current_tick = (entry.current_tick + 1) % entry.output_count;
        }

        if fresh {
            let port_count = entry.ports.len();
            for index in 0..port_count {
                self.tick_port(id, index);
            }
            if let Ok(entry) = self.entry_mut(id) {
                let NodeEntry {
                    ugen,
                    ports,
                    last_values,
                    ..
                } = entry;
                ugen.generate(ports, last_values);
            }
        }

        if let Ok(entry) = self.entry(id) {
            let width = entry.last_values.len().min(out.len());
            out[..width].copy_from_slice(&entry.last_values[..width]);
            out[width..].fill(0.0);
        }
    }

    /// Pull one frame from the upstream node of a port into its cache.
    /// Unpatched ports keep their constant.
    fn tick_port(&mut self, id: NodeId, index: usize) {
        let Some((source, mut values)) = self.entry_mut(id).ok().and_then(|entry| {
            let port = entry.ports.get_mut(index)?;
            let source = port.incoming()?;
            Some((source, port.take_values()))
        }) else {
            return;
        };

        self.tick(source, &mut values);

        if let Some(port) = self
            .entry_mut(id)
            .ok()
            .and_then(|entry| entry.ports.get_mut(index))
        {
            port.restore_values(values);
        }
    }

    /// Render one frame from the root bus.
    pub fn render_frame(&mut self, frame: &mut [f32]) {
        self.tick(self.bus, frame);
    }

    /// Fill an interleaved buffer, one bus tick per frame. A trailing partial
    /// frame is zeroed.
    pub fn render_interleaved(&mut self, buffer: &mut [f32]) {
        let channels = self.config.channels;
        let mut frames = buffer.chunks_exact_mut(channels);
        for frame in &mut frames {
            self.tick(self.bus, frame);
        }
        frames.into_remainder().fill(0.0);
    }

    // -----------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------

    fn entry(&self, id: NodeId) -> Result<&NodeEntry> {
        self.nodes
            .get(id.index())
            .and_then(Option::as_ref)
            .ok_or(GraphError::NodeNotFound(id))
    }

    fn entry_mut(&mut self, id: NodeId) -> Result<&mut NodeEntry> {
        self.nodes
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(GraphError::NodeNotFound(id))
    }

    fn port_mut(&mut self, port: PortId) -> Result<&mut InputPort> {
        self.entry_mut(port.node)?
            .ports
            .get_mut(port.index)
            .ok_or(GraphError::PortNotFound {
                node: port.node,
                index: port.index,
            })
    }

    fn incoming(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.entry(id).ok()?.ports.get(index)?.incoming()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::with_config(OutputConfig::default())
    }
}
