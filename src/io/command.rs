#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, RingBuffer};
#[cfg(feature = "rtrb")]
use tracing::warn;

#[cfg(feature = "rtrb")]
use crate::error::GraphError;
use crate::error::Result;
use crate::graph::{Graph, NodeId, PortId};

/*
Graph Commands
==============

Once a graph is rendering on the audio thread, the control thread can no
longer touch it directly. Edits travel as messages instead:

    control thread                         audio callback
    ──────────────                         ──────────────
    sender.send(cmd) ──▶ [ rtrb ring ] ──▶ renderer drains, then ticks

Draining happens at block boundaries only, so every frame of a block sees
one topology and the fan-out counters stay consistent.

`Edit` carries an arbitrary closure for anything the fixed variants do not
cover (adding nodes, activating a Line). Closures that allocate will
allocate on the audio thread.
*/

pub enum GraphCommand {
    SetInput { port: PortId, value: f32 },
    Patch { from: NodeId, to: NodeId },
    PatchPort { from: NodeId, port: PortId },
    Unpatch { from: NodeId, to: NodeId },
    UnpatchPort { from: NodeId, port: PortId },
    PatchOutput(NodeId),
    UnpatchOutput(NodeId),
    Edit(Box<dyn FnOnce(&mut Graph) + Send>),
}

impl GraphCommand {
    /// Wrap a closure as an `Edit` command.
    pub fn edit<F>(f: F) -> Self
    where
        F: FnOnce(&mut Graph) + Send + 'static,
    {
        GraphCommand::Edit(Box::new(f))
    }

    pub fn apply(self, graph: &mut Graph) -> Result<()> {
        match self {
            GraphCommand::SetInput { port, value } => graph.set_input(port, value),
            GraphCommand::Patch { from, to } => graph.patch(from, to).map(|_| ()),
            GraphCommand::PatchPort { from, port } => graph.patch_port(from, port).map(|_| ()),
            GraphCommand::Unpatch { from, to } => graph.unpatch(from, to),
            GraphCommand::UnpatchPort { from, port } => graph.unpatch_port(from, port),
            GraphCommand::PatchOutput(from) => graph.patch_output(from),
            GraphCommand::UnpatchOutput(from) => graph.unpatch_output(from),
            GraphCommand::Edit(edit) => {
                edit(graph);
                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for GraphCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphCommand::SetInput { port, value } => {
                write!(f, "SetInput({port} = {value})")
            }
            GraphCommand::Patch { from, to } => write!(f, "Patch({from} -> {to})"),
            GraphCommand::PatchPort { from, port } => write!(f, "PatchPort({from} -> {port})"),
            GraphCommand::Unpatch { from, to } => write!(f, "Unpatch({from} -> {to})"),
            GraphCommand::UnpatchPort { from, port } => {
                write!(f, "UnpatchPort({from} -> {port})")
            }
            GraphCommand::PatchOutput(from) => write!(f, "PatchOutput({from})"),
            GraphCommand::UnpatchOutput(from) => write!(f, "UnpatchOutput({from})"),
            GraphCommand::Edit(_) => f.write_str("Edit(..)"),
        }
    }
}

/// Anything the renderer can pull pending commands from.
pub trait CommandReceiver {
    fn pop(&mut self) -> Option<GraphCommand>;
}

#[cfg(feature = "rtrb")]
impl CommandReceiver for Consumer<GraphCommand> {
    fn pop(&mut self) -> Option<GraphCommand> {
        Consumer::pop(self).ok()
    }
}

impl CommandReceiver for std::collections::VecDeque<GraphCommand> {
    fn pop(&mut self) -> Option<GraphCommand> {
        self.pop_front()
    }
}

/// Control-thread half of a command queue.
#[cfg(feature = "rtrb")]
pub struct CommandSender {
    tx: Producer<GraphCommand>,
}

#[cfg(feature = "rtrb")]
impl CommandSender {
    /// Queue a command. Fails with `CommandQueueFull` instead of blocking.
    pub fn send(&mut self, command: GraphCommand) -> Result<()> {
        self.tx.push(command).map_err(|rtrb::PushError::Full(command)| {
            warn!("dropping {:?}: command queue full", command);
            GraphError::CommandQueueFull
        })
    }

    pub fn slots(&self) -> usize {
        self.tx.slots()
    }
}

/// A bounded single-producer, single-consumer command queue.
#[cfg(feature = "rtrb")]
pub fn command_queue(capacity: usize) -> (CommandSender, Consumer<GraphCommand>) {
    let (tx, rx) = RingBuffer::new(capacity);
    (CommandSender { tx }, rx)
}
