use tracing::warn;

use crate::graph::Graph;
use crate::io::command::CommandReceiver;

/// Audio-thread owner of a [`Graph`].
///
/// Each call to [`render_block`](Self::render_block) first applies every
/// pending command, then renders the block one frame at a time from the
/// root bus. Failed commands are logged and skipped.
pub struct Renderer<R: CommandReceiver> {
    graph: Graph,
    rx: R,
    frame_counter: u64,
}

impl<R: CommandReceiver> Renderer<R> {
    pub fn new(graph: Graph, rx: R) -> Self {
        Self {
            graph,
            rx,
            frame_counter: 0,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    /// Frames rendered since construction.
    pub fn frames(&self) -> u64 {
        self.frame_counter
    }

    /// Apply queued commands. Returns how many were processed.
    pub fn drain_commands(&mut self) -> usize {
        let mut processed = 0;
        while let Some(command) = self.rx.pop() {
            if let Err(err) = command.apply(&mut self.graph) {
                warn!("graph command failed: {err}");
            }
            processed += 1;
        }
        processed
    }

    /// Fill an interleaved buffer in the graph's output format.
    pub fn render_block(&mut self, out: &mut [f32]) {
        self.drain_commands();
        self.graph.render_interleaved(out);
        let channels = self.graph.config().channels;
        self.frame_counter += (out.len() / channels) as u64;
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }
}
