use crate::error::Result;
use crate::graph::node::{NodeId, UGen};
use crate::graph::port::{Connection, InputSpec, Ports};

/*
Summing Mixer
=============

Summer is the one node whose fan-in is unbounded: every node patched into it
gets a fresh AUDIO port instead of overwriting port 0.

    osc_a ──┐
    osc_b ──┼──▶ Summer ──▶ out
    noise ──┘

Unpatching removes the port that edge created and compacts the list, so a
long-lived bus does not accumulate dead sockets.

Unlike every other leaf, generate() accumulates: the frame is zeroed and then
each port's cached frame is added on top. An empty Summer outputs silence.

The root output bus of every Graph is a Summer.
*/

/// Sums any number of patched inputs.
#[derive(Debug, Default)]
pub struct Summer;

impl Summer {
    pub fn new() -> Self {
        Self
    }
}

impl UGen for Summer {
    fn generate(&mut self, inputs: &Ports, out: &mut [f32]) {
        out.fill(0.0);
        for port in inputs.iter() {
            for (sample, value) in out.iter_mut().zip(port.last_values()) {
                *sample += *value;
            }
        }
    }

    fn add_input(&mut self, ports: &mut Ports, source: NodeId) -> Result<Connection> {
        Ok(ports.push_connected(InputSpec::audio("summand"), source))
    }

    fn remove_input(&mut self, ports: &mut Ports, source: NodeId) -> Option<usize> {
        let index = ports.find_incoming(source)?;
        ports.remove(index);
        Some(index)
    }
}
