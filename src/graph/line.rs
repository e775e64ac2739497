use tracing::trace;

use crate::graph::node::UGen;
use crate::graph::port::Ports;

/*
Line
====

A one-shot linear ramp from `start` to `end` over `duration` seconds.

    Idle ──activate()──▶ Ramping ──duration elapsed──▶ Done
     │                      │                            │
   start           start + n·step                       end

The per-frame delta is computed once when the ramp is armed (on activation,
or on the first rate change after it) so the hot path is a single add.
activate() can be called again at any time to restart from `start`.

Line has no inputs. It is meant to be patched into other nodes' ports
(frequency sweeps, amplitude fades), not to receive patches.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineState {
    Idle,
    Ramping,
    Done,
}

#[derive(Debug, Clone)]
pub struct Line {
    start: f32,
    end: f32,
    duration: f32,
    state: LineState,
    value: f32,
    step: f32,
    remaining: u64,
    armed: bool,
    sample_rate: f32,
}

impl Line {
    pub fn new(duration: f32, start: f32, end: f32) -> Self {
        Self {
            start,
            end,
            duration: duration.max(0.0),
            state: LineState::Idle,
            value: start,
            step: 0.0,
            remaining: 0,
            armed: false,
            sample_rate: 0.0,
        }
    }

    pub fn state(&self) -> LineState {
        self.state
    }

    /// Current output value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Start (or restart) the ramp from `start`.
    pub fn activate(&mut self) {
        self.value = self.start;
        self.state = LineState::Ramping;
        self.arm(self.duration);
    }

    /// Reconfigure the ramp and start it.
    pub fn activate_with(&mut self, duration: f32, start: f32, end: f32) {
        self.duration = duration.max(0.0);
        self.start = start;
        self.end = end;
        self.activate();
    }

    pub fn is_at_end(&self) -> bool {
        self.state == LineState::Done
    }

    /// Change the target. A running ramp bends toward it over its remaining
    /// time.
    pub fn set_end(&mut self, end: f32) {
        self.end = end;
        if self.state == LineState::Ramping && self.armed && self.remaining > 0 {
            self.step = (self.end - self.value) / self.remaining as f32;
        }
    }

    /// Duration used by the next activation.
    pub fn set_duration(&mut self, duration: f32) {
        self.duration = duration.max(0.0);
    }

    fn arm(&mut self, seconds: f32) {
        if self.sample_rate <= 0.0 {
            self.armed = false;
            return;
        }
        self.armed = true;
        self.remaining = (seconds * self.sample_rate).round() as u64;
        if self.remaining == 0 {
            self.finish();
        } else {
            self.step = (self.end - self.value) / self.remaining as f32;
        }
    }

    fn finish(&mut self) {
        self.state = LineState::Done;
        self.value = self.end;
        self.remaining = 0;
        trace!("line reached {}", self.end);
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new(1.0, 1.0, 0.0)
    }
}

impl UGen for Line {
    fn generate(&mut self, _inputs: &Ports, out: &mut [f32]) {
        match self.state {
            LineState::Idle => out.fill(self.start),
            LineState::Done => out.fill(self.end),
            LineState::Ramping => {
                out.fill(self.value);
                if !self.armed {
                    return;
                }
                self.value += self.step;
                self.remaining -= 1;
                if self.remaining == 0 {
                    self.finish();
                }
            }
        }
    }

    fn sample_rate_changed(&mut self, sample_rate: f32) {
        let previous = self.sample_rate;
        self.sample_rate = sample_rate;
        if self.state != LineState::Ramping {
            return;
        }
        if self.armed && previous > 0.0 {
            let seconds_left = self.remaining as f32 / previous;
            self.arm(seconds_left);
        } else {
            self.arm(self.duration);
        }
    }
}
