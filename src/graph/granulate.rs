use crate::graph::node::UGen;
use crate::graph::port::{InputSpec, Ports};

/*
Steady Granulator
=================

Chops the input into evenly spaced grains separated by silence:

    amp
     1 ┤    ┌────────┐              ┌────────┐
       │   ╱          ╲            ╱          ╲
     0 ┼──╯            ╰──────────╯            ╰────
       │  fade  grain  fade  space
       └─ InGap ─┘└──── InGrain ────┘└─ InGap ──┘

The node alternates between two states. Lengths are given in seconds and
counted in frames:

  InGap    outputs silence until `space` has elapsed, then samples the
           grain / space / fade ports and enters a grain
  InGrain  outputs input × envelope, where the envelope ramps linearly up
           over `fade`, holds at 1, and ramps down over the final `fade`

Parameters are only read at the gap → grain boundary so one grain's
envelope never changes while it plays. Fade is clamped to half the grain.
The node starts in a gap.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrainState {
    InGrain,
    InGap,
}

pub struct Granulator {
    state: GrainState,
    sample_rate: f32,
    /// Frames spent in the current state.
    elapsed: u32,
    grain: f32,
    space: f32,
    fade: f32,
    grain_frames: u32,
    space_frames: u32,
    fade_frames: u32,
}

impl Granulator {
    pub const AUDIO: usize = 0;
    pub const GRAIN: usize = 1;
    pub const SPACE: usize = 2;
    pub const FADE: usize = 3;

    pub const DEFAULT_GRAIN: f32 = 0.01;
    pub const DEFAULT_SPACE: f32 = 0.02;
    pub const DEFAULT_FADE: f32 = 0.0025;

    /// Lengths in seconds.
    pub fn new(grain: f32, space: f32, fade: f32) -> Self {
        let mut granulator = Self {
            state: GrainState::InGap,
            sample_rate: 0.0,
            elapsed: 0,
            grain: 0.0,
            space: 0.0,
            fade: 0.0,
            grain_frames: 1,
            space_frames: 0,
            fade_frames: 0,
        };
        granulator.set_lengths(grain, space, fade);
        granulator
    }

    pub fn state(&self) -> GrainState {
        self.state
    }

    /// (grain, space, fade) in seconds, as latched at the last grain start.
    pub fn lengths(&self) -> (f32, f32, f32) {
        (self.grain, self.space, self.fade)
    }

    fn set_lengths(&mut self, grain: f32, space: f32, fade: f32) {
        self.grain = grain.max(0.0);
        self.space = space.max(0.0);
        self.fade = fade.clamp(0.0, self.grain / 2.0);
        self.update_frames();
    }

    fn update_frames(&mut self) {
        let rate = self.sample_rate;
        let frames = |seconds: f32| (seconds * rate).round() as u32;
        self.grain_frames = frames(self.grain).max(1);
        self.space_frames = frames(self.space);
        self.fade_frames = frames(self.fade).min(self.grain_frames / 2);
    }

    /// Linear ramps over the first and last `fade_frames` of the grain.
    fn envelope(&self) -> f32 {
        let (pos, fade) = (self.elapsed, self.fade_frames);
        if fade == 0 {
            return 1.0;
        }
        let last = self.grain_frames.saturating_sub(1);
        if pos < fade {
            pos as f32 / fade as f32
        } else if pos + fade > last {
            last.saturating_sub(pos) as f32 / fade as f32
        } else {
            1.0
        }
    }

    fn start_grain(&mut self, inputs: &Ports) {
        self.set_lengths(
            inputs.value(Self::GRAIN),
            inputs.value(Self::SPACE),
            inputs.value(Self::FADE),
        );
        self.state = GrainState::InGrain;
        self.elapsed = 0;
    }
}

impl Default for Granulator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_GRAIN, Self::DEFAULT_SPACE, Self::DEFAULT_FADE)
    }
}

impl UGen for Granulator {
    fn inputs(&self) -> Vec<InputSpec> {
        vec![
            InputSpec::audio("audio"),
            InputSpec::control("grain", self.grain),
            InputSpec::control("space", self.space),
            InputSpec::control("fade", self.fade),
        ]
    }

    fn generate(&mut self, inputs: &Ports, out: &mut [f32]) {
        if self.sample_rate <= 0.0 {
            out.fill(0.0);
            return;
        }
        if self.state == GrainState::InGap && self.elapsed >= self.space_frames {
            self.start_grain(inputs);
        }

        match self.state {
            GrainState::InGap => {
                out.fill(0.0);
                self.elapsed += 1;
            }
            GrainState::InGrain => {
                let gain = self.envelope();
                for (sample, input) in out.iter_mut().zip(inputs.values(Self::AUDIO)) {
                    *sample = gain * input;
                }
                self.elapsed += 1;
                if self.elapsed >= self.grain_frames {
                    self.state = GrainState::InGap;
                    self.elapsed = 0;
                }
            }
        }
    }

    fn sample_rate_changed(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.update_frames();
    }
}
