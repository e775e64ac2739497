use crate::dsp::delay::DelayLine;
use crate::graph::node::UGen;
use crate::graph::port::{InputSpec, Ports};

/*
Delay / Echo
============

   in ──────────────────────────────┬──────────▶ (+) ──▶ out
    │                               │             ▲
    └──▶ (+) ──▶ [ DelayLine ] ──▶ delayed ──× amplitude
          ▲                         │
          └──── × amplitude ◀───────┘   (feedback only)

Without feedback each input produces a single echo. With feedback the echo
is written back into the line, so repeats decay by `amplitude` each time.
Keep amplitude below 1.0 with feedback on or the echoes grow without bound.

Delay time is set in seconds and converted to samples on every rate change.
The line is sized for `max_delay` seconds; longer requests are clamped.
There is one line per channel.
*/

pub struct Delay {
    max_delay: f32,
    delay_time: f32,
    amplitude: f32,
    feedback: bool,
    sample_rate: f32,
    delay_samples: usize,
    lines: Vec<DelayLine>,
}

impl Delay {
    pub const AUDIO: usize = 0;
    pub const AMPLITUDE: usize = 1;

    /// Echo after `delay_time` seconds, repeating if `feedback` is set.
    pub fn new(max_delay: f32, delay_time: f32, amplitude: f32, feedback: bool) -> Self {
        let max_delay = max_delay.max(0.0);
        Self {
            max_delay,
            delay_time: delay_time.clamp(0.0, max_delay),
            amplitude,
            feedback,
            sample_rate: 0.0,
            delay_samples: 1,
            lines: vec![DelayLine::new(1)],
        }
    }

    /// A single echo, no feedback.
    pub fn echo(delay_time: f32, amplitude: f32) -> Self {
        Self::new(delay_time, delay_time, amplitude, false)
    }

    pub fn delay_time(&self) -> f32 {
        self.delay_time
    }

    /// Clamped to `[0, max_delay]`.
    pub fn set_delay_time(&mut self, seconds: f32) {
        self.delay_time = seconds.clamp(0.0, self.max_delay);
        self.delay_samples = self.samples(self.delay_time).max(1);
    }

    pub fn set_feedback(&mut self, feedback: bool) {
        self.feedback = feedback;
    }

    fn samples(&self, seconds: f32) -> usize {
        (seconds * self.sample_rate).round() as usize
    }

    fn rebuild(&mut self, channels: usize) {
        let capacity = self.samples(self.max_delay).max(1);
        self.lines.clear();
        self.lines.resize_with(channels, || DelayLine::new(capacity));
        self.delay_samples = self.samples(self.delay_time).max(1);
    }
}

impl UGen for Delay {
    fn inputs(&self) -> Vec<InputSpec> {
        vec![
            InputSpec::audio("audio"),
            InputSpec::control("amplitude", self.amplitude),
        ]
    }

    fn generate(&mut self, inputs: &Ports, out: &mut [f32]) {
        let amplitude = inputs.value(Self::AMPLITUDE);
        let audio = inputs.values(Self::AUDIO);
        for ((sample, input), line) in out.iter_mut().zip(audio).zip(&mut self.lines) {
            let delayed = line.read(self.delay_samples);
            if self.feedback {
                line.write(input + amplitude * delayed);
            } else {
                line.write(*input);
            }
            *sample = input + amplitude * delayed;
        }
    }

    fn sample_rate_changed(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.rebuild(self.lines.len().max(1));
    }

    fn channel_count_changed(&mut self, channels: usize) {
        self.rebuild(channels);
    }
}
