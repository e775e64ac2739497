use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Noise Colors
============

  white  flat spectrum, uniform in [-1, 1)
  pink   -3 dB/octave, Voss algorithm: six random rows, row k is redrawn
         every 2^k samples, output is the normalized sum
  brown  -6 dB/octave (also called red), white noise through a one-pole
         lowpass at 100 Hz, scaled back up to sit near the other colors

Pink normalization tracks the largest sum ever seen so the output stays in
[-1, 1] without a fixed guess about the generator's range.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tint {
    #[default]
    White,
    Pink,
    /// Same generator as `Brown`.
    Red,
    Brown,
}

const PINK_ROWS: usize = 6;
const PINK_RANGE: f32 = 128.0;
const BROWN_CUTOFF_HZ: f32 = 100.0;
const BROWN_GAIN: f32 = 6.2;

#[derive(Debug, Clone)]
pub struct NoiseGenerator {
    rng: SmallRng,
    rows: [f32; PINK_ROWS],
    key: u32,
    max_key: u32,
    max_sum: f32,
    brown_alpha: f32,
    brown_last: f32,
}

impl NoiseGenerator {
    pub fn new(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let rows = std::array::from_fn(|_| rng.gen::<f32>() * (PINK_RANGE / PINK_ROWS as f32));
        Self {
            rng,
            rows,
            key: 0,
            max_key: (1 << PINK_ROWS) - 1,
            max_sum: 90.0,
            brown_alpha: 0.0,
            brown_last: 0.0,
        }
    }

    /// Recompute the brown-noise smoothing factor, `dt / (RC + dt)`.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        if sample_rate <= 0.0 {
            return;
        }
        let dt = 1.0 / sample_rate;
        let rc = 1.0 / (std::f32::consts::TAU * BROWN_CUTOFF_HZ);
        self.brown_alpha = dt / (rc + dt);
    }

    #[inline]
    pub fn next(&mut self, tint: Tint) -> f32 {
        match tint {
            Tint::White => self.white(),
            Tint::Pink => self.pink(),
            Tint::Red | Tint::Brown => self.brown(),
        }
    }

    #[inline]
    pub fn white(&mut self) -> f32 {
        self.rng.gen_range(-1.0..1.0)
    }

    pub fn pink(&mut self) -> f32 {
        let last_key = self.key;
        self.key = if self.key == self.max_key { 0 } else { self.key + 1 };
        let changed = last_key ^ self.key;

        let row_range = PINK_RANGE / PINK_ROWS as f32;
        for (row, value) in self.rows.iter_mut().enumerate() {
            if changed & (1 << row) != 0 {
                *value = self.rng.gen::<f32>() * row_range;
            }
        }

        let sum: f32 = self.rows.iter().sum();
        if sum > self.max_sum {
            self.max_sum = sum;
        }
        2.0 * (sum / self.max_sum) - 1.0
    }

    pub fn brown(&mut self) -> f32 {
        let white = self.white();
        let smoothed = self.brown_alpha * white + (1.0 - self.brown_alpha) * self.brown_last;
        self.brown_last = smoothed;
        smoothed * BROWN_GAIN
    }
}
