/// Circular buffer holding the last `capacity` samples written.
///
/// ```text
///   write ──▶ [ . . . . x . . . ]
///                       ▲ write_pos
///   read(d) looks d slots back from the next write position
/// ```
#[derive(Debug, Clone)]
pub struct DelayLine {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl DelayLine {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0.0; capacity.max(1)],
            write_pos: 0,
        }
    }

    /// Longest delay (in samples) `read` can return.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Sample written `delay_samples` writes ago. Clamped to `1..=capacity`.
    #[inline]
    pub fn read(&self, delay_samples: usize) -> f32 {
        let len = self.buffer.len();
        let delay = delay_samples.clamp(1, len);
        self.buffer[(self.write_pos + len - delay) % len]
    }

    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    /// Read the delayed sample, then write `sample`.
    #[inline]
    pub fn next_sample(&mut self, sample: f32, delay_samples: usize) -> f32 {
        let delayed = self.read(delay_samples);
        self.write(sample);
        delayed
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}
