#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::MAX_BLOCK_SIZE;

/// Format of the sink a graph renders into.
///
/// The output backend owns these numbers; the graph's root bus adopts them and
/// cascades them to everything patched in.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputConfig {
    pub sample_rate: f32,
    pub channels: usize,
    /// Frames rendered per call into the backend buffer.
    pub block_size: usize,
}

impl OutputConfig {
    pub fn new(sample_rate: f32, channels: usize) -> Self {
        Self {
            sample_rate,
            channels,
            ..Self::default()
        }
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(GraphError::InvalidConfig(format!(
                "sample rate must be positive, got {}",
                self.sample_rate
            )));
        }
        if self.channels == 0 {
            return Err(GraphError::InvalidConfig(
                "channel count must be at least 1".into(),
            ));
        }
        if self.block_size == 0 || self.block_size > MAX_BLOCK_SIZE {
            return Err(GraphError::InvalidConfig(format!(
                "block size must be in 1..={MAX_BLOCK_SIZE}, got {}",
                self.block_size
            )));
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100.0,
            channels: 2,
            block_size: 512,
        }
    }
}
