use ::cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{error, info};

use crate::config::OutputConfig;
use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::io::command::CommandReceiver;
use crate::io::renderer::Renderer;

/// A running output stream. Audio stops when this is dropped.
pub struct CpalOutput {
    _stream: ::cpal::Stream,
    config: OutputConfig,
}

impl CpalOutput {
    /// The format the device was opened with.
    pub fn config(&self) -> &OutputConfig {
        &self.config
    }
}

/// Open the default output device, adopt its rate and channel count, and
/// start rendering `graph` from the stream callback.
pub fn play<R>(mut graph: Graph, rx: R) -> Result<CpalOutput>
where
    R: CommandReceiver + Send + 'static,
{
    let host = ::cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or(GraphError::NoOutputDevice)?;
    let supported = device.default_output_config()?;

    let config = OutputConfig {
        sample_rate: supported.sample_rate().0 as f32,
        channels: supported.channels() as usize,
        ..*graph.config()
    };
    graph.configure_output(config)?;
    info!(
        "opened {} at {} Hz, {} channel(s)",
        device.name().unwrap_or_else(|_| "output device".into()),
        config.sample_rate,
        config.channels
    );

    let mut renderer = Renderer::new(graph, rx);
    let stream = device.build_output_stream(
        &supported.into(),
        move |data: &mut [f32], _| renderer.render_block(data),
        |err| error!("audio stream error: {err}"),
        None,
    )?;
    stream.play()?;

    Ok(CpalOutput {
        _stream: stream,
        config,
    })
}
