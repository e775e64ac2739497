//! Boundary with the outside world: control-thread commands, the
//! audio-thread renderer, and (optionally) a cpal output stream.

/// Messages that edit a graph from another thread.
pub mod command;
/// Default output device driver.
#[cfg(feature = "cpal-output")]
pub mod cpal;
/// Block renderer that drains commands and ticks the root bus.
pub mod renderer;

pub use command::{CommandReceiver, GraphCommand};
#[cfg(feature = "rtrb")]
pub use command::{command_queue, CommandSender};
pub use renderer::Renderer;
