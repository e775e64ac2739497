//! Error types for graph construction and the output boundary.

use thiserror::Error;

use crate::graph::NodeId;

/// Errors raised while building or rewiring a graph.
///
/// None of these can come out of `tick`: rendering is infallible once the
/// topology is in place.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("node {0} does not exist")]
    NodeNotFound(NodeId),

    #[error("node {node} has no input port {index}")]
    PortNotFound { node: NodeId, index: usize },

    #[error("node {node} has no input port named {name:?}")]
    UnknownPort { node: NodeId, name: String },

    #[error("node {0} has no connectable input")]
    NoDefaultInput(NodeId),

    #[error("no edge from {from} to {to}")]
    EdgeNotFound { from: NodeId, to: NodeId },

    #[error("patching {from} into {to} would create a cycle")]
    CycleDetected { from: NodeId, to: NodeId },

    #[error("node {node} still feeds {outputs} consumer(s)")]
    NodeInUse { node: NodeId, outputs: usize },

    #[error("node {0} is the output bus and cannot be removed")]
    OutputBus(NodeId),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("command queue is full")]
    CommandQueueFull,

    #[cfg(feature = "cpal-output")]
    #[error("no audio output device available")]
    NoOutputDevice,

    #[cfg(feature = "cpal-output")]
    #[error("failed to query default stream config")]
    DefaultStreamConfig(#[from] cpal::DefaultStreamConfigError),

    #[cfg(feature = "cpal-output")]
    #[error("failed to build audio stream")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[cfg(feature = "cpal-output")]
    #[error("failed to play audio stream")]
    PlayStream(#[from] cpal::PlayStreamError),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, GraphError>;
