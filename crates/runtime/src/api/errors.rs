//! Unified error types surfaced by the runtime API.
//!
//! Gameplay never fails through here: ignored events and engine hiccups are
//! absorbed inside the match worker. These errors only cover the plumbing
//! between a [`MatchHandle`](super::MatchHandle) and the worker, and setup.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::ConfigError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("match worker command channel closed")]
    CommandChannelClosed,

    #[error("match worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("match worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires an engine to be configured before building")]
    MissingEngine,

    #[error("invalid mode configuration")]
    InvalidConfig(#[from] ConfigError),
}
