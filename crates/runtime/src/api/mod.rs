//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration, workers, or the engine
//! boundary.

pub mod errors;
pub mod handle;
pub mod lifecycle;

pub use errors::{Result, RuntimeError};
pub use handle::MatchHandle;
pub use lifecycle::LifecycleEvent;
