//! Boundary to the game engine.
//!
//! [`EngineFacade`] is the capability interface the modes need from the host
//! engine. It is consumed, not implemented, by the runtime; [`InMemoryEngine`]
//! stands in for the real thing in tests and in the simulator. All calls from
//! the modes go through [`EngineCalls`], which turns failures into fallbacks.

mod facade;
mod guard;
mod memory;

pub use facade::{EngineError, EngineFacade, EngineResult};
pub use guard::EngineCalls;
pub use memory::{EnginePlayer, InMemoryEngine};
