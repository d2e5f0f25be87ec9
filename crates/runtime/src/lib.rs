//! Runtime orchestration for the per-player game-mode progression.
//!
//! This crate wires the pure rules in `game-core` to a host engine. Consumers
//! build a [`MatchRuntime`] around an [`EngineFacade`], feed it lifecycle
//! events through a [`MatchHandle`] and subscribe to what happened.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`engine`] is the engine boundary plus an in-memory engine
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`modes`] holds the Cranked, Gun Game and One-in-the-Chamber controllers
//! - [`timers`], [`scheduler`] and [`clock`] drive delayed work
//! - [`workers`] keeps background tasks internal to the crate
pub mod api;
pub mod clock;
pub mod engine;
pub mod events;
pub mod modes;
pub mod reconciler;
pub mod runtime;
pub mod scheduler;
pub mod timers;

mod workers;

pub use api::{LifecycleEvent, MatchHandle, Result, RuntimeError};
pub use clock::{Clock, TokioClock};
pub use engine::{EngineCalls, EngineError, EngineFacade, EnginePlayer, InMemoryEngine};
pub use events::{Event, EventBus, MatchEvent, ProgressionEvent, TimerEvent, Topic};
pub use modes::{GameMode, MatchSnapshot, PlayerSnapshot};
pub use reconciler::EquipmentReconciler;
pub use runtime::{MatchRuntime, MatchRuntimeBuilder, RuntimeConfig};
pub use scheduler::ScheduledTask;
pub use timers::{TimerCoordinator, TimerStep};
