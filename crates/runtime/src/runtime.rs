//! High-level match orchestrator.
//!
//! The runtime owns the match worker, wires up command/event channels, and
//! exposes a builder-based API for engine adapters to drive a match.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use game_core::{ModeConfig, ModeKind};

use crate::api::{MatchHandle, Result, RuntimeError};
use crate::clock::{Clock, TokioClock};
use crate::engine::{EngineCalls, EngineFacade};
use crate::events::EventBus;
use crate::modes::build_mode;
use crate::scheduler::Scheduler;
use crate::timers::TimerCoordinator;
use crate::workers::{Command, MatchWorker};

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub mode: ModeConfig,
    /// Seed for every attachment and weapon-set roll. Drawn at random when
    /// unset.
    pub match_seed: Option<u64>,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Period of one countdown tick.
    pub countdown_tick: Duration,
}

impl RuntimeConfig {
    /// Default settings for `kind`.
    pub fn for_mode(kind: ModeKind) -> Self {
        Self {
            mode: ModeConfig::defaults(kind),
            ..Self::default()
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            mode: ModeConfig::defaults(ModeKind::Cranked),
            match_seed: None,
            event_buffer_size: 100,
            command_buffer_size: 32,
            countdown_tick: TimerCoordinator::DEFAULT_TICK,
        }
    }
}

/// Running match.
///
/// Design: the runtime owns the worker task. [`MatchHandle`] provides a
/// cloneable façade for engine adapters.
pub struct MatchRuntime {
    handle: MatchHandle,
    match_seed: u64,
    shutdown_tx: oneshot::Sender<()>,
    worker_handle: JoinHandle<()>,
}

impl MatchRuntime {
    /// Create a new runtime builder
    pub fn builder() -> MatchRuntimeBuilder {
        MatchRuntimeBuilder::new()
    }

    /// Get a cloneable handle to this match
    pub fn handle(&self) -> MatchHandle {
        self.handle.clone()
    }

    /// Seed actually used for this match's rolls.
    pub fn match_seed(&self) -> u64 {
        self.match_seed
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker finishes the command in hand and stops, even while other
    /// handles are still alive. Their later calls fail with
    /// [`RuntimeError::CommandChannelClosed`].
    pub async fn shutdown(self) -> Result<()> {
        if self.shutdown_tx.send(()).is_err() {
            debug!("MatchWorker already stopped");
        }
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`MatchRuntime`].
pub struct MatchRuntimeBuilder {
    config: RuntimeConfig,
    engine: Option<Arc<dyn EngineFacade>>,
    clock: Option<Arc<dyn Clock>>,
}

impl MatchRuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            engine: None,
            clock: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required engine
    pub fn engine(mut self, engine: Arc<dyn EngineFacade>) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Replace the default [`TokioClock`].
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the runtime and spawn its worker.
    pub async fn build(self) -> Result<MatchRuntime> {
        let engine = self.engine.ok_or(RuntimeError::MissingEngine)?;
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(TokioClock::new()) as Arc<dyn Clock>);
        let match_seed = self.config.match_seed.unwrap_or_else(rand::random);

        let mode = build_mode(self.config.mode, match_seed, self.config.countdown_tick)?;
        info!(mode = %mode.kind(), match_seed, "building match runtime");

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let scheduler = Scheduler::new(command_tx.downgrade());

        let handle = MatchHandle::new(command_tx, event_bus.clone());

        let worker = MatchWorker::new(
            mode,
            EngineCalls::new(engine),
            scheduler,
            clock,
            event_bus,
            command_rx,
            shutdown_rx,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(MatchRuntime {
            handle,
            match_seed,
            shutdown_tx,
            worker_handle,
        })
    }
}
