//! Match worker that owns the active [`GameMode`].
//!
//! Receives commands from [`MatchHandle`](crate::api::MatchHandle) and from
//! the [`Scheduler`], runs the matching mode hook and acknowledges lifecycle
//! events once they are fully handled.

use std::sync::Arc;

use game_core::Rejection;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::api::LifecycleEvent;
use crate::clock::Clock;
use crate::engine::EngineCalls;
use crate::events::EventBus;
use crate::modes::{GameMode, MatchSnapshot, ModeContext, reject};
use crate::scheduler::{ScheduledTask, Scheduler};

/// Commands that can be sent to the match worker
pub enum Command {
    /// Deliver an engine event; `reply` fires once it has been handled.
    Lifecycle {
        event: LifecycleEvent,
        reply: oneshot::Sender<()>,
    },
    /// A delayed continuation that came due.
    Scheduled(ScheduledTask),
    /// Query the current match state (read-only).
    Snapshot { reply: oneshot::Sender<MatchSnapshot> },
}

/// Background task that processes match commands.
pub struct MatchWorker {
    mode: Box<dyn GameMode>,
    engine: EngineCalls,
    scheduler: Scheduler,
    clock: Arc<dyn Clock>,
    event_bus: EventBus,
    command_rx: mpsc::Receiver<Command>,
    /// Fires on [`MatchRuntime::shutdown`](crate::MatchRuntime::shutdown), or
    /// resolves with an error once the runtime is dropped.
    shutdown_rx: oneshot::Receiver<()>,
}

impl MatchWorker {
    pub fn new(
        mode: Box<dyn GameMode>,
        engine: EngineCalls,
        scheduler: Scheduler,
        clock: Arc<dyn Clock>,
        event_bus: EventBus,
        command_rx: mpsc::Receiver<Command>,
        shutdown_rx: oneshot::Receiver<()>,
    ) -> Self {
        info!("MatchWorker initialized for mode {}", mode.kind());

        Self {
            mode,
            engine,
            scheduler,
            clock,
            event_bus,
            command_rx,
            shutdown_rx,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd);
                }
                _ = &mut self.shutdown_rx => {
                    info!(target: "runtime::worker", "shutdown requested");
                    break;
                }
                else => break,
            }
        }
        debug!("MatchWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Lifecycle { event, reply } => {
                self.handle_lifecycle(event);
                if reply.send(()).is_err() {
                    debug!("Lifecycle reply channel closed (caller dropped)");
                }
            }
            Command::Scheduled(task) => {
                let Self {
                    mode,
                    engine,
                    scheduler,
                    clock,
                    event_bus,
                    ..
                } = self;
                let cx = ModeContext {
                    engine,
                    scheduler,
                    clock: clock.as_ref(),
                    events: event_bus,
                };
                mode.on_scheduled(&cx, task);
            }
            Command::Snapshot { reply } => {
                let snapshot = MatchSnapshot {
                    mode: self.mode.kind(),
                    winner: self.mode.winner(),
                    players: self.mode.snapshot(),
                };
                if reply.send(snapshot).is_err() {
                    debug!("Snapshot reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn handle_lifecycle(&mut self, event: LifecycleEvent) {
        debug!(target: "runtime::worker", ?event, "lifecycle event");

        let Self {
            mode,
            engine,
            scheduler,
            clock,
            event_bus,
            ..
        } = self;
        let cx = ModeContext {
            engine,
            scheduler,
            clock: clock.as_ref(),
            events: event_bus,
        };

        match event {
            LifecycleEvent::MatchStarted => {
                info!(target: "runtime::worker", mode = %mode.kind(), "match started");
                mode.on_match_start(&cx);
            }
            LifecycleEvent::PlayerJoined(player) => mode.on_player_join(&cx, player),
            LifecycleEvent::PlayerLeft(player) => mode.on_player_leave(&cx, player),
            LifecycleEvent::PlayerDeployed(player) => mode.on_player_deploy(&cx, player),
            LifecycleEvent::EarnedKill { killer, .. } if mode.winner().is_some() => {
                reject(&cx, killer, Rejection::MatchConcluded);
            }
            LifecycleEvent::EarnedKill {
                killer,
                victim,
                kind,
            } => mode.on_player_earned_kill(&cx, killer, victim, kind),
            LifecycleEvent::Died {
                victim,
                killer,
                kind,
            } => mode.on_player_died(&cx, victim, killer, kind),
            LifecycleEvent::RoundEnded => mode.on_round_end(&cx),
            LifecycleEvent::MatchEnded => {
                info!(target: "runtime::worker", winner = ?mode.winner(), "match ended");
                mode.on_match_end(&cx);
            }
        }
    }
}
