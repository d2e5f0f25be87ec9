//! Delayed continuations.
//!
//! The modes never sleep. Anything that has to happen later (a countdown
//! tick, a settle delay before a redeploy) is posted back to the match worker
//! as a command once its delay has elapsed, so it runs between lifecycle
//! events and never interleaves with one.

use std::time::Duration;

use game_core::{Generation, PlayerId};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::trace;

use crate::workers::Command;

/// Work a mode asked to run later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScheduledTask {
    /// One elapsed second of a player's countdown.
    CountdownTick {
        player: PlayerId,
        generation: Generation,
    },
    /// Bring a player with lives left back into play.
    Redeploy { player: PlayerId },
    /// Top up ammunition after a kill settles.
    RefreshAmmo { player: PlayerId },
    RefreshScoreboard { player: PlayerId },
}

impl ScheduledTask {
    pub fn player(&self) -> PlayerId {
        match *self {
            Self::CountdownTick { player, .. }
            | Self::Redeploy { player }
            | Self::RefreshAmmo { player }
            | Self::RefreshScoreboard { player } => player,
        }
    }
}

/// Posts [`ScheduledTask`]s back to the match worker after a delay.
///
/// Holds only a weak sender: once every handle is gone, pending tasks are
/// dropped instead of keeping the worker alive.
#[derive(Clone)]
pub struct Scheduler {
    command_tx: mpsc::WeakSender<Command>,
}

impl Scheduler {
    pub(crate) fn new(command_tx: mpsc::WeakSender<Command>) -> Self {
        Self { command_tx }
    }

    pub fn after(&self, delay: Duration, task: ScheduledTask) {
        let command_tx = self.command_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let Some(command_tx) = command_tx.upgrade() else {
                trace!(target: "runtime::scheduler", ?task, "worker gone, dropping task");
                return;
            };
            if command_tx.send(Command::Scheduled(task)).await.is_err() {
                trace!(target: "runtime::scheduler", ?task, "command channel closed");
            }
        });
    }
}
