//! Countdown loops driven through the scheduler.
//!
//! A loop is a chain of [`ScheduledTask::CountdownTick`]s carrying the
//! generation that started it. The coordinator only ever schedules the next
//! link; the countdown itself lives in the player's record, so cancelling is a
//! generation bump on the record and the next stale tick simply falls through.

use std::time::Duration;

use game_core::{ArmOutcome, Countdown, Generation, PlayerId, TickOutcome};
use tracing::trace;

use crate::engine::EngineCalls;
use crate::scheduler::{ScheduledTask, Scheduler};

/// What a delivered tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStep {
    /// From a cancelled or superseded loop. Nothing was touched.
    Stale,
    /// The player is gone or dead; the loop stopped without expiring.
    Halted,
    /// Still counting; the next tick is scheduled.
    Running { remaining_secs: u32 },
    /// Reached zero. The caller runs its expiry handling, once.
    Expired,
}

#[derive(Debug, Clone, Copy)]
pub struct TimerCoordinator {
    tick: Duration,
}

impl TimerCoordinator {
    pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

    pub fn new(tick: Duration) -> Self {
        Self { tick }
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Starts a loop for a freshly armed countdown. Re-arming a running
    /// countdown schedules nothing: the existing loop reads the new time.
    pub fn track(&self, scheduler: &Scheduler, player: PlayerId, outcome: ArmOutcome) -> Generation {
        if let ArmOutcome::Started(generation) = outcome {
            trace!(target: "runtime::timers", %player, %generation, "countdown loop started");
            self.schedule(scheduler, player, generation);
        }
        outcome.generation()
    }

    /// Invalidates any loop in flight for `player`.
    pub fn cancel(&self, player: PlayerId, countdown: &mut Countdown) -> Generation {
        let generation = countdown.cancel();
        trace!(target: "runtime::timers", %player, %generation, "countdown cancelled");
        generation
    }

    /// Delivers one tick.
    ///
    /// The generation is checked before anything else; a stale tick reads
    /// nothing from the engine and changes nothing.
    pub fn on_tick(
        &self,
        scheduler: &Scheduler,
        engine: &EngineCalls,
        player: PlayerId,
        countdown: &mut Countdown,
        generation: Generation,
    ) -> TimerStep {
        if !countdown.is_current(generation) {
            trace!(target: "runtime::timers", %player, %generation, "stale tick");
            return TimerStep::Stale;
        }
        if !engine.is_valid(player) || !engine.is_alive(player) {
            countdown.halt();
            trace!(target: "runtime::timers", %player, %generation, "countdown halted");
            return TimerStep::Halted;
        }

        match countdown.tick(generation) {
            TickOutcome::Running { remaining_secs } => {
                self.schedule(scheduler, player, generation);
                TimerStep::Running { remaining_secs }
            }
            TickOutcome::Expired => TimerStep::Expired,
            TickOutcome::Stale => TimerStep::Stale,
            TickOutcome::Halted => TimerStep::Halted,
        }
    }

    fn schedule(&self, scheduler: &Scheduler, player: PlayerId, generation: Generation) {
        scheduler.after(
            self.tick,
            ScheduledTask::CountdownTick { player, generation },
        );
    }
}

impl Default for TimerCoordinator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TICK)
    }
}
