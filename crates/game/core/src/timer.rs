//! Countdown bookkeeping for per-player timers.
//!
//! A [`Countdown`] is the part of a player's record that the timer loop reads
//! and writes. It does not schedule anything itself: the runtime asks it
//! whether a tick is still current and what happened, then decides whether
//! to post the next tick.

use crate::state::Generation;

/// Per-player countdown state.
///
/// Only one loop can own a countdown at a time: the loop that carries the
/// current [`Generation`] while `active` is set. Every start and every
/// cancellation moves the generation forward, so ticks from older loops are
/// recognised as stale and must not touch anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Countdown {
    remaining_secs: u32,
    generation: Generation,
    active: bool,
}

/// Result of arming a countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArmOutcome {
    /// No loop was running; a new one must be scheduled with this token.
    Started(Generation),
    /// A loop is already running; it picks up the new remaining time on its
    /// next tick.
    Updated(Generation),
}

impl ArmOutcome {
    pub const fn generation(self) -> Generation {
        match self {
            Self::Started(generation) | Self::Updated(generation) => generation,
        }
    }
}

/// Result of delivering one tick to a countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick belongs to a cancelled or superseded loop.
    Stale,
    /// The loop stopped without expiring (player gone or dead).
    Halted,
    /// Still counting; schedule the next tick.
    Running { remaining_secs: u32 },
    /// Reached zero. The loop is finished and must not tick again.
    Expired,
}

impl Countdown {
    /// Idle countdown whose next loop gets a generation past `last`.
    ///
    /// Used when a record is recreated for a returning player, so a tick still
    /// in flight from their previous record can never match.
    pub const fn following(last: Generation) -> Self {
        Self {
            remaining_secs: 0,
            generation: last,
            active: false,
        }
    }

    pub const fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub const fn generation(&self) -> Generation {
        self.generation
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns true when `token` identifies the loop that currently owns
    /// this countdown.
    pub fn is_current(&self, token: Generation) -> bool {
        self.active && self.generation == token
    }

    /// Arms the countdown with `secs` remaining.
    ///
    /// Starting bumps the generation. Arming an active countdown only rewrites
    /// the remaining time and keeps the running loop's token valid.
    pub fn arm(&mut self, secs: u32) -> ArmOutcome {
        self.remaining_secs = secs;
        if self.active {
            return ArmOutcome::Updated(self.generation);
        }
        self.generation = self.generation.next();
        self.active = true;
        ArmOutcome::Started(self.generation)
    }

    /// Adds `secs` to an active countdown, never leaving less than `floor`.
    /// Returns the new remaining time.
    pub fn extend(&mut self, secs: u32, floor: u32) -> u32 {
        self.remaining_secs = self.remaining_secs.saturating_add(secs).max(floor);
        self.remaining_secs
    }

    /// Cancels any running loop. Always bumps the generation, even when idle,
    /// so that a tick already in flight is invalidated.
    pub fn cancel(&mut self) -> Generation {
        self.generation = self.generation.next();
        self.active = false;
        self.remaining_secs = 0;
        self.generation
    }

    /// Stops the current loop without cancelling it.
    pub fn halt(&mut self) {
        self.active = false;
    }

    /// Applies one elapsed tick for the loop holding `token`.
    pub fn tick(&mut self, token: Generation) -> TickOutcome {
        if !self.is_current(token) {
            return TickOutcome::Stale;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.active = false;
            return TickOutcome::Expired;
        }

        TickOutcome::Running {
            remaining_secs: self.remaining_secs,
        }
    }
}
