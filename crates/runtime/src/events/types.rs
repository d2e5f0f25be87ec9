//! Event types for different topics.

use game_core::{ModeKind, PlayerId};
use serde::Serialize;

/// Changes to a single player's progression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ProgressionEvent {
    /// Cranked streak grew after a kill.
    StreakAdvanced {
        player: PlayerId,
        streak: u32,
        remaining_secs: u32,
    },
    /// Gun Game tier moved, up on a kill or down on death or humiliation.
    TierChanged { player: PlayerId, from: u32, to: u32 },
    /// One-in-the-Chamber kill confirmed against the engine's counter.
    KillConfirmed { player: PlayerId, kill_count: u32 },
    LifeLost { player: PlayerId, lives_remaining: u32 },
    Eliminated { player: PlayerId },
    /// Per-life progress dropped (death, deploy, leave or explosion).
    Reset { player: PlayerId },
    /// An event was ignored.
    Rejected {
        player: PlayerId,
        code: &'static str,
        reason: String,
    },
}

/// Countdown loop events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TimerEvent {
    Armed { player: PlayerId, remaining_secs: u32 },
    Ticked { player: PlayerId, remaining_secs: u32 },
    Halted { player: PlayerId },
    Expired { player: PlayerId, final_streak: u32 },
}

/// Match lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MatchEvent {
    Started { mode: ModeKind },
    PlayerJoined { player: PlayerId },
    PlayerLeft { player: PlayerId },
    WeaponSetSelected { name: String },
    Victory { player: PlayerId, mode: ModeKind },
    Ended { winner: Option<PlayerId> },
}
