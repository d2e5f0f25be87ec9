//! Per-mode transition rules.
//!
//! Transitions are pure: they take a player's record plus whatever facts the
//! caller read from the engine (validity, liveness, kill counters, the clock)
//! and return either a typed outcome or a [`Rejection`]. They never perform
//! side effects; the runtime turns outcomes into engine calls.
//!
//! Loadout builders for each mode live beside the transitions that use them.
pub mod chamber;
pub mod cranked;
mod debounce;
pub mod gun_game;

pub use debounce::check_debounce;

use crate::error::Rejection;
use crate::state::PlayerId;

/// Engine facts needed to accept a kill credit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KillFacts {
    pub killer_valid: bool,
    pub victim_valid: bool,
    pub victim_alive: bool,
}

impl KillFacts {
    /// Facts for a clean kill: both valid, victim down.
    pub const fn confirmed() -> Self {
        Self {
            killer_valid: true,
            victim_valid: true,
            victim_alive: false,
        }
    }
}

/// Rejects kills by or on invalid players, self kills and phantom kills whose
/// victim is still alive.
pub fn validate_kill(killer: PlayerId, victim: PlayerId, facts: KillFacts) -> Result<(), Rejection> {
    if !facts.killer_valid {
        return Err(Rejection::InvalidPlayer(killer));
    }
    if !facts.victim_valid {
        return Err(Rejection::InvalidPlayer(victim));
    }
    if killer == victim {
        return Err(Rejection::SelfKill(killer));
    }
    if facts.victim_alive {
        return Err(Rejection::VictimAlive(victim));
    }
    Ok(())
}
