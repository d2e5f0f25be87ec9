//! Presentation vocabulary handed to the engine.
//!
//! The engine owns wording, localization and widgets. The modes only say
//! which notice, counter or effect to show and to whom.

use crate::config::ModeKind;
use crate::state::PlayerId;

/// Who sees an announcement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Audience {
    Player(PlayerId),
    Everyone,
}

/// Notices the modes raise. Tier numbers are 1-based, as players see them.
#[derive(Clone, Debug, PartialEq, Eq, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Announcement {
    /// Goal of the match, shown at start.
    Rules { mode: ModeKind, goal: u32 },
    StreakBonus { streak: u32, max_health: u32 },
    Marked { streak: u32 },
    Exploded { final_streak: u32 },
    Winner { player: PlayerId, mode: ModeKind },
    WeaponSetSelected { name: String },
    Welcome,
    LevelUp { tier: u32 },
    HeavyTierReached { player: PlayerId },
    RocketTime,
    FinalTierReached { player: PlayerId },
    FinalTierKnives,
    Humiliated { tier: u32 },
    KillProgress { kills: u32, target: u32 },
    Eliminated,
    LivesRemaining { lives: u32 },
    LastChance,
}

/// Per-player on-screen counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Counter {
    Countdown { remaining_secs: u32, streak: u32 },
    Lives { lives: u32 },
}

/// Visual effects played at a player's position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Effect {
    Spark,
    Explosion,
    Victory,
    Saturated,
}
