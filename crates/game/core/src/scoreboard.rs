//! Scoreboard layouts and rows.
//!
//! Rows are always rebuilt from the authoritative records; nothing is
//! accumulated on the board itself.

use crate::config::ModeKind;
use crate::state::{ChamberState, CrankedState, GunGameState, PlayerId};

/// Board header and column setup, applied once at match start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScoreboardLayout {
    pub header: &'static str,
    pub columns: [&'static str; 2],
    pub widths: [u8; 2],
    /// 1-based column the board sorts on.
    pub sort_column: u8,
    pub ascending: bool,
}

impl ScoreboardLayout {
    pub const fn for_mode(kind: ModeKind) -> Self {
        match kind {
            ModeKind::Cranked => Self {
                header: "CRANKED",
                columns: ["Kills", "Streak"],
                widths: [1, 2],
                sort_column: 1,
                ascending: false,
            },
            ModeKind::GunGame => Self {
                header: "GUN GAME",
                columns: ["Tier", "Kills"],
                widths: [1, 2],
                sort_column: 1,
                ascending: false,
            },
            ModeKind::Chamber => Self {
                header: "ONE IN THE CHAMBER",
                columns: ["Kills", "Lives"],
                widths: [1, 1],
                sort_column: 1,
                ascending: true,
            },
        }
    }
}

/// One player's two scoreboard values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreRow {
    pub player: PlayerId,
    pub values: [u32; 2],
}

/// Engine kills (already resolved against the last known count) and streak.
pub fn cranked_row(player: PlayerId, state: &CrankedState, kills: u32) -> ScoreRow {
    ScoreRow {
        player,
        values: [kills, state.kill_streak],
    }
}

/// Displayed tier (1-based) and raw tier.
pub fn gun_game_row(player: PlayerId, state: &GunGameState) -> ScoreRow {
    ScoreRow {
        player,
        values: [state.tier + 1, state.tier],
    }
}

pub fn chamber_row(player: PlayerId, state: &ChamberState) -> ScoreRow {
    ScoreRow {
        player,
        values: [state.kill_count, state.lives_remaining],
    }
}
