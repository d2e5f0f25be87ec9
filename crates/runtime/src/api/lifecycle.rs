//! Engine lifecycle events delivered to the active mode.
use serde::{Deserialize, Serialize};

use game_core::{DeathKind, PlayerId};

/// Everything the engine reports to a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleEvent {
    MatchStarted,
    PlayerJoined(PlayerId),
    PlayerLeft(PlayerId),
    PlayerDeployed(PlayerId),
    /// Kill credit for `killer`. Delivered separately from the victim's death.
    EarnedKill {
        killer: PlayerId,
        victim: PlayerId,
        kind: DeathKind,
    },
    Died {
        victim: PlayerId,
        killer: Option<PlayerId>,
        kind: DeathKind,
    },
    RoundEnded,
    MatchEnded,
}
