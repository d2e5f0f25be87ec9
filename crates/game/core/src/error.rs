//! Error types for game-core.
//!
//! Nothing in a match is fatal. Transitions that decide to ignore an event
//! say why through [`Rejection`]; callers log it and carry on. Invalid rule
//! sets are caught once, up front, by [`ConfigError`].

use crate::state::PlayerId;

/// How a caller should treat an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Duplicate or late input that is routinely dropped.
    ///
    /// Examples: debounced kill, kill event without a counter increase
    Expected,

    /// Input that refers to something that does not hold.
    ///
    /// Examples: unknown player, self kill, victim still alive
    Validation,

    /// Setup that can never produce a playable match.
    Invalid,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Expected => "expected",
            Self::Validation => "validation",
            Self::Invalid => "invalid",
        }
    }
}

/// Common interface of game-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for logs and assertions.
    fn error_code(&self) -> &'static str;
}

/// Why a transition ignored an event.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rejection {
    #[error("player {0} is not registered")]
    UnknownPlayer(PlayerId),

    #[error("player {0} is not valid in the engine")]
    InvalidPlayer(PlayerId),

    #[error("player {0} cannot score on themselves")]
    SelfKill(PlayerId),

    #[error("victim {0} is still alive")]
    VictimAlive(PlayerId),

    #[error("kill by {player} arrived {elapsed_ms}ms after the last one (window {window_ms}ms)")]
    Debounced {
        player: PlayerId,
        elapsed_ms: u64,
        window_ms: u64,
    },

    #[error("engine kill count for {player} did not grow (snapshot {snapshot}, observed {observed})")]
    NoKillDelta {
        player: PlayerId,
        snapshot: u32,
        observed: u32,
    },

    #[error("player {0} is already eliminated")]
    AlreadyEliminated(PlayerId),

    #[error("match already has a winner")]
    MatchConcluded,
}

impl GameError for Rejection {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Debounced { .. }
            | Self::NoKillDelta { .. }
            | Self::AlreadyEliminated(_)
            | Self::MatchConcluded => ErrorSeverity::Expected,
            Self::UnknownPlayer(_)
            | Self::InvalidPlayer(_)
            | Self::SelfKill(_)
            | Self::VictimAlive(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownPlayer(_) => "REJECT_UNKNOWN_PLAYER",
            Self::InvalidPlayer(_) => "REJECT_INVALID_PLAYER",
            Self::SelfKill(_) => "REJECT_SELF_KILL",
            Self::VictimAlive(_) => "REJECT_VICTIM_ALIVE",
            Self::Debounced { .. } => "REJECT_DEBOUNCED",
            Self::NoKillDelta { .. } => "REJECT_NO_KILL_DELTA",
            Self::AlreadyEliminated(_) => "REJECT_ALREADY_ELIMINATED",
            Self::MatchConcluded => "REJECT_MATCH_CONCLUDED",
        }
    }
}

/// Mode configuration that cannot run.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("no weapon sets configured")]
    NoWeaponSets,

    #[error("weapon list `{list}` is empty")]
    EmptyWeaponList { list: &'static str },

    #[error("weapon set `{name}` has {actual} weapons, expected {expected}")]
    UnequalWeaponSets {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("`{field}` must be greater than zero")]
    ZeroThreshold { field: &'static str },
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Invalid
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoWeaponSets => "CONFIG_NO_WEAPON_SETS",
            Self::EmptyWeaponList { .. } => "CONFIG_EMPTY_WEAPON_LIST",
            Self::UnequalWeaponSets { .. } => "CONFIG_UNEQUAL_WEAPON_SETS",
            Self::ZeroThreshold { .. } => "CONFIG_ZERO_THRESHOLD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_are_expected_and_bad_references_are_validation() {
        let debounced = Rejection::Debounced {
            player: PlayerId(1),
            elapsed_ms: 120,
            window_ms: 300,
        };

        assert_eq!(debounced.severity(), ErrorSeverity::Expected);
        assert_eq!(
            Rejection::SelfKill(PlayerId(1)).severity(),
            ErrorSeverity::Validation
        );
        assert_eq!(debounced.error_code(), "REJECT_DEBOUNCED");
    }

    #[test]
    fn rejection_messages_name_the_player() {
        let message = Rejection::VictimAlive(PlayerId(4)).to_string();

        assert_eq!(message, "victim #4 is still alive");
    }
}
