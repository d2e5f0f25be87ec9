//! End-of-match detection.

use crate::config::CrankedConfig;
use crate::state::{ChamberState, PlayerId};

/// Latches the first winner of a match.
///
/// Later declarations are refused so that the victory effects and the engine's
/// match end run once per match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VictoryDetector {
    winner: Option<PlayerId>,
}

impl VictoryDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `player` as the winner. Returns false if the match already
    /// has one.
    pub fn declare(&mut self, player: PlayerId) -> bool {
        if self.winner.is_some() {
            return false;
        }
        self.winner = Some(player);
        true
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn is_concluded(&self) -> bool {
        self.winner.is_some()
    }

    pub fn reset(&mut self) {
        self.winner = None;
    }
}

/// Cranked's secondary win rule: lifetime engine kills.
pub fn cranked_lifetime_win(kills: u32, config: &CrankedConfig) -> bool {
    kills >= config.lifetime_kill_target
}

/// The only player still holding lives, if exactly one is left.
///
/// `is_valid` filters out players the engine no longer knows.
pub fn last_player_standing<'a>(
    records: impl IntoIterator<Item = (PlayerId, &'a ChamberState)>,
    mut is_valid: impl FnMut(PlayerId) -> bool,
) -> Option<PlayerId> {
    let mut standing = records
        .into_iter()
        .filter(|(_, state)| state.lives_remaining > 0)
        .map(|(player, _)| player)
        .filter(|player| is_valid(*player));

    let first = standing.next()?;
    match standing.next() {
        Some(_) => None,
        None => Some(first),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_declaration_wins() {
        let mut detector = VictoryDetector::new();

        assert!(detector.declare(PlayerId(3)));
        assert!(!detector.declare(PlayerId(4)));
        assert_eq!(detector.winner(), Some(PlayerId(3)));
    }

    #[test]
    fn last_standing_requires_exactly_one() {
        let alive = ChamberState::new(2, 0);
        let out = ChamberState::new(0, 0);

        assert_eq!(
            last_player_standing([(PlayerId(1), &alive), (PlayerId(2), &out)], |_| true),
            Some(PlayerId(1))
        );
        assert_eq!(
            last_player_standing([(PlayerId(1), &alive), (PlayerId(2), &alive)], |_| true),
            None
        );
        assert_eq!(
            last_player_standing([(PlayerId(1), &out)], |_| true),
            None
        );
    }

    #[test]
    fn invalid_players_do_not_count_as_standing() {
        let alive = ChamberState::new(1, 0);

        let winner = last_player_standing(
            [(PlayerId(1), &alive), (PlayerId(2), &alive)],
            |player| player != PlayerId(2),
        );

        assert_eq!(winner, Some(PlayerId(1)));
    }

    #[test]
    fn lifetime_kills_win_at_target() {
        let config = CrankedConfig::default();

        assert!(!cranked_lifetime_win(49, &config));
        assert!(cranked_lifetime_win(50, &config));
    }
}
