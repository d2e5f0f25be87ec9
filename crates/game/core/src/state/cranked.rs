use crate::timer::Countdown;

/// Cranked progression for one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrankedState {
    pub is_cranked: bool,
    pub kill_streak: u32,
    pub countdown: Countdown,
    /// Last engine kill count that was read successfully.
    pub known_kills: u32,
}

impl CrankedState {
    /// Drops the streak and cancels the countdown. `known_kills` survives,
    /// it tracks the engine's lifetime counter rather than this life.
    pub fn reset(&mut self) {
        self.is_cranked = false;
        self.kill_streak = 0;
        self.countdown.cancel();
    }

    /// Records a fresh engine kill count, or falls back to the last one seen
    /// when the query failed.
    pub fn observe_kills(&mut self, queried: Option<u32>) -> u32 {
        if let Some(kills) = queried {
            self.known_kills = kills;
        }
        self.known_kills
    }
}
