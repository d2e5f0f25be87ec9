use crate::state::Millis;

/// One-in-the-Chamber progression for one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChamberState {
    pub lives_remaining: u32,
    /// Kills credited by this mode, at most one per accepted event.
    pub kill_count: u32,
    /// Engine kill counter as of the last confirmed kill.
    pub kill_snapshot: u32,
    pub last_kill_at: Option<Millis>,
    pub eliminated: bool,
}

impl ChamberState {
    pub fn new(lives: u32, kill_snapshot: u32) -> Self {
        Self {
            lives_remaining: lives,
            kill_count: 0,
            kill_snapshot,
            last_kill_at: None,
            eliminated: false,
        }
    }

    /// True while the player can still deploy.
    pub const fn is_standing(&self) -> bool {
        !self.eliminated && self.lives_remaining > 0
    }
}
