use crate::state::Millis;

/// Gun Game progression for one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GunGameState {
    pub tier: u32,
    /// Tier the current life started on (or was last promoted/demoted to).
    pub tier_at_last_spawn: u32,
    /// Time of the last accepted kill credit.
    pub last_kill_at: Option<Millis>,
}
