use game_core::{
    AmmoPool, Announcement, Audience, Counter, Effect, Item, PlayerId, ResupplyKind, ScoreRow,
    ScoreboardLayout, Slot, SpotStatus, TeamId,
};
use thiserror::Error;

pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Failures reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("player {0} is not known to the engine")]
    UnknownPlayer(PlayerId),

    #[error("engine query `{query}` failed: {reason}")]
    QueryFailed { query: &'static str, reason: String },

    #[error("engine rejected `{call}`: {reason}")]
    Rejected { call: &'static str, reason: String },

    #[error("engine is unavailable")]
    Unavailable,
}

/// Capabilities the game modes need from the host engine.
///
/// Every call may fail. Implementations must be cheap to call from the match
/// worker: no call may block on another game event.
pub trait EngineFacade: Send + Sync {
    // ----- player queries -----

    fn is_valid(&self, player: PlayerId) -> EngineResult<bool>;
    fn is_alive(&self, player: PlayerId) -> EngineResult<bool>;
    /// Engine-side lifetime kill counter.
    fn kills(&self, player: PlayerId) -> EngineResult<u32>;
    fn all_players(&self) -> EngineResult<Vec<PlayerId>>;
    fn team_of(&self, player: PlayerId) -> EngineResult<TeamId>;

    // ----- equipment -----

    fn remove_equipment(&self, player: PlayerId, slot: Slot) -> EngineResult<()>;
    fn add_equipment(&self, player: PlayerId, slot: Slot, item: &Item) -> EngineResult<()>;
    fn set_ammo(&self, player: PlayerId, slot: Slot, pool: AmmoPool, amount: u32)
    -> EngineResult<()>;
    fn resupply(&self, player: PlayerId, kind: ResupplyKind) -> EngineResult<()>;
    fn heal(&self, player: PlayerId, amount: u32) -> EngineResult<()>;
    fn set_max_health(&self, player: PlayerId, max_health: u32) -> EngineResult<()>;
    fn set_speed_multiplier(&self, player: PlayerId, multiplier: f32) -> EngineResult<()>;
    fn force_switch(&self, player: PlayerId, slot: Slot) -> EngineResult<()>;

    // ----- flow -----

    fn kill(&self, player: PlayerId) -> EngineResult<()>;
    fn enable_deploy(&self, player: PlayerId, enabled: bool) -> EngineResult<()>;
    fn set_redeploy_time(&self, player: PlayerId, secs: u32) -> EngineResult<()>;
    fn deploy(&self, player: PlayerId) -> EngineResult<()>;
    fn skip_man_down(&self, player: PlayerId, skip: bool) -> EngineResult<()>;
    fn set_team(&self, player: PlayerId, team: TeamId) -> EngineResult<()>;
    /// Puts `player` into spectator mode without removing them from the match.
    fn spectate(&self, player: PlayerId) -> EngineResult<()>;
    fn end_match(&self, winner: PlayerId) -> EngineResult<()>;

    // ----- presentation -----

    fn set_scoreboard_layout(&self, layout: &ScoreboardLayout) -> EngineResult<()>;
    fn set_scoreboard_row(&self, row: &ScoreRow) -> EngineResult<()>;
    fn announce(&self, audience: Audience, announcement: &Announcement) -> EngineResult<()>;
    fn show_counter(&self, player: PlayerId, counter: Counter) -> EngineResult<()>;
    fn hide_counter(&self, player: PlayerId) -> EngineResult<()>;
    fn play_effect(&self, player: PlayerId, effect: Effect) -> EngineResult<()>;
    fn spot(&self, player: PlayerId, status: SpotStatus, duration_secs: u32) -> EngineResult<()>;
}
