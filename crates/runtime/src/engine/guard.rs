//! Guarded engine access.
//!
//! Engine failures are never fatal to a match. Queries fall back to a value
//! the caller can live with and effects are dropped; both are logged here so
//! the modes can stay free of error plumbing.

use std::sync::Arc;

use game_core::{
    AmmoPool, Announcement, Audience, Counter, Effect, Item, PlayerId, ResupplyKind, ScoreRow,
    ScoreboardLayout, Slot, SpotStatus, TeamId,
};
use tracing::{debug, warn};

use super::{EngineFacade, EngineResult};

/// Error-absorbing wrapper around an [`EngineFacade`].
#[derive(Clone)]
pub struct EngineCalls {
    engine: Arc<dyn EngineFacade>,
}

impl EngineCalls {
    pub fn new(engine: Arc<dyn EngineFacade>) -> Self {
        Self { engine }
    }

    pub fn inner(&self) -> &Arc<dyn EngineFacade> {
        &self.engine
    }

    fn query<T>(
        &self,
        query: &'static str,
        player: Option<PlayerId>,
        result: EngineResult<T>,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                debug!(
                    target: "runtime::engine",
                    query,
                    player = ?player,
                    error = %error,
                    "engine query failed, using fallback"
                );
                None
            }
        }
    }

    fn effect(&self, call: &'static str, player: Option<PlayerId>, result: EngineResult<()>) {
        if let Err(error) = result {
            warn!(
                target: "runtime::engine",
                call,
                player = ?player,
                error = %error,
                "engine call failed"
            );
        }
    }

    // ----- queries -----

    /// Unknown or unreachable players are treated as invalid.
    pub fn is_valid(&self, player: PlayerId) -> bool {
        self.query("is_valid", Some(player), self.engine.is_valid(player))
            .unwrap_or(false)
    }

    /// A player whose liveness cannot be read is treated as dead.
    pub fn is_alive(&self, player: PlayerId) -> bool {
        self.query("is_alive", Some(player), self.engine.is_alive(player))
            .unwrap_or(false)
    }

    /// `None` when the counter could not be read; callers pick the fallback.
    pub fn kills(&self, player: PlayerId) -> Option<u32> {
        self.query("kills", Some(player), self.engine.kills(player))
    }

    /// Every player the engine reports as valid, in engine order.
    pub fn valid_players(&self) -> Vec<PlayerId> {
        self.query("all_players", None, self.engine.all_players())
            .unwrap_or_default()
            .into_iter()
            .filter(|player| self.is_valid(*player))
            .collect()
    }

    pub fn team_of(&self, player: PlayerId) -> Option<TeamId> {
        self.query("team_of", Some(player), self.engine.team_of(player))
    }

    // ----- equipment -----

    pub fn remove_equipment(&self, player: PlayerId, slot: Slot) {
        self.effect(
            "remove_equipment",
            Some(player),
            self.engine.remove_equipment(player, slot),
        );
    }

    pub fn add_equipment(&self, player: PlayerId, slot: Slot, item: &Item) {
        self.effect(
            "add_equipment",
            Some(player),
            self.engine.add_equipment(player, slot, item),
        );
    }

    pub fn set_ammo(&self, player: PlayerId, slot: Slot, pool: AmmoPool, amount: u32) {
        self.effect(
            "set_ammo",
            Some(player),
            self.engine.set_ammo(player, slot, pool, amount),
        );
    }

    pub fn resupply(&self, player: PlayerId, kind: ResupplyKind) {
        self.effect("resupply", Some(player), self.engine.resupply(player, kind));
    }

    pub fn heal(&self, player: PlayerId, amount: u32) {
        self.effect("heal", Some(player), self.engine.heal(player, amount));
    }

    pub fn set_max_health(&self, player: PlayerId, max_health: u32) {
        self.effect(
            "set_max_health",
            Some(player),
            self.engine.set_max_health(player, max_health),
        );
    }

    pub fn set_speed_multiplier(&self, player: PlayerId, multiplier: f32) {
        self.effect(
            "set_speed_multiplier",
            Some(player),
            self.engine.set_speed_multiplier(player, multiplier),
        );
    }

    pub fn force_switch(&self, player: PlayerId, slot: Slot) {
        self.effect(
            "force_switch",
            Some(player),
            self.engine.force_switch(player, slot),
        );
    }

    // ----- flow -----

    pub fn kill(&self, player: PlayerId) {
        self.effect("kill", Some(player), self.engine.kill(player));
    }

    pub fn enable_deploy(&self, player: PlayerId, enabled: bool) {
        self.effect(
            "enable_deploy",
            Some(player),
            self.engine.enable_deploy(player, enabled),
        );
    }

    pub fn set_redeploy_time(&self, player: PlayerId, secs: u32) {
        self.effect(
            "set_redeploy_time",
            Some(player),
            self.engine.set_redeploy_time(player, secs),
        );
    }

    pub fn deploy(&self, player: PlayerId) {
        self.effect("deploy", Some(player), self.engine.deploy(player));
    }

    pub fn skip_man_down(&self, player: PlayerId, skip: bool) {
        self.effect(
            "skip_man_down",
            Some(player),
            self.engine.skip_man_down(player, skip),
        );
    }

    pub fn set_team(&self, player: PlayerId, team: TeamId) {
        self.effect("set_team", Some(player), self.engine.set_team(player, team));
    }

    pub fn spectate(&self, player: PlayerId) {
        self.effect("spectate", Some(player), self.engine.spectate(player));
    }

    pub fn end_match(&self, winner: PlayerId) {
        self.effect("end_match", Some(winner), self.engine.end_match(winner));
    }

    // ----- presentation -----

    pub fn set_scoreboard_layout(&self, layout: &ScoreboardLayout) {
        self.effect(
            "set_scoreboard_layout",
            None,
            self.engine.set_scoreboard_layout(layout),
        );
    }

    pub fn set_scoreboard_row(&self, row: &ScoreRow) {
        self.effect(
            "set_scoreboard_row",
            Some(row.player),
            self.engine.set_scoreboard_row(row),
        );
    }

    pub fn announce(&self, audience: Audience, announcement: &Announcement) {
        let player = match audience {
            Audience::Player(player) => Some(player),
            Audience::Everyone => None,
        };
        self.effect(
            "announce",
            player,
            self.engine.announce(audience, announcement),
        );
    }

    pub fn show_counter(&self, player: PlayerId, counter: Counter) {
        self.effect(
            "show_counter",
            Some(player),
            self.engine.show_counter(player, counter),
        );
    }

    pub fn hide_counter(&self, player: PlayerId) {
        self.effect("hide_counter", Some(player), self.engine.hide_counter(player));
    }

    pub fn play_effect(&self, player: PlayerId, effect: Effect) {
        self.effect(
            "play_effect",
            Some(player),
            self.engine.play_effect(player, effect),
        );
    }

    pub fn spot(&self, player: PlayerId, status: SpotStatus, duration_secs: u32) {
        self.effect(
            "spot",
            Some(player),
            self.engine.spot(player, status, duration_secs),
        );
    }
}
