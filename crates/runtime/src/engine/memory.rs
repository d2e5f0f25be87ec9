//! In-memory engine used by tests and the simulator.
//!
//! Keeps a plain record per player and applies every facade call to it, so
//! tests can assert on the resulting equipment, flow flags and presentation
//! without a real engine.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use game_core::{
    AmmoPool, Announcement, Audience, Counter, Effect, Item, PlayerId, ResupplyKind, ScoreRow,
    ScoreboardLayout, Slot, SpotStatus, StatModifiers, TeamId,
};

use super::{EngineError, EngineFacade, EngineResult};

/// Engine-side view of one player.
#[derive(Clone, Debug, PartialEq)]
pub struct EnginePlayer {
    pub valid: bool,
    pub alive: bool,
    pub kills: u32,
    pub team: TeamId,
    pub deploy_enabled: bool,
    pub redeploy_secs: Option<u32>,
    pub skip_man_down: bool,
    pub spectating: bool,
    pub health: u32,
    pub max_health: u32,
    pub speed_multiplier: f32,
    pub slots: BTreeMap<Slot, Item>,
    pub ammo: BTreeMap<(Slot, AmmoPool), u32>,
    pub focus: Option<Slot>,
    pub spot: Option<(SpotStatus, u32)>,
    pub counter: Option<Counter>,
    pub resupplies: Vec<ResupplyKind>,
    pub effects: Vec<Effect>,
    pub score: Option<[u32; 2]>,
}

impl EnginePlayer {
    fn new(team: TeamId) -> Self {
        Self {
            valid: true,
            alive: false,
            kills: 0,
            team,
            deploy_enabled: true,
            redeploy_secs: None,
            skip_man_down: false,
            spectating: false,
            health: StatModifiers::BASELINE.max_health,
            max_health: StatModifiers::BASELINE.max_health,
            speed_multiplier: StatModifiers::BASELINE.speed_multiplier,
            slots: BTreeMap::new(),
            ammo: BTreeMap::new(),
            focus: None,
            spot: None,
            counter: None,
            resupplies: Vec::new(),
            effects: Vec::new(),
            score: None,
        }
    }
}

#[derive(Debug, Default)]
struct EngineState {
    players: BTreeMap<PlayerId, EnginePlayer>,
    layout: Option<ScoreboardLayout>,
    announcements: Vec<(Audience, Announcement)>,
    winner: Option<PlayerId>,
    deploy_requests: Vec<PlayerId>,
    fail_kill_queries: bool,
}

impl EngineState {
    fn player(&self, player: PlayerId) -> EngineResult<&EnginePlayer> {
        self.players
            .get(&player)
            .ok_or(EngineError::UnknownPlayer(player))
    }

    /// Mutable access for effects; departed players reject every call.
    fn active(&mut self, player: PlayerId) -> EngineResult<&mut EnginePlayer> {
        match self.players.get_mut(&player) {
            Some(record) if record.valid => Ok(record),
            Some(_) => Err(EngineError::Rejected {
                call: "player_effect",
                reason: format!("player {player} has left"),
            }),
            None => Err(EngineError::UnknownPlayer(player)),
        }
    }
}

/// Thread-safe in-memory [`EngineFacade`].
#[derive(Debug, Default)]
pub struct InMemoryEngine {
    state: Mutex<EngineState>,
}

impl InMemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_player(
        &self,
        player: PlayerId,
        apply: impl FnOnce(&mut EnginePlayer),
    ) -> EngineResult<()> {
        let mut state = self.lock();
        apply(state.active(player)?);
        Ok(())
    }

    // ----- test and simulator controls -----

    /// Connects `player` on a team of their own. Players start undeployed.
    pub fn add_player(&self, player: PlayerId) {
        let mut state = self.lock();
        let team = TeamId(state.players.len() as u32 + 1);
        state.players.insert(player, EnginePlayer::new(team));
    }

    /// Disconnects `player`. The handle stays known but is no longer valid.
    pub fn remove_player(&self, player: PlayerId) {
        if let Some(record) = self.lock().players.get_mut(&player) {
            record.valid = false;
            record.alive = false;
        }
    }

    /// Marks `player` as spawned with full health.
    pub fn spawn(&self, player: PlayerId) {
        if let Some(record) = self.lock().players.get_mut(&player) {
            record.alive = true;
            record.health = record.max_health;
        }
    }

    pub fn set_alive(&self, player: PlayerId, alive: bool) {
        if let Some(record) = self.lock().players.get_mut(&player) {
            record.alive = alive;
        }
    }

    /// Engine-side bookkeeping of a kill: the killer's counter grows and the
    /// victim goes down.
    pub fn record_kill(&self, killer: PlayerId, victim: PlayerId) {
        let mut state = self.lock();
        if let Some(record) = state.players.get_mut(&killer) {
            record.kills += 1;
        }
        if let Some(record) = state.players.get_mut(&victim) {
            record.alive = false;
        }
    }

    pub fn set_kills(&self, player: PlayerId, kills: u32) {
        if let Some(record) = self.lock().players.get_mut(&player) {
            record.kills = kills;
        }
    }

    /// Makes every kill-counter query fail until switched off.
    pub fn fail_kill_queries(&self, fail: bool) {
        self.lock().fail_kill_queries = fail;
    }

    pub fn player(&self, player: PlayerId) -> Option<EnginePlayer> {
        self.lock().players.get(&player).cloned()
    }

    pub fn layout(&self) -> Option<ScoreboardLayout> {
        self.lock().layout
    }

    pub fn announcements(&self) -> Vec<(Audience, Announcement)> {
        self.lock().announcements.clone()
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.lock().winner
    }

    /// Players the modes asked to deploy since the last call.
    pub fn take_deploy_requests(&self) -> Vec<PlayerId> {
        std::mem::take(&mut self.lock().deploy_requests)
    }
}

impl EngineFacade for InMemoryEngine {
    fn is_valid(&self, player: PlayerId) -> EngineResult<bool> {
        Ok(self
            .lock()
            .players
            .get(&player)
            .is_some_and(|record| record.valid))
    }

    fn is_alive(&self, player: PlayerId) -> EngineResult<bool> {
        Ok(self.lock().player(player)?.alive)
    }

    fn kills(&self, player: PlayerId) -> EngineResult<u32> {
        let state = self.lock();
        if state.fail_kill_queries {
            return Err(EngineError::QueryFailed {
                query: "kills",
                reason: "kill counter unavailable".into(),
            });
        }
        Ok(state.player(player)?.kills)
    }

    fn all_players(&self) -> EngineResult<Vec<PlayerId>> {
        Ok(self.lock().players.keys().copied().collect())
    }

    fn team_of(&self, player: PlayerId) -> EngineResult<TeamId> {
        Ok(self.lock().player(player)?.team)
    }

    fn remove_equipment(&self, player: PlayerId, slot: Slot) -> EngineResult<()> {
        self.with_player(player, |record| {
            record.slots.remove(&slot);
            record.ammo.retain(|(held, _), _| *held != slot);
        })
    }

    fn add_equipment(&self, player: PlayerId, slot: Slot, item: &Item) -> EngineResult<()> {
        self.with_player(player, |record| {
            record.slots.insert(slot, item.clone());
        })
    }

    fn set_ammo(
        &self,
        player: PlayerId,
        slot: Slot,
        pool: AmmoPool,
        amount: u32,
    ) -> EngineResult<()> {
        self.with_player(player, |record| {
            record.ammo.insert((slot, pool), amount);
        })
    }

    fn resupply(&self, player: PlayerId, kind: ResupplyKind) -> EngineResult<()> {
        self.with_player(player, |record| record.resupplies.push(kind))
    }

    fn heal(&self, player: PlayerId, amount: u32) -> EngineResult<()> {
        self.with_player(player, |record| {
            record.health = record.health.saturating_add(amount).min(record.max_health);
        })
    }

    fn set_max_health(&self, player: PlayerId, max_health: u32) -> EngineResult<()> {
        self.with_player(player, |record| {
            record.max_health = max_health;
            record.health = record.health.min(max_health);
        })
    }

    fn set_speed_multiplier(&self, player: PlayerId, multiplier: f32) -> EngineResult<()> {
        self.with_player(player, |record| record.speed_multiplier = multiplier)
    }

    fn force_switch(&self, player: PlayerId, slot: Slot) -> EngineResult<()> {
        self.with_player(player, |record| record.focus = Some(slot))
    }

    fn kill(&self, player: PlayerId) -> EngineResult<()> {
        self.with_player(player, |record| record.alive = false)
    }

    fn enable_deploy(&self, player: PlayerId, enabled: bool) -> EngineResult<()> {
        self.with_player(player, |record| record.deploy_enabled = enabled)
    }

    fn set_redeploy_time(&self, player: PlayerId, secs: u32) -> EngineResult<()> {
        self.with_player(player, |record| record.redeploy_secs = Some(secs))
    }

    fn deploy(&self, player: PlayerId) -> EngineResult<()> {
        let mut state = self.lock();
        if !state.active(player)?.deploy_enabled {
            return Err(EngineError::Rejected {
                call: "deploy",
                reason: format!("deploy disabled for {player}"),
            });
        }
        state.deploy_requests.push(player);
        Ok(())
    }

    fn skip_man_down(&self, player: PlayerId, skip: bool) -> EngineResult<()> {
        self.with_player(player, |record| record.skip_man_down = skip)
    }

    fn set_team(&self, player: PlayerId, team: TeamId) -> EngineResult<()> {
        self.with_player(player, |record| record.team = team)
    }

    fn spectate(&self, player: PlayerId) -> EngineResult<()> {
        self.with_player(player, |record| record.spectating = true)
    }

    fn end_match(&self, winner: PlayerId) -> EngineResult<()> {
        let mut state = self.lock();
        if state.winner.is_some() {
            return Err(EngineError::Rejected {
                call: "end_match",
                reason: "match already ended".into(),
            });
        }
        state.winner = Some(winner);
        Ok(())
    }

    fn set_scoreboard_layout(&self, layout: &ScoreboardLayout) -> EngineResult<()> {
        self.lock().layout = Some(*layout);
        Ok(())
    }

    fn set_scoreboard_row(&self, row: &ScoreRow) -> EngineResult<()> {
        self.with_player(row.player, |record| record.score = Some(row.values))
    }

    fn announce(&self, audience: Audience, announcement: &Announcement) -> EngineResult<()> {
        self.lock()
            .announcements
            .push((audience, announcement.clone()));
        Ok(())
    }

    fn show_counter(&self, player: PlayerId, counter: Counter) -> EngineResult<()> {
        self.with_player(player, |record| record.counter = Some(counter))
    }

    fn hide_counter(&self, player: PlayerId) -> EngineResult<()> {
        self.with_player(player, |record| record.counter = None)
    }

    fn play_effect(&self, player: PlayerId, effect: Effect) -> EngineResult<()> {
        self.with_player(player, |record| record.effects.push(effect))
    }

    fn spot(&self, player: PlayerId, status: SpotStatus, duration_secs: u32) -> EngineResult<()> {
        self.with_player(player, |record| record.spot = Some((status, duration_secs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removing_equipment_drops_its_ammo() {
        let engine = InMemoryEngine::new();
        engine.add_player(PlayerId(1));
        engine
            .set_ammo(PlayerId(1), Slot::Primary, AmmoPool::Magazine, 1)
            .expect("set ammo");

        engine
            .remove_equipment(PlayerId(1), Slot::Primary)
            .expect("remove");

        let record = engine.player(PlayerId(1)).expect("player");
        assert!(record.ammo.is_empty());
    }

    #[test]
    fn deploy_requires_deploy_enabled() {
        let engine = InMemoryEngine::new();
        engine.add_player(PlayerId(1));
        engine
            .enable_deploy(PlayerId(1), false)
            .expect("disable deploy");

        assert!(engine.deploy(PlayerId(1)).is_err());
        assert!(engine.take_deploy_requests().is_empty());
    }

    #[test]
    fn departed_players_reject_effects() {
        let engine = InMemoryEngine::new();
        engine.add_player(PlayerId(1));
        engine.remove_player(PlayerId(1));

        assert!(matches!(
            engine.heal(PlayerId(1), 10),
            Err(EngineError::Rejected { .. })
        ));
        assert_eq!(engine.is_valid(PlayerId(1)), Ok(false));
    }
}
