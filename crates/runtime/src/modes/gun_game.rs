use std::collections::BTreeMap;

use game_core::progression::gun_game::{self, GunGameKill};
use game_core::scoreboard::gun_game_row;
use game_core::{
    Announcement, Audience, ConfigError, DeathKind, GunGameConfig, GunGameState, KillFacts,
    ModeKind, PlayerId, PlayerProgress, PlayerRegistry, Rejection, ScoreboardLayout,
    VictoryDetector, WeaponPackage, WeaponSet, validate_kill,
};
use tracing::{debug, info, trace};

use super::{GameMode, ModeContext, PlayerSnapshot, RollSource, declare_victory, reject};
use crate::events::{MatchEvent, ProgressionEvent};
use crate::reconciler::EquipmentReconciler;
use crate::scheduler::ScheduledTask;

/// Gun Game controller.
pub struct GunGameMode {
    config: GunGameConfig,
    /// Weapon set drawn for this match.
    set: WeaponSet,
    players: PlayerRegistry<GunGameState>,
    /// One rolled package per standard tier, per player.
    packages: BTreeMap<PlayerId, Vec<WeaponPackage>>,
    victory: VictoryDetector,
    rolls: RollSource,
}

impl GunGameMode {
    pub fn new(config: GunGameConfig, match_seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let set = config
            .weapon_sets
            .first()
            .cloned()
            .ok_or(ConfigError::NoWeaponSets)?;

        Ok(Self {
            config,
            set,
            players: PlayerRegistry::new(),
            packages: BTreeMap::new(),
            victory: VictoryDetector::new(),
            rolls: RollSource::new(match_seed),
        })
    }

    fn admit(&mut self, cx: &ModeContext<'_>, player: PlayerId) {
        self.players.join(player, GunGameState::default());
        let packages = gun_game::roll_packages(&self.set, &mut self.rolls.next(player));
        self.packages.insert(player, packages);

        cx.engine.enable_deploy(player, true);
        cx.engine.set_redeploy_time(player, self.config.redeploy_secs);
        cx.engine
            .announce(Audience::Player(player), &Announcement::Welcome);
        self.refresh_row(cx, player);
    }

    /// Applies the loadout of `tier` with the player's rolled packages.
    fn equip(&self, cx: &ModeContext<'_>, player: PlayerId, tier: u32) {
        let packages = self
            .packages
            .get(&player)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let plan = gun_game::tier_plan(&self.config, &self.set, tier, packages);
        EquipmentReconciler::apply(cx.engine, player, &plan);
    }

    fn refresh_row(&self, cx: &ModeContext<'_>, player: PlayerId) {
        if let Some(state) = self.players.get(player) {
            cx.engine.set_scoreboard_row(&gun_game_row(player, state));
        }
    }

    fn promote(&self, cx: &ModeContext<'_>, player: PlayerId, from: u32, tier: u32) {
        debug!(target: "runtime::modes", %player, from, tier, "promoted");
        cx.engine.announce(
            Audience::Player(player),
            &Announcement::LevelUp { tier: tier + 1 },
        );
        self.equip(cx, player, tier);
        for (audience, announcement) in gun_game::tier_notices(player, &self.set, tier) {
            cx.engine.announce(audience, &announcement);
        }
        cx.events.publish(ProgressionEvent::TierChanged {
            player,
            from,
            to: tier,
        });
    }

    /// Knocks a melee victim down a tier and re-equips them if still up.
    fn humiliate(&mut self, cx: &ModeContext<'_>, victim: PlayerId) {
        let Some(state) = self.players.get_mut(victim) else {
            return;
        };
        let from = state.tier;
        let Some(tier) = gun_game::demote(state) else {
            return;
        };

        cx.engine.announce(
            Audience::Player(victim),
            &Announcement::Humiliated { tier: tier + 1 },
        );
        if cx.engine.is_alive(victim) {
            self.equip(cx, victim, tier);
        }
        cx.events.publish(ProgressionEvent::TierChanged {
            player: victim,
            from,
            to: tier,
        });
    }
}

impl GameMode for GunGameMode {
    fn kind(&self) -> ModeKind {
        ModeKind::GunGame
    }

    fn on_match_start(&mut self, cx: &ModeContext<'_>) {
        self.victory.reset();
        cx.engine
            .set_scoreboard_layout(&ScoreboardLayout::for_mode(ModeKind::GunGame));

        if let Some(set) =
            gun_game::pick_weapon_set(&self.config, &mut self.rolls.next(PlayerId(0)))
        {
            self.set = set.clone();
        }
        info!(target: "runtime::modes", set = %self.set.name, "weapon set selected");
        cx.engine.announce(
            Audience::Everyone,
            &Announcement::WeaponSetSelected {
                name: self.set.name.clone(),
            },
        );
        cx.engine.announce(
            Audience::Everyone,
            &Announcement::Rules {
                mode: ModeKind::GunGame,
                goal: self.config.max_tier() + 1,
            },
        );
        cx.events.publish(MatchEvent::WeaponSetSelected {
            name: self.set.name.clone(),
        });

        for player in cx.engine.valid_players() {
            self.admit(cx, player);
        }
        cx.events.publish(MatchEvent::Started {
            mode: ModeKind::GunGame,
        });
    }

    fn on_player_join(&mut self, cx: &ModeContext<'_>, player: PlayerId) {
        if !cx.engine.is_valid(player) {
            debug!(target: "runtime::modes", %player, "join from invalid player ignored");
            return;
        }
        self.admit(cx, player);
        cx.events.publish(MatchEvent::PlayerJoined { player });
    }

    fn on_player_leave(&mut self, cx: &ModeContext<'_>, player: PlayerId) {
        self.packages.remove(&player);
        if self.players.leave(player).is_some() {
            cx.events.publish(MatchEvent::PlayerLeft { player });
        }
    }

    fn on_player_deploy(&mut self, cx: &ModeContext<'_>, player: PlayerId) {
        if !cx.engine.is_valid(player) {
            return;
        }
        let Some(state) = self.players.get_mut(player) else {
            reject(cx, player, Rejection::UnknownPlayer(player));
            return;
        };

        let tier = gun_game::deployed(state);
        self.equip(cx, player, tier);
        self.refresh_row(cx, player);
    }

    fn on_player_earned_kill(
        &mut self,
        cx: &ModeContext<'_>,
        killer: PlayerId,
        victim: PlayerId,
        kind: DeathKind,
    ) {
        let facts = KillFacts {
            killer_valid: cx.engine.is_valid(killer),
            victim_valid: cx.engine.is_valid(victim),
            victim_alive: cx.engine.is_alive(victim),
        };
        if let Err(rejection) = validate_kill(killer, victim, facts) {
            reject(cx, killer, rejection);
            return;
        }
        let Some(state) = self.players.get_mut(killer) else {
            reject(cx, killer, Rejection::UnknownPlayer(killer));
            return;
        };

        let from = state.tier;
        match gun_game::earned_kill(killer, state, cx.clock.now(), &self.config) {
            Ok(GunGameKill::Victory) => {
                declare_victory(cx, &mut self.victory, ModeKind::GunGame, killer);
            }
            Ok(GunGameKill::Promoted { tier }) => self.promote(cx, killer, from, tier),
            Err(rejection) => {
                reject(cx, killer, rejection);
                return;
            }
        }

        if kind.is_melee() {
            self.humiliate(cx, victim);
        }
        self.refresh_row(cx, killer);
        self.refresh_row(cx, victim);
    }

    fn on_player_died(
        &mut self,
        cx: &ModeContext<'_>,
        victim: PlayerId,
        _killer: Option<PlayerId>,
        _kind: DeathKind,
    ) {
        let Some(state) = self.players.get_mut(victim) else {
            return;
        };
        let from = state.tier;
        if gun_game::died(state) {
            cx.events.publish(ProgressionEvent::TierChanged {
                player: victim,
                from,
                to: state.tier,
            });
        }
        self.refresh_row(cx, victim);
    }

    fn on_match_end(&mut self, cx: &ModeContext<'_>) {
        self.players.clear();
        self.packages.clear();
        cx.events.publish(MatchEvent::Ended {
            winner: self.victory.winner(),
        });
    }

    fn on_scheduled(&mut self, _cx: &ModeContext<'_>, task: ScheduledTask) {
        trace!(target: "runtime::modes", ?task, "no gun game handler");
    }

    fn snapshot(&self) -> Vec<PlayerSnapshot> {
        self.players
            .iter()
            .map(|(player, state)| PlayerSnapshot {
                player,
                progress: PlayerProgress::GunGame(*state),
            })
            .collect()
    }

    fn winner(&self) -> Option<PlayerId> {
        self.victory.winner()
    }
}
