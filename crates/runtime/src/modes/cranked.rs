use std::time::Duration;

use game_core::progression::cranked::{self, StreakReward};
use game_core::scoreboard::cranked_row;
use game_core::victory::cranked_lifetime_win;
use game_core::{
    Announcement, ArmOutcome, Audience, Counter, Countdown, CrankedConfig, CrankedState,
    DeathKind, Effect, Generation, KillFacts, ModeKind, PlayerId, PlayerProgress, PlayerRegistry,
    Rejection, ScoreboardLayout, VictoryDetector, validate_kill,
};
use tracing::{debug, info, trace};

use super::{GameMode, ModeContext, PlayerSnapshot, RollSource, declare_victory, reject};
use crate::events::{MatchEvent, ProgressionEvent, TimerEvent};
use crate::reconciler::EquipmentReconciler;
use crate::scheduler::ScheduledTask;
use crate::timers::{TimerCoordinator, TimerStep};

/// Cranked controller.
pub struct CrankedMode {
    config: CrankedConfig,
    players: PlayerRegistry<CrankedState>,
    /// Highest countdown generation any removed record reached. New records
    /// continue past it, so a tick still in flight for a player who left can
    /// never match their next record.
    generation_floor: Generation,
    timers: TimerCoordinator,
    victory: VictoryDetector,
    rolls: RollSource,
}

impl CrankedMode {
    pub fn new(config: CrankedConfig, match_seed: u64, countdown_tick: Duration) -> Self {
        Self {
            config,
            players: PlayerRegistry::new(),
            generation_floor: Generation::default(),
            timers: TimerCoordinator::new(countdown_tick),
            victory: VictoryDetector::new(),
            rolls: RollSource::new(match_seed),
        }
    }

    /// Registers `player` or resets their existing record in place.
    fn admit(&mut self, cx: &ModeContext<'_>, player: PlayerId) {
        match self.players.get_mut(player) {
            Some(state) => state.reset(),
            None => {
                let state = CrankedState {
                    countdown: Countdown::following(self.generation_floor),
                    known_kills: cx.engine.kills(player).unwrap_or(0),
                    ..CrankedState::default()
                };
                self.players.join(player, state);
            }
        }

        cx.engine.set_redeploy_time(player, self.config.redeploy_secs);
        cx.engine.skip_man_down(player, true);
        cx.engine.hide_counter(player);
        cx.engine.announce(
            Audience::Player(player),
            &Announcement::Rules {
                mode: ModeKind::Cranked,
                goal: self.config.win_streak,
            },
        );
        self.refresh_row(cx, player);
    }

    /// Drops the player's streak and stops their countdown.
    fn reset(&mut self, cx: &ModeContext<'_>, player: PlayerId) {
        let Some(state) = self.players.get_mut(player) else {
            return;
        };
        let was_cranked = state.is_cranked;
        state.reset();

        cx.engine.hide_counter(player);
        if was_cranked {
            cx.events.publish(ProgressionEvent::Reset { player });
        }
    }

    /// Ends the match for `winner` and stops every countdown still running.
    fn win(&mut self, cx: &ModeContext<'_>, winner: PlayerId) {
        if !declare_victory(cx, &mut self.victory, ModeKind::Cranked, winner) {
            return;
        }
        for (player, state) in self.players.iter_mut() {
            if state.countdown.is_active() {
                self.timers.cancel(player, &mut state.countdown);
                cx.engine.hide_counter(player);
            }
        }
    }

    fn refresh_row(&mut self, cx: &ModeContext<'_>, player: PlayerId) {
        let Some(state) = self.players.get_mut(player) else {
            return;
        };
        let kills = state.observe_kills(cx.engine.kills(player));
        cx.engine.set_scoreboard_row(&cranked_row(player, state, kills));
    }

    fn grant_reward(
        &self,
        cx: &ModeContext<'_>,
        player: PlayerId,
        streak: u32,
        reward: StreakReward,
    ) {
        let plan = cranked::reward_plan(reward, &self.config);
        EquipmentReconciler::apply(cx.engine, player, &plan);

        match reward {
            StreakReward::Milestone { stats, .. } => {
                cx.engine.play_effect(player, Effect::Spark);
                cx.engine.announce(
                    Audience::Player(player),
                    &Announcement::StreakBonus {
                        streak,
                        max_health: stats.max_health,
                    },
                );
            }
            StreakReward::Bundle => {
                cx.engine.play_effect(player, Effect::Saturated);
                cx.engine
                    .announce(Audience::Everyone, &Announcement::Marked { streak });
            }
            StreakReward::Victory | StreakReward::None => {}
        }
    }

    fn on_countdown_tick(
        &mut self,
        cx: &ModeContext<'_>,
        player: PlayerId,
        generation: Generation,
    ) {
        if self.victory.is_concluded() {
            trace!(target: "runtime::modes", %player, "tick after victory ignored");
            return;
        }
        let Some(state) = self.players.get_mut(player) else {
            trace!(target: "runtime::modes", %player, "tick for departed player");
            return;
        };

        let step = self.timers.on_tick(
            cx.scheduler,
            cx.engine,
            player,
            &mut state.countdown,
            generation,
        );
        match step {
            TimerStep::Stale => {}
            TimerStep::Halted => {
                cx.engine.hide_counter(player);
                cx.events.publish(TimerEvent::Halted { player });
            }
            TimerStep::Running { remaining_secs } => {
                cx.engine.show_counter(
                    player,
                    Counter::Countdown {
                        remaining_secs,
                        streak: state.kill_streak,
                    },
                );
                cx.events.publish(TimerEvent::Ticked {
                    player,
                    remaining_secs,
                });
            }
            TimerStep::Expired => {
                let final_streak = cranked::explode(state);
                info!(target: "runtime::modes", %player, final_streak, "countdown expired");

                cx.engine.hide_counter(player);
                cx.engine.play_effect(player, Effect::Explosion);
                cx.engine.kill(player);
                cx.engine.announce(
                    Audience::Player(player),
                    &Announcement::Exploded { final_streak },
                );
                cx.events.publish(TimerEvent::Expired {
                    player,
                    final_streak,
                });
                cx.events.publish(ProgressionEvent::Reset { player });
                self.refresh_row(cx, player);
            }
        }
    }
}

impl GameMode for CrankedMode {
    fn kind(&self) -> ModeKind {
        ModeKind::Cranked
    }

    fn on_match_start(&mut self, cx: &ModeContext<'_>) {
        self.victory.reset();
        cx.engine
            .set_scoreboard_layout(&ScoreboardLayout::for_mode(ModeKind::Cranked));

        for player in cx.engine.valid_players() {
            self.admit(cx, player);
        }
        cx.events.publish(MatchEvent::Started {
            mode: ModeKind::Cranked,
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
        self.reset(cx, player);
        if let Some(state) = self.players.leave(player) {
            self.generation_floor = self.generation_floor.max(state.countdown.generation());
            cx.events.publish(MatchEvent::PlayerLeft { player });
        }
    }

    fn on_player_deploy(&mut self, cx: &ModeContext<'_>, player: PlayerId) {
        if !cx.engine.is_valid(player) {
            return;
        }
        if !self.players.contains(player) {
            reject(cx, player, Rejection::UnknownPlayer(player));
            return;
        }

        self.reset(cx, player);
        let plan = cranked::spawn_plan(&self.config, &mut self.rolls.next(player));
        EquipmentReconciler::apply(cx.engine, player, &plan);
        self.refresh_row(cx, player);
    }

    fn on_player_earned_kill(
        &mut self,
        cx: &ModeContext<'_>,
        killer: PlayerId,
        victim: PlayerId,
        _kind: DeathKind,
    ) {
        let facts = KillFacts {
            killer_valid: cx.engine.is_valid(killer),
            victim_valid: cx.engine.is_valid(victim),
            victim_alive: false,
        };
        if let Err(rejection) = validate_kill(killer, victim, facts) {
            reject(cx, killer, rejection);
            return;
        }
        let Some(state) = self.players.get_mut(killer) else {
            reject(cx, killer, Rejection::UnknownPlayer(killer));
            return;
        };

        let kill = cranked::earned_kill(state, &self.config);
        self.timers.track(cx.scheduler, killer, kill.countdown);

        cx.engine.show_counter(
            killer,
            Counter::Countdown {
                remaining_secs: kill.remaining_secs,
                streak: kill.streak,
            },
        );
        if let ArmOutcome::Started(_) = kill.countdown {
            cx.events.publish(TimerEvent::Armed {
                player: killer,
                remaining_secs: kill.remaining_secs,
            });
        }
        cx.events.publish(ProgressionEvent::StreakAdvanced {
            player: killer,
            streak: kill.streak,
            remaining_secs: kill.remaining_secs,
        });

        if kill.reward == StreakReward::Victory {
            self.win(cx, killer);
        } else {
            self.grant_reward(cx, killer, kill.streak, kill.reward);
        }

        self.refresh_row(cx, killer);
        let lifetime_kills = self
            .players
            .get(killer)
            .map(|state| state.known_kills)
            .unwrap_or(0);
        if !self.victory.is_concluded() && cranked_lifetime_win(lifetime_kills, &self.config) {
            self.win(cx, killer);
        }
    }

    fn on_player_died(
        &mut self,
        cx: &ModeContext<'_>,
        victim: PlayerId,
        _killer: Option<PlayerId>,
        _kind: DeathKind,
    ) {
        self.reset(cx, victim);
        self.refresh_row(cx, victim);
    }

    fn on_match_end(&mut self, cx: &ModeContext<'_>) {
        let players: Vec<_> = self.players.ids().collect();
        for player in players {
            self.reset(cx, player);
        }
        for (_, state) in self.players.iter() {
            self.generation_floor = self.generation_floor.max(state.countdown.generation());
        }
        self.players.clear();
        cx.events.publish(MatchEvent::Ended {
            winner: self.victory.winner(),
        });
    }

    fn on_scheduled(&mut self, cx: &ModeContext<'_>, task: ScheduledTask) {
        match task {
            ScheduledTask::CountdownTick { player, generation } => {
                self.on_countdown_tick(cx, player, generation);
            }
            other => trace!(target: "runtime::modes", task = ?other, "no cranked handler"),
        }
    }

    fn snapshot(&self) -> Vec<PlayerSnapshot> {
        self.players
            .iter()
            .map(|(player, state)| PlayerSnapshot {
                player,
                progress: PlayerProgress::Cranked(*state),
            })
            .collect()
    }

    fn winner(&self) -> Option<PlayerId> {
        self.victory.winner()
    }
}
