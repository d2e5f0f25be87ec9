use std::time::Duration;

use game_core::progression::chamber::{self, ChamberDeath};
use game_core::scoreboard::chamber_row;
use game_core::victory::last_player_standing;
use game_core::{
    Announcement, Audience, ChamberConfig, ChamberState, Counter, DeathKind, KillFacts,
    LoadoutPlan, ModeKind, PlayerId, PlayerProgress, PlayerRegistry, Rejection, ScoreboardLayout,
    StatModifiers, VictoryDetector, validate_kill,
};
use tracing::{debug, info, trace};

use super::{GameMode, ModeContext, PlayerSnapshot, declare_victory, reject};
use crate::events::{MatchEvent, ProgressionEvent};
use crate::reconciler::EquipmentReconciler;
use crate::scheduler::ScheduledTask;

/// One-in-the-Chamber controller.
pub struct ChamberMode {
    config: ChamberConfig,
    players: PlayerRegistry<ChamberState>,
    victory: VictoryDetector,
}

impl ChamberMode {
    pub fn new(config: ChamberConfig) -> Self {
        Self {
            config,
            players: PlayerRegistry::new(),
            victory: VictoryDetector::new(),
        }
    }

    fn admit(&mut self, cx: &ModeContext<'_>, player: PlayerId) {
        let kills = cx.engine.kills(player).unwrap_or(0);
        self.players
            .join(player, ChamberState::new(self.config.initial_lives, kills));

        cx.engine.enable_deploy(player, true);
        cx.engine.set_redeploy_time(player, self.config.redeploy_secs);
        cx.engine.show_counter(
            player,
            Counter::Lives {
                lives: self.config.initial_lives,
            },
        );
        self.refresh_row(cx, player);
    }

    /// Gives every valid player a team of their own.
    fn assign_teams(&self, cx: &ModeContext<'_>) {
        for (player, team) in chamber::unique_teams(cx.engine.valid_players()) {
            cx.engine.set_team(player, team);
        }
    }

    fn refresh_row(&self, cx: &ModeContext<'_>, player: PlayerId) {
        if let Some(state) = self.players.get(player) {
            cx.engine.set_scoreboard_row(&chamber_row(player, state));
        }
    }

    fn win(&mut self, cx: &ModeContext<'_>, winner: PlayerId) {
        if declare_victory(cx, &mut self.victory, ModeKind::Chamber, winner) {
            self.assign_teams(cx);
        }
    }

    fn eliminate(&mut self, cx: &ModeContext<'_>, victim: PlayerId, killer: Option<PlayerId>) {
        info!(target: "runtime::modes", %victim, killer = ?killer, "eliminated");
        cx.engine
            .announce(Audience::Player(victim), &Announcement::Eliminated);
        cx.engine.show_counter(victim, Counter::Lives { lives: 0 });
        cx.engine.enable_deploy(victim, false);
        cx.engine
            .set_redeploy_time(victim, self.config.parked_redeploy_secs);

        if let Some(killer) = killer.filter(|killer| cx.engine.is_valid(*killer))
            && let Some(team) = cx.engine.team_of(killer)
        {
            cx.engine.set_team(victim, team);
        }
        cx.engine.spectate(victim);
        cx.events
            .publish(ProgressionEvent::Eliminated { player: victim });
        self.refresh_row(cx, victim);

        let survivor = last_player_standing(self.players.iter(), |player| {
            cx.engine.is_valid(player)
        });
        if let Some(survivor) = survivor {
            self.win(cx, survivor);
        }
    }

    /// Brings a player with lives left back after the settle delay.
    fn redeploy(&self, cx: &ModeContext<'_>, player: PlayerId) {
        if self.victory.is_concluded() || !cx.engine.is_valid(player) {
            return;
        }
        let Some(state) = self.players.get(player).filter(|state| state.is_standing()) else {
            return;
        };

        let lives = state.lives_remaining;
        cx.engine.announce(
            Audience::Player(player),
            &Announcement::LivesRemaining { lives },
        );
        if lives == 1 {
            cx.engine
                .announce(Audience::Player(player), &Announcement::LastChance);
        }
        cx.engine.enable_deploy(player, true);
        cx.engine.set_redeploy_time(player, self.config.redeploy_secs);
        cx.engine.deploy(player);
        cx.scheduler.after(
            Duration::from_millis(self.config.scoreboard_delay_ms),
            ScheduledTask::RefreshScoreboard { player },
        );
    }

    fn refresh_ammo(&self, cx: &ModeContext<'_>, player: PlayerId) {
        if self.victory.is_concluded() {
            return;
        }
        let standing = self
            .players
            .get(player)
            .is_some_and(ChamberState::is_standing);
        if standing && cx.engine.is_alive(player) {
            EquipmentReconciler::apply(cx.engine, player, &chamber::refresh_plan(&self.config));
        }
    }
}

impl GameMode for ChamberMode {
    fn kind(&self) -> ModeKind {
        ModeKind::Chamber
    }

    fn on_match_start(&mut self, cx: &ModeContext<'_>) {
        self.victory.reset();
        cx.engine
            .set_scoreboard_layout(&ScoreboardLayout::for_mode(ModeKind::Chamber));
        cx.engine.announce(
            Audience::Everyone,
            &Announcement::Rules {
                mode: ModeKind::Chamber,
                goal: self.config.target_kills,
            },
        );

        for player in cx.engine.valid_players() {
            self.admit(cx, player);
        }
        self.assign_teams(cx);
        cx.events.publish(MatchEvent::Started {
            mode: ModeKind::Chamber,
        });
    }

    fn on_player_join(&mut self, cx: &ModeContext<'_>, player: PlayerId) {
        if !cx.engine.is_valid(player) {
            debug!(target: "runtime::modes", %player, "join from invalid player ignored");
            return;
        }
        self.admit(cx, player);
        self.assign_teams(cx);
        cx.events.publish(MatchEvent::PlayerJoined { player });
    }

    fn on_player_leave(&mut self, cx: &ModeContext<'_>, player: PlayerId) {
        if self.players.leave(player).is_some() {
            cx.events.publish(MatchEvent::PlayerLeft { player });
        }
    }

    fn on_player_deploy(&mut self, cx: &ModeContext<'_>, player: PlayerId) {
        if !cx.engine.is_valid(player) {
            return;
        }
        let Some(state) = self.players.get(player) else {
            reject(cx, player, Rejection::UnknownPlayer(player));
            return;
        };
        if state.eliminated {
            debug!(target: "runtime::modes", %player, "deploy of eliminated player ignored");
            return;
        }

        EquipmentReconciler::apply(cx.engine, player, &chamber::spawn_plan(&self.config));
        cx.engine.show_counter(
            player,
            Counter::Lives {
                lives: state.lives_remaining,
            },
        );
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

        let observed = cx.engine.kills(killer);
        let kill = match chamber::earned_kill(killer, state, observed, cx.clock.now(), &self.config)
        {
            Ok(kill) => kill,
            Err(rejection) => {
                let refresh = matches!(rejection, Rejection::NoKillDelta { .. });
                reject(cx, killer, rejection);
                if refresh {
                    self.refresh_row(cx, killer);
                    self.refresh_row(cx, victim);
                }
                return;
            }
        };

        cx.events.publish(ProgressionEvent::KillConfirmed {
            player: killer,
            kill_count: kill.kill_count,
        });
        EquipmentReconciler::apply(
            cx.engine,
            killer,
            &LoadoutPlan::new().stats(StatModifiers::BASELINE),
        );
        cx.engine.announce(
            Audience::Player(killer),
            &Announcement::KillProgress {
                kills: kill.kill_count,
                target: self.config.target_kills,
            },
        );
        cx.scheduler.after(
            Duration::from_millis(self.config.refresh_delay_ms),
            ScheduledTask::RefreshAmmo { player: killer },
        );
        self.refresh_row(cx, killer);

        if kill.reached_target {
            self.win(cx, killer);
        }
    }

    fn on_player_died(
        &mut self,
        cx: &ModeContext<'_>,
        victim: PlayerId,
        killer: Option<PlayerId>,
        _kind: DeathKind,
    ) {
        let Some(state) = self.players.get_mut(victim) else {
            return;
        };

        match chamber::died(victim, state) {
            Ok(ChamberDeath::Eliminated) => self.eliminate(cx, victim, killer),
            Ok(ChamberDeath::LifeLost { lives_remaining }) => {
                cx.events.publish(ProgressionEvent::LifeLost {
                    player: victim,
                    lives_remaining,
                });
                cx.engine.show_counter(
                    victim,
                    Counter::Lives {
                        lives: lives_remaining,
                    },
                );
                self.refresh_row(cx, victim);
                cx.scheduler.after(
                    Duration::from_millis(self.config.redeploy_delay_ms),
                    ScheduledTask::Redeploy { player: victim },
                );
            }
            Err(rejection) => reject(cx, victim, rejection),
        }
    }

    fn on_round_end(&mut self, cx: &ModeContext<'_>) {
        self.assign_teams(cx);
        for player in self.players.ids() {
            self.refresh_row(cx, player);
        }
    }

    fn on_match_end(&mut self, cx: &ModeContext<'_>) {
        self.players.clear();
        cx.events.publish(MatchEvent::Ended {
            winner: self.victory.winner(),
        });
    }

    fn on_scheduled(&mut self, cx: &ModeContext<'_>, task: ScheduledTask) {
        match task {
            ScheduledTask::Redeploy { player } => self.redeploy(cx, player),
            ScheduledTask::RefreshAmmo { player } => self.refresh_ammo(cx, player),
            ScheduledTask::RefreshScoreboard { player } => self.refresh_row(cx, player),
            ScheduledTask::CountdownTick { .. } => {
                trace!(target: "runtime::modes", ?task, "no chamber countdowns");
            }
        }
    }

    fn snapshot(&self) -> Vec<PlayerSnapshot> {
        self.players
            .iter()
            .map(|(player, state)| PlayerSnapshot {
                player,
                progress: PlayerProgress::Chamber(*state),
            })
            .collect()
    }

    fn winner(&self) -> Option<PlayerId> {
        self.victory.winner()
    }
}
