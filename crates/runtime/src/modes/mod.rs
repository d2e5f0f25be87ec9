//! Mode controllers.
//!
//! A controller owns one mode's player registry and turns lifecycle events
//! into core transitions plus engine calls. Controllers only run inside the
//! match worker, one event at a time, and never await.

mod chamber;
mod cranked;
mod gun_game;

pub use chamber::ChamberMode;
pub use cranked::CrankedMode;
pub use gun_game::GunGameMode;

use std::time::Duration;

use game_core::{
    Announcement, Audience, ConfigError, DeathKind, Effect, GameError, ModeConfig, ModeKind,
    PlayerId, PlayerProgress, Rejection, RollStream, VictoryDetector,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::engine::EngineCalls;
use crate::events::{EventBus, MatchEvent, ProgressionEvent};
use crate::scheduler::{ScheduledTask, Scheduler};

/// Everything a controller may touch while handling one event.
pub struct ModeContext<'a> {
    pub engine: &'a EngineCalls,
    pub scheduler: &'a Scheduler,
    pub clock: &'a dyn Clock,
    pub events: &'a EventBus,
}

/// One player's progress, as reported by [`GameMode::snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub player: PlayerId,
    pub progress: PlayerProgress,
}

/// Read-only view of a match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSnapshot {
    pub mode: ModeKind,
    pub winner: Option<PlayerId>,
    pub players: Vec<PlayerSnapshot>,
}

/// Lifecycle hooks every mode answers.
pub trait GameMode: Send {
    fn kind(&self) -> ModeKind;

    fn on_match_start(&mut self, cx: &ModeContext<'_>);

    fn on_player_join(&mut self, cx: &ModeContext<'_>, player: PlayerId);

    fn on_player_leave(&mut self, cx: &ModeContext<'_>, player: PlayerId);

    fn on_player_deploy(&mut self, cx: &ModeContext<'_>, player: PlayerId);

    fn on_player_earned_kill(
        &mut self,
        cx: &ModeContext<'_>,
        killer: PlayerId,
        victim: PlayerId,
        kind: DeathKind,
    );

    fn on_player_died(
        &mut self,
        cx: &ModeContext<'_>,
        victim: PlayerId,
        killer: Option<PlayerId>,
        kind: DeathKind,
    );

    fn on_round_end(&mut self, _cx: &ModeContext<'_>) {}

    fn on_match_end(&mut self, cx: &ModeContext<'_>);

    /// Runs a continuation posted through the [`Scheduler`].
    fn on_scheduled(&mut self, cx: &ModeContext<'_>, task: ScheduledTask);

    fn snapshot(&self) -> Vec<PlayerSnapshot>;

    fn winner(&self) -> Option<PlayerId>;
}

/// Builds the controller for `config`, refusing rule sets that cannot run.
pub fn build_mode(
    config: ModeConfig,
    match_seed: u64,
    countdown_tick: Duration,
) -> Result<Box<dyn GameMode>, ConfigError> {
    config.validate()?;
    let mode: Box<dyn GameMode> = match config {
        ModeConfig::Cranked(config) => {
            Box::new(CrankedMode::new(config, match_seed, countdown_tick))
        }
        ModeConfig::GunGame(config) => Box::new(GunGameMode::new(config, match_seed)?),
        ModeConfig::Chamber(config) => Box::new(ChamberMode::new(config)),
    };
    Ok(mode)
}

/// Hands out one [`RollStream`] per roll event.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RollSource {
    match_seed: u64,
    nonce: u64,
}

impl RollSource {
    pub(crate) fn new(match_seed: u64) -> Self {
        Self {
            match_seed,
            nonce: 0,
        }
    }

    pub(crate) fn next(&mut self, player: PlayerId) -> RollStream {
        self.nonce += 1;
        RollStream::new(self.match_seed, self.nonce, player.0)
    }
}

/// Logs an ignored event and reports it on the progression topic.
pub(crate) fn reject(cx: &ModeContext<'_>, player: PlayerId, rejection: Rejection) {
    debug!(
        target: "runtime::modes",
        %player,
        code = rejection.error_code(),
        severity = rejection.severity().as_str(),
        reason = %rejection,
        "event ignored"
    );
    cx.events.publish(ProgressionEvent::Rejected {
        player,
        code: rejection.error_code(),
        reason: rejection.to_string(),
    });
}

/// Ends the match in favour of `winner`. Returns false, doing nothing, if the
/// match already has a winner.
pub(crate) fn declare_victory(
    cx: &ModeContext<'_>,
    detector: &mut VictoryDetector,
    mode: ModeKind,
    winner: PlayerId,
) -> bool {
    if !detector.declare(winner) {
        debug!(target: "runtime::modes", %winner, "match already concluded");
        return false;
    }

    info!(target: "runtime::modes", %winner, %mode, "victory");
    cx.engine.play_effect(winner, Effect::Victory);
    cx.engine.announce(
        Audience::Everyone,
        &Announcement::Winner {
            player: winner,
            mode,
        },
    );
    cx.engine.end_match(winner);
    cx.events.publish(MatchEvent::Victory {
        player: winner,
        mode,
    });
    true
}
