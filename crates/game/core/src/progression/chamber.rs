//! One-in-the-Chamber: one bullet, a few lives, last one standing.

use crate::config::ChamberConfig;
use crate::error::Rejection;
use crate::loadout::{
    AmmoPool, Gadget, Item, LoadoutPlan, ResupplyKind, Slot, SlotSet, StatModifiers,
};
use crate::progression::check_debounce;
use crate::state::{ChamberState, Millis, PlayerId, TeamId};

/// A kill the engine confirmed by growing its own counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChamberKill {
    pub kill_count: u32,
    pub reached_target: bool,
}

/// Credits a validated kill.
///
/// The kill only counts if the engine's kill counter for the killer grew
/// since the last confirmed kill. `observed` is the freshly queried counter;
/// `None` (a failed query) reuses the snapshot and therefore never confirms.
/// The debounce timestamp and the snapshot move only on confirmation, and
/// the mode's own counter grows by exactly one however large the gain.
pub fn earned_kill(
    player: PlayerId,
    state: &mut ChamberState,
    observed: Option<u32>,
    now: Millis,
    config: &ChamberConfig,
) -> Result<ChamberKill, Rejection> {
    check_debounce(player, state.last_kill_at, now, config.debounce_ms)?;

    let snapshot = state.kill_snapshot;
    let observed = observed.unwrap_or(snapshot);
    if observed <= snapshot {
        return Err(Rejection::NoKillDelta {
            player,
            snapshot,
            observed,
        });
    }

    state.last_kill_at = Some(now);
    state.kill_snapshot = observed;
    state.kill_count += 1;
    Ok(ChamberKill {
        kill_count: state.kill_count,
        reached_target: state.kill_count >= config.target_kills,
    })
}

/// Outcome of a death for a player who was still in the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChamberDeath {
    LifeLost { lives_remaining: u32 },
    Eliminated,
}

/// Takes one life. Deaths of eliminated players are rejected.
pub fn died(player: PlayerId, state: &mut ChamberState) -> Result<ChamberDeath, Rejection> {
    if state.eliminated {
        return Err(Rejection::AlreadyEliminated(player));
    }
    state.lives_remaining = state.lives_remaining.saturating_sub(1);
    if state.lives_remaining == 0 {
        state.eliminated = true;
        return Ok(ChamberDeath::Eliminated);
    }
    Ok(ChamberDeath::LifeLost {
        lives_remaining: state.lives_remaining,
    })
}

/// One team per player, numbered from one in the order given.
pub fn unique_teams(players: impl IntoIterator<Item = PlayerId>) -> Vec<(PlayerId, TeamId)> {
    players
        .into_iter()
        .zip(1..)
        .map(|(player, team)| (player, TeamId(team)))
        .collect()
}

/// Deploy loadout: knife, one-round pistol and throwing knives.
pub fn spawn_plan(config: &ChamberConfig) -> LoadoutPlan {
    LoadoutPlan::new()
        .clear(SlotSet::all())
        .grant(Slot::Melee, Item::Gadget(Gadget::CombatKnife))
        .grant(Slot::Primary, Item::weapon(config.pistol, None))
        .grant(Slot::Throwable, Item::Gadget(Gadget::ThrowingKnife))
        .resupply(ResupplyKind::AmmoCrate)
        .ammo(Slot::Primary, AmmoPool::Reserve, 0)
        .ammo(Slot::Primary, AmmoPool::Magazine, config.magazine_bullets)
        .ammo(Slot::Throwable, AmmoPool::Reserve, config.throwables)
        .stats(StatModifiers::BASELINE)
        .focus(Slot::Primary)
}

/// Ammo top-up after a confirmed kill.
pub fn refresh_plan(config: &ChamberConfig) -> LoadoutPlan {
    LoadoutPlan::new()
        .ammo(Slot::Primary, AmmoPool::Reserve, config.magazine_bullets)
        .ammo(Slot::Primary, AmmoPool::Magazine, 0)
        .ammo(Slot::Throwable, AmmoPool::Reserve, config.throwables)
        .focus(Slot::Primary)
}
