//! Gun Game: one kill per weapon, knives at the end.
//!
//! Tiers `0..W` hand out the active weapon set in order, tier `W` is the
//! rocket launcher and tier `W + 1` is the final knife tier. A kill on the
//! final tier wins. Melee kills also knock the victim down a tier.

use crate::config::{GunGameConfig, WeaponSet};
use crate::env::{RngOracle, RollStream};
use crate::error::Rejection;
use crate::loadout::{
    AmmoPool, AttachmentProfile, Gadget, Item, LoadoutPlan, ResupplyKind, Slot, SlotSet,
    SpotStatus, StatModifiers, WeaponId, WeaponPackage,
};
use crate::notice::{Announcement, Audience};
use crate::progression::check_debounce;
use crate::state::{GunGameState, Millis, PlayerId};

/// What a tier hands out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TierKind {
    Standard(WeaponId),
    Heavy,
    Final,
}

/// Classifies `tier` against the active weapon set. Tiers past the end are
/// treated as final.
pub fn tier_kind(set: &WeaponSet, tier: u32) -> TierKind {
    let length = set.weapons.len() as u32;
    match set.weapons.get(tier as usize) {
        Some(weapon) => TierKind::Standard(*weapon),
        None if tier == length => TierKind::Heavy,
        None => TierKind::Final,
    }
}

/// Result of crediting a Gun Game kill to the killer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GunGameKill {
    /// Scored on the final tier.
    Victory,
    Promoted { tier: u32 },
}

/// Credits a validated kill to the killer.
///
/// Kills within the debounce window of the last accepted one are rejected;
/// an accepted kill records `now`. Promotion moves the spawn-tier baseline
/// along, so a later death does not take the new tier away.
pub fn earned_kill(
    player: PlayerId,
    state: &mut GunGameState,
    now: Millis,
    config: &GunGameConfig,
) -> Result<GunGameKill, Rejection> {
    check_debounce(player, state.last_kill_at, now, config.debounce_ms)?;
    state.last_kill_at = Some(now);

    let max_tier = config.max_tier();
    if state.tier >= max_tier {
        return Ok(GunGameKill::Victory);
    }

    state.tier = (state.tier + 1).min(max_tier);
    state.tier_at_last_spawn = state.tier;
    Ok(GunGameKill::Promoted { tier: state.tier })
}

/// Knocks a melee victim down one tier. Returns the new tier, or `None` when
/// the victim was already on the first tier.
pub fn demote(state: &mut GunGameState) -> Option<u32> {
    if state.tier == 0 {
        return None;
    }
    state.tier -= 1;
    state.tier_at_last_spawn = state.tier;
    Some(state.tier)
}

/// Takes back any tier gained after the last spawn baseline. Returns true
/// when the tier changed.
pub fn died(state: &mut GunGameState) -> bool {
    if state.tier > state.tier_at_last_spawn {
        state.tier = state.tier_at_last_spawn;
        return true;
    }
    false
}

/// Starts a life on the current tier.
pub fn deployed(state: &mut GunGameState) -> u32 {
    state.tier_at_last_spawn = state.tier;
    state.tier
}

/// Picks this match's weapon set.
pub fn pick_weapon_set<'a, R: RngOracle>(
    config: &'a GunGameConfig,
    rolls: &mut RollStream<R>,
) -> Option<&'a WeaponSet> {
    if config.weapon_sets.is_empty() {
        return None;
    }
    let index = rolls.pick_index(config.weapon_sets.len());
    config.weapon_sets.get(index)
}

/// Rolls one package per standard tier of `set`.
pub fn roll_packages<R: RngOracle>(set: &WeaponSet, rolls: &mut RollStream<R>) -> Vec<WeaponPackage> {
    AttachmentProfile::gun_game().roll_many(set.weapons.len(), rolls)
}

/// Full loadout for `tier`.
///
/// Always clears every slot and hands out the combat knife. Stats are part of
/// every tier so that demotion off the final tier drops its bonuses.
pub fn tier_plan(
    config: &GunGameConfig,
    set: &WeaponSet,
    tier: u32,
    packages: &[WeaponPackage],
) -> LoadoutPlan {
    let plan = LoadoutPlan::new()
        .clear(SlotSet::all())
        .grant(Slot::Melee, Item::Gadget(Gadget::CombatKnife))
        .resupply(ResupplyKind::AmmoCrate);

    match tier_kind(set, tier) {
        TierKind::Standard(weapon) => {
            let package = packages.get(tier as usize).cloned();
            plan.grant(Slot::Primary, Item::weapon(weapon, package))
                .stats(StatModifiers::BASELINE)
                .focus(Slot::Primary)
        }
        TierKind::Heavy => plan
            .grant(Slot::GadgetOne, Item::Gadget(Gadget::RocketLauncher))
            .ammo(Slot::GadgetOne, AmmoPool::Magazine, config.heavy_magazine)
            .stats(StatModifiers::BASELINE)
            .focus(Slot::GadgetOne)
            .spot(SpotStatus::Minimap, config.spot_secs),
        TierKind::Final => plan
            .grant(Slot::Throwable, Item::Gadget(Gadget::ThrowingKnife))
            .ammo(Slot::Throwable, AmmoPool::Magazine, config.final_magazine)
            .stats(config.final_stats)
            .focus(Slot::Melee)
            .spot(SpotStatus::MinimapAndWorld, config.spot_secs),
    }
}

/// Notices raised whenever `player` is equipped for `tier`.
pub fn tier_notices(player: PlayerId, set: &WeaponSet, tier: u32) -> Vec<(Audience, Announcement)> {
    match tier_kind(set, tier) {
        TierKind::Standard(_) => Vec::new(),
        TierKind::Heavy => vec![(Audience::Player(player), Announcement::RocketTime)],
        TierKind::Final => vec![
            (Audience::Everyone, Announcement::FinalTierReached { player }),
            (Audience::Player(player), Announcement::FinalTierKnives),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GunGameConfig {
        GunGameConfig::default()
    }

    #[test]
    fn tiers_cover_weapons_then_heavy_then_final() {
        let config = config();
        let set = &config.weapon_sets[0];

        assert_eq!(tier_kind(set, 0), TierKind::Standard(set.weapons[0]));
        assert_eq!(tier_kind(set, 16), TierKind::Standard(set.weapons[16]));
        assert_eq!(tier_kind(set, 17), TierKind::Heavy);
        assert_eq!(tier_kind(set, 18), TierKind::Final);
    }

    #[test]
    fn kill_promotes_and_moves_spawn_baseline() {
        let config = config();
        let mut state = GunGameState::default();

        let kill = earned_kill(PlayerId(1), &mut state, Millis(1_000), &config);

        assert_eq!(kill, Ok(GunGameKill::Promoted { tier: 1 }));
        assert_eq!(state.tier_at_last_spawn, 1);
        assert_eq!(state.last_kill_at, Some(Millis(1_000)));
    }

    #[test]
    fn heavy_tier_kill_reaches_final_and_final_kill_wins() {
        let config = config();
        let mut state = GunGameState {
            tier: 17,
            tier_at_last_spawn: 17,
            last_kill_at: None,
        };

        assert_eq!(
            earned_kill(PlayerId(1), &mut state, Millis(0), &config),
            Ok(GunGameKill::Promoted { tier: 18 })
        );
        assert_eq!(
            earned_kill(PlayerId(1), &mut state, Millis(500), &config),
            Ok(GunGameKill::Victory)
        );
        assert_eq!(state.tier, 18);
    }

    #[test]
    fn kills_inside_window_are_debounced() {
        let config = config();
        let mut state = GunGameState::default();
        earned_kill(PlayerId(1), &mut state, Millis(1_000), &config).unwrap();

        let second = earned_kill(PlayerId(1), &mut state, Millis(1_200), &config);

        assert!(matches!(second, Err(Rejection::Debounced { .. })));
        assert_eq!(state.tier, 1);
        assert_eq!(state.last_kill_at, Some(Millis(1_000)));
    }

    #[test]
    fn demotion_stops_at_first_tier() {
        let mut state = GunGameState {
            tier: 1,
            tier_at_last_spawn: 1,
            last_kill_at: None,
        };

        assert_eq!(demote(&mut state), Some(0));
        assert_eq!(state.tier_at_last_spawn, 0);
        assert_eq!(demote(&mut state), None);
    }

    #[test]
    fn death_clamps_to_spawn_tier() {
        let mut state = GunGameState {
            tier: 5,
            tier_at_last_spawn: 3,
            last_kill_at: None,
        };

        assert!(died(&mut state));
        assert_eq!(state.tier, 3);
        assert!(!died(&mut state));
    }

    #[test]
    fn standard_tier_plan_uses_the_tier_package() {
        let config = config();
        let set = &config.weapon_sets[1];
        let packages = roll_packages(set, &mut RollStream::new(5, 0, 1));

        let plan = tier_plan(&config, set, 4, &packages);

        assert_eq!(plan.cleared(), SlotSet::all());
        assert_eq!(
            plan.grant_for(Slot::Primary),
            Some(&Item::weapon(set.weapons[4], Some(packages[4].clone())))
        );
        assert_eq!(plan.focus_slot(), Some(Slot::Primary));
        assert_eq!(
            plan.grant_for(Slot::Melee),
            Some(&Item::Gadget(Gadget::CombatKnife))
        );
    }

    #[test]
    fn final_tier_plan_boosts_and_spots() {
        let config = config();
        let set = &config.weapon_sets[0];

        let plan = tier_plan(&config, set, 18, &[]);

        assert_eq!(plan.stat_modifiers(), Some(StatModifiers::new(155, 1.5)));
        assert_eq!(plan.focus_slot(), Some(Slot::Melee));
        assert_eq!(
            plan.spot_status(),
            Some((SpotStatus::MinimapAndWorld, 999))
        );
        assert!(plan.grant_for(Slot::Primary).is_none());
    }

    #[test]
    fn final_tier_is_announced_to_everyone() {
        let config = config();
        let set = &config.weapon_sets[0];

        let notices = tier_notices(PlayerId(2), set, 18);

        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].0, Audience::Everyone);
        assert!(tier_notices(PlayerId(2), set, 3).is_empty());
    }
}
