//! Cranked: every kill feeds a countdown, and the countdown kills you.
//!
//! A kill raises the streak and either starts the countdown or extends it.
//! Streaks one to five hand out fixed bonuses; past five every kill repeats a
//! resupply bundle and marks the player on the minimap. Dying, leaving or
//! deploying drops everything. Reaching zero on the countdown is its own
//! transition ([`explode`]).

use crate::config::CrankedConfig;
use crate::env::{RngOracle, RollStream};
use crate::loadout::{
    AmmoPool, AttachmentProfile, Gadget, Item, LoadoutPlan, ResupplyKind, Slot, SlotSet,
    SpotStatus, StatModifiers,
};
use crate::state::CrankedState;
use crate::timer::ArmOutcome;

/// What a kill unlocked besides the streak itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StreakReward {
    /// One of the first streak steps: new stats and possibly a gadget.
    Milestone {
        stats: StatModifiers,
        gadget: Option<(Slot, Gadget)>,
    },
    /// Repeating resupply bundle for long streaks.
    Bundle,
    /// The winning streak.
    Victory,
    None,
}

/// Result of crediting a Cranked kill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrankedKill {
    pub streak: u32,
    pub countdown: ArmOutcome,
    pub remaining_secs: u32,
    pub reward: StreakReward,
}

/// Gadget handed out at each milestone step, by streak.
fn milestone_gadget(streak: u32) -> Option<(Slot, Gadget)> {
    match streak {
        1 => Some((Slot::ClassGadget, Gadget::AdrenalineInjector)),
        2 => Some((Slot::Throwable, Gadget::FlashGrenade)),
        3 => Some((Slot::GadgetTwo, Gadget::DeployableCover)),
        4 => Some((Slot::GadgetOne, Gadget::SupplyPouch)),
        _ => None,
    }
}

/// Reward for reaching `streak`.
pub fn reward_for(streak: u32, config: &CrankedConfig) -> StreakReward {
    if streak == config.win_streak {
        return StreakReward::Victory;
    }
    let milestones = config.milestones.len() as u32;
    if (1..=milestones).contains(&streak) {
        return StreakReward::Milestone {
            stats: config.milestones[(streak - 1) as usize],
            gadget: milestone_gadget(streak),
        };
    }
    if streak > milestones {
        return StreakReward::Bundle;
    }
    StreakReward::None
}

/// Credits a validated kill to `state`.
///
/// An idle countdown starts at [`CrankedConfig::start_time`] for the new
/// streak. A running one gains `increase_secs`, floored at `min_time_secs`,
/// and keeps its generation so the loop already ticking picks the new time up.
pub fn earned_kill(state: &mut CrankedState, config: &CrankedConfig) -> CrankedKill {
    state.kill_streak += 1;
    state.is_cranked = true;
    let streak = state.kill_streak;

    let countdown = if state.countdown.is_active() {
        state
            .countdown
            .extend(config.increase_secs, config.min_time_secs);
        ArmOutcome::Updated(state.countdown.generation())
    } else {
        state.countdown.arm(config.start_time(streak))
    };

    CrankedKill {
        streak,
        countdown,
        remaining_secs: state.countdown.remaining_secs(),
        reward: reward_for(streak, config),
    }
}

/// Ends an expired countdown. Returns the streak the player died with.
pub fn explode(state: &mut CrankedState) -> u32 {
    let final_streak = state.kill_streak;
    state.reset();
    final_streak
}

/// Equipment for a milestone or bundle reward. Empty for anything else.
pub fn reward_plan(reward: StreakReward, config: &CrankedConfig) -> LoadoutPlan {
    match reward {
        StreakReward::Milestone { stats, gadget } => {
            let plan = LoadoutPlan::new().stats(stats);
            match gadget {
                Some((slot, gadget)) => plan.grant(slot, Item::Gadget(gadget)),
                None => plan,
            }
        }
        StreakReward::Bundle => LoadoutPlan::new()
            .resupply(ResupplyKind::AmmoBox)
            .resupply(ResupplyKind::AmmoCrate)
            .resupply(ResupplyKind::SupplyBag)
            .heal(config.bundle_heal)
            .ammo(Slot::Throwable, AmmoPool::Reserve, 2)
            .ammo(Slot::ClassGadget, AmmoPool::Reserve, 1)
            .ammo(Slot::GadgetTwo, AmmoPool::Reserve, 1)
            .spot(SpotStatus::Minimap, config.spot_secs),
        StreakReward::Victory | StreakReward::None => LoadoutPlan::new(),
    }
}

/// Fresh random loadout for a deploy.
///
/// Every primary and every sidearm gets a package rolled, then one of each is
/// picked. Melee is left alone.
pub fn spawn_plan<R: RngOracle>(config: &CrankedConfig, rolls: &mut RollStream<R>) -> LoadoutPlan {
    let profile = AttachmentProfile::cranked();
    let mut primary_packages = profile.roll_many(config.primaries.len(), rolls);
    let mut sidearm_packages = profile.roll_many(config.sidearms.len(), rolls);

    let mut plan = LoadoutPlan::new()
        .clear(SlotSet::LOADOUT)
        .stats(StatModifiers::BASELINE);

    if !config.primaries.is_empty() {
        let index = rolls.pick_index(config.primaries.len());
        let package = primary_packages.swap_remove(index);
        plan = plan.grant(
            Slot::Primary,
            Item::weapon(config.primaries[index], Some(package)),
        );
    }
    if !config.sidearms.is_empty() {
        let index = rolls.pick_index(config.sidearms.len());
        let package = sidearm_packages.swap_remove(index);
        plan = plan.grant(
            Slot::Secondary,
            Item::weapon(config.sidearms[index], Some(package)),
        );
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Generation;
    use crate::timer::TickOutcome;

    #[test]
    fn first_kill_starts_countdown_from_streak() {
        let config = CrankedConfig::default();
        let mut state = CrankedState::default();

        let kill = earned_kill(&mut state, &config);

        assert!(state.is_cranked);
        assert_eq!(kill.streak, 1);
        assert_eq!(kill.remaining_secs, 17);
        assert!(matches!(kill.countdown, ArmOutcome::Started(_)));
    }

    #[test]
    fn kill_while_running_extends_and_keeps_generation() {
        let config = CrankedConfig::default();
        let mut state = CrankedState::default();
        let first = earned_kill(&mut state, &config).countdown.generation();
        for _ in 0..5 {
            state.countdown.tick(first);
        }

        let kill = earned_kill(&mut state, &config);

        assert_eq!(kill.countdown, ArmOutcome::Updated(first));
        assert_eq!(kill.remaining_secs, 12 + 7);
    }

    #[test]
    fn extension_never_drops_below_minimum() {
        let config = CrankedConfig::default();
        let mut state = CrankedState::default();
        let token = earned_kill(&mut state, &config).countdown.generation();
        for _ in 0..16 {
            state.countdown.tick(token);
        }
        assert_eq!(state.countdown.remaining_secs(), 1);

        let kill = earned_kill(&mut state, &config);

        assert_eq!(kill.remaining_secs, 10);
    }

    #[test]
    fn milestones_then_bundle_then_victory() {
        let config = CrankedConfig::default();

        assert_eq!(
            reward_for(1, &config),
            StreakReward::Milestone {
                stats: StatModifiers::new(115, 1.1),
                gadget: Some((Slot::ClassGadget, Gadget::AdrenalineInjector)),
            }
        );
        assert_eq!(
            reward_for(5, &config),
            StreakReward::Milestone {
                stats: StatModifiers::new(200, 1.5),
                gadget: None,
            }
        );
        assert_eq!(reward_for(6, &config), StreakReward::Bundle);
        assert_eq!(reward_for(14, &config), StreakReward::Bundle);
        assert_eq!(reward_for(15, &config), StreakReward::Victory);
        assert_eq!(reward_for(0, &config), StreakReward::None);
    }

    #[test]
    fn bundle_plan_marks_and_resupplies() {
        let config = CrankedConfig::default();

        let plan = reward_plan(StreakReward::Bundle, &config);

        assert_eq!(plan.resupplies().len(), 3);
        assert_eq!(plan.heal_amount(), Some(50));
        assert_eq!(plan.spot_status(), Some((SpotStatus::Minimap, 999)));
        assert!(plan.grants().is_empty());
    }

    #[test]
    fn explode_resets_and_reports_final_streak() {
        let config = CrankedConfig::default();
        let mut state = CrankedState::default();
        earned_kill(&mut state, &config);
        earned_kill(&mut state, &config);
        let before = state.countdown.generation();

        let final_streak = explode(&mut state);

        assert_eq!(final_streak, 2);
        assert_eq!(state.kill_streak, 0);
        assert!(!state.is_cranked);
        assert!(state.countdown.generation() > before);
        assert_eq!(state.countdown.tick(before), TickOutcome::Stale);
    }

    #[test]
    fn reset_invalidates_running_loop() {
        let config = CrankedConfig::default();
        let mut state = CrankedState::default();
        let token = earned_kill(&mut state, &config).countdown.generation();

        state.reset();

        assert_eq!(state.countdown.tick(token), TickOutcome::Stale);
        assert_ne!(state.countdown.generation(), Generation::ZERO);
    }

    #[test]
    fn spawn_plan_equips_one_primary_and_one_sidearm() {
        let config = CrankedConfig::default();
        let mut rolls = RollStream::new(11, 0, 3);

        let plan = spawn_plan(&config, &mut rolls);

        assert_eq!(plan.cleared(), SlotSet::LOADOUT);
        assert_eq!(plan.stat_modifiers(), Some(StatModifiers::BASELINE));
        match plan.grant_for(Slot::Primary) {
            Some(Item::Weapon { weapon, package }) => {
                assert!(config.primaries.contains(weapon));
                assert!(package.is_some());
            }
            other => panic!("unexpected primary grant {other:?}"),
        }
        match plan.grant_for(Slot::Secondary) {
            Some(Item::Weapon { weapon, .. }) => assert!(config.sidearms.contains(weapon)),
            other => panic!("unexpected secondary grant {other:?}"),
        }
        assert!(plan.grant_for(Slot::Melee).is_none());
    }

    #[test]
    fn observe_kills_falls_back_to_last_known() {
        let mut state = CrankedState::default();

        assert_eq!(state.observe_kills(Some(7)), 7);
        assert_eq!(state.observe_kills(None), 7);
    }
}
