mod common;

use std::time::Duration;

use common::{Harness, drain, p};
use game_core::{
    AmmoPool, Announcement, Audience, DeathKind, Gadget, GunGameConfig, GunGameState, Item,
    ModeConfig, ModeKind, PlayerProgress, Slot, SpotStatus, WeaponId, WeaponSet,
};
use runtime::{Event, LifecycleEvent, ProgressionEvent, Topic};

const PAST_DEBOUNCE: Duration = Duration::from_millis(301);

/// Two standard weapons, then the launcher on tier 2 and knives on tier 3.
fn short_config() -> GunGameConfig {
    GunGameConfig {
        weapon_sets: vec![WeaponSet::new("Duo", vec![WeaponId(1), WeaponId(2)])],
        ..GunGameConfig::default()
    }
}

async fn gun_game(harness: &Harness, player: u32) -> GunGameState {
    match harness.progress(player).await {
        PlayerProgress::GunGame(state) => state,
        other => panic!("expected a gun game record, got {other:?}"),
    }
}

fn primary(harness: &Harness, player: u32) -> Option<WeaponId> {
    match harness.player(player).slots.get(&Slot::Primary) {
        Some(Item::Weapon { weapon, .. }) => Some(*weapon),
        _ => None,
    }
}

async fn deployed_pair(config: GunGameConfig) -> Harness {
    let harness = Harness::start(ModeConfig::GunGame(config), &[1, 2]).await;
    harness.spawn(1).await;
    harness.spawn(2).await;
    harness
}

/// Kills `victim` and puts them back on the field once the debounce window
/// has passed.
async fn kill_and_respawn(harness: &Harness, killer: u32, victim: u32, kind: DeathKind) {
    harness.kill(killer, victim, kind).await;
    harness.advance(PAST_DEBOUNCE).await;
    harness.spawn(victim).await;
}

#[tokio::test(start_paused = true)]
async fn match_start_draws_one_of_the_weapon_sets() {
    let config = GunGameConfig::default();
    let harness = deployed_pair(config.clone()).await;

    let announcements = harness.engine.announcements();
    let name = announcements
        .iter()
        .find_map(|(_, announcement)| match announcement {
            Announcement::WeaponSetSelected { name } => Some(name.clone()),
            _ => None,
        })
        .expect("a weapon set is announced");
    let set = config
        .weapon_sets
        .iter()
        .find(|set| set.name == name)
        .expect("announced set comes from the config");

    assert!(announcements.contains(&(
        Audience::Everyone,
        Announcement::Rules {
            mode: ModeKind::GunGame,
            goal: 19,
        }
    )));
    assert!(announcements.contains(&(Audience::Player(p(2)), Announcement::Welcome)));
    assert_eq!(primary(&harness, 1), Some(set.weapons[0]));
    assert_eq!(
        harness.player(1).slots.get(&Slot::Melee),
        Some(&Item::Gadget(Gadget::CombatKnife))
    );
}

#[tokio::test(start_paused = true)]
async fn kills_climb_through_heavy_and_final_tiers_to_victory() {
    let harness = deployed_pair(short_config()).await;
    assert_eq!(primary(&harness, 1), Some(WeaponId(1)));

    kill_and_respawn(&harness, 1, 2, DeathKind::Weapon).await;
    assert_eq!(gun_game(&harness, 1).await.tier, 1);
    assert_eq!(primary(&harness, 1), Some(WeaponId(2)));
    assert_eq!(harness.player(1).score, Some([2, 1]));
    assert!(
        harness
            .engine
            .announcements()
            .contains(&(Audience::Player(p(1)), Announcement::LevelUp { tier: 2 }))
    );

    kill_and_respawn(&harness, 1, 2, DeathKind::Weapon).await;
    let record = harness.player(1);
    assert_eq!(primary(&harness, 1), None);
    assert_eq!(
        record.slots.get(&Slot::GadgetOne),
        Some(&Item::Gadget(Gadget::RocketLauncher))
    );
    assert_eq!(
        record.ammo.get(&(Slot::GadgetOne, AmmoPool::Magazine)),
        Some(&6)
    );
    assert_eq!(record.focus, Some(Slot::GadgetOne));
    assert_eq!(record.spot, Some((SpotStatus::Minimap, 999)));
    assert!(
        harness
            .engine
            .announcements()
            .contains(&(Audience::Player(p(1)), Announcement::RocketTime))
    );

    kill_and_respawn(&harness, 1, 2, DeathKind::Weapon).await;
    let record = harness.player(1);
    assert_eq!(gun_game(&harness, 1).await.tier, 3);
    assert_eq!(
        record.slots.get(&Slot::Throwable),
        Some(&Item::Gadget(Gadget::ThrowingKnife))
    );
    assert_eq!(
        record.ammo.get(&(Slot::Throwable, AmmoPool::Magazine)),
        Some(&5)
    );
    assert_eq!(record.max_health, 155);
    assert_eq!(record.speed_multiplier, 1.5);
    assert_eq!(record.focus, Some(Slot::Melee));
    assert_eq!(record.spot, Some((SpotStatus::MinimapAndWorld, 999)));
    assert!(harness.engine.announcements().contains(&(
        Audience::Everyone,
        Announcement::FinalTierReached { player: p(1) }
    )));
    assert_eq!(harness.engine.winner(), None);

    harness.kill(1, 2, DeathKind::Weapon).await;

    assert_eq!(harness.engine.winner(), Some(p(1)));
    assert!(harness.engine.announcements().contains(&(
        Audience::Everyone,
        Announcement::Winner {
            player: p(1),
            mode: ModeKind::GunGame,
        }
    )));
}

#[tokio::test(start_paused = true)]
async fn kills_inside_the_debounce_window_are_dropped() {
    let harness = deployed_pair(short_config()).await;
    let mut progression = harness.handle.subscribe(Topic::Progression);

    harness.kill(1, 2, DeathKind::Weapon).await;
    harness.advance(Duration::from_millis(100)).await;
    harness.spawn(2).await;
    harness.kill(1, 2, DeathKind::Weapon).await;

    assert_eq!(gun_game(&harness, 1).await.tier, 1);
    assert!(drain(&mut progression).iter().any(|event| matches!(
        event,
        Event::Progression(ProgressionEvent::Rejected {
            code: "REJECT_DEBOUNCED",
            ..
        })
    )));

    harness.advance(Duration::from_millis(250)).await;
    harness.spawn(2).await;
    harness.kill(1, 2, DeathKind::Weapon).await;

    assert_eq!(gun_game(&harness, 1).await.tier, 2);
}

#[tokio::test(start_paused = true)]
async fn melee_kill_knocks_the_victim_down_a_tier() {
    let harness = deployed_pair(short_config()).await;
    kill_and_respawn(&harness, 2, 1, DeathKind::Weapon).await;
    assert_eq!(gun_game(&harness, 2).await.tier, 1);

    harness.kill(1, 2, DeathKind::Melee).await;

    assert_eq!(gun_game(&harness, 1).await.tier, 1);
    let victim = gun_game(&harness, 2).await;
    assert_eq!(victim.tier, 0);
    assert_eq!(victim.tier_at_last_spawn, 0);
    assert_eq!(harness.player(2).score, Some([1, 0]));
    assert!(harness.engine.announcements().contains(&(
        Audience::Player(p(2)),
        Announcement::Humiliated { tier: 1 }
    )));

    harness.spawn(2).await;
    assert_eq!(primary(&harness, 2), Some(WeaponId(1)));
}

#[tokio::test(start_paused = true)]
async fn melee_victim_on_the_first_tier_stays_there() {
    let harness = deployed_pair(short_config()).await;

    harness.kill(1, 2, DeathKind::Melee).await;

    assert_eq!(gun_game(&harness, 2).await.tier, 0);
    assert!(
        !harness
            .engine
            .announcements()
            .iter()
            .any(|(_, announcement)| matches!(announcement, Announcement::Humiliated { .. }))
    );
}

#[tokio::test(start_paused = true)]
async fn dying_keeps_an_earned_promotion() {
    let harness = deployed_pair(short_config()).await;
    harness.kill(1, 2, DeathKind::Weapon).await;

    harness.engine.set_alive(p(1), false);
    harness
        .dispatch(LifecycleEvent::Died {
            victim: p(1),
            killer: None,
            kind: DeathKind::Other,
        })
        .await;

    let state = gun_game(&harness, 1).await;
    assert_eq!(state.tier, 1);
    assert_eq!(state.tier_at_last_spawn, 1);
}

#[tokio::test(start_paused = true)]
async fn kill_on_a_living_victim_is_ignored() {
    let harness = deployed_pair(short_config()).await;

    harness
        .dispatch(LifecycleEvent::EarnedKill {
            killer: p(1),
            victim: p(2),
            kind: DeathKind::Weapon,
        })
        .await;

    assert_eq!(gun_game(&harness, 1).await.tier, 0);
}
