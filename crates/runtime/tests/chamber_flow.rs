mod common;

use std::time::Duration;

use common::{Harness, drain, p};
use game_core::{
    AmmoPool, Announcement, Audience, ChamberConfig, ChamberState, Counter, DeathKind, Gadget,
    Item, ModeConfig, ModeKind, PlayerProgress, ScoreRow, Slot, WeaponId,
};
use runtime::{EngineFacade, Event, LifecycleEvent, ProgressionEvent, Topic};

const PAST_DEBOUNCE: Duration = Duration::from_millis(250);

async fn chamber(harness: &Harness, player: u32) -> ChamberState {
    match harness.progress(player).await {
        PlayerProgress::Chamber(state) => state,
        other => panic!("expected a chamber record, got {other:?}"),
    }
}

async fn deployed(players: &[u32]) -> Harness {
    let harness = Harness::start(ModeConfig::Chamber(ChamberConfig::default()), players).await;
    for &player in players {
        harness.spawn(player).await;
    }
    harness
}

#[tokio::test(start_paused = true)]
async fn deploy_hands_out_a_single_round() {
    let harness = deployed(&[1, 2]).await;

    let record = harness.player(1);
    assert_eq!(
        record.slots.get(&Slot::Primary),
        Some(&Item::weapon(WeaponId(300), None))
    );
    assert_eq!(
        record.slots.get(&Slot::Melee),
        Some(&Item::Gadget(Gadget::CombatKnife))
    );
    assert_eq!(record.ammo.get(&(Slot::Primary, AmmoPool::Magazine)), Some(&1));
    assert_eq!(record.ammo.get(&(Slot::Primary, AmmoPool::Reserve)), Some(&0));
    assert_eq!(record.ammo.get(&(Slot::Throwable, AmmoPool::Reserve)), Some(&3));
    assert_eq!(record.counter, Some(Counter::Lives { lives: 3 }));
    assert_ne!(harness.player(1).team, harness.player(2).team);
}

#[tokio::test(start_paused = true)]
async fn confirmed_kill_refreshes_ammo_after_settling() {
    let harness = deployed(&[1, 2]).await;

    harness.kill(1, 2, DeathKind::Weapon).await;

    assert_eq!(chamber(&harness, 1).await.kill_count, 1);
    assert_eq!(harness.player(1).score, Some([1, 3]));
    assert_eq!(harness.player(2).score, Some([0, 2]));
    assert!(harness.engine.announcements().contains(&(
        Audience::Player(p(1)),
        Announcement::KillProgress {
            kills: 1,
            target: 20,
        }
    )));
    assert_eq!(
        harness
            .player(1)
            .ammo
            .get(&(Slot::Primary, AmmoPool::Reserve)),
        Some(&0)
    );

    harness.advance(Duration::from_millis(60)).await;

    let record = harness.player(1);
    assert_eq!(record.ammo.get(&(Slot::Primary, AmmoPool::Reserve)), Some(&1));
    assert_eq!(record.ammo.get(&(Slot::Primary, AmmoPool::Magazine)), Some(&0));
    assert_eq!(record.focus, Some(Slot::Primary));
}

#[tokio::test(start_paused = true)]
async fn kill_without_engine_credit_is_not_counted() {
    let harness = deployed(&[1, 2]).await;
    let mut progression = harness.handle.subscribe(Topic::Progression);

    for player in [1, 2] {
        harness
            .engine
            .set_scoreboard_row(&ScoreRow {
                player: p(player),
                values: [99, 99],
            })
            .expect("row");
    }
    harness.engine.set_alive(p(2), false);
    harness
        .dispatch(LifecycleEvent::EarnedKill {
            killer: p(1),
            victim: p(2),
            kind: DeathKind::Weapon,
        })
        .await;

    assert_eq!(chamber(&harness, 1).await.kill_count, 0);
    assert_eq!(harness.player(1).score, Some([0, 3]));
    assert_eq!(harness.player(2).score, Some([0, 3]));
    assert!(drain(&mut progression).iter().any(|event| matches!(
        event,
        Event::Progression(ProgressionEvent::Rejected {
            code: "REJECT_NO_KILL_DELTA",
            ..
        })
    )));
}

#[tokio::test(start_paused = true)]
async fn failed_kill_query_never_confirms() {
    let harness = deployed(&[1, 2]).await;

    harness.engine.fail_kill_queries(true);
    harness.kill(1, 2, DeathKind::Weapon).await;

    assert_eq!(chamber(&harness, 1).await.kill_count, 0);
}

#[tokio::test(start_paused = true)]
async fn large_engine_gain_still_counts_once() {
    let harness = deployed(&[1, 2]).await;

    harness.engine.set_kills(p(1), 4);
    harness.kill(1, 2, DeathKind::Weapon).await;

    let state = chamber(&harness, 1).await;
    assert_eq!(state.kill_count, 1);
    assert_eq!(state.kill_snapshot, 5);
}

#[tokio::test(start_paused = true)]
async fn victim_with_lives_left_is_redeployed_after_settling() {
    let harness = deployed(&[1, 2]).await;
    harness.engine.take_deploy_requests();

    harness.kill(1, 2, DeathKind::Weapon).await;

    assert_eq!(chamber(&harness, 2).await.lives_remaining, 2);
    assert_eq!(harness.player(2).counter, Some(Counter::Lives { lives: 2 }));

    harness.advance(Duration::from_millis(700)).await;
    assert!(harness.engine.take_deploy_requests().is_empty());

    harness.advance(Duration::from_millis(150)).await;
    assert_eq!(harness.engine.take_deploy_requests(), vec![p(2)]);
    assert!(harness.engine.announcements().contains(&(
        Audience::Player(p(2)),
        Announcement::LivesRemaining { lives: 2 }
    )));
}

#[tokio::test(start_paused = true)]
async fn last_life_warns_the_player() {
    let harness = deployed(&[1, 2, 3]).await;

    harness.kill(1, 2, DeathKind::Weapon).await;
    harness.advance(PAST_DEBOUNCE).await;
    harness.spawn(2).await;
    harness.kill(1, 2, DeathKind::Weapon).await;
    harness.advance(Duration::from_secs(1)).await;

    assert!(
        harness
            .engine
            .announcements()
            .contains(&(Audience::Player(p(2)), Announcement::LastChance))
    );
}

#[tokio::test(start_paused = true)]
async fn losing_every_life_parks_the_player_on_the_killers_team() {
    let harness = deployed(&[1, 2, 3]).await;
    let mut progression = harness.handle.subscribe(Topic::Progression);

    for _ in 0..3 {
        harness.kill(1, 3, DeathKind::Weapon).await;
        harness.advance(PAST_DEBOUNCE).await;
        harness.spawn(3).await;
    }

    let state = chamber(&harness, 3).await;
    assert!(state.eliminated);
    assert_eq!(state.lives_remaining, 0);

    let record = harness.player(3);
    assert!(!record.deploy_enabled);
    assert_eq!(record.redeploy_secs, Some(999_999));
    assert!(record.spectating);
    assert_eq!(record.team, harness.player(1).team);
    assert_eq!(record.counter, Some(Counter::Lives { lives: 0 }));
    assert!(
        harness
            .engine
            .announcements()
            .contains(&(Audience::Player(p(3)), Announcement::Eliminated))
    );
    assert!(drain(&mut progression).contains(&Event::Progression(
        ProgressionEvent::Eliminated { player: p(3) }
    )));
    assert_eq!(harness.engine.winner(), None);

    harness.advance(Duration::from_secs(1)).await;
    assert!(
        !harness.engine.take_deploy_requests().contains(&p(3)),
        "eliminated players are never redeployed"
    );
}

#[tokio::test(start_paused = true)]
async fn last_player_standing_wins() {
    let harness = deployed(&[1, 2]).await;

    for _ in 0..3 {
        harness.kill(1, 2, DeathKind::Weapon).await;
        harness.advance(PAST_DEBOUNCE).await;
        harness.spawn(2).await;
    }

    assert_eq!(harness.engine.winner(), Some(p(1)));
    assert!(harness.engine.announcements().contains(&(
        Audience::Everyone,
        Announcement::Winner {
            player: p(1),
            mode: ModeKind::Chamber,
        }
    )));
    let snapshot = harness.handle.snapshot().await.expect("snapshot");
    assert_eq!(snapshot.winner, Some(p(1)));
}

#[tokio::test(start_paused = true)]
async fn reaching_the_kill_target_wins() {
    let config = ChamberConfig {
        target_kills: 2,
        ..ChamberConfig::default()
    };
    let harness = Harness::start(ModeConfig::Chamber(config), &[1, 2, 3]).await;
    for player in 1..=3 {
        harness.spawn(player).await;
    }

    harness.kill(1, 2, DeathKind::Weapon).await;
    harness.advance(PAST_DEBOUNCE).await;
    harness.kill(1, 3, DeathKind::Weapon).await;

    assert_eq!(harness.engine.winner(), Some(p(1)));
}

#[tokio::test(start_paused = true)]
async fn winning_kill_skips_the_ammo_refresh() {
    let config = ChamberConfig {
        target_kills: 1,
        ..ChamberConfig::default()
    };
    let harness = Harness::start(ModeConfig::Chamber(config), &[1, 2, 3]).await;
    for player in 1..=3 {
        harness.spawn(player).await;
    }

    harness.kill(1, 2, DeathKind::Weapon).await;
    assert_eq!(harness.engine.winner(), Some(p(1)));
    harness.advance(Duration::from_secs(1)).await;

    let record = harness.player(1);
    assert_eq!(record.ammo.get(&(Slot::Primary, AmmoPool::Reserve)), Some(&0));
    assert_eq!(record.ammo.get(&(Slot::Primary, AmmoPool::Magazine)), Some(&1));
    assert!(
        !harness.engine.take_deploy_requests().contains(&p(2)),
        "nobody is redeployed after the match is decided"
    );
}
