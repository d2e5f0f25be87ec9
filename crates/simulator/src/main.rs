//! Bot match simulator.
//!
//! Composition root that runs one match of the configured mode against the
//! in-memory engine: bots trade kills at a fixed interval until someone wins
//! or the time cap is hit, then a summary is logged (and optionally printed
//! as JSON).
//!
//! # Examples
//!
//! ```bash
//! GAMEMODE=oitc SIM_PLAYERS=4 SIM_SEED=42 cargo run -p gamemode-sim
//! GAMEMODE=gungame SIM_KILL_INTERVAL_MS=50 SIM_SUMMARY_JSON=true cargo run -p gamemode-sim
//! ```

mod bots;
mod config;
mod logging;

use std::sync::Arc;

use anyhow::Result;
use game_core::{ModeKind, PlayerId};
use runtime::{InMemoryEngine, LifecycleEvent, MatchHandle, MatchRuntime, MatchSnapshot};
use serde::Serialize;
use tokio::time::Instant;

use bots::BotDriver;
use config::SimConfig;

/// What the simulator reports at the end of a match.
#[derive(Debug, Serialize)]
struct Summary {
    mode: ModeKind,
    match_seed: u64,
    winner: Option<PlayerId>,
    elapsed_ms: u64,
    kills_dispatched: u32,
    snapshot: MatchSnapshot,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();
    let _log_guard = logging::setup_logging(config.log_dir.as_deref())?;

    tracing::info!("Starting {} simulation with {} bots", config.mode, config.players);

    let engine = Arc::new(InMemoryEngine::new());
    let players: Vec<PlayerId> = (1..=config.players).map(PlayerId).collect();
    for player in &players {
        engine.add_player(*player);
    }

    let runtime = MatchRuntime::builder()
        .config(config.runtime_config())
        .engine(engine.clone())
        .build()
        .await?;
    let handle = runtime.handle();
    tracing::info!("Match seed: {}", runtime.match_seed());

    handle.start_match().await?;
    for player in &players {
        spawn(&engine, &handle, *player).await?;
    }

    let started = Instant::now();
    let mut bots = BotDriver::new(runtime.match_seed(), config.melee_percent);
    let mut ticker = tokio::time::interval(config.kill_interval);
    let mut kills_dispatched = 0;

    while engine.winner().is_none() && started.elapsed() < config.max_duration {
        ticker.tick().await;
        respawn(&config, &engine, &handle, &players).await?;

        let alive: Vec<PlayerId> = players
            .iter()
            .copied()
            .filter(|player| engine.player(*player).is_some_and(|record| record.alive))
            .collect();
        let Some(kill) = bots.next_kill(&alive) else {
            continue;
        };

        engine.record_kill(kill.killer, kill.victim);
        handle.kill(kill.killer, kill.victim, kill.kind).await?;
        kills_dispatched += 1;
    }

    let snapshot = handle.snapshot().await?;
    handle.dispatch(LifecycleEvent::MatchEnded).await?;

    let summary = Summary {
        mode: config.mode,
        match_seed: runtime.match_seed(),
        winner: snapshot.winner,
        elapsed_ms: started.elapsed().as_millis() as u64,
        kills_dispatched,
        snapshot,
    };
    match summary.winner {
        Some(winner) => tracing::info!(
            "Winner {} after {} kills ({} ms)",
            winner,
            summary.kills_dispatched,
            summary.elapsed_ms
        ),
        None => tracing::warn!("No winner within {:?}", config.max_duration),
    }
    if config.summary_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    drop(handle);
    runtime.shutdown().await?;
    Ok(())
}

/// Engine-side spawn followed by the deploy event.
async fn spawn(engine: &InMemoryEngine, handle: &MatchHandle, player: PlayerId) -> Result<()> {
    engine.spawn(player);
    handle.deploy(player).await?;
    Ok(())
}

/// Brings dead bots back the way the engine would.
///
/// One-in-the-Chamber decides itself when a player returns and asks the
/// engine to deploy them; the other modes respawn anyone allowed to.
async fn respawn(
    config: &SimConfig,
    engine: &InMemoryEngine,
    handle: &MatchHandle,
    players: &[PlayerId],
) -> Result<()> {
    let due: Vec<PlayerId> = match config.mode {
        ModeKind::Chamber => engine.take_deploy_requests(),
        ModeKind::Cranked | ModeKind::GunGame => players
            .iter()
            .copied()
            .filter(|player| {
                engine
                    .player(*player)
                    .is_some_and(|record| record.valid && !record.alive && record.deploy_enabled)
            })
            .collect(),
    };

    for player in due {
        spawn(engine, handle, player).await?;
    }
    Ok(())
}
