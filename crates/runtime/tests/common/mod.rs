//! Shared match harness for the mode flow tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use game_core::{DeathKind, ModeConfig, PlayerId, PlayerProgress};
use runtime::{
    EnginePlayer, Event, InMemoryEngine, LifecycleEvent, MatchHandle, MatchRuntime, RuntimeConfig,
};
use tokio::sync::broadcast;

pub const SEED: u64 = 0x5eed;

pub fn p(id: u32) -> PlayerId {
    PlayerId(id)
}

/// A running match over an [`InMemoryEngine`].
pub struct Harness {
    pub engine: Arc<InMemoryEngine>,
    pub runtime: MatchRuntime,
    pub handle: MatchHandle,
}

impl Harness {
    /// Connects `players`, builds the runtime and starts the match. Nobody is
    /// deployed yet.
    pub async fn start(mode: ModeConfig, players: &[u32]) -> Self {
        let engine = Arc::new(InMemoryEngine::new());
        for &player in players {
            engine.add_player(p(player));
        }

        let config = RuntimeConfig {
            mode,
            match_seed: Some(SEED),
            ..RuntimeConfig::default()
        };
        let runtime = MatchRuntime::builder()
            .config(config)
            .engine(engine.clone())
            .build()
            .await
            .expect("runtime should build");
        let handle = runtime.handle();
        handle.start_match().await.expect("match should start");

        Self {
            engine,
            runtime,
            handle,
        }
    }

    /// Spawns the player on the engine side and reports the deploy.
    pub async fn spawn(&self, player: u32) {
        self.engine.spawn(p(player));
        self.handle.deploy(p(player)).await.expect("deploy");
    }

    /// Engine bookkeeping plus the kill and death events, in engine order.
    pub async fn kill(&self, killer: u32, victim: u32, kind: DeathKind) {
        self.engine.record_kill(p(killer), p(victim));
        self.handle
            .kill(p(killer), p(victim), kind)
            .await
            .expect("kill");
    }

    pub async fn dispatch(&self, event: LifecycleEvent) {
        self.handle.dispatch(event).await.expect("dispatch");
    }

    /// Lets paused time run forward, then waits for the worker to drain
    /// whatever the elapsed timers posted.
    pub async fn advance(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
        self.handle.snapshot().await.expect("snapshot");
    }

    pub fn player(&self, player: u32) -> EnginePlayer {
        self.engine.player(p(player)).expect("player connected")
    }

    pub async fn progress(&self, player: u32) -> PlayerProgress {
        self.handle
            .snapshot()
            .await
            .expect("snapshot")
            .players
            .into_iter()
            .find(|entry| entry.player == p(player))
            .map(|entry| entry.progress)
            .expect("player tracked by the mode")
    }
}

/// Everything already published on `rx`.
pub fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
