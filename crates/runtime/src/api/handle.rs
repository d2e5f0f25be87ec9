//! Cloneable façade for feeding a running match.
//!
//! [`MatchHandle`] hides channel plumbing and offers async helpers for
//! delivering engine events or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{DeathKind, PlayerId};

use super::errors::{Result, RuntimeError};
use super::lifecycle::LifecycleEvent;
use crate::events::{Event, EventBus, Topic};
use crate::modes::MatchSnapshot;
use crate::workers::Command;

/// Client-facing handle to interact with a match
#[derive(Clone)]
pub struct MatchHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl MatchHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Deliver a lifecycle event. Resolves once the mode has handled it.
    pub async fn dispatch(&self, event: LifecycleEvent) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Lifecycle {
                event,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    pub async fn start_match(&self) -> Result<()> {
        self.dispatch(LifecycleEvent::MatchStarted).await
    }

    pub async fn join(&self, player: PlayerId) -> Result<()> {
        self.dispatch(LifecycleEvent::PlayerJoined(player)).await
    }

    pub async fn leave(&self, player: PlayerId) -> Result<()> {
        self.dispatch(LifecycleEvent::PlayerLeft(player)).await
    }

    pub async fn deploy(&self, player: PlayerId) -> Result<()> {
        self.dispatch(LifecycleEvent::PlayerDeployed(player)).await
    }

    /// Deliver a kill as the engine does: kill credit first, then the death.
    pub async fn kill(&self, killer: PlayerId, victim: PlayerId, kind: DeathKind) -> Result<()> {
        self.dispatch(LifecycleEvent::EarnedKill {
            killer,
            victim,
            kind,
        })
        .await?;
        self.dispatch(LifecycleEvent::Died {
            victim,
            killer: Some(killer),
            kind,
        })
        .await
    }

    /// Query the current match state (read-only snapshot)
    pub async fn snapshot(&self) -> Result<MatchSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Snapshot { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Progression` - Streaks, tiers, lives and rejected events
    /// - `Topic::Timer` - Countdown loops
    /// - `Topic::Match` - Joins, leaves, victory
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut timer_rx = handle.subscribe(Topic::Timer);
    /// while let Ok(event) = timer_rx.recv().await {
    ///     // Handle countdown events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
