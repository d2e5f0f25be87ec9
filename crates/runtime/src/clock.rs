//! Match clock.

use game_core::Millis;
use tokio::time::Instant;

/// Monotonic millisecond clock read by the modes for debounce windows.
pub trait Clock: Send + Sync {
    fn now(&self) -> Millis;
}

/// Clock backed by tokio's timer, so paused test time drives it too.
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    origin: Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now(&self) -> Millis {
        Millis(self.origin.elapsed().as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn follows_paused_time() {
        let clock = TokioClock::new();

        tokio::time::advance(Duration::from_millis(250)).await;

        assert_eq!(clock.now(), Millis(250));
    }
}
