//! Worker tasks that back the runtime orchestration.
//!
//! The match worker owns the active mode and processes every lifecycle event
//! and scheduled continuation, one at a time.

mod match_worker;

pub use match_worker::{Command, MatchWorker};
