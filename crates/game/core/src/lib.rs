//! Deterministic progression rules for the Cranked, Gun Game and
//! One-in-the-Chamber modes.
//!
//! `game-core` holds everything that can be decided without an engine: player
//! records and their registry, countdown bookkeeping, per-mode transitions,
//! loadout plans and attachment rolls, scoreboard rows and victory rules. It
//! performs no I/O; the `runtime` crate reads engine facts, calls into here and
//! applies the outcomes.
pub mod config;
pub mod env;
pub mod error;
pub mod loadout;
pub mod notice;
pub mod progression;
pub mod scoreboard;
pub mod state;
pub mod timer;
pub mod victory;

pub use config::{ChamberConfig, CrankedConfig, GunGameConfig, ModeConfig, ModeKind, WeaponSet};
pub use env::{PcgRng, RngOracle, RollStream, compute_seed};
pub use error::{ConfigError, ErrorSeverity, GameError, Rejection};
pub use loadout::{
    AmmoPool, Attachment, AttachmentCategory, AttachmentProfile, Gadget, Item, LoadoutPlan,
    ResupplyKind, Slot, SlotSet, SpotStatus, StatModifiers, WeaponId, WeaponPackage,
};
pub use notice::{Announcement, Audience, Counter, Effect};
pub use progression::{KillFacts, validate_kill};
pub use scoreboard::{ScoreRow, ScoreboardLayout};
pub use state::{
    ChamberState, CrankedState, DeathKind, Generation, GunGameState, Millis, PlayerId,
    PlayerProgress, PlayerRegistry, TeamId,
};
pub use timer::{ArmOutcome, Countdown, TickOutcome};
pub use victory::VictoryDetector;
