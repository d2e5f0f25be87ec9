//! Per-player progression records and the registry that owns them.
//!
//! Each mode keeps its own [`PlayerRegistry`] of one record type. Records are
//! plain data; all rules that change them live in [`crate::progression`].
mod chamber;
mod common;
mod cranked;
mod gun_game;
mod registry;

pub use chamber::ChamberState;
pub use common::{DeathKind, Generation, Millis, PlayerId, TeamId};
pub use cranked::CrankedState;
pub use gun_game::GunGameState;
pub use registry::PlayerRegistry;

/// Progress of one player in whichever mode is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerProgress {
    Cranked(CrankedState),
    GunGame(GunGameState),
    Chamber(ChamberState),
}
