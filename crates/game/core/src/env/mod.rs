//! Environment services consumed by the pure rules.
mod rng;

pub use rng::{PcgRng, RngOracle, RollStream, compute_seed};
