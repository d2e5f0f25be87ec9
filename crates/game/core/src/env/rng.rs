//! Deterministic random rolls for loadout generation.
//!
//! Randomness in the modes is limited to picking weapons, weapon sets and
//! attachment packages. Rolls are derived from a match seed so a match can be
//! replayed, and so tests can pin the exact packages a player receives.

/// Seed-driven source of 32-bit values.
///
/// Implementations must be deterministic: the same seed always yields the
/// same value.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform real in `[0, 1)`.
    fn unit(&self, seed: u64) -> f64 {
        f64::from(self.next_u32(seed)) / (f64::from(u32::MAX) + 1.0)
    }
}

/// PCG-XSH-RR generator: 64-bit state, 32-bit output.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Mixes the match seed, a per-event nonce, the player and a draw index into
/// one seed (SplitMix64/FxHash style combiners with a final avalanche).
pub fn compute_seed(match_seed: u64, nonce: u64, player: u32, context: u32) -> u64 {
    let mut hash = match_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(player).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Sequence of draws for one roll event (one spawn, one join, one match start).
///
/// Each call consumes the next context index, so draws within the event are
/// independent while the whole event stays reproducible from
/// `(match_seed, nonce, player)`.
#[derive(Clone, Debug)]
pub struct RollStream<R: RngOracle = PcgRng> {
    rng: R,
    match_seed: u64,
    nonce: u64,
    player: u32,
    context: u32,
}

impl RollStream<PcgRng> {
    pub fn new(match_seed: u64, nonce: u64, player: u32) -> Self {
        Self::with_rng(PcgRng, match_seed, nonce, player)
    }
}

impl<R: RngOracle> RollStream<R> {
    pub fn with_rng(rng: R, match_seed: u64, nonce: u64, player: u32) -> Self {
        Self {
            rng,
            match_seed,
            nonce,
            player,
            context: 0,
        }
    }

    /// Next uniform real in `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        let seed = compute_seed(self.match_seed, self.nonce, self.player, self.context);
        self.context = self.context.wrapping_add(1);
        self.rng.unit(seed)
    }

    /// Picks an index in `0..len` as `round(u * (len - 1))`.
    ///
    /// The two end indices are half as likely as the inner ones.
    pub fn pick_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        let scaled = self.next_unit() * (len - 1) as f64;
        (scaled.round() as usize).min(len - 1)
    }
}
