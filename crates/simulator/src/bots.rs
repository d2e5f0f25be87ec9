//! Random kill generator standing in for real players.
use game_core::{DeathKind, PlayerId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// One kill the bots decided on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BotKill {
    pub killer: PlayerId,
    pub victim: PlayerId,
    pub kind: DeathKind,
}

pub struct BotDriver {
    rng: StdRng,
    melee_percent: u8,
}

impl BotDriver {
    pub fn new(seed: u64, melee_percent: u8) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            melee_percent: melee_percent.min(100),
        }
    }

    /// Picks two distinct players out of `alive`. `None` with fewer than two.
    pub fn next_kill(&mut self, alive: &[PlayerId]) -> Option<BotKill> {
        let mut pair = alive.choose_multiple(&mut self.rng, 2);
        let killer = *pair.next()?;
        let victim = *pair.next()?;

        let kind = if self.rng.gen_range(0..100) < self.melee_percent {
            DeathKind::Melee
        } else {
            DeathKind::Weapon
        };
        Some(BotKill {
            killer,
            victim,
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_picks_a_self_kill() {
        let mut bots = BotDriver::new(3, 50);
        let alive = [PlayerId(1), PlayerId(2), PlayerId(3)];

        for _ in 0..200 {
            let kill = bots.next_kill(&alive).expect("kill");
            assert_ne!(kill.killer, kill.victim);
        }
    }

    #[test]
    fn needs_two_players() {
        let mut bots = BotDriver::new(3, 0);

        assert_eq!(bots.next_kill(&[PlayerId(1)]), None);
        assert_eq!(bots.next_kill(&[]), None);
    }

    #[test]
    fn same_seed_same_kills() {
        let alive = [PlayerId(1), PlayerId(2), PlayerId(3), PlayerId(4)];
        let mut a = BotDriver::new(11, 30);
        let mut b = BotDriver::new(11, 30);

        for _ in 0..20 {
            assert_eq!(a.next_kill(&alive), b.next_kill(&alive));
        }
    }
}
