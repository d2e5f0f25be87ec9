//! Mode rules and tunable parameters.
//!
//! Every mode reads its constants from one of the structs here. The defaults
//! reproduce the shipped rules; tests and the simulator shrink them to make
//! matches short.

use crate::error::ConfigError;
use crate::loadout::{StatModifiers, WeaponId};

/// Which rule set a match runs.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ModeKind {
    Cranked,
    #[strum(to_string = "gun_game", serialize = "gungame")]
    GunGame,
    #[strum(to_string = "chamber", serialize = "oitc")]
    Chamber,
}

/// Cranked rules.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrankedConfig {
    /// Duration used when a countdown would otherwise start at zero.
    pub base_time_secs: u32,
    /// Seconds added per kill while the countdown runs.
    pub increase_secs: u32,
    /// Floor for any countdown start or extension.
    pub min_time_secs: u32,
    /// Streak that wins the match.
    pub win_streak: u32,
    /// Engine lifetime kills that win the match.
    pub lifetime_kill_target: u32,
    pub redeploy_secs: u32,
    /// Streak bonuses, indexed by `streak - 1`.
    pub milestones: Vec<StatModifiers>,
    /// Heal applied with the repeating resupply bundle.
    pub bundle_heal: u32,
    pub spot_secs: u32,
    pub primaries: Vec<WeaponId>,
    pub sidearms: Vec<WeaponId>,
}

impl CrankedConfig {
    pub const DEFAULT_BASE_TIME_SECS: u32 = 15;
    pub const DEFAULT_INCREASE_SECS: u32 = 7;
    pub const DEFAULT_MIN_TIME_SECS: u32 = 10;
    pub const DEFAULT_WIN_STREAK: u32 = 15;
    pub const DEFAULT_LIFETIME_KILL_TARGET: u32 = 50;
    pub const DEFAULT_REDEPLOY_SECS: u32 = 2;
    pub const DEFAULT_BUNDLE_HEAL: u32 = 50;
    pub const DEFAULT_SPOT_SECS: u32 = 999;
    pub const PRIMARY_COUNT: u32 = 15;
    pub const SIDEARM_COUNT: u32 = 4;

    /// Countdown length when starting at `streak`.
    pub fn start_time(&self, streak: u32) -> u32 {
        let time = self
            .min_time_secs
            .saturating_add(streak.saturating_mul(self.increase_secs))
            .max(self.min_time_secs);
        if time == 0 { self.base_time_secs } else { time }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.win_streak == 0 {
            return Err(ConfigError::ZeroThreshold { field: "win_streak" });
        }
        if self.lifetime_kill_target == 0 {
            return Err(ConfigError::ZeroThreshold {
                field: "lifetime_kill_target",
            });
        }
        if self.base_time_secs == 0 && self.min_time_secs == 0 {
            return Err(ConfigError::ZeroThreshold {
                field: "base_time_secs",
            });
        }
        if self.primaries.is_empty() {
            return Err(ConfigError::EmptyWeaponList { list: "primaries" });
        }
        if self.sidearms.is_empty() {
            return Err(ConfigError::EmptyWeaponList { list: "sidearms" });
        }
        Ok(())
    }
}

impl Default for CrankedConfig {
    fn default() -> Self {
        Self {
            base_time_secs: Self::DEFAULT_BASE_TIME_SECS,
            increase_secs: Self::DEFAULT_INCREASE_SECS,
            min_time_secs: Self::DEFAULT_MIN_TIME_SECS,
            win_streak: Self::DEFAULT_WIN_STREAK,
            lifetime_kill_target: Self::DEFAULT_LIFETIME_KILL_TARGET,
            redeploy_secs: Self::DEFAULT_REDEPLOY_SECS,
            milestones: vec![
                StatModifiers::new(115, 1.1),
                StatModifiers::new(130, 1.2),
                StatModifiers::new(150, 1.3),
                StatModifiers::new(175, 1.4),
                StatModifiers::new(200, 1.5),
            ],
            bundle_heal: Self::DEFAULT_BUNDLE_HEAL,
            spot_secs: Self::DEFAULT_SPOT_SECS,
            primaries: (0..Self::PRIMARY_COUNT).map(|i| WeaponId(100 + i)).collect(),
            sidearms: (0..Self::SIDEARM_COUNT).map(|i| WeaponId(200 + i)).collect(),
        }
    }
}

/// Named weapon progression for Gun Game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponSet {
    pub name: String,
    pub weapons: Vec<WeaponId>,
}

impl WeaponSet {
    pub fn new(name: impl Into<String>, weapons: Vec<WeaponId>) -> Self {
        Self {
            name: name.into(),
            weapons,
        }
    }
}

/// Gun Game rules.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GunGameConfig {
    /// Candidate progressions; one is drawn per match. All share one length.
    pub weapon_sets: Vec<WeaponSet>,
    pub debounce_ms: u64,
    pub redeploy_secs: u32,
    pub heavy_magazine: u32,
    pub final_magazine: u32,
    pub final_stats: StatModifiers,
    pub spot_secs: u32,
}

impl GunGameConfig {
    pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
    pub const DEFAULT_REDEPLOY_SECS: u32 = 3;
    pub const DEFAULT_HEAVY_MAGAZINE: u32 = 6;
    pub const DEFAULT_FINAL_MAGAZINE: u32 = 5;
    pub const DEFAULT_SPOT_SECS: u32 = 999;
    pub const DEFAULT_SET_LENGTH: u32 = 17;

    /// Standard weapons per set (`W`).
    pub fn set_length(&self) -> u32 {
        self.weapon_sets
            .first()
            .map_or(0, |set| set.weapons.len() as u32)
    }

    /// Tier holding the rocket launcher.
    pub fn heavy_tier(&self) -> u32 {
        self.set_length()
    }

    /// Highest tier; a kill here wins.
    pub fn max_tier(&self) -> u32 {
        self.set_length() + 1
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(first) = self.weapon_sets.first() else {
            return Err(ConfigError::NoWeaponSets);
        };
        if first.weapons.is_empty() {
            return Err(ConfigError::EmptyWeaponList { list: "weapon_sets" });
        }
        let expected = first.weapons.len();
        if let Some(set) = self
            .weapon_sets
            .iter()
            .find(|set| set.weapons.len() != expected)
        {
            return Err(ConfigError::UnequalWeaponSets {
                name: set.name.clone(),
                expected,
                actual: set.weapons.len(),
            });
        }
        Ok(())
    }
}

impl Default for GunGameConfig {
    fn default() -> Self {
        let set = |name: &str, base: u32| {
            WeaponSet::new(
                name,
                (0..Self::DEFAULT_SET_LENGTH)
                    .map(|i| WeaponId(base + i))
                    .collect(),
            )
        };
        Self {
            weapon_sets: vec![
                set("Classic", 1000),
                set("Heavy", 2000),
                set("CQB", 3000),
                set("Meta", 4000),
            ],
            debounce_ms: Self::DEFAULT_DEBOUNCE_MS,
            redeploy_secs: Self::DEFAULT_REDEPLOY_SECS,
            heavy_magazine: Self::DEFAULT_HEAVY_MAGAZINE,
            final_magazine: Self::DEFAULT_FINAL_MAGAZINE,
            final_stats: StatModifiers::new(155, 1.5),
            spot_secs: Self::DEFAULT_SPOT_SECS,
        }
    }
}

/// One-in-the-Chamber rules.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChamberConfig {
    pub initial_lives: u32,
    pub target_kills: u32,
    pub magazine_bullets: u32,
    pub throwables: u32,
    pub redeploy_secs: u32,
    /// Redeploy time parked on eliminated players.
    pub parked_redeploy_secs: u32,
    pub debounce_ms: u64,
    /// Settle delay before the post-kill ammo refresh.
    pub refresh_delay_ms: u64,
    /// Settle delay before a surviving victim is redeployed.
    pub redeploy_delay_ms: u64,
    /// Delay between the redeploy and the victim's scoreboard refresh.
    pub scoreboard_delay_ms: u64,
    pub pistol: WeaponId,
}

impl ChamberConfig {
    pub const DEFAULT_INITIAL_LIVES: u32 = 3;
    pub const DEFAULT_TARGET_KILLS: u32 = 20;
    pub const DEFAULT_MAGAZINE_BULLETS: u32 = 1;
    pub const DEFAULT_THROWABLES: u32 = 3;
    pub const DEFAULT_REDEPLOY_SECS: u32 = 3;
    pub const DEFAULT_PARKED_REDEPLOY_SECS: u32 = 999_999;
    pub const DEFAULT_DEBOUNCE_MS: u64 = 200;
    pub const DEFAULT_REFRESH_DELAY_MS: u64 = 50;
    pub const DEFAULT_REDEPLOY_DELAY_MS: u64 = 800;
    pub const DEFAULT_SCOREBOARD_DELAY_MS: u64 = 100;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_lives == 0 {
            return Err(ConfigError::ZeroThreshold {
                field: "initial_lives",
            });
        }
        if self.target_kills == 0 {
            return Err(ConfigError::ZeroThreshold {
                field: "target_kills",
            });
        }
        Ok(())
    }
}

impl Default for ChamberConfig {
    fn default() -> Self {
        Self {
            initial_lives: Self::DEFAULT_INITIAL_LIVES,
            target_kills: Self::DEFAULT_TARGET_KILLS,
            magazine_bullets: Self::DEFAULT_MAGAZINE_BULLETS,
            throwables: Self::DEFAULT_THROWABLES,
            redeploy_secs: Self::DEFAULT_REDEPLOY_SECS,
            parked_redeploy_secs: Self::DEFAULT_PARKED_REDEPLOY_SECS,
            debounce_ms: Self::DEFAULT_DEBOUNCE_MS,
            refresh_delay_ms: Self::DEFAULT_REFRESH_DELAY_MS,
            redeploy_delay_ms: Self::DEFAULT_REDEPLOY_DELAY_MS,
            scoreboard_delay_ms: Self::DEFAULT_SCOREBOARD_DELAY_MS,
            pistol: WeaponId(300),
        }
    }
}

/// Rules for whichever mode the match runs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModeConfig {
    Cranked(CrankedConfig),
    GunGame(GunGameConfig),
    Chamber(ChamberConfig),
}

impl ModeConfig {
    /// Default rules for `kind`.
    pub fn defaults(kind: ModeKind) -> Self {
        match kind {
            ModeKind::Cranked => Self::Cranked(CrankedConfig::default()),
            ModeKind::GunGame => Self::GunGame(GunGameConfig::default()),
            ModeKind::Chamber => Self::Chamber(ChamberConfig::default()),
        }
    }

    pub fn kind(&self) -> ModeKind {
        match self {
            Self::Cranked(_) => ModeKind::Cranked,
            Self::GunGame(_) => ModeKind::GunGame,
            Self::Chamber(_) => ModeKind::Chamber,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Cranked(config) => config.validate(),
            Self::GunGame(config) => config.validate(),
            Self::Chamber(config) => config.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        use strum::IntoEnumIterator;
        for kind in ModeKind::iter() {
            assert_eq!(ModeConfig::defaults(kind).validate(), Ok(()));
        }
    }

    #[test]
    fn cranked_start_time_grows_with_streak() {
        let config = CrankedConfig::default();

        assert_eq!(config.start_time(0), 10);
        assert_eq!(config.start_time(1), 17);
        assert_eq!(config.start_time(3), 31);
    }

    #[test]
    fn cranked_zero_start_falls_back_to_base_time() {
        let config = CrankedConfig {
            min_time_secs: 0,
            increase_secs: 0,
            ..CrankedConfig::default()
        };

        assert_eq!(config.start_time(4), 15);
    }

    #[test]
    fn gun_game_default_has_nineteen_tiers() {
        let config = GunGameConfig::default();

        assert_eq!(config.set_length(), 17);
        assert_eq!(config.heavy_tier(), 17);
        assert_eq!(config.max_tier(), 18);
    }

    #[test]
    fn unequal_weapon_sets_are_rejected() {
        let mut config = GunGameConfig::default();
        config.weapon_sets[2].weapons.pop();

        assert_eq!(
            config.validate(),
            Err(ConfigError::UnequalWeaponSets {
                name: "CQB".into(),
                expected: 17,
                actual: 16,
            })
        );
    }

    #[test]
    fn zero_lives_are_rejected() {
        let config = ChamberConfig {
            initial_lives: 0,
            ..ChamberConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroThreshold {
                field: "initial_lives"
            })
        ));
    }

    #[test]
    fn mode_kind_parses_aliases() {
        assert_eq!("gungame".parse::<ModeKind>(), Ok(ModeKind::GunGame));
        assert_eq!("OITC".parse::<ModeKind>(), Ok(ModeKind::Chamber));
        assert_eq!("cranked".parse::<ModeKind>(), Ok(ModeKind::Cranked));
    }
}
