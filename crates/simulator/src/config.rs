//! Simulator configuration loaded from the environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use game_core::ModeKind;
use runtime::RuntimeConfig;

/// Settings for one simulated match.
#[derive(Clone, Debug)]
pub struct SimConfig {
    pub mode: ModeKind,
    pub players: u32,
    pub seed: Option<u64>,
    /// Time between bot kills.
    pub kill_interval: Duration,
    /// Share of bot kills delivered as melee, 0 to 100.
    pub melee_percent: u8,
    pub countdown_tick: Duration,
    /// Wall-clock cap on the match.
    pub max_duration: Duration,
    pub log_dir: Option<PathBuf>,
    /// Print the final summary as JSON on stdout.
    pub summary_json: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            mode: ModeKind::Cranked,
            players: 6,
            seed: None,
            kill_interval: Duration::from_millis(750),
            melee_percent: 15,
            countdown_tick: Duration::from_secs(1),
            max_duration: Duration::from_secs(600),
            log_dir: None,
            summary_json: false,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GAMEMODE` - `cranked`, `gungame` or `chamber` (default: cranked)
    /// - `SIM_PLAYERS` - Number of bots, at least 2 (default: 6)
    /// - `SIM_SEED` - Match seed (default: random)
    /// - `SIM_KILL_INTERVAL_MS` - Time between kills (default: 750)
    /// - `SIM_MELEE_PERCENT` - Melee share of kills (default: 15)
    /// - `SIM_COUNTDOWN_TICK_MS` - Countdown tick period (default: 1000)
    /// - `SIM_MAX_SECONDS` - Match time cap (default: 600)
    /// - `SIM_LOG_DIR` - Log directory (default: platform cache dir)
    /// - `SIM_SUMMARY_JSON` - Print the summary as JSON (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(mode) = env::var("GAMEMODE").ok().and_then(|raw| parse_mode(&raw)) {
            config.mode = mode;
        }
        if let Some(players) = read_env::<u32>("SIM_PLAYERS") {
            config.players = players.max(2);
        }
        config.seed = read_env::<u64>("SIM_SEED");
        if let Some(ms) = read_env::<u64>("SIM_KILL_INTERVAL_MS") {
            config.kill_interval = Duration::from_millis(ms.max(1));
        }
        if let Some(percent) = read_env::<u8>("SIM_MELEE_PERCENT") {
            config.melee_percent = percent.min(100);
        }
        if let Some(ms) = read_env::<u64>("SIM_COUNTDOWN_TICK_MS") {
            config.countdown_tick = Duration::from_millis(ms.max(1));
        }
        if let Some(secs) = read_env::<u64>("SIM_MAX_SECONDS") {
            config.max_duration = Duration::from_secs(secs);
        }
        config.log_dir = env::var("SIM_LOG_DIR").ok().map(PathBuf::from);
        if let Some(enable) = read_env::<bool>("SIM_SUMMARY_JSON") {
            config.summary_json = enable;
        }

        config
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            match_seed: self.seed,
            countdown_tick: self.countdown_tick,
            ..RuntimeConfig::for_mode(self.mode)
        }
    }
}

/// Accepts the mode names players know (`oitc`, `gungame`) as well as the
/// canonical ones.
pub fn parse_mode(raw: &str) -> Option<ModeKind> {
    raw.trim().parse().ok()
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mode_aliases() {
        assert_eq!(parse_mode("oitc"), Some(ModeKind::Chamber));
        assert_eq!(parse_mode("GunGame"), Some(ModeKind::GunGame));
        assert_eq!(parse_mode(" cranked "), Some(ModeKind::Cranked));
        assert_eq!(parse_mode("deathmatch"), None);
    }

    #[test]
    fn runtime_config_carries_seed_and_tick() {
        let config = SimConfig {
            mode: ModeKind::Chamber,
            seed: Some(7),
            countdown_tick: Duration::from_millis(100),
            ..SimConfig::default()
        };

        let runtime = config.runtime_config();

        assert_eq!(runtime.match_seed, Some(7));
        assert_eq!(runtime.countdown_tick, Duration::from_millis(100));
        assert_eq!(runtime.mode.kind(), ModeKind::Chamber);
    }
}
