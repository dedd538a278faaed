//! Session settings: defaults, then an optional TOML file, then environment
//! overrides, then validation.

use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_ENV: &str = "HOLDEM_CONFIG";
pub const SEED_ENV: &str = "HOLDEM_SEED";
pub const PLAYERS_ENV: &str = "HOLDEM_PLAYERS";
pub const NAME_ENV: &str = "HOLDEM_NAME";

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 9;
pub const MAX_NAME_LEN: usize = 16;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    /// Seats at the table, the human's included.
    pub players: usize,
    pub player_name: String,
    pub starting_chips: u64,
    /// Opening big blind; the small blind is half.
    pub minimum_bet: u64,
    /// How often the blinds go up. Zero keeps them fixed.
    pub blind_interval_ms: u64,
    /// How long a bot thinks before acting.
    pub bot_delay_ms: u64,
    /// Seeds every random choice in the session when set.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            players: 5,
            player_name: "Player".into(),
            starting_chips: 500,
            minimum_bet: 10,
            blind_interval_ms: 5 * 60 * 1000,
            bot_delay_ms: 750,
            seed: None,
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    players: Option<usize>,
    #[serde(default)]
    player_name: Option<String>,
    #[serde(default)]
    starting_chips: Option<u64>,
    #[serde(default)]
    minimum_bet: Option<u64>,
    #[serde(default)]
    blind_interval_ms: Option<u64>,
    #[serde(default)]
    bot_delay_ms: Option<u64>,
    #[serde(default)]
    seed: Option<u64>,
}

impl SessionConfig {
    /// Load from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => Self::from_toml(&fs::read_to_string(path)?)?,
            _ => Self::default(),
        };
        cfg.apply_env(|key| std::env::var(key).ok())?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Defaults overlaid with whatever `text` sets. Not validated.
    ///
    /// ```
    /// use holdem_rs::config::SessionConfig;
    ///
    /// let cfg = SessionConfig::from_toml("players = 3\nseed = 9").unwrap();
    /// assert_eq!(cfg.players, 3);
    /// assert_eq!(cfg.seed, Some(9));
    /// assert_eq!(cfg.starting_chips, 500);
    /// ```
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let f: FileConfig = toml::from_str(text)?;
        let mut cfg = Self::default();
        if let Some(v) = f.players {
            cfg.players = v;
        }
        if let Some(v) = f.player_name {
            cfg.player_name = v;
        }
        if let Some(v) = f.starting_chips {
            cfg.starting_chips = v;
        }
        if let Some(v) = f.minimum_bet {
            cfg.minimum_bet = v;
        }
        if let Some(v) = f.blind_interval_ms {
            cfg.blind_interval_ms = v;
        }
        if let Some(v) = f.bot_delay_ms {
            cfg.bot_delay_ms = v;
        }
        if f.seed.is_some() {
            cfg.seed = f.seed;
        }
        Ok(cfg)
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let set = |key: &str| lookup(key).filter(|v| !v.is_empty());
        if let Some(seed) = set(SEED_ENV) {
            let seed = seed.trim().parse().map_err(|_| invalid(format!("bad seed {seed:?}")))?;
            self.seed = Some(seed);
        }
        if let Some(players) = set(PLAYERS_ENV) {
            self.players = players
                .trim()
                .parse()
                .map_err(|_| invalid(format!("bad player count {players:?}")))?;
        }
        if let Some(name) = set(NAME_ENV) {
            self.player_name = name;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.players) {
            return Err(invalid(format!(
                "players must be {MIN_PLAYERS} to {MAX_PLAYERS}, got {}",
                self.players
            )));
        }
        let name = self.player_name.trim();
        if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
            return Err(invalid(format!("player_name must be 1 to {MAX_NAME_LEN} characters")));
        }
        if self.starting_chips == 0 {
            return Err(invalid("starting_chips must be > 0".into()));
        }
        if self.minimum_bet == 0 || self.minimum_bet % 2 != 0 {
            return Err(invalid(format!(
                "minimum_bet must be even and > 0, got {}",
                self.minimum_bet
            )));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> ConfigError {
    ConfigError::Invalid(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let cfg = SessionConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.blind_interval_ms, 300_000);
    }

    #[test]
    fn env_overrides_file() {
        let mut cfg = SessionConfig::from_toml("players = 4\nseed = 1").unwrap();
        cfg.apply_env(env(&[(SEED_ENV, "42"), (NAME_ENV, "Ada")])).unwrap();
        assert_eq!(cfg.players, 4);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.player_name, "Ada");
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut cfg = SessionConfig::default();
        cfg.apply_env(env(&[(PLAYERS_ENV, "")])).unwrap();
        assert_eq!(cfg.players, 5);
    }

    #[test]
    fn bad_env_value_is_an_error() {
        let mut cfg = SessionConfig::default();
        let err = cfg.apply_env(env(&[(PLAYERS_ENV, "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn mistyped_toml_fails() {
        assert!(matches!(SessionConfig::from_toml("players = \"five\""), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn validation_limits() {
        let bad = [
            SessionConfig { players: 1, ..Default::default() },
            SessionConfig { players: 10, ..Default::default() },
            SessionConfig { player_name: "  ".into(), ..Default::default() },
            SessionConfig { player_name: "x".repeat(17), ..Default::default() },
            SessionConfig { starting_chips: 0, ..Default::default() },
            SessionConfig { minimum_bet: 15, ..Default::default() },
        ];
        for cfg in bad {
            assert!(cfg.validate().is_err(), "{cfg:?} should be rejected");
        }
        let ok = SessionConfig { players: 9, blind_interval_ms: 0, ..Default::default() };
        assert!(ok.validate().is_ok());
    }
}
