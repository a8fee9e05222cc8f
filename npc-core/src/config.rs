//! Crowd configuration.
//!
//! Settings come from the environment first (see [`CrowdConfig::from_env`])
//! and can then be overridden with the `with_*` builders.

use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming a roster file to load.
pub const ENV_ROSTER: &str = "NPC_ROSTER";
/// Environment variable asking for a random crowd of this size.
pub const ENV_CROWD_SIZE: &str = "NPC_CROWD_SIZE";
/// Environment variable seeding random crowd generation.
pub const ENV_SEED: &str = "NPC_SEED";

/// Errors reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Where the NPCs to place come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RosterSource {
    /// The built-in four-NPC sample.
    #[default]
    Sample,
    /// A JSON roster file.
    File(PathBuf),
    /// A random crowd drawn from the built-in catalog.
    Random { count: usize, seed: Option<u64> },
}

/// How NPCs are modelled when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Shared flyweights plus per-occurrence state.
    #[default]
    Flyweight,
    /// Every NPC stores every field.
    Naive,
}

/// Configuration for building and rendering a crowd.
#[derive(Debug, Clone, Default)]
pub struct CrowdConfig {
    pub source: RosterSource,
    pub mode: RenderMode,
    /// Print a flyweight vs naive footprint comparison.
    pub compare: bool,
    /// Write the roster used to this path.
    pub save_path: Option<PathBuf>,
    /// Skip printing individual renderings.
    pub quiet: bool,
}

impl CrowdConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its
    /// value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        let seed = match lookup(ENV_SEED) {
            Some(value) => Some(parse_var::<u64>(ENV_SEED, value)?),
            None => None,
        };

        if let Some(value) = lookup(ENV_CROWD_SIZE) {
            let count = parse_var::<usize>(ENV_CROWD_SIZE, value)?;
            config.source = RosterSource::Random { count, seed };
        }

        // A roster file wins over a random crowd.
        if let Some(path) = lookup(ENV_ROSTER).filter(|p| !p.trim().is_empty()) {
            config.source = RosterSource::File(PathBuf::from(path));
        }

        Ok(config)
    }

    pub fn with_source(mut self, source: RosterSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_roster_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = RosterSource::File(path.into());
        self
    }

    pub fn with_random_crowd(mut self, count: usize, seed: Option<u64>) -> Self {
        self.source = RosterSource::Random { count, seed };
        self
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_compare(mut self, compare: bool) -> Self {
        self.compare = compare;
        self
    }

    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = Some(path.into());
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

/// Parse one setting, naming `var` in the error if it does not parse.
pub fn parse_var<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|e| ConfigError::InvalidValue {
        var,
        reason: e.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CrowdConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.source, RosterSource::Sample);
        assert_eq!(config.mode, RenderMode::Flyweight);
        assert!(!config.compare);
    }

    #[test]
    fn test_random_crowd_from_env() {
        let config =
            CrowdConfig::from_lookup(lookup(&[(ENV_CROWD_SIZE, "100"), (ENV_SEED, "42")])).unwrap();
        assert_eq!(
            config.source,
            RosterSource::Random {
                count: 100,
                seed: Some(42)
            }
        );
    }

    #[test]
    fn test_roster_file_wins() {
        let config = CrowdConfig::from_lookup(lookup(&[
            (ENV_CROWD_SIZE, "100"),
            (ENV_ROSTER, "village.json"),
        ]))
        .unwrap();
        assert_eq!(config.source, RosterSource::File(PathBuf::from("village.json")));
    }

    #[test]
    fn test_invalid_value() {
        let err = CrowdConfig::from_lookup(lookup(&[(ENV_CROWD_SIZE, "lots")])).unwrap_err();
        assert!(err.to_string().contains(ENV_CROWD_SIZE));
    }

    #[test]
    fn test_builders_override() {
        let config = CrowdConfig::new()
            .with_random_crowd(10, None)
            .with_mode(RenderMode::Naive)
            .with_compare(true)
            .with_save_path("out.json");
        assert_eq!(config.source, RosterSource::Random { count: 10, seed: None });
        assert_eq!(config.mode, RenderMode::Naive);
        assert!(config.compare);
        assert_eq!(config.save_path, Some(PathBuf::from("out.json")));
    }
}
