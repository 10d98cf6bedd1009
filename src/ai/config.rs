//! Search configuration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ai::error::SearchError;
use crate::ai::strategy::Strategy;

/// Default upper bound on plies along a single branch.
///
/// Each ply costs one stack frame, so `depth * num_agents` may not exceed this.
pub const DEFAULT_MAX_PLIES: u64 = 512;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub strategy: Strategy,

    /// Number of full rounds to look ahead.
    pub depth: u32,

    /// Stack budget: maximum number of plies a single branch may descend.
    pub max_plies: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Minimax,
            depth: 2,
            max_plies: DEFAULT_MAX_PLIES,
        }
    }
}

impl SearchConfig {
    pub fn new(strategy: Strategy, depth: u32) -> Self {
        Self {
            strategy,
            depth,
            ..Self::default()
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_max_plies(mut self, max_plies: u64) -> Self {
        self.max_plies = max_plies;
        self
    }

    /// Rejects configurations that cannot be searched for a game with `num_agents` agents.
    pub fn validate(&self, num_agents: usize) -> Result<(), SearchError> {
        if self.depth < 1 {
            return Err(SearchError::InvalidConfiguration(format!(
                "depth must be at least 1, got {}",
                self.depth
            )));
        }

        if num_agents < 1 {
            return Err(SearchError::InvalidConfiguration(
                "a game needs at least one agent".to_string(),
            ));
        }

        let plies = u64::from(self.depth).saturating_mul(num_agents as u64);
        if plies > self.max_plies {
            return Err(SearchError::ResourceExhaustion {
                depth: self.depth,
                plies,
                budget: self.max_plies,
            });
        }

        Ok(())
    }
}

/// Parses comma separated `key=value` options, e.g. `depth=3,strategy=expectimax`.
impl FromStr for SearchConfig {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut config = SearchConfig::default();

        for option in s.split(',').map(str::trim).filter(|option| !option.is_empty()) {
            let Some((key, value)) = option.split_once('=') else {
                return Err(SearchError::InvalidConfiguration(format!(
                    "expected key=value, got '{option}'"
                )));
            };

            let value = value.trim();
            match key.trim() {
                "depth" => config.depth = parse_number(key, value)?,
                "strategy" => config.strategy = value.parse()?,
                "max_plies" => config.max_plies = parse_number(key, value)?,
                other => {
                    return Err(SearchError::InvalidConfiguration(format!(
                        "unknown option '{other}'"
                    )))
                }
            }
        }

        Ok(config)
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T, SearchError> {
    value.parse().map_err(|_| {
        SearchError::InvalidConfiguration(format!("option '{key}' expects a number, got '{value}'"))
    })
}
