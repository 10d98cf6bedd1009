use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ai::error::SearchError;

/// How the non-maximizing agents are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Every other agent picks the move that is worst for agent 0.
    #[default]
    Minimax,
    /// Minimax values, skipping subtrees that cannot change the result.
    #[serde(alias = "alpha-beta")]
    AlphaBeta,
    /// Every other agent picks uniformly at random among its legal moves.
    Expectimax,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Minimax, Strategy::AlphaBeta, Strategy::Expectimax];

    pub fn prunes(self) -> bool {
        matches!(self, Strategy::AlphaBeta)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Minimax => "minimax",
            Strategy::AlphaBeta => "alphabeta",
            Strategy::Expectimax => "expectimax",
        };
        f.write_str(name)
    }
}

impl FromStr for Strategy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimax" => Ok(Strategy::Minimax),
            "alphabeta" | "alpha-beta" | "alpha_beta" => Ok(Strategy::AlphaBeta),
            "expectimax" => Ok(Strategy::Expectimax),
            other => Err(SearchError::InvalidConfiguration(format!("unknown strategy '{other}'"))),
        }
    }
}
