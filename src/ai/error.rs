use thiserror::Error;

use crate::AgentIndex;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The game state broke its contract, e.g. a non-terminal state without legal actions.
    #[error("precondition violated for agent {agent} at depth {depth}: {reason}")]
    PreconditionViolation {
        agent: AgentIndex,
        depth: u32,
        reason: String,
    },

    #[error("search to depth {depth} needs {plies} plies, over the budget of {budget}")]
    ResourceExhaustion {
        depth: u32,
        plies: u64,
        budget: u64,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
