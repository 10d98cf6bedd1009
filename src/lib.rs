//! Depth-bounded adversarial search for turn-based multi-agent games.
//!
//! Agent 0 is the maximizing agent. Every other agent is either an adversary
//! (minimax, alpha-beta) or a uniformly random actor (expectimax). A search
//! depth of one means every agent has moved once.

mod ai;
mod direction;

use std::fmt::{Debug, Display};

pub use ai::{
    agent::{Agent, MultiAgentSearch},
    config::{SearchConfig, DEFAULT_MAX_PLIES},
    decision::{choose_action, decide, Decision},
    error::SearchError,
    evaluation::{score_evaluation, Evaluator},
    game_tree::{
        GameTree,
        TreeError,
        TreeState,
        node::GameTreeNode,
        edge::GameTreeEdge,
    },
    score::Score,
    search::SearchStats,
    strategy::Strategy,
};
pub use direction::Direction;

/// Index of an agent in the turn cycle.
pub type AgentIndex = usize;

/// The agent whose value the search maximizes.
pub const MAXIMIZER: AgentIndex = 0;

pub trait Action: Clone + PartialEq + Debug {}

/// An immutable snapshot of a game, queried by the search and never mutated.
pub trait GameState: Sized {
    type Action: Action;
    type Error: Display;

    fn num_agents(&self) -> usize;
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Self::Action>;
    fn successor(&self, agent: AgentIndex, action: &Self::Action) -> Result<Self, Self::Error>;
    fn is_win(&self) -> bool;
    fn is_lose(&self) -> bool;
    fn score(&self) -> f64;

    fn is_terminal(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
}
