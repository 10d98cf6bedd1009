use crate::{AgentIndex, GameState, MAXIMIZER};
use crate::ai::config::SearchConfig;
use crate::ai::decision::decide;
use crate::ai::error::SearchError;
use crate::ai::evaluation::Evaluator;
use crate::ai::strategy::Strategy;

/// Something that picks a move whenever it is its turn.
pub trait Agent<S: GameState> {
    fn index(&self) -> AgentIndex;
    fn get_action(&self, state: &S) -> Result<S::Action, SearchError>;
}

/// Agent 0, choosing each move with a fresh tree search.
#[derive(Debug, Clone)]
pub struct MultiAgentSearch<E> {
    config: SearchConfig,
    evaluator: E,
}

impl<E> MultiAgentSearch<E> {
    pub fn new(config: SearchConfig, evaluator: E) -> Self {
        Self {
            config,
            evaluator,
        }
    }

    pub fn minimax(depth: u32, evaluator: E) -> Self {
        Self::new(SearchConfig::new(Strategy::Minimax, depth), evaluator)
    }

    pub fn alpha_beta(depth: u32, evaluator: E) -> Self {
        Self::new(SearchConfig::new(Strategy::AlphaBeta, depth), evaluator)
    }

    pub fn expectimax(depth: u32, evaluator: E) -> Self {
        Self::new(SearchConfig::new(Strategy::Expectimax, depth), evaluator)
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl<S, E> Agent<S> for MultiAgentSearch<E> where S: GameState, E: Evaluator<S> {
    fn index(&self) -> AgentIndex {
        MAXIMIZER
    }

    fn get_action(&self, state: &S) -> Result<S::Action, SearchError> {
        decide(state, &self.config, &self.evaluator).map(|decision| decision.action)
    }
}
