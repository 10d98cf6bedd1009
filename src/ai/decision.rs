use tracing::debug;

use crate::{Action, GameState, MAXIMIZER};
use crate::ai::config::SearchConfig;
use crate::ai::error::SearchError;
use crate::ai::evaluation::Evaluator;
use crate::ai::score::Score;
use crate::ai::search::{successor, Search, SearchStats};
use crate::ai::strategy::Strategy;

/// Outcome of searching one real game turn for agent 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision<A> where A: Action {
    pub action: A,
    pub value: f64,
    /// One entry per legal root action, in enumeration order.
    ///
    /// Under alpha-beta a pruned action only carries an upper bound on its value.
    pub scores: Vec<Score<A>>,
    pub stats: SearchStats,
}

/// Picks agent 0's move for this turn.
pub fn choose_action<S, E>(
    state: &S,
    strategy: Strategy,
    max_depth: u32,
    evaluator: &E,
) -> Result<S::Action, SearchError>
where
    S: GameState,
    E: Evaluator<S>,
{
    let config = SearchConfig::new(strategy, max_depth);
    decide(state, &config, evaluator).map(|decision| decision.action)
}

/// Searches every root action of agent 0 and reports the chosen one.
///
/// Ties go to the action enumerated first, for every strategy.
pub fn decide<S, E>(
    state: &S,
    config: &SearchConfig,
    evaluator: &E,
) -> Result<Decision<S::Action>, SearchError>
where
    S: GameState,
    E: Evaluator<S>,
{
    let num_agents = state.num_agents();
    config.validate(num_agents)?;

    let actions = state.legal_actions(MAXIMIZER);
    if actions.is_empty() {
        return Err(SearchError::PreconditionViolation {
            agent: MAXIMIZER,
            depth: 0,
            reason: "no legal actions at the root".to_string(),
        });
    }

    debug!(
        strategy = %config.strategy,
        depth = config.depth,
        agents = num_agents,
        actions = actions.len(),
        "searching"
    );

    let mut search = Search::new(config.strategy, config.depth, num_agents, evaluator);
    let (next_agent, next_depth) = search.next_turn(MAXIMIZER, 0);

    let mut scores = Vec::with_capacity(actions.len());
    let best_idx = match config.strategy {
        Strategy::AlphaBeta => {
            let mut alpha = f64::NEG_INFINITY;
            let mut best_score = f64::NEG_INFINITY;
            let mut best_idx = None;

            for (idx, action) in actions.iter().enumerate() {
                let child = successor(state, MAXIMIZER, 0, action)?;
                let value = search.value(&child, next_depth, next_agent, alpha, f64::INFINITY)?;
                if best_idx.is_none() || value > best_score {
                    best_score = value;
                    best_idx = Some(idx);
                }
                alpha = alpha.max(value);
                scores.push(Score { action: action.clone(), value });
            }

            best_idx
        }
        Strategy::Minimax | Strategy::Expectimax => {
            for action in &actions {
                let child = successor(state, MAXIMIZER, 0, action)?;
                let value = search.value(
                    &child,
                    next_depth,
                    next_agent,
                    f64::NEG_INFINITY,
                    f64::INFINITY,
                )?;
                scores.push(Score { action: action.clone(), value });
            }

            let best_value = scores
                .iter()
                .map(|score| score.value)
                .fold(f64::NEG_INFINITY, f64::max);
            scores.iter().position(|score| score.value == best_value)
        }
    };

    let Some(best_idx) = best_idx else {
        return Err(SearchError::PreconditionViolation {
            agent: MAXIMIZER,
            depth: 0,
            reason: "evaluation produced no comparable value".to_string(),
        });
    };

    let decision = Decision {
        action: actions[best_idx].clone(),
        value: scores[best_idx].value,
        scores,
        stats: search.stats(),
    };

    debug!(
        action = ?decision.action,
        value = decision.value,
        nodes = decision.stats.nodes,
        evaluations = decision.stats.evaluations,
        cutoffs = decision.stats.cutoffs,
        "decided"
    );

    Ok(decision)
}
