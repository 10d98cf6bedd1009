//! The shared depth-limited recursion behind all three strategies.
//!
//! Nodes are `(state, depth, agent)` triples. Depth counts completed rounds and only
//! advances once the last agent has moved. Agent 0 always maximizes; the combine rule
//! for the remaining agents comes from the [`Strategy`].

use tracing::trace;

use crate::{AgentIndex, GameState, MAXIMIZER};
use crate::ai::error::SearchError;
use crate::ai::evaluation::Evaluator;
use crate::ai::strategy::Strategy;

/// Counters collected over one decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions the recursion was entered for.
    pub nodes: u64,
    /// Positions scored by the evaluation function.
    pub evaluations: u64,
    /// Alpha or beta cutoffs taken.
    pub cutoffs: u64,
}

pub(crate) struct Search<'e, E> {
    strategy: Strategy,
    max_depth: u32,
    num_agents: usize,
    evaluator: &'e E,
    stats: SearchStats,
}

impl<'e, E> Search<'e, E> {
    pub(crate) fn new(
        strategy: Strategy,
        max_depth: u32,
        num_agents: usize,
        evaluator: &'e E,
    ) -> Self {
        Self {
            strategy,
            max_depth,
            num_agents,
            evaluator,
            stats: SearchStats::default(),
        }
    }

    pub(crate) fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Who moves after `agent`, and at which depth.
    pub(crate) fn next_turn(&self, agent: AgentIndex, depth: u32) -> (AgentIndex, u32) {
        if agent + 1 >= self.num_agents {
            (MAXIMIZER, depth + 1)
        } else {
            (agent + 1, depth)
        }
    }

    /// Value of `state` with `agent` to move, `depth` rounds below the root.
    ///
    /// `alpha` and `beta` are only consulted when the strategy prunes. They are taken by
    /// value so that siblings never see each other's tightened bounds.
    pub(crate) fn value<S>(
        &mut self,
        state: &S,
        depth: u32,
        agent: AgentIndex,
        mut alpha: f64,
        mut beta: f64,
    ) -> Result<f64, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        self.stats.nodes += 1;

        if depth == self.max_depth || state.is_terminal() {
            self.stats.evaluations += 1;
            let value = self.evaluator.evaluate(state);
            if value.is_nan() {
                return Err(SearchError::PreconditionViolation {
                    agent,
                    depth,
                    reason: "evaluation returned NaN".to_string(),
                });
            }
            return Ok(value);
        }

        let actions = state.legal_actions(agent);
        if actions.is_empty() {
            return Err(SearchError::PreconditionViolation {
                agent,
                depth,
                reason: "non-terminal state has no legal actions".to_string(),
            });
        }

        let (next_agent, next_depth) = self.next_turn(agent, depth);
        let maximizing = agent == MAXIMIZER;

        let mut v = match (maximizing, self.strategy) {
            (true, _) => f64::NEG_INFINITY,
            (false, Strategy::Expectimax) => 0.0,
            (false, _) => f64::INFINITY,
        };

        for (idx, action) in actions.iter().enumerate() {
            let child = successor(state, agent, depth, action)?;
            let child_value = self.value(&child, next_depth, next_agent, alpha, beta)?;

            if maximizing {
                v = v.max(child_value);
                if self.strategy.prunes() {
                    if v > beta {
                        self.cutoff(agent, depth, v, actions.len() - idx - 1);
                        return Ok(v);
                    }
                    alpha = alpha.max(v);
                }
                continue;
            }

            match self.strategy {
                Strategy::Minimax => v = v.min(child_value),
                Strategy::AlphaBeta => {
                    v = v.min(child_value);
                    if v < alpha {
                        self.cutoff(agent, depth, v, actions.len() - idx - 1);
                        return Ok(v);
                    }
                    beta = beta.min(v);
                }
                // summed here, averaged below
                Strategy::Expectimax => v += child_value,
            }
        }

        if !maximizing && self.strategy == Strategy::Expectimax {
            v /= actions.len() as f64;
        }

        Ok(v)
    }

    fn cutoff(&mut self, agent: AgentIndex, depth: u32, value: f64, skipped: usize) {
        self.stats.cutoffs += 1;
        trace!(agent, depth, value, skipped, "pruned remaining siblings");
    }
}

/// Builds a successor, reporting a refusal by the game as a broken precondition.
pub(crate) fn successor<S: GameState>(
    state: &S,
    agent: AgentIndex,
    depth: u32,
    action: &S::Action,
) -> Result<S, SearchError> {
    state
        .successor(agent, action)
        .map_err(|err| SearchError::PreconditionViolation {
            agent,
            depth,
            reason: format!("could not apply {action:?}: {err}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{score_evaluation, Direction, GameTree, Outcome, TreeState};

    fn min_node_tree(values: &[f64]) -> GameTree<Direction> {
        // agent 1 to move directly below the root
        let mut tree = GameTree::new(2, 0.0);
        let node = tree.add_child(tree.root(), Direction::Stop, 0.0);
        for (value, direction) in values.iter().zip(Direction::ALL) {
            tree.add_child(node, direction, *value);
        }
        tree
    }

    fn value_at(
        tree: &GameTree<Direction>,
        strategy: Strategy,
        max_depth: u32,
    ) -> (f64, SearchStats) {
        let evaluator = score_evaluation::<TreeState<'_, Direction>>;
        let mut search = Search::new(strategy, max_depth, tree.num_agents(), &evaluator);
        let state = tree.root_state().successor(0, &Direction::Stop).unwrap();
        let value = search
            .value(&state, 0, 1, f64::NEG_INFINITY, f64::INFINITY)
            .unwrap();
        (value, search.stats())
    }

    #[test]
    fn next_turn_wraps_after_the_last_agent() {
        let evaluator = |_: &TreeState<'_, Direction>| 0.0;
        let search = Search::new(Strategy::Minimax, 3, 3, &evaluator);
        assert_eq!(search.next_turn(0, 0), (1, 0));
        assert_eq!(search.next_turn(1, 0), (2, 0));
        assert_eq!(search.next_turn(2, 0), (0, 1));

        let solo = Search::new(Strategy::Minimax, 3, 1, &evaluator);
        assert_eq!(solo.next_turn(0, 1), (0, 2));
    }

    #[test]
    fn opponent_nodes_combine_per_strategy() {
        let tree = min_node_tree(&[1.0, 2.0, 4.0]);

        assert_eq!(value_at(&tree, Strategy::Minimax, 1).0, 1.0);
        assert_eq!(value_at(&tree, Strategy::AlphaBeta, 1).0, 1.0);
        assert_eq!(value_at(&tree, Strategy::Expectimax, 1).0, (1.0 + 2.0 + 4.0) / 3.0);
    }

    #[test]
    fn expectation_ignores_magnitude() {
        let tree = min_node_tree(&[-1000.0, 0.0, 1.0, 1.0]);
        assert_eq!(value_at(&tree, Strategy::Expectimax, 1).0, (-1000.0 + 0.0 + 1.0 + 1.0) / 4.0);
    }

    #[test]
    fn terminal_state_is_evaluated_without_recursing() {
        let mut tree = GameTree::new(2, 42.0);
        tree.add_child(tree.root(), Direction::North, 1.0);
        tree.set_outcome(tree.root(), Outcome::Win);

        for strategy in Strategy::ALL {
            let evaluator = score_evaluation::<TreeState<'_, Direction>>;
            let mut search = Search::new(strategy, 10, 2, &evaluator);
            let value = search
                .value(&tree.root_state(), 0, 0, f64::NEG_INFINITY, f64::INFINITY)
                .unwrap();

            assert_eq!(value, 42.0);
            assert_eq!(search.stats(), SearchStats { nodes: 1, evaluations: 1, cutoffs: 0 });
        }
    }

    #[test]
    fn depth_limit_is_evaluated_without_recursing() {
        let mut tree = GameTree::new(2, 5.0);
        tree.add_child(tree.root(), Direction::North, 1.0);

        let evaluator = score_evaluation::<TreeState<'_, Direction>>;
        let mut search = Search::new(Strategy::Minimax, 1, 2, &evaluator);
        let value = search
            .value(&tree.root_state(), 1, 0, f64::NEG_INFINITY, f64::INFINITY)
            .unwrap();
        assert_eq!(value, 5.0);
    }

    #[test]
    fn missing_actions_in_a_live_state_are_fatal() {
        let tree: GameTree<Direction> = GameTree::new(2, 0.0);

        let evaluator = score_evaluation::<TreeState<'_, Direction>>;
        let mut search = Search::new(Strategy::Expectimax, 2, 2, &evaluator);
        let err = search
            .value(&tree.root_state(), 0, 0, f64::NEG_INFINITY, f64::INFINITY)
            .unwrap_err();

        assert!(matches!(err, SearchError::PreconditionViolation { agent: 0, depth: 0, .. }));
    }

    #[test]
    fn nan_leaf_is_fatal() {
        let tree = min_node_tree(&[3.0, f64::NAN]);

        for strategy in Strategy::ALL {
            let evaluator = score_evaluation::<TreeState<'_, Direction>>;
            let mut search = Search::new(strategy, 1, 2, &evaluator);
            let state = tree.root_state().successor(0, &Direction::Stop).unwrap();
            let err = search
                .value(&state, 0, 1, f64::NEG_INFINITY, f64::INFINITY)
                .unwrap_err();

            match err {
                SearchError::PreconditionViolation { agent, depth, reason } => {
                    assert_eq!((agent, depth), (0, 1), "{strategy}");
                    assert!(reason.contains("NaN"), "{strategy}: {reason}");
                }
                other => panic!("{strategy}: unexpected error {other:?}"),
            }
        }
    }

    #[test]
    fn min_node_cuts_below_alpha() {
        let tree = min_node_tree(&[2.0, 9.0, 9.0]);

        let evaluator = score_evaluation::<TreeState<'_, Direction>>;
        let mut search = Search::new(Strategy::AlphaBeta, 1, 2, &evaluator);
        let state = tree.root_state().successor(0, &Direction::Stop).unwrap();
        let value = search.value(&state, 0, 1, 3.0, f64::INFINITY).unwrap();

        // first child already falls below alpha, the rest are skipped
        assert_eq!(value, 2.0);
        assert_eq!(search.stats(), SearchStats { nodes: 2, evaluations: 1, cutoffs: 1 });
    }

    #[test]
    fn max_node_cuts_above_beta() {
        let mut tree = GameTree::new(1, 0.0);
        for (value, direction) in [7.0, 1.0, 100.0].into_iter().zip(Direction::ALL) {
            tree.add_child(tree.root(), direction, value);
        }

        let evaluator = score_evaluation::<TreeState<'_, Direction>>;
        let mut search = Search::new(Strategy::AlphaBeta, 1, 1, &evaluator);
        let value = search
            .value(&tree.root_state(), 0, 0, f64::NEG_INFINITY, 5.0)
            .unwrap();

        assert_eq!(value, 7.0);
        assert_eq!(search.stats().cutoffs, 1);
        assert_eq!(search.stats().nodes, 2);
    }

    #[test]
    fn equal_to_a_bound_is_not_a_cutoff() {
        let tree = min_node_tree(&[3.0, 1.0]);

        let evaluator = score_evaluation::<TreeState<'_, Direction>>;
        let mut search = Search::new(Strategy::AlphaBeta, 1, 2, &evaluator);
        let state = tree.root_state().successor(0, &Direction::Stop).unwrap();
        let value = search.value(&state, 0, 1, 3.0, f64::INFINITY).unwrap();

        assert_eq!(value, 1.0);
        assert_eq!(search.stats().cutoffs, 1);
        assert_eq!(search.stats().evaluations, 2);
    }
}
