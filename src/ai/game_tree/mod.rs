//! An explicit, arena-backed game tree that can be searched like any other game.
//!
//! Useful for hand-built positions and for synthetic random trees.

pub mod node;
pub mod edge;

use std::ops::RangeInclusive;

use petgraph::prelude::*;
use rand::Rng;
use thiserror::Error;

use crate::{Action, AgentIndex, GameState, Outcome};
use crate::ai::game_tree::edge::GameTreeEdge;
use crate::ai::game_tree::node::GameTreeNode;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("agent {agent} cannot move at node {node}, agent {to_move} is to move")]
    NotToMove {
        agent: AgentIndex,
        to_move: AgentIndex,
        node: usize,
    },

    #[error("action {action} is not available at node {node}")]
    UnknownAction {
        action: String,
        node: usize,
    },
}

pub struct GameTree<A> where A: Action {
    root_node_idx: NodeIndex,
    graph: Graph<GameTreeNode, GameTreeEdge<A>, Directed>,
    num_agents: usize,
}

impl<A> GameTree<A> where A: Action {
    /// Creates a tree holding only the root, where agent 0 is to move.
    pub fn new(num_agents: usize, root_score: f64) -> Self {
        let mut graph: Graph<GameTreeNode, GameTreeEdge<A>, Directed> = Graph::new();
        let root_node_idx = graph.add_node(GameTreeNode::new(0, root_score));
        Self {
            root_node_idx,
            graph,
            num_agents,
        }
    }

    /// Builds a complete tree `rounds` rounds deep with uniformly drawn integer scores in
    /// `-100..=100`.
    ///
    /// Every node gets a number of children drawn from `branching`, capped by the number of
    /// distinct `actions`. Panics if `branching` is empty.
    pub fn random<R: Rng>(
        rng: &mut R,
        num_agents: usize,
        rounds: u32,
        branching: RangeInclusive<usize>,
        actions: &[A],
    ) -> Self {
        let mut tree = Self::new(num_agents, random_score(rng));
        if num_agents == 0 || actions.is_empty() {
            return tree;
        }

        let plies = rounds as usize * num_agents;
        let mut frontier = vec![tree.root_node_idx];

        for _ in 0..plies {
            let mut next_frontier = Vec::new();
            for parent_idx in frontier {
                let width = rng.gen_range(branching.clone()).clamp(1, actions.len());
                for action in &actions[..width] {
                    let score = random_score(rng);
                    next_frontier.push(tree.add_child(parent_idx, action.clone(), score));
                }
            }
            frontier = next_frontier;
        }

        tree
    }

    pub fn root(&self) -> NodeIndex {
        self.root_node_idx
    }

    pub fn num_agents(&self) -> usize {
        self.num_agents
    }

    pub fn graph(&self) -> &Graph<GameTreeNode, GameTreeEdge<A>, Directed> {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Adds the position reached when the agent to move at `parent_idx` plays `action`.
    ///
    /// Panics if `parent_idx` does not belong to this tree.
    pub fn add_child(&mut self, parent_idx: NodeIndex, action: A, score: f64) -> NodeIndex {
        let agent = self.graph[parent_idx].agent;
        let next_agent = (agent + 1) % self.num_agents.max(1);
        let ordinal = self.graph.edges_directed(parent_idx, Outgoing).count();

        let child_idx = self.graph.add_node(GameTreeNode::new(next_agent, score));
        self.graph.add_edge(parent_idx, child_idx, GameTreeEdge::new(action, ordinal));
        child_idx
    }

    pub fn add_terminal(
        &mut self,
        parent_idx: NodeIndex,
        action: A,
        outcome: Outcome,
        score: f64,
    ) -> NodeIndex {
        let child_idx = self.add_child(parent_idx, action, score);
        self.set_outcome(child_idx, outcome);
        child_idx
    }

    pub fn set_outcome(&mut self, node_idx: NodeIndex, outcome: Outcome) {
        if let Some(node) = self.graph.node_weight_mut(node_idx) {
            node.outcome = Some(outcome);
        }
    }

    pub fn state(&self, node_idx: NodeIndex) -> Option<TreeState<'_, A>> {
        self.graph.node_weight(node_idx)?;
        Some(TreeState {
            tree: self,
            node_idx,
        })
    }

    pub fn root_state(&self) -> TreeState<'_, A> {
        TreeState {
            tree: self,
            node_idx: self.root_node_idx,
        }
    }

    /// Children of a node in the order they were added.
    fn node_children(&self, node_idx: NodeIndex) -> Vec<(NodeIndex, &GameTreeEdge<A>)> {
        let mut children: Vec<(NodeIndex, &GameTreeEdge<A>)> = self.graph
            .edges_directed(node_idx, Outgoing)
            .map(|edge| (edge.target(), edge.weight()))
            .collect();
        children.sort_by_key(|(_, edge)| edge.ordinal);
        children
    }
}

fn random_score<R: Rng>(rng: &mut R) -> f64 {
    f64::from(rng.gen_range(-100..=100i32))
}

/// A position inside a [`GameTree`].
pub struct TreeState<'t, A> where A: Action {
    tree: &'t GameTree<A>,
    node_idx: NodeIndex,
}

impl<'t, A> Clone for TreeState<'t, A> where A: Action {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'t, A> Copy for TreeState<'t, A> where A: Action {}

impl<'t, A> std::fmt::Debug for TreeState<'t, A> where A: Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeState")
            .field("node", &self.node_idx.index())
            .field("agent", &self.node().agent)
            .finish()
    }
}

impl<'t, A> TreeState<'t, A> where A: Action {
    pub fn agent_to_move(&self) -> AgentIndex {
        self.node().agent
    }

    fn node(&self) -> &'t GameTreeNode {
        &self.tree.graph[self.node_idx]
    }
}

impl<'t, A> GameState for TreeState<'t, A> where A: Action {
    type Action = A;
    type Error = TreeError;

    fn num_agents(&self) -> usize {
        self.tree.num_agents
    }

    fn legal_actions(&self, agent: AgentIndex) -> Vec<A> {
        if self.node().agent != agent {
            return Vec::new();
        }

        self.tree
            .node_children(self.node_idx)
            .into_iter()
            .map(|(_, edge)| edge.action.clone())
            .collect()
    }

    fn successor(&self, agent: AgentIndex, action: &A) -> Result<Self, TreeError> {
        let to_move = self.node().agent;
        if to_move != agent {
            return Err(TreeError::NotToMove {
                agent,
                to_move,
                node: self.node_idx.index(),
            });
        }

        let Some((child_idx, _)) = self.tree
            .node_children(self.node_idx)
            .into_iter()
            .find(|(_, edge)| edge.action == *action) else {
            return Err(TreeError::UnknownAction {
                action: format!("{action:?}"),
                node: self.node_idx.index(),
            });
        };

        Ok(TreeState {
            tree: self.tree,
            node_idx: child_idx,
        })
    }

    fn is_win(&self) -> bool {
        self.node().outcome == Some(Outcome::Win)
    }

    fn is_lose(&self) -> bool {
        self.node().outcome == Some(Outcome::Lose)
    }

    fn score(&self) -> f64 {
        self.node().score
    }
}
