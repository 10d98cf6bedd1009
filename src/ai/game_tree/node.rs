use crate::{AgentIndex, Outcome};

pub struct GameTreeNode {
    /// Agent to move at this position.
    pub agent: AgentIndex,
    pub score: f64,
    pub outcome: Option<Outcome>,
}

impl GameTreeNode {
    pub fn new(agent: AgentIndex, score: f64) -> Self {
        Self {
            agent,
            score,
            outcome: None,
        }
    }
}
