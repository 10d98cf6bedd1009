use crate::Action;

/// Value the search assigned to one of agent 0's root actions.
#[derive(Debug, Clone, PartialEq)]
pub struct Score<A> where A: Action {
    pub action: A,
    pub value: f64,
}
