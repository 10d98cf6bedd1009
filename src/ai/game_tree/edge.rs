use crate::Action;

pub struct GameTreeEdge<A> where A: Action {
    pub action: A,
    /// Position among the parent's children, in insertion order.
    pub ordinal: usize,
}

impl<A> GameTreeEdge<A> where A: Action {
    pub fn new(action: A, ordinal: usize) -> Self {
        Self {
            action,
            ordinal,
        }
    }
}
