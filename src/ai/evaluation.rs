use crate::GameState;

/// Static value of a position from agent 0's point of view.
pub trait Evaluator<S> {
    fn evaluate(&self, state: &S) -> f64;
}

impl<S, F> Evaluator<S> for F where F: Fn(&S) -> f64 {
    fn evaluate(&self, state: &S) -> f64 {
        self(state)
    }
}

/// The default evaluation: the game's own running score.
pub fn score_evaluation<S: GameState>(state: &S) -> f64 {
    state.score()
}
