use crate::game::PlayerId;
use std::fmt;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct OutcomeId(pub usize);

impl fmt::Display for OutcomeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "z{}", self.0)
    }
}

/// Payoff vector attached to terminal nodes, one entry per player position.
/// Several terminal nodes may share the same outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    id: OutcomeId,
    label: String,
    payoffs: Box<[f64]>,
}

impl Outcome {
    pub fn new(id: OutcomeId, label: impl Into<String>, payoffs: Vec<f64>) -> Outcome {
        Outcome {
            id,
            label: label.into(),
            payoffs: payoffs.into_boxed_slice(),
        }
    }

    pub fn id(&self) -> OutcomeId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn payoffs(&self) -> &[f64] {
        &self.payoffs
    }

    /// Panics if `player` has no entry in this outcome.
    pub fn payoff(&self, player: PlayerId) -> f64 {
        self.payoffs[player.index()]
    }
}
