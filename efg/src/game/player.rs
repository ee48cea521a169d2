use std::fmt;

/// Ordinal position of a player. Payoff vectors of every `Outcome` are indexed by it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PlayerId(pub usize);

impl PlayerId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "pl{}", self.0 + 1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    id: PlayerId,
    label: String,
}

impl Player {
    pub fn new(id: PlayerId, label: impl Into<String>) -> Player {
        Player {
            id,
            label: label.into(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Indicates if a node is a chance node or a player's decision point.
/// Chance is a pseudo-player: it never appears in `GameTree::players()`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum ChanceOrPlayer {
    Player(PlayerId),
    Chance,
}
