use efg_core::game::{GameError, PlayerId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("vertex moves for player {0}, but only {1} players were declared")]
    UnknownPlayer(PlayerId, usize),

    #[error("information set {infoset} offers actions {found}, earlier members offered {expected}")]
    InconsistentActions {
        infoset: String,
        expected: String,
        found: String,
    },
}
