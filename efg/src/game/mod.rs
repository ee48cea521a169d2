mod builder;
mod game_error;
mod game_tree;
mod infoset;
mod node;
mod outcome;
mod player;

pub use self::builder::GameTreeBuilder;
pub use self::game_error::GameError;
pub use self::game_tree::{GameTree, Traversal, CHANCE_TOLERANCE};
pub use self::infoset::{Infoset, InfosetId};
pub use self::node::{Node, NodeId, NodeKind};
pub use self::outcome::{Outcome, OutcomeId};
pub use self::player::{ChanceOrPlayer, Player, PlayerId};

#[cfg(test)]
pub use self::game_tree::test_fixtures;
