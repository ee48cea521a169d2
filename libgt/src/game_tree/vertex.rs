use efg_core::game::ChanceOrPlayer;
use std::fmt::Debug;

/// `GameTreeVertex` is the main trait that should be implemented by the game generator.
/// The game generator implicitly defines a game tree based on the implemented functions.
pub trait GameTreeVertex
where
    Self: Debug + Clone,
{
    // Information available to the player to move. Vertices of the same player with
    // equal `PlayerInfo` end up in the same information set.
    type PlayerInfo: Eq + Ord + Debug + Clone;

    // Actions which could be taken. These could be either from a player's move or chance.
    // Actions of a player are ordered by `Ord`, chance actions keep the order in which
    // `available_actions` returns them.
    type Action: Eq + Ord + Debug + Clone;

    fn next_player(&self) -> ChanceOrPlayer;
    fn player_information(&self) -> Self::PlayerInfo;

    /// Actions paired with their probability. Probabilities are only read at chance
    /// vertices and must sum to one there.
    fn available_actions(&self) -> Box<[(Self::Action, f64)]>;
    fn next_state(&self, action: &Self::Action) -> VertexOrLeaf<Self>;

    /// Used for sanity checks during tree traversals. Can possibly panic when
    /// we reach an impossible state.
    fn validate(&self) {}
}

/// Indicates if we are at a vertex (chance or player) or a leaf (terminal) vertex.
#[derive(Debug, Clone)]
pub enum VertexOrLeaf<T: GameTreeVertex> {
    Leaf(Leaf),
    Vertex(T),
}

/// Payoffs at a terminal state of the game, one per player. Leaves with identical
/// payoffs are mapped to the same outcome of the built tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Leaf {
    pub payoffs: Vec<f64>,
}

impl Leaf {
    pub fn new(payoffs: Vec<f64>) -> Leaf {
        Leaf { payoffs }
    }
}
