use crate::game::{InfosetId, NodeId, OutcomeId, PlayerId};
use thiserror::Error;

/// Errors raised while building or analysing a game tree. Everything except
/// `EmptyTree` is a structural integrity error: the tree breaks one of its
/// invariants and has to be repaired by whoever built it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("game tree has no root")]
    EmptyTree,

    #[error("game tree already has root {0}")]
    RootAlreadySet(NodeId),

    #[error("cycle detected through node {0}")]
    Cycle(NodeId),

    #[error("node {0} is reachable along more than one path")]
    SharedSubtree(NodeId),

    #[error("node {0} does not belong to this tree")]
    UnknownNode(NodeId),

    #[error("node {0} is not reachable from the root")]
    UnreachableNode(NodeId),

    #[error("node {node} records parent {recorded:?} but hangs below {actual:?}")]
    ParentMismatch {
        node: NodeId,
        recorded: Option<NodeId>,
        actual: Option<NodeId>,
    },

    #[error("terminal node {0} cannot have children")]
    ChildOfTerminal(NodeId),

    #[error("node {node} references unknown outcome {outcome}")]
    DanglingOutcome { node: NodeId, outcome: OutcomeId },

    #[error("node {node} references unknown information set {infoset}")]
    DanglingInfoset { node: NodeId, infoset: InfosetId },

    #[error("information set {infoset} belongs to unknown player {player}")]
    UnknownPlayer { infoset: InfosetId, player: PlayerId },

    #[error("outcome {outcome} has {found} payoffs, expected one per player ({expected})")]
    PayoffArity {
        outcome: OutcomeId,
        expected: usize,
        found: usize,
    },

    #[error("information set {infoset} and node {node} disagree on membership")]
    InfosetMembership { infoset: InfosetId, node: NodeId },

    #[error("node {node} has {found} actions, information set {infoset} has {expected}")]
    ActionCountMismatch {
        infoset: InfosetId,
        node: NodeId,
        expected: usize,
        found: usize,
    },

    #[error("decision node {0} has no actions")]
    NoActions(NodeId),

    #[error("chance node {node} has {probabilities} probabilities for {children} actions")]
    ChanceArity {
        node: NodeId,
        probabilities: usize,
        children: usize,
    },

    #[error("chance node {node} has negative probability {probability} at action {action}")]
    NegativeProbability {
        node: NodeId,
        action: usize,
        probability: f64,
    },

    #[error("chance probabilities at node {node} sum to {total}, expected 1")]
    ChanceProbabilities { node: NodeId, total: f64 },

    #[error("no reduced strategy fixes an action at information set {0}")]
    UnresolvedInfoset(InfosetId),
}

impl GameError {
    pub fn is_structural(&self) -> bool {
        match self {
            GameError::EmptyTree => false,
            _ => true,
        }
    }
}
