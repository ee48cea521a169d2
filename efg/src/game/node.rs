use crate::game::{InfosetId, OutcomeId};
use std::fmt;

/// Handle of a node inside the arena of its `GameTree`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Terminal(OutcomeId),
    Decision(InfosetId),
    /// One probability per child, in action order.
    Chance(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    parent: Option<NodeId>,
    kind: NodeKind,
    children: Vec<NodeId>,
}

impl Node {
    pub fn new(
        id: NodeId,
        parent: Option<NodeId>,
        kind: NodeKind,
        children: Vec<NodeId>,
    ) -> Node {
        Node {
            id,
            parent,
            kind,
            children,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn child(&self, action: usize) -> Option<NodeId> {
        self.children.get(action).cloned()
    }

    pub fn num_actions(&self) -> usize {
        self.children.len()
    }

    pub fn is_terminal(&self) -> bool {
        match self.kind {
            NodeKind::Terminal(_) => true,
            _ => false,
        }
    }

    pub fn is_chance(&self) -> bool {
        match self.kind {
            NodeKind::Chance(_) => true,
            _ => false,
        }
    }

    pub fn outcome(&self) -> Option<OutcomeId> {
        match self.kind {
            NodeKind::Terminal(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn infoset(&self) -> Option<InfosetId> {
        match self.kind {
            NodeKind::Decision(infoset) => Some(infoset),
            _ => None,
        }
    }

    pub fn chance_probabilities(&self) -> Option<&[f64]> {
        match &self.kind {
            NodeKind::Chance(probabilities) => Some(probabilities),
            _ => None,
        }
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }
}
