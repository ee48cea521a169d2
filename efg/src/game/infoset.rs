use crate::game::{NodeId, PlayerId};
use std::fmt;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct InfosetId(pub usize);

impl fmt::Display for InfosetId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "h{}", self.0)
    }
}

/// Decision nodes of one player that the player cannot tell apart. Actions are
/// identified by their position, which is shared by every member node.
#[derive(Debug, Clone, PartialEq)]
pub struct Infoset {
    id: InfosetId,
    player: PlayerId,
    label: String,
    actions: Box<[String]>,
    members: Vec<NodeId>,
}

impl Infoset {
    pub fn new(
        id: InfosetId,
        player: PlayerId,
        label: impl Into<String>,
        actions: Vec<String>,
        members: Vec<NodeId>,
    ) -> Infoset {
        Infoset {
            id,
            player,
            label: label.into(),
            actions: actions.into_boxed_slice(),
            members,
        }
    }

    pub fn id(&self) -> InfosetId {
        self.id
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn num_actions(&self) -> usize {
        self.actions.len()
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    pub fn action_label(&self, action: usize) -> Option<&str> {
        self.actions.get(action).map(String::as_str)
    }

    /// Member nodes in the order they were attached to the tree.
    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    pub(crate) fn push_member(&mut self, node: NodeId) {
        self.members.push(node);
    }
}
