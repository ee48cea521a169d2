use crate::game::{
    ChanceOrPlayer, GameError, Infoset, InfosetId, Node, NodeId, NodeKind, Outcome, OutcomeId,
    Player, PlayerId,
};
use crate::image::{ImageComputer, NodeImages};

use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Probabilities at a chance node must sum to one within this tolerance.
pub const CHANCE_TOLERANCE: f64 = 1e-9;

/// An extensive-form game. Nodes live in an arena and refer to each other through
/// `NodeId` handles; every non-root node has exactly one parent.
///
/// The tree is read-only once built. Derived data (node images) is computed lazily
/// and cached inside the tree, so a `GameTree` may be shared between threads
/// and queried concurrently.
#[derive(Debug, Clone)]
pub struct GameTree {
    players: Vec<Player>,
    outcomes: Vec<Outcome>,
    infosets: Vec<Infoset>,
    nodes: Vec<Node>,
    root: Option<NodeId>,

    images: OnceLock<NodeImages>,
}

/// Orders in which a depth-first walk from the root visits the nodes.
#[derive(Debug, Clone)]
pub struct Traversal {
    preorder: Vec<NodeId>,
    postorder: Vec<NodeId>,
    parents: Vec<Option<NodeId>>,
}

impl Traversal {
    pub fn preorder(&self) -> &[NodeId] {
        &self.preorder
    }

    pub fn postorder(&self) -> &[NodeId] {
        &self.postorder
    }

    /// Parent of `node` along the walk. `None` for the root and for nodes never reached.
    pub fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.parents.get(node.0).cloned().flatten()
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Colour {
    White,
    Grey,
    Black,
}

impl GameTree {
    /// Assembles a tree from an arena prepared by an external loader. Nothing is
    /// checked here; call `validate()` or let the analyses report violations.
    pub fn from_arena(
        players: Vec<Player>,
        outcomes: Vec<Outcome>,
        infosets: Vec<Infoset>,
        nodes: Vec<Node>,
        root: Option<NodeId>,
    ) -> GameTree {
        GameTree {
            players,
            outcomes,
            infosets,
            nodes,
            root,
            images: OnceLock::new(),
        }
    }

    pub fn root(&self) -> Result<NodeId, GameError> {
        self.root.ok_or(GameError::EmptyTree)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    pub fn information_sets(&self) -> &[Infoset] {
        &self.infosets
    }

    /// Information sets owned by `player`, in definition order.
    pub fn infosets_of(&self, player: PlayerId) -> impl Iterator<Item = &Infoset> {
        self.infosets.iter().filter(move |x| x.player() == player)
    }

    /// Every outcome registered with the tree, whether or not a terminal node uses it.
    pub fn outcome_arena(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Outcomes appearing at terminal nodes, in order of first encounter during a
    /// pre-order walk from the root.
    pub fn outcomes(&self) -> Result<Vec<OutcomeId>, GameError> {
        let traversal = self.traverse()?;
        let mut seen = BTreeSet::new();
        let mut outcomes = vec![];
        for &node_id in traversal.preorder() {
            if let Some(outcome) = self.nodes[node_id.0].outcome() {
                if seen.insert(outcome) {
                    outcomes.push(outcome);
                }
            }
        }
        Ok(outcomes)
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Panics if `id` is not a node of this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Panics if `id` is not an outcome of this tree.
    pub fn outcome(&self, id: OutcomeId) -> &Outcome {
        &self.outcomes[id.0]
    }

    pub fn get_outcome(&self, id: OutcomeId) -> Option<&Outcome> {
        self.outcomes.get(id.0)
    }

    /// Panics if `id` is not an information set of this tree.
    pub fn infoset(&self, id: InfosetId) -> &Infoset {
        &self.infosets[id.0]
    }

    pub fn get_infoset(&self, id: InfosetId) -> Option<&Infoset> {
        self.infosets.get(id.0)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.0)
    }

    /// Who moves at `node`, or `None` at terminal nodes.
    pub fn actor(&self, node: NodeId) -> Option<ChanceOrPlayer> {
        match self.get_node(node)?.kind() {
            NodeKind::Terminal(_) => None,
            NodeKind::Chance(_) => Some(ChanceOrPlayer::Chance),
            NodeKind::Decision(infoset) => self
                .get_infoset(*infoset)
                .map(|x| ChanceOrPlayer::Player(x.player())),
        }
    }

    /// Depth-first walk from the root. Fails with `Cycle` when a node is met again
    /// on the current path and with `SharedSubtree` when a finished node is met
    /// again from another parent.
    pub fn traverse(&self) -> Result<Traversal, GameError> {
        let root = self.root()?;
        if self.get_node(root).is_none() {
            return Err(GameError::UnknownNode(root));
        }

        let mut colour = vec![Colour::White; self.nodes.len()];
        let mut parents = vec![None; self.nodes.len()];
        let mut preorder = Vec::with_capacity(self.nodes.len());
        let mut postorder = Vec::with_capacity(self.nodes.len());

        // Each stack entry holds a node and the index of the next child to visit.
        let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
        colour[root.0] = Colour::Grey;
        preorder.push(root);

        while let Some(top) = stack.last_mut() {
            let (node_id, next_child) = *top;
            let children = self.nodes[node_id.0].children();
            if next_child < children.len() {
                top.1 += 1;
                let child = children[next_child];
                match colour.get(child.0) {
                    None => return Err(GameError::UnknownNode(child)),
                    Some(Colour::Grey) => return Err(GameError::Cycle(child)),
                    Some(Colour::Black) => return Err(GameError::SharedSubtree(child)),
                    Some(Colour::White) => {
                        colour[child.0] = Colour::Grey;
                        parents[child.0] = Some(node_id);
                        preorder.push(child);
                        stack.push((child, 0));
                    }
                }
            } else {
                colour[node_id.0] = Colour::Black;
                postorder.push(node_id);
                stack.pop();
            }
        }

        Ok(Traversal {
            preorder,
            postorder,
            parents,
        })
    }

    /// Checks every structural invariant of the tree reachable from the root and
    /// returns the first violation found.
    pub fn validate(&self) -> Result<(), GameError> {
        let traversal = self.traverse()?;

        for outcome in self.outcomes.iter() {
            if outcome.payoffs().len() != self.players.len() {
                return Err(GameError::PayoffArity {
                    outcome: outcome.id(),
                    expected: self.players.len(),
                    found: outcome.payoffs().len(),
                });
            }
        }

        let mut reached = vec![false; self.nodes.len()];
        for &node_id in traversal.preorder() {
            reached[node_id.0] = true;
        }

        for infoset in self.infosets.iter() {
            if self.player(infoset.player()).is_none() {
                return Err(GameError::UnknownPlayer {
                    infoset: infoset.id(),
                    player: infoset.player(),
                });
            }
            for &member in infoset.members() {
                let node = match self.get_node(member) {
                    Some(node) if node.infoset() == Some(infoset.id()) => node,
                    _ => {
                        return Err(GameError::InfosetMembership {
                            infoset: infoset.id(),
                            node: member,
                        })
                    }
                };
                if node.children().is_empty() {
                    return Err(GameError::NoActions(member));
                }
                if node.num_actions() != infoset.num_actions() {
                    return Err(GameError::ActionCountMismatch {
                        infoset: infoset.id(),
                        node: member,
                        expected: infoset.num_actions(),
                        found: node.num_actions(),
                    });
                }
                // Members must hang below the root.
                if !reached[member.0] {
                    return Err(GameError::UnreachableNode(member));
                }
            }
        }

        for &node_id in traversal.preorder() {
            let node = &self.nodes[node_id.0];
            let parent = traversal.parent_of(node_id);
            if node.parent() != parent {
                return Err(GameError::ParentMismatch {
                    node: node_id,
                    recorded: node.parent(),
                    actual: parent,
                });
            }
            self.validate_node(node)?;
        }

        Ok(())
    }

    fn validate_node(&self, node: &Node) -> Result<(), GameError> {
        match node.kind() {
            NodeKind::Terminal(outcome) => {
                if self.get_outcome(*outcome).is_none() {
                    return Err(GameError::DanglingOutcome {
                        node: node.id(),
                        outcome: *outcome,
                    });
                }
                if !node.children().is_empty() {
                    return Err(GameError::ChildOfTerminal(node.id()));
                }
            }
            NodeKind::Decision(infoset_id) => {
                let infoset = self
                    .get_infoset(*infoset_id)
                    .ok_or(GameError::DanglingInfoset {
                        node: node.id(),
                        infoset: *infoset_id,
                    })?;
                if !infoset.members().contains(&node.id()) {
                    return Err(GameError::InfosetMembership {
                        infoset: *infoset_id,
                        node: node.id(),
                    });
                }
                if node.children().is_empty() {
                    return Err(GameError::NoActions(node.id()));
                }
                if node.num_actions() != infoset.num_actions() {
                    return Err(GameError::ActionCountMismatch {
                        infoset: *infoset_id,
                        node: node.id(),
                        expected: infoset.num_actions(),
                        found: node.num_actions(),
                    });
                }
            }
            NodeKind::Chance(probabilities) => {
                if node.children().is_empty() {
                    return Err(GameError::NoActions(node.id()));
                }
                if probabilities.len() != node.num_actions() {
                    return Err(GameError::ChanceArity {
                        node: node.id(),
                        probabilities: probabilities.len(),
                        children: node.num_actions(),
                    });
                }
                for (action, &probability) in probabilities.iter().enumerate() {
                    if probability < 0f64 || probability.is_nan() {
                        return Err(GameError::NegativeProbability {
                            node: node.id(),
                            action,
                            probability,
                        });
                    }
                }
                let total: f64 = probabilities.iter().sum();
                if !abs_diff_eq!(total, 1.0, epsilon = CHANCE_TOLERANCE) {
                    return Err(GameError::ChanceProbabilities {
                        node: node.id(),
                        total,
                    });
                }
            }
        }
        Ok(())
    }

    /// Node images of this tree, computed on first use and cached afterwards.
    pub fn images(&self) -> Result<&NodeImages, GameError> {
        if let Some(images) = self.images.get() {
            return Ok(images);
        }
        let images = ImageComputer::compute(self)?;
        Ok(self.images.get_or_init(|| images))
    }

    /// Set of outcomes reachable from `node`.
    pub fn image_of(&self, node: NodeId) -> Result<&BTreeSet<OutcomeId>, GameError> {
        self.images()?.image_of(node)
    }
}
