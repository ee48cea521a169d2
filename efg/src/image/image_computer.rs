use crate::game::{GameError, GameTree, NodeId, NodeKind, OutcomeId};

use log::debug;
use std::collections::BTreeSet;

/// Image of every node reachable from the root of a tree: the set of distinct
/// outcomes that some continuation from that node ends in. Chance and opponent
/// branching are treated alike, every action edge is a possible continuation.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeImages {
    // Indexed by `NodeId`. `None` for arena nodes that hang below no path from the root.
    images: Vec<Option<BTreeSet<OutcomeId>>>,
}

impl NodeImages {
    pub fn image_of(&self, node: NodeId) -> Result<&BTreeSet<OutcomeId>, GameError> {
        match self.images.get(node.0) {
            None => Err(GameError::UnknownNode(node)),
            Some(None) => Err(GameError::UnreachableNode(node)),
            Some(Some(image)) => Ok(image),
        }
    }

    /// Number of nodes with a computed image.
    pub fn len(&self) -> usize {
        self.images.iter().filter(|x| x.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct ImageComputer;

impl ImageComputer {
    /// Computes all node images with a single bottom-up pass. The walk fails on
    /// cycles and shared subtrees instead of looping, and on terminal nodes whose
    /// outcome is not registered with the tree.
    pub fn compute(tree: &GameTree) -> Result<NodeImages, GameError> {
        let traversal = tree.traverse()?;
        let mut images: Vec<Option<BTreeSet<OutcomeId>>> = vec![None; tree.num_nodes()];

        for &node_id in traversal.postorder() {
            let node = tree.node(node_id);
            let image = match node.kind() {
                NodeKind::Terminal(outcome) => {
                    if tree.get_outcome(*outcome).is_none() {
                        return Err(GameError::DanglingOutcome {
                            node: node_id,
                            outcome: *outcome,
                        });
                    }
                    let mut image = BTreeSet::new();
                    image.insert(*outcome);
                    image
                }
                NodeKind::Decision(_) | NodeKind::Chance(_) => {
                    // Children come before their parent in post-order, so their images exist.
                    let mut image = BTreeSet::new();
                    for child in node.children() {
                        if let Some(child_image) = &images[child.0] {
                            image.extend(child_image.iter().cloned());
                        }
                    }
                    image
                }
            };
            images[node_id.0] = Some(image);
        }

        debug!(
            "computed images of {} nodes ({} in arena)",
            traversal.postorder().len(),
            tree.num_nodes()
        );

        Ok(NodeImages { images })
    }
}
