use crate::game::{
    GameError, GameTree, Infoset, InfosetId, Node, NodeId, NodeKind, Outcome, OutcomeId, Player,
    PlayerId,
};

/// Programmatic loader for a `GameTree`. Nodes are attached top-down: the order in
/// which children are added to a node defines their action positions.
///
/// The builder only rejects references it cannot resolve (unknown players, outcomes,
/// information sets or parents). Everything else, such as probabilities or action
/// counts, is checked by `GameTree::validate()`.
#[derive(Debug, Default)]
pub struct GameTreeBuilder {
    players: Vec<Player>,
    outcomes: Vec<Outcome>,
    infosets: Vec<Infoset>,
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl GameTreeBuilder {
    pub fn new() -> GameTreeBuilder {
        GameTreeBuilder::default()
    }

    pub fn add_player(&mut self, label: impl Into<String>) -> PlayerId {
        let id = PlayerId(self.players.len());
        self.players.push(Player::new(id, label));
        id
    }

    pub fn add_outcome(&mut self, label: impl Into<String>, payoffs: Vec<f64>) -> OutcomeId {
        let id = OutcomeId(self.outcomes.len());
        self.outcomes.push(Outcome::new(id, label, payoffs));
        id
    }

    pub fn add_infoset<S: AsRef<str>>(
        &mut self,
        player: PlayerId,
        label: impl Into<String>,
        actions: &[S],
    ) -> Result<InfosetId, GameError> {
        let id = InfosetId(self.infosets.len());
        if player.index() >= self.players.len() {
            return Err(GameError::UnknownPlayer {
                infoset: id,
                player,
            });
        }
        let actions = actions.iter().map(|x| x.as_ref().to_string()).collect();
        self.infosets
            .push(Infoset::new(id, player, label, actions, vec![]));
        Ok(id)
    }

    pub fn add_root(&mut self, kind: NodeKind) -> Result<NodeId, GameError> {
        if let Some(root) = self.root {
            return Err(GameError::RootAlreadySet(root));
        }
        let root = self.push_node(None, kind)?;
        self.root = Some(root);
        Ok(root)
    }

    /// Attaches a new node as the next action of `parent`.
    pub fn add_child(&mut self, parent: NodeId, kind: NodeKind) -> Result<NodeId, GameError> {
        match self.nodes.get(parent.0) {
            None => return Err(GameError::UnknownNode(parent)),
            Some(node) if node.is_terminal() => return Err(GameError::ChildOfTerminal(parent)),
            Some(_) => {}
        }
        let child = self.push_node(Some(parent), kind)?;
        self.nodes[parent.0].push_child(child);
        Ok(child)
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn build(self) -> GameTree {
        GameTree::from_arena(
            self.players,
            self.outcomes,
            self.infosets,
            self.nodes,
            self.root,
        )
    }

    fn push_node(&mut self, parent: Option<NodeId>, kind: NodeKind) -> Result<NodeId, GameError> {
        let id = NodeId(self.nodes.len());
        match &kind {
            NodeKind::Terminal(outcome) => {
                if outcome.0 >= self.outcomes.len() {
                    return Err(GameError::DanglingOutcome {
                        node: id,
                        outcome: *outcome,
                    });
                }
            }
            NodeKind::Decision(infoset) => match self.infosets.get_mut(infoset.0) {
                Some(x) => x.push_member(id),
                None => {
                    return Err(GameError::DanglingInfoset {
                        node: id,
                        infoset: *infoset,
                    })
                }
            },
            NodeKind::Chance(_) => {}
        }
        self.nodes.push(Node::new(id, parent, kind, vec![]));
        Ok(id)
    }
}
