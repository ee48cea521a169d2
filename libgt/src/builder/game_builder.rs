use crate::builder::{BuildError, GameAnnotations, TreeInformation};
use crate::game_tree::{GameTreeVertex, Leaf, VertexOrLeaf};
use efg_core::game::{
    ChanceOrPlayer, GameError, GameTree, GameTreeBuilder, InfosetId, NodeId, NodeKind, PlayerId,
};
use itertools::sorted;
use log::{debug, info, trace};

/// Builder for an extensive form game. Traverses a game tree defined implicitly by a
/// `GameTreeVertex` and stores it explicitly in a `GameTree`.
pub struct ExtensiveFormGameBuilder<T: GameTreeVertex> {
    tree_builder: GameTreeBuilder,
    tree_information: TreeInformation<T>,
    num_players: usize,
}

impl<T> ExtensiveFormGameBuilder<T>
where
    T: GameTreeVertex,
{
    /// Initializes an `ExtensiveFormGameBuilder` for a game between the given players.
    /// The i-th label belongs to `PlayerId(i)`.
    pub fn new<S: AsRef<str>>(player_labels: &[S]) -> ExtensiveFormGameBuilder<T> {
        let mut tree_builder = GameTreeBuilder::new();
        for label in player_labels {
            tree_builder.add_player(label.as_ref());
        }
        ExtensiveFormGameBuilder {
            tree_builder,
            tree_information: TreeInformation::new(),
            num_players: player_labels.len(),
        }
    }

    pub fn make_game(self, initial_vertex: &T) -> Result<GameTree, BuildError> {
        self.make_game_and_annotations(initial_vertex)
            .map(|(tree, _)| tree)
    }

    /// Creates a `GameTree` by starting a traversal from `initial_vertex`.
    /// Children of a node are added in action order: player actions sorted by
    /// `GameTreeVertex::Action`, chance actions in the order the vertex lists them.
    /// Information sets are numbered in the order they are first encountered by a
    /// depth-first traversal. The returned tree has been validated.
    pub fn make_game_and_annotations(
        mut self,
        initial_vertex: &T,
    ) -> Result<(GameTree, GameAnnotations<T>), BuildError> {
        self.traverse_tree(initial_vertex)?;
        let annotations = GameAnnotations::new(&self.tree_information);
        let tree = self.tree_builder.build();
        tree.validate()?;
        info!(
            "built game tree with {} nodes, {} information sets and {} outcomes",
            tree.num_nodes(),
            tree.information_sets().len(),
            self.tree_information.num_outcomes()
        );
        Ok((tree, annotations))
    }

    /// Depth-first traversal using an explicit stack. Children are pushed in reverse
    /// so that they are popped, and hence attached to their parent, in action order.
    fn traverse_tree(&mut self, initial_vertex: &T) -> Result<(), BuildError> {
        let mut vertex_stack = Vec::<(VertexOrLeaf<T>, Option<NodeId>)>::new();
        vertex_stack.push((VertexOrLeaf::Vertex(initial_vertex.clone()), None));

        while let Some((vertex_or_leaf, parent)) = vertex_stack.pop() {
            match vertex_or_leaf {
                VertexOrLeaf::Leaf(leaf) => self.handle_leaf(&leaf, parent)?,
                VertexOrLeaf::Vertex(vertex) => {
                    vertex.validate();
                    match vertex.next_player() {
                        ChanceOrPlayer::Chance => {
                            self.handle_chance(&vertex, parent, &mut vertex_stack)?
                        }
                        ChanceOrPlayer::Player(player) => {
                            self.handle_player(player, &vertex, parent, &mut vertex_stack)?
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn attach(&mut self, parent: Option<NodeId>, kind: NodeKind) -> Result<NodeId, GameError> {
        match parent {
            None => self.tree_builder.add_root(kind),
            Some(parent) => self.tree_builder.add_child(parent, kind),
        }
    }

    /// Leaves with bitwise identical payoffs share one outcome.
    fn handle_leaf(&mut self, leaf: &Leaf, parent: Option<NodeId>) -> Result<(), BuildError> {
        let outcome = match self.tree_information.get_outcome(&leaf.payoffs) {
            Some(outcome) => outcome,
            None => {
                let label = format!("z{}", self.tree_information.num_outcomes() + 1);
                let outcome = self.tree_builder.add_outcome(label, leaf.payoffs.clone());
                self.tree_information.insert_outcome(&leaf.payoffs, outcome);
                outcome
            }
        };
        let node = self.attach(parent, NodeKind::Terminal(outcome))?;
        trace!("leaf {} reaches outcome {}", node, outcome);
        Ok(())
    }

    /// Probabilities are copied as given; their validity is checked once the whole
    /// tree is built.
    fn handle_chance(
        &mut self,
        vertex: &T,
        parent: Option<NodeId>,
        vertex_stack: &mut Vec<(VertexOrLeaf<T>, Option<NodeId>)>,
    ) -> Result<(), BuildError> {
        let actions_and_probs = vertex.available_actions();
        let probabilities = actions_and_probs
            .iter()
            .map(|p: &(T::Action, f64)| p.1)
            .collect::<Vec<_>>();
        let node = self.attach(parent, NodeKind::Chance(probabilities))?;

        for (action, _) in actions_and_probs.iter().rev() {
            vertex_stack.push((vertex.next_state(action), Some(node)));
        }
        Ok(())
    }

    fn handle_player(
        &mut self,
        player: PlayerId,
        vertex: &T,
        parent: Option<NodeId>,
        vertex_stack: &mut Vec<(VertexOrLeaf<T>, Option<NodeId>)>,
    ) -> Result<(), BuildError> {
        if player.index() >= self.num_players {
            return Err(BuildError::UnknownPlayer(player, self.num_players));
        }
        let cur_infoset = vertex.player_information();
        let actions_list: Vec<T::Action> = sorted(
            vertex
                .available_actions()
                .iter()
                .map(|p: &(T::Action, f64)| p.0.clone()),
        )
        .collect();

        let infoset = self.update_tree_information(player, cur_infoset, &actions_list)?;
        let node = self.attach(parent, NodeKind::Decision(infoset))?;

        for action in actions_list.iter().rev() {
            vertex_stack.push((vertex.next_state(action), Some(node)));
        }
        Ok(())
    }

    /// Returns the information set of `cur_infoset`, creating it if this is the first
    /// time it is encountered. Every vertex of an information set must offer the same
    /// actions.
    fn update_tree_information(
        &mut self,
        player: PlayerId,
        cur_infoset: T::PlayerInfo,
        actions_list: &[T::Action],
    ) -> Result<InfosetId, BuildError> {
        if let Some(infoset) = self.tree_information.get_infoset_id(player, &cur_infoset) {
            let expected = self.tree_information.infoset_actions(infoset);
            if expected != actions_list {
                return Err(BuildError::InconsistentActions {
                    infoset: format!("{:?}", cur_infoset),
                    expected: format!("{:?}", expected),
                    found: format!("{:?}", actions_list),
                });
            }
            return Ok(infoset);
        }

        let labels = actions_list
            .iter()
            .map(|action| format!("{:?}", action))
            .collect::<Vec<_>>();
        let infoset = self
            .tree_builder
            .add_infoset(player, format!("{:?}", cur_infoset), &labels)?;
        debug!(
            "new information set {} of {} with actions {:?}",
            infoset, player, labels
        );
        self.tree_information
            .insert_infoset(player, cur_infoset, infoset, actions_list.to_vec());
        Ok(infoset)
    }
}
