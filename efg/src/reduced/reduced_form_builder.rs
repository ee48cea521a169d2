use crate::game::{
    GameError, GameTree, Infoset, InfosetId, NodeId, NodeKind, OutcomeId, PlayerId,
    CHANCE_TOLERANCE,
};
use crate::image::NodeImages;
use crate::reduced::strategic_form::profiles;
use crate::reduced::{ActionPartition, PayoffTable, ReducedStrategy, StrategicForm, UnionFind};

use log::{debug, info, trace};
use std::collections::{BTreeMap, BTreeSet};

/// Largest number of assignments to the information sets below two actions that is
/// enumerated when deciding whether the actions are interchangeable. Beyond it, the
/// actions are merged only if their subtrees have the same shape.
pub const MAX_ENUMERATED_ASSIGNMENTS: usize = 4096;

/// Builds the reduced strategic form of a validated game tree.
///
/// Actions of an information set are merged when choosing one or the other can never
/// change the outcome: at every member node the two children must reach the same set
/// of outcomes (same image), and for every assignment of actions to the information
/// sets below them the two children must reach each outcome with the same
/// probability. Two actions left unmerged therefore differ for some such assignment.
///
/// Information sets, actions and players are always visited in definition order, so
/// building twice from the same tree gives identical results.
pub struct ReducedFormBuilder<'a> {
    tree: &'a GameTree,
    images: &'a NodeImages,
    // Indexed by `InfosetId`.
    partitions: Vec<ActionPartition>,
}

/// Reduced strategic form of `tree`.
pub fn build_strategic_form(tree: &GameTree) -> Result<StrategicForm, GameError> {
    ReducedFormBuilder::new(tree)?.build()
}

impl<'a> ReducedFormBuilder<'a> {
    /// Validates `tree`, computes (or reuses) its node images and partitions the
    /// actions of every information set.
    pub fn new(tree: &'a GameTree) -> Result<ReducedFormBuilder<'a>, GameError> {
        tree.validate()?;
        let images = tree.images()?;
        let partitions = tree
            .information_sets()
            .iter()
            .map(|infoset| Self::partition_actions(tree, images, infoset))
            .collect::<Result<Vec<_>, _>>()?;

        for (infoset, partition) in tree.information_sets().iter().zip(partitions.iter()) {
            if partition.num_classes() < partition.num_actions() {
                debug!(
                    "information set {} ({}): {} actions reduced to {} classes",
                    infoset.id(),
                    infoset.label(),
                    partition.num_actions(),
                    partition.num_classes()
                );
            }
        }

        Ok(ReducedFormBuilder {
            tree,
            images,
            partitions,
        })
    }

    pub fn images(&self) -> &NodeImages {
        self.images
    }

    /// Panics if `infoset` is not part of the tree.
    pub fn partition(&self, infoset: InfosetId) -> &ActionPartition {
        &self.partitions[infoset.0]
    }

    pub fn build(&self) -> Result<StrategicForm, GameError> {
        let players = self.tree.players().to_vec();
        let mut strategies = Vec::with_capacity(players.len());
        for player in players.iter() {
            strategies.push(self.reduced_strategies(player.id())?);
        }

        let shape: Vec<usize> = strategies.iter().map(Vec::len).collect();
        let mut entries = Vec::with_capacity(shape.iter().product::<usize>() * shape.len());
        for profile in profiles(&shape) {
            let chosen: Vec<&ReducedStrategy> = profile
                .iter()
                .enumerate()
                .map(|(player, &strategy)| &strategies[player][strategy])
                .collect();
            entries.extend(self.expected_payoffs(&chosen)?);
        }

        info!(
            "reduced strategic form: {:?} strategies per player, {} profiles",
            shape,
            shape.iter().product::<usize>()
        );

        Ok(StrategicForm::new(
            players,
            strategies,
            PayoffTable::from_entries(shape, entries),
        ))
    }

    /// Reduced pure strategies of `player`, in the order in which a depth-first walk
    /// meets the player's information sets (earliest set varies slowest).
    pub fn reduced_strategies(&self, player: PlayerId) -> Result<Vec<ReducedStrategy>, GameError> {
        let root = self.tree.root()?;
        let mut assignments = vec![];
        self.expand(
            player,
            vec![root],
            vec![None; self.tree.information_sets().len()],
            &mut assignments,
        );
        trace!("player {} has {} reduced strategies", player, assignments.len());

        let own_infosets: Vec<InfosetId> =
            self.tree.infosets_of(player).map(Infoset::id).collect();
        Ok(assignments
            .into_iter()
            .map(|actions| {
                let label = own_infosets
                    .iter()
                    .map(|infoset| match actions[infoset.0] {
                        Some(action) => (action + 1).to_string(),
                        None => String::from("*"),
                    })
                    .collect::<String>();
                ReducedStrategy::new(player, label, actions)
            })
            .collect())
    }

    fn partition_actions(
        tree: &GameTree,
        images: &NodeImages,
        infoset: &Infoset,
    ) -> Result<ActionPartition, GameError> {
        let num_actions = infoset.num_actions();

        // Children of every member node, in action order.
        let mut children = Vec::with_capacity(infoset.members().len());
        for &member in infoset.members() {
            let node = tree
                .get_node(member)
                .ok_or(GameError::UnknownNode(member))?;
            let row = (0..num_actions)
                .map(|action| node.child(action))
                .collect::<Option<Vec<_>>>()
                .ok_or(GameError::ActionCountMismatch {
                    infoset: infoset.id(),
                    node: member,
                    expected: num_actions,
                    found: node.num_actions(),
                })?;
            children.push(row);
        }

        let mut union_find = UnionFind::new(num_actions);
        for a in 0..num_actions {
            for b in (a + 1)..num_actions {
                if union_find.find(a) == union_find.find(b) {
                    continue;
                }
                let same_images = children.iter().all(|row| {
                    match (images.image_of(row[a]), images.image_of(row[b])) {
                        (Ok(image_a), Ok(image_b)) => image_a == image_b,
                        _ => false,
                    }
                });
                let interchangeable = same_images
                    && Self::interchangeable(tree, images, infoset.id(), &children, a, b);
                if interchangeable {
                    union_find.union(a, b);
                }
            }
        }
        Ok(ActionPartition::from_union_find(&mut union_find))
    }

    /// Whether playing `b` instead of `a` at `infoset` leaves the distribution over
    /// outcomes unchanged below every member node, whatever the other information sets
    /// play. Decided by enumerating the assignments to the information sets below the
    /// two actions when there are at most `MAX_ENUMERATED_ASSIGNMENTS` of them, and by
    /// comparing the shape of the subtrees otherwise.
    fn interchangeable(
        tree: &GameTree,
        images: &NodeImages,
        infoset: InfosetId,
        children: &[Vec<NodeId>],
        a: usize,
        b: usize,
    ) -> bool {
        let roots: Vec<NodeId> = children.iter().flat_map(|row| vec![row[a], row[b]]).collect();
        let below = Self::infosets_below(tree, infoset, &roots);
        let shape: Vec<usize> = below
            .iter()
            .map(|&h| tree.infoset(h).num_actions())
            .collect();
        let num_assignments = shape
            .iter()
            .try_fold(1usize, |total, &n| total.checked_mul(n));

        match num_assignments {
            Some(n) if n <= MAX_ENUMERATED_ASSIGNMENTS => {
                let mut choices = vec![0; tree.information_sets().len()];
                for assignment in profiles(&shape) {
                    for (&h, &action) in below.iter().zip(assignment.iter()) {
                        choices[h.0] = action;
                    }
                    for row in children {
                        choices[infoset.0] = a;
                        let with_a = Self::outcome_distribution(tree, row[a], &choices);
                        choices[infoset.0] = b;
                        let with_b = Self::outcome_distribution(tree, row[b], &choices);
                        if !Self::same_distribution(&with_a, &with_b) {
                            return false;
                        }
                    }
                }
                true
            }
            _ => {
                trace!(
                    "information set {}: comparing subtree shapes of actions {} and {}",
                    infoset,
                    a,
                    b
                );
                children
                    .iter()
                    .all(|row| Self::congruent(tree, images, infoset, row[a], row[b]))
            }
        }
    }

    /// Information sets other than `excluded` with a member below one of `roots`.
    fn infosets_below(tree: &GameTree, excluded: InfosetId, roots: &[NodeId]) -> Vec<InfosetId> {
        let mut infosets = BTreeSet::new();
        let mut stack = roots.to_vec();
        while let Some(node_id) = stack.pop() {
            let node = tree.node(node_id);
            if let NodeKind::Decision(infoset) = node.kind() {
                if *infoset != excluded {
                    infosets.insert(*infoset);
                }
            }
            stack.extend(node.children().iter().cloned());
        }
        infosets.into_iter().collect()
    }

    /// Probability of reaching each outcome from `node` when every information set `h`
    /// plays `choices[h]`.
    fn outcome_distribution(
        tree: &GameTree,
        node: NodeId,
        choices: &[usize],
    ) -> BTreeMap<OutcomeId, f64> {
        let mut distribution = BTreeMap::new();
        let mut stack = vec![(node, 1f64)];
        while let Some((node_id, weight)) = stack.pop() {
            let node = tree.node(node_id);
            match node.kind() {
                NodeKind::Terminal(outcome) => {
                    *distribution.entry(*outcome).or_insert(0f64) += weight;
                }
                NodeKind::Chance(probabilities) => {
                    for (&child, probability) in node.children().iter().zip(probabilities) {
                        stack.push((child, weight * probability));
                    }
                }
                NodeKind::Decision(infoset) => {
                    stack.push((node.children()[choices[infoset.0]], weight));
                }
            }
        }
        distribution
    }

    fn same_distribution(x: &BTreeMap<OutcomeId, f64>, y: &BTreeMap<OutcomeId, f64>) -> bool {
        x.keys().chain(y.keys()).all(|outcome| {
            let p = x.get(outcome).cloned().unwrap_or(0f64);
            let q = y.get(outcome).cloned().unwrap_or(0f64);
            abs_diff_eq!(p, q, epsilon = CHANCE_TOLERANCE)
        })
    }

    /// Whether `x` and `y` have the same image and either that image is a single
    /// outcome, or both are moves of the same information set (other than `excluded`)
    /// or chance moves with the same probabilities, with pairwise congruent children.
    fn congruent(
        tree: &GameTree,
        images: &NodeImages,
        excluded: InfosetId,
        x: NodeId,
        y: NodeId,
    ) -> bool {
        let same_image = match (images.image_of(x), images.image_of(y)) {
            (Ok(image_x), Ok(image_y)) => {
                if image_x != image_y {
                    return false;
                }
                image_x.len()
            }
            _ => return false,
        };
        if same_image == 1 {
            return true;
        }

        let (node_x, node_y) = (tree.node(x), tree.node(y));
        let same_move = match (node_x.kind(), node_y.kind()) {
            (NodeKind::Decision(infoset_x), NodeKind::Decision(infoset_y)) => {
                infoset_x == infoset_y && *infoset_x != excluded
            }
            (NodeKind::Chance(probabilities_x), NodeKind::Chance(probabilities_y)) => {
                probabilities_x.len() == probabilities_y.len()
                    && probabilities_x
                        .iter()
                        .zip(probabilities_y.iter())
                        .all(|(p, q)| abs_diff_eq!(*p, *q, epsilon = CHANCE_TOLERANCE))
            }
            _ => false,
        };

        same_move
            && node_x.num_actions() == node_y.num_actions()
            && node_x
                .children()
                .iter()
                .zip(node_y.children().iter())
                .all(|(&child_x, &child_y)| {
                    Self::congruent(tree, images, excluded, child_x, child_y)
                })
    }

    /// Depth-first enumeration of the player's reduced strategies. `frontier` holds the
    /// nodes still to be explored under the partial assignment `actions`; opponents'
    /// and chance moves are expanded in full, the player's own moves follow the
    /// assignment or branch over the action classes of a not yet assigned set.
    fn expand(
        &self,
        player: PlayerId,
        mut frontier: Vec<NodeId>,
        actions: Vec<Option<usize>>,
        assignments: &mut Vec<Vec<Option<usize>>>,
    ) {
        while let Some(node_id) = frontier.pop() {
            let node = self.tree.node(node_id);
            let infoset_id = match node.kind() {
                NodeKind::Terminal(_) => continue,
                NodeKind::Chance(_) => {
                    frontier.extend(node.children().iter().rev());
                    continue;
                }
                NodeKind::Decision(infoset_id) => *infoset_id,
            };

            if self.tree.infoset(infoset_id).player() != player {
                frontier.extend(node.children().iter().rev());
                continue;
            }

            match actions[infoset_id.0] {
                Some(action) => frontier.push(node.children()[action]),
                None => {
                    let partition = &self.partitions[infoset_id.0];
                    for class in 0..partition.num_classes() {
                        let action = partition.representative(class);
                        let mut branch_frontier = frontier.clone();
                        branch_frontier.push(node.children()[action]);
                        let mut branch_actions = actions.clone();
                        branch_actions[infoset_id.0] = Some(action);
                        self.expand(player, branch_frontier, branch_actions, assignments);
                    }
                    return;
                }
            }
        }
        assignments.push(actions);
    }

    /// Expected payoff vector of a full profile (one strategy per player), with chance
    /// moves weighted by their probabilities.
    fn expected_payoffs(&self, profile: &[&ReducedStrategy]) -> Result<Vec<f64>, GameError> {
        let mut payoffs = vec![0f64; self.tree.num_players()];
        let mut stack = vec![(self.tree.root()?, 1f64)];

        while let Some((node_id, weight)) = stack.pop() {
            let node = self.tree.node(node_id);
            match node.kind() {
                NodeKind::Terminal(outcome) => {
                    let outcome = self.tree.outcome(*outcome);
                    for (total, payoff) in payoffs.iter_mut().zip(outcome.payoffs()) {
                        *total += weight * payoff;
                    }
                }
                NodeKind::Chance(probabilities) => {
                    for (&child, probability) in node.children().iter().zip(probabilities) {
                        stack.push((child, weight * probability));
                    }
                }
                NodeKind::Decision(infoset_id) => {
                    let owner = self.tree.infoset(*infoset_id).player();
                    let action = profile[owner.index()]
                        .action_at(*infoset_id)
                        .ok_or(GameError::UnresolvedInfoset(*infoset_id))?;
                    stack.push((node.children()[action], weight));
                }
            }
        }

        Ok(payoffs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_fixtures::CENTIPEDE;
    use crate::game::{GameTreeBuilder, Node, Outcome, OutcomeId, Player};
    use assert_approx_eq::assert_approx_eq;

    fn init() {
        let _ = env_logger::try_init();
    }

    fn labels(form: &StrategicForm, player: PlayerId) -> Vec<&str> {
        form.strategies(player).iter().map(ReducedStrategy::label).collect()
    }

    /// pl1 picks left or right at the root, pl2 moves without observing it.
    /// `outcomes[i][j]` is reached by pl1 action i and pl2 action j.
    fn simultaneous(outcomes: [[usize; 2]; 2]) -> GameTree {
        let mut builder = GameTreeBuilder::new();
        let pl1 = builder.add_player("Alice");
        let pl2 = builder.add_player("Bob");
        let z = [
            builder.add_outcome("z1", vec![1.0, -1.0]),
            builder.add_outcome("z2", vec![-1.0, 1.0]),
            builder.add_outcome("z3", vec![2.0, 0.0]),
            builder.add_outcome("z4", vec![0.0, 3.0]),
        ];
        let h1 = builder.add_infoset(pl1, "h1", &["L", "R"]).unwrap();
        let h2 = builder.add_infoset(pl2, "h2", &["l", "r"]).unwrap();
        let root = builder.add_root(NodeKind::Decision(h1)).unwrap();
        for row in outcomes.iter() {
            let node = builder.add_child(root, NodeKind::Decision(h2)).unwrap();
            for &outcome in row.iter() {
                builder.add_child(node, NodeKind::Terminal(z[outcome])).unwrap();
            }
        }
        builder.build()
    }

    #[test]
    fn irrelevant_action_is_merged() {
        init();
        // Whatever pl1 does, pl2's choice does not matter.
        let tree = simultaneous([[0, 0], [2, 2]]);
        let builder = ReducedFormBuilder::new(&tree).unwrap();
        assert_eq!(builder.partition(InfosetId(1)).num_classes(), 1);
        assert_eq!(builder.partition(InfosetId(0)).num_classes(), 2);

        let form = builder.build().unwrap();
        assert_eq!(form.num_strategies(), &[2, 1]);
        assert_eq!(labels(&form, PlayerId(1)), vec!["1"]);
        assert_eq!(form.payoff(&[1, 0]), Some(&[2.0, 0.0][..]));
    }

    #[test]
    fn relevant_actions_are_kept() {
        // pl2's choice only matters after R, which is enough to keep both actions.
        let tree = simultaneous([[0, 0], [2, 3]]);
        let form = build_strategic_form(&tree).unwrap();
        assert_eq!(form.num_strategies(), &[2, 2]);
        assert_eq!(form.payoff(&[0, 1]), Some(&[1.0, -1.0][..]));
        assert_eq!(form.payoff(&[1, 1]), Some(&[0.0, 3.0][..]));
        assert!(!form.is_zero_sum());
    }

    #[test]
    fn centipede() {
        let c = &*CENTIPEDE;
        let form = build_strategic_form(&c.tree).unwrap();

        // Taking at the first node leaves the third information set unconstrained.
        assert_eq!(labels(&form, PlayerId(0)), vec!["1*", "21", "22"]);
        assert_eq!(labels(&form, PlayerId(1)), vec!["1", "2"]);
        assert_eq!(form.strategies(PlayerId(0))[0].action_at(c.h3), None);
        assert_eq!(form.strategies(PlayerId(0))[2].action_at(c.h3), Some(1));
        assert_eq!(form.strategies(PlayerId(0))[2].action_at(c.h2), None);
        assert_eq!(
            form.strategies(PlayerId(0))[1].constrained_infosets().collect::<Vec<_>>(),
            vec![c.h1, c.h3]
        );

        let expected = [
            ([0, 0], [1.0, 0.0]),
            ([0, 1], [1.0, 0.0]),
            ([1, 0], [0.0, 2.0]),
            ([1, 1], [3.0, 1.0]),
            ([2, 0], [0.0, 2.0]),
            ([2, 1], [2.0, 4.0]),
        ];
        for (profile, payoffs) in expected.iter() {
            assert_eq!(form.payoff(profile), Some(&payoffs[..]));
        }
    }

    #[test]
    fn chance_expectation() {
        // Chance picks a state with probability 1/4 and 3/4, pl1 cannot observe it.
        let mut builder = GameTreeBuilder::new();
        let pl1 = builder.add_player("Alice");
        let win = builder.add_outcome("win", vec![4.0]);
        let lose = builder.add_outcome("lose", vec![-4.0]);
        let h = builder.add_infoset(pl1, "h", &["a", "b"]).unwrap();
        let root = builder.add_root(NodeKind::Chance(vec![0.25, 0.75])).unwrap();
        let first = builder.add_child(root, NodeKind::Decision(h)).unwrap();
        let second = builder.add_child(root, NodeKind::Decision(h)).unwrap();
        builder.add_child(first, NodeKind::Terminal(win)).unwrap();
        builder.add_child(first, NodeKind::Terminal(lose)).unwrap();
        builder.add_child(second, NodeKind::Terminal(lose)).unwrap();
        builder.add_child(second, NodeKind::Terminal(win)).unwrap();
        let tree = builder.build();

        let form = build_strategic_form(&tree).unwrap();
        assert_eq!(form.num_strategies(), &[2]);
        assert_approx_eq!(form.payoff(&[0]).unwrap()[0], -2.0);
        assert_approx_eq!(form.payoff(&[1]).unwrap()[0], 2.0);
    }

    #[test]
    fn same_image_different_outcomes_are_not_merged() {
        // Both pl1 actions reach {z1, z2}, but pl2 decides which one in opposite ways.
        let mut builder = GameTreeBuilder::new();
        let pl1 = builder.add_player("Alice");
        let pl2 = builder.add_player("Bob");
        let z1 = builder.add_outcome("z1", vec![1.0, 0.0]);
        let z2 = builder.add_outcome("z2", vec![0.0, 1.0]);
        let h1 = builder.add_infoset(pl1, "h1", &["L", "R"]).unwrap();
        let h2 = builder.add_infoset(pl2, "h2", &["l", "r"]).unwrap();
        let root = builder.add_root(NodeKind::Decision(h1)).unwrap();
        let left = builder.add_child(root, NodeKind::Decision(h2)).unwrap();
        let right = builder.add_child(root, NodeKind::Decision(h2)).unwrap();
        builder.add_child(left, NodeKind::Terminal(z1)).unwrap();
        builder.add_child(left, NodeKind::Terminal(z2)).unwrap();
        builder.add_child(right, NodeKind::Terminal(z2)).unwrap();
        builder.add_child(right, NodeKind::Terminal(z1)).unwrap();
        let tree = builder.build();

        assert_eq!(tree.image_of(left), tree.image_of(right));
        let form = build_strategic_form(&tree).unwrap();
        assert_eq!(form.num_strategies(), &[2, 2]);
        assert!(!form.is_zero_sum());
    }

    #[test]
    fn congruent_subtrees_are_merged() {
        // Both pl1 actions lead into the same pl2 information set with the same
        // continuation, so pl1's choice is irrelevant.
        let mut builder = GameTreeBuilder::new();
        let pl1 = builder.add_player("Alice");
        let pl2 = builder.add_player("Bob");
        let z1 = builder.add_outcome("z1", vec![1.0, -1.0]);
        let z2 = builder.add_outcome("z2", vec![-1.0, 1.0]);
        let h1 = builder.add_infoset(pl1, "h1", &["L", "R"]).unwrap();
        let h2 = builder.add_infoset(pl2, "h2", &["l", "r"]).unwrap();
        let root = builder.add_root(NodeKind::Decision(h1)).unwrap();
        for _ in 0..2 {
            let node = builder.add_child(root, NodeKind::Decision(h2)).unwrap();
            builder.add_child(node, NodeKind::Terminal(z1)).unwrap();
            builder.add_child(node, NodeKind::Terminal(z2)).unwrap();
        }
        let tree = builder.build();

        let form = build_strategic_form(&tree).unwrap();
        assert_eq!(form.num_strategies(), &[1, 2]);
        assert!(form.is_zero_sum());
    }

    #[test]
    fn minimality() {
        let c = &*CENTIPEDE;
        let form = build_strategic_form(&c.tree).unwrap();
        for (player, &num_strategies) in form.num_strategies().iter().enumerate() {
            for s in 0..num_strategies {
                for t in (s + 1)..num_strategies {
                    let differs = form.profiles().filter(|x| x[player] == s).any(|profile| {
                        let mut other = profile.clone();
                        other[player] = t;
                        form.payoff(&profile) != form.payoff(&other)
                    });
                    assert!(differs, "strategies {} and {} of player {}", s, t, player);
                }
            }
        }
    }

    #[test]
    fn idempotent() {
        let c = &*CENTIPEDE;
        let first = build_strategic_form(&c.tree).unwrap();
        let second = build_strategic_form(&c.tree).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn single_terminal() {
        let mut builder = GameTreeBuilder::new();
        builder.add_player("Alice");
        builder.add_player("Bob");
        let z = builder.add_outcome("z", vec![5.0, -5.0]);
        builder.add_root(NodeKind::Terminal(z)).unwrap();
        let tree = builder.build();

        let form = build_strategic_form(&tree).unwrap();
        assert_eq!(form.num_strategies(), &[1, 1]);
        assert_eq!(form.strategy_label(PlayerId(0), 0), Some(""));
        assert_eq!(form.payoff(&[0, 0]), Some(&[5.0, -5.0][..]));
        assert!(form.is_zero_sum());
    }

    #[test]
    fn structural_errors() {
        let mut builder = GameTreeBuilder::new();
        builder.add_player("Alice");
        let z = builder.add_outcome("z", vec![0.0]);
        let root = builder.add_root(NodeKind::Chance(vec![0.5, 0.4])).unwrap();
        builder.add_child(root, NodeKind::Terminal(z)).unwrap();
        builder.add_child(root, NodeKind::Terminal(z)).unwrap();
        let tree = builder.build();
        match build_strategic_form(&tree) {
            Err(e @ GameError::ChanceProbabilities { .. }) => assert!(e.is_structural()),
            other => panic!("unexpected {:?}", other),
        }

        let empty = GameTreeBuilder::new().build();
        assert_eq!(build_strategic_form(&empty), Err(GameError::EmptyTree));

        let mut builder = GameTreeBuilder::new();
        let pl1 = builder.add_player("Alice");
        let h = builder.add_infoset(pl1, "h", &["a", "b"]).unwrap();
        let root = builder.add_root(NodeKind::Decision(h)).unwrap();
        builder.add_child(root, NodeKind::Terminal(OutcomeId(0))).unwrap_err();
        let tree = builder.build();
        assert_eq!(build_strategic_form(&tree), Err(GameError::NoActions(root)));
    }

    #[test]
    fn members_outside_the_tree() {
        // h lists the root and node #3, which hangs below nothing and has no actions.
        let tree = GameTree::from_arena(
            vec![Player::new(PlayerId(0), "Alice")],
            vec![Outcome::new(OutcomeId(0), "z1", vec![1.0])],
            vec![Infoset::new(
                InfosetId(0),
                PlayerId(0),
                "h",
                vec!["a".to_string(), "b".to_string()],
                vec![NodeId(0), NodeId(3)],
            )],
            vec![
                Node::new(
                    NodeId(0),
                    None,
                    NodeKind::Decision(InfosetId(0)),
                    vec![NodeId(1), NodeId(2)],
                ),
                Node::new(NodeId(1), Some(NodeId(0)), NodeKind::Terminal(OutcomeId(0)), vec![]),
                Node::new(NodeId(2), Some(NodeId(0)), NodeKind::Terminal(OutcomeId(0)), vec![]),
                Node::new(NodeId(3), None, NodeKind::Decision(InfosetId(0)), vec![]),
            ],
            Some(NodeId(0)),
        );
        let error = build_strategic_form(&tree).unwrap_err();
        assert_eq!(error, GameError::NoActions(NodeId(3)));
        assert!(error.is_structural());
    }

    #[test]
    fn transposed_moves_are_merged() {
        // Below L, pl2 moves before pl3; below R, pl3 moves before pl2. Each
        // (pl2, pl3) assignment reaches the same outcome either way.
        let mut builder = GameTreeBuilder::new();
        let pl1 = builder.add_player("Alice");
        let pl2 = builder.add_player("Bob");
        let pl3 = builder.add_player("Carol");
        let z: Vec<OutcomeId> = (0..4)
            .map(|i| builder.add_outcome(format!("z{}", i + 1), vec![i as f64, 0.0, 0.0]))
            .collect();
        let h1 = builder.add_infoset(pl1, "h1", &["L", "R"]).unwrap();
        let h2 = builder.add_infoset(pl2, "h2", &["l", "r"]).unwrap();
        let h3 = builder.add_infoset(pl3, "h3", &["u", "d"]).unwrap();
        let root = builder.add_root(NodeKind::Decision(h1)).unwrap();

        let left = builder.add_child(root, NodeKind::Decision(h2)).unwrap();
        for i in 0..2 {
            let node = builder.add_child(left, NodeKind::Decision(h3)).unwrap();
            for j in 0..2 {
                builder.add_child(node, NodeKind::Terminal(z[2 * i + j])).unwrap();
            }
        }
        let right = builder.add_child(root, NodeKind::Decision(h3)).unwrap();
        for j in 0..2 {
            let node = builder.add_child(right, NodeKind::Decision(h2)).unwrap();
            for i in 0..2 {
                builder.add_child(node, NodeKind::Terminal(z[2 * i + j])).unwrap();
            }
        }
        let tree = builder.build();

        let builder = ReducedFormBuilder::new(&tree).unwrap();
        assert_eq!(builder.partition(h1).num_classes(), 1);
        assert_eq!(builder.build().unwrap().num_strategies(), &[1, 2, 2]);
    }

    #[test]
    fn reordered_chance_moves_are_merged() {
        let mut builder = GameTreeBuilder::new();
        let pl1 = builder.add_player("Alice");
        let z1 = builder.add_outcome("z1", vec![1.0]);
        let z2 = builder.add_outcome("z2", vec![2.0]);
        let h = builder.add_infoset(pl1, "h", &["a", "b"]).unwrap();
        let root = builder.add_root(NodeKind::Decision(h)).unwrap();
        let a = builder.add_child(root, NodeKind::Chance(vec![0.25, 0.75])).unwrap();
        builder.add_child(a, NodeKind::Terminal(z1)).unwrap();
        builder.add_child(a, NodeKind::Terminal(z2)).unwrap();
        let b = builder.add_child(root, NodeKind::Chance(vec![0.75, 0.25])).unwrap();
        builder.add_child(b, NodeKind::Terminal(z2)).unwrap();
        builder.add_child(b, NodeKind::Terminal(z1)).unwrap();
        let tree = builder.build();

        let form = build_strategic_form(&tree).unwrap();
        assert_eq!(form.num_strategies(), &[1]);
        assert_approx_eq!(form.payoff(&[0]).unwrap()[0], 1.75);
    }

    /// pl1 picks L or R, and below each a chain of `length` pl2 information sets,
    /// shared by both branches, lets pl2 stop at outcome k or continue.
    fn chains(length: usize) -> (GameTree, InfosetId) {
        let mut builder = GameTreeBuilder::new();
        let pl1 = builder.add_player("Alice");
        let pl2 = builder.add_player("Bob");
        let z: Vec<OutcomeId> = (0..=length)
            .map(|k| builder.add_outcome(format!("z{}", k + 1), vec![k as f64, -(k as f64)]))
            .collect();
        let h1 = builder.add_infoset(pl1, "h1", &["L", "R"]).unwrap();
        let hs: Vec<InfosetId> = (0..length)
            .map(|k| {
                builder
                    .add_infoset(pl2, format!("h{}", k + 2), &["stop", "go"])
                    .unwrap()
            })
            .collect();
        let root = builder.add_root(NodeKind::Decision(h1)).unwrap();
        for _ in 0..2 {
            let mut node = builder.add_child(root, NodeKind::Decision(hs[0])).unwrap();
            for k in 0..length {
                builder.add_child(node, NodeKind::Terminal(z[k])).unwrap();
                node = match hs.get(k + 1) {
                    Some(&h) => builder.add_child(node, NodeKind::Decision(h)).unwrap(),
                    None => builder.add_child(node, NodeKind::Terminal(z[length])).unwrap(),
                };
            }
        }
        (builder.build(), h1)
    }

    #[test]
    fn large_subtrees_compare_shapes() {
        init();
        // 2^13 assignments below h1: too many to enumerate.
        let (tree, h1) = chains(13);
        assert!(1 << 13 > MAX_ENUMERATED_ASSIGNMENTS);
        let builder = ReducedFormBuilder::new(&tree).unwrap();
        assert_eq!(builder.partition(h1).num_classes(), 1);
        let form = builder.build().unwrap();
        assert_eq!(form.num_strategies(), &[1, 14]);
        assert!(form.is_zero_sum());

        let (tree, h1) = chains(3);
        let builder = ReducedFormBuilder::new(&tree).unwrap();
        assert_eq!(builder.partition(h1).num_classes(), 1);
    }
}
