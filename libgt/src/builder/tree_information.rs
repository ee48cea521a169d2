use crate::game_tree::GameTreeVertex;
use efg_core::game::{InfosetId, OutcomeId, PlayerId};
use std::collections::BTreeMap;

/// Accumulates what the builder learns about information sets and outcomes while
/// traversing the game tree.
#[derive(Debug, Clone)]
pub struct TreeInformation<T: GameTreeVertex> {
    // Maps (player, information) pairs to the information set created for them.
    infosets: BTreeMap<(PlayerId, T::PlayerInfo), InfosetId>,
    // Indexed by `InfosetId`: description and sorted actions of each information set.
    infoset_descriptions: Vec<T::PlayerInfo>,
    infoset_actions: Vec<Vec<T::Action>>,
    // Maps payoff vectors (as bit patterns) to outcomes.
    outcomes: BTreeMap<Vec<u64>, OutcomeId>,
}

impl<T> TreeInformation<T>
where
    T: GameTreeVertex,
{
    pub fn new() -> TreeInformation<T> {
        TreeInformation {
            infosets: BTreeMap::new(),
            infoset_descriptions: vec![],
            infoset_actions: vec![],
            outcomes: BTreeMap::new(),
        }
    }

    pub fn get_infoset_id(&self, player: PlayerId, info: &T::PlayerInfo) -> Option<InfosetId> {
        self.infosets.get(&(player, info.clone())).cloned()
    }

    /// Records a newly created information set. Ids are handed out sequentially by
    /// the tree builder, so `id` must be the next unused one.
    pub fn insert_infoset(
        &mut self,
        player: PlayerId,
        info: T::PlayerInfo,
        id: InfosetId,
        actions: Vec<T::Action>,
    ) {
        assert_eq!(id.0, self.infoset_descriptions.len());
        self.infosets.insert((player, info.clone()), id);
        self.infoset_descriptions.push(info);
        self.infoset_actions.push(actions);
    }

    pub fn num_infosets(&self) -> usize {
        self.infoset_descriptions.len()
    }

    pub fn infoset_description(&self, id: InfosetId) -> &T::PlayerInfo {
        &self.infoset_descriptions[id.0]
    }

    pub fn infoset_actions(&self, id: InfosetId) -> &[T::Action] {
        &self.infoset_actions[id.0]
    }

    pub fn get_outcome(&self, payoffs: &[f64]) -> Option<OutcomeId> {
        self.outcomes.get(&Self::outcome_key(payoffs)).cloned()
    }

    pub fn insert_outcome(&mut self, payoffs: &[f64], id: OutcomeId) {
        self.outcomes.insert(Self::outcome_key(payoffs), id);
    }

    pub fn num_outcomes(&self) -> usize {
        self.outcomes.len()
    }

    fn outcome_key(payoffs: &[f64]) -> Vec<u64> {
        payoffs.iter().map(|x| x.to_bits()).collect()
    }
}
