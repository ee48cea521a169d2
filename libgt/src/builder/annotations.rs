use crate::builder::TreeInformation;
use crate::game_tree::GameTreeVertex;
use efg_core::game::InfosetId;

/// Maps the information sets of a built tree back to the generator's descriptions
/// of them and of their actions.
#[derive(Debug, Clone)]
pub struct GameAnnotations<T: GameTreeVertex> {
    pub infoset_annotations: Vec<T::PlayerInfo>,
    pub action_annotations: Vec<Vec<T::Action>>,
}

impl<T> GameAnnotations<T>
where
    T: GameTreeVertex,
{
    pub fn new(tree_information: &TreeInformation<T>) -> GameAnnotations<T> {
        let ids = (0..tree_information.num_infosets()).map(InfosetId);
        GameAnnotations {
            infoset_annotations: ids
                .clone()
                .map(|id| tree_information.infoset_description(id).clone())
                .collect(),
            action_annotations: ids
                .map(|id| tree_information.infoset_actions(id).to_vec())
                .collect(),
        }
    }

    pub fn player_information(&self, infoset: InfosetId) -> Option<&T::PlayerInfo> {
        self.infoset_annotations.get(infoset.0)
    }

    pub fn action(&self, infoset: InfosetId, action: usize) -> Option<&T::Action> {
        self.action_annotations
            .get(infoset.0)
            .and_then(|x| x.get(action))
    }

    /// Information set whose vertices carry `info`, if any.
    pub fn infoset_of(&self, info: &T::PlayerInfo) -> Option<InfosetId> {
        self.infoset_annotations
            .iter()
            .position(|x| x == info)
            .map(InfosetId)
    }
}
