use crate::game::{InfosetId, PlayerId};

/// A reduced pure strategy: one action class per information set of the player that
/// the player's own earlier choices leave reachable. Other information sets are
/// left unconstrained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReducedStrategy {
    player: PlayerId,
    label: String,
    // Representative action, indexed by `InfosetId` over all information sets of the tree.
    actions: Vec<Option<usize>>,
}

impl ReducedStrategy {
    pub fn new(player: PlayerId, label: String, actions: Vec<Option<usize>>) -> ReducedStrategy {
        ReducedStrategy {
            player,
            label,
            actions,
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// One character group per information set of the player, in definition order:
    /// the 1-based representative action, or `*` where the strategy is unconstrained.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Representative action played at `infoset`, `None` if unconstrained or owned by
    /// another player.
    pub fn action_at(&self, infoset: InfosetId) -> Option<usize> {
        self.actions.get(infoset.0).cloned().flatten()
    }

    /// Information sets at which this strategy fixes an action.
    pub fn constrained_infosets(&self) -> impl Iterator<Item = InfosetId> + '_ {
        self.actions
            .iter()
            .enumerate()
            .filter(|(_, x)| x.is_some())
            .map(|(i, _)| InfosetId(i))
    }
}
