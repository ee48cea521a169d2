use crate::game::{Player, PlayerId};
use crate::reduced::ReducedStrategy;

use itertools::Itertools;

/// Dense payoff table over all strategy profiles. Profiles are laid out in
/// row-major order: the last player's strategy varies fastest.
#[derive(Debug, Clone, PartialEq)]
pub struct PayoffTable {
    shape: Vec<usize>,
    entries: Vec<f64>,
}

impl PayoffTable {
    /// `entries` holds one payoff vector (of length `shape.len()`) per profile, in
    /// the order produced by `profiles()`.
    pub fn from_entries(shape: Vec<usize>, entries: Vec<f64>) -> PayoffTable {
        let num_profiles: usize = shape.iter().product();
        assert_eq!(
            entries.len(),
            num_profiles * shape.len(),
            "payoff entries do not match table shape"
        );
        PayoffTable { shape, entries }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn num_players(&self) -> usize {
        self.shape.len()
    }

    pub fn num_profiles(&self) -> usize {
        self.shape.iter().product()
    }

    /// Position of `profile` in `profiles()`, or `None` if it is malformed.
    pub fn profile_index(&self, profile: &[usize]) -> Option<usize> {
        if profile.len() != self.shape.len() {
            return None;
        }
        let mut index = 0;
        for (&strategy, &num_strategies) in profile.iter().zip(self.shape.iter()) {
            if strategy >= num_strategies {
                return None;
            }
            index = index * num_strategies + strategy;
        }
        Some(index)
    }

    pub fn payoff(&self, profile: &[usize]) -> Option<&[f64]> {
        let n = self.num_players();
        self.profile_index(profile)
            .map(|index| &self.entries[index * n..(index + 1) * n])
    }

    /// All profiles, one strategy index per player.
    pub fn profiles(&self) -> Box<dyn Iterator<Item = Vec<usize>>> {
        profiles(&self.shape)
    }
}

pub(crate) fn profiles(shape: &[usize]) -> Box<dyn Iterator<Item = Vec<usize>>> {
    if shape.is_empty() {
        return Box::new(std::iter::once(vec![]));
    }
    Box::new(
        shape
            .iter()
            .map(|&n| 0..n)
            .collect::<Vec<_>>()
            .into_iter()
            .multi_cartesian_product(),
    )
}

/// Normal-form game obtained from a game tree: reduced pure strategies per player
/// and the expected payoff vector of every profile.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategicForm {
    players: Vec<Player>,
    strategies: Vec<Vec<ReducedStrategy>>,
    payoffs: PayoffTable,
}

impl StrategicForm {
    pub fn new(
        players: Vec<Player>,
        strategies: Vec<Vec<ReducedStrategy>>,
        payoffs: PayoffTable,
    ) -> StrategicForm {
        assert_eq!(players.len(), strategies.len());
        assert!(strategies
            .iter()
            .map(Vec::len)
            .eq(payoffs.shape().iter().cloned()));
        StrategicForm {
            players,
            strategies,
            payoffs,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Panics if `player` is not part of the game.
    pub fn strategies(&self, player: PlayerId) -> &[ReducedStrategy] {
        &self.strategies[player.index()]
    }

    pub fn num_strategies(&self) -> &[usize] {
        self.payoffs.shape()
    }

    pub fn strategy_label(&self, player: PlayerId, strategy: usize) -> Option<&str> {
        self.strategies
            .get(player.index())
            .and_then(|x| x.get(strategy))
            .map(ReducedStrategy::label)
    }

    pub fn num_profiles(&self) -> usize {
        self.payoffs.num_profiles()
    }

    pub fn profiles(&self) -> Box<dyn Iterator<Item = Vec<usize>>> {
        self.payoffs.profiles()
    }

    /// Expected payoff of every player under `profile`.
    pub fn payoff(&self, profile: &[usize]) -> Option<&[f64]> {
        self.payoffs.payoff(profile)
    }

    pub fn payoff_table(&self) -> &PayoffTable {
        &self.payoffs
    }

    pub fn is_zero_sum(&self) -> bool {
        self.profiles().all(|profile| match self.payoff(&profile) {
            Some(payoffs) => ulps_eq!(payoffs.iter().sum::<f64>(), 0.0),
            None => false,
        })
    }
}
