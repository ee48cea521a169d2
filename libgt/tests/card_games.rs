use efg_core::game::{ChanceOrPlayer, GameError, InfosetId, PlayerId};
use efg_core::reduced::build_strategic_form;
use libgt::{BuildError, ExtensiveFormGameBuilder, GameTreeVertex, Leaf, VertexOrLeaf};

use assert_approx_eq::assert_approx_eq;

fn init() {
    let _ = env_logger::try_init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Card {
    High,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Action {
    Deal(Card),
    Bet,
    Call,
    Fold,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Info {
    Holds(Card),
    Blind,
}

/// One-card poker: chance deals player 1 a high or low card, player 1 bets or
/// folds, and player 2 calls or folds a bet without seeing the card.
#[derive(Debug, Clone)]
struct OneCardPoker {
    card: Option<Card>,
    bet: bool,
    high_probability: f64,
}

impl OneCardPoker {
    fn new(high_probability: f64) -> OneCardPoker {
        OneCardPoker {
            card: None,
            bet: false,
            high_probability,
        }
    }
}

impl GameTreeVertex for OneCardPoker {
    type PlayerInfo = Info;
    type Action = Action;

    fn next_player(&self) -> ChanceOrPlayer {
        match (self.card, self.bet) {
            (None, _) => ChanceOrPlayer::Chance,
            (Some(_), false) => ChanceOrPlayer::Player(PlayerId(0)),
            (Some(_), true) => ChanceOrPlayer::Player(PlayerId(1)),
        }
    }

    fn player_information(&self) -> Info {
        match (self.card, self.bet) {
            (Some(card), false) => Info::Holds(card),
            _ => Info::Blind,
        }
    }

    fn available_actions(&self) -> Box<[(Action, f64)]> {
        let actions = match (self.card, self.bet) {
            (None, _) => vec![
                (Action::Deal(Card::High), self.high_probability),
                (Action::Deal(Card::Low), 1.0 - self.high_probability),
            ],
            (Some(_), false) => vec![(Action::Fold, 0.0), (Action::Bet, 0.0)],
            (Some(_), true) => vec![(Action::Fold, 0.0), (Action::Call, 0.0)],
        };
        actions.into_boxed_slice()
    }

    fn next_state(&self, action: &Action) -> VertexOrLeaf<OneCardPoker> {
        let payoff = match action {
            Action::Deal(card) => {
                return VertexOrLeaf::Vertex(OneCardPoker {
                    card: Some(*card),
                    ..self.clone()
                })
            }
            Action::Bet => {
                return VertexOrLeaf::Vertex(OneCardPoker {
                    bet: true,
                    ..self.clone()
                })
            }
            Action::Fold if self.bet => 1.0,
            Action::Fold => -1.0,
            Action::Call => match self.card {
                Some(Card::High) => 2.0,
                _ => -2.0,
            },
        };
        VertexOrLeaf::Leaf(Leaf::new(vec![payoff, -payoff]))
    }
}

#[test]
fn one_card_poker_tree() {
    init();
    let (tree, annotations) = ExtensiveFormGameBuilder::new(&["pl1", "pl2"])
        .make_game_and_annotations(&OneCardPoker::new(0.5))
        .unwrap();

    let root = tree.root().unwrap();
    assert_eq!(tree.node(root).chance_probabilities(), Some(&[0.5, 0.5][..]));

    // Information sets are numbered depth-first.
    assert_eq!(
        annotations.infoset_annotations,
        vec![Info::Holds(Card::High), Info::Blind, Info::Holds(Card::Low)]
    );
    assert_eq!(annotations.infoset_of(&Info::Blind), Some(InfosetId(1)));
    assert_eq!(tree.infoset(InfosetId(0)).actions(), &["Bet", "Fold"]);
    assert_eq!(tree.infoset(InfosetId(1)).actions(), &["Call", "Fold"]);
    assert_eq!(tree.infoset(InfosetId(1)).members().len(), 2);

    // Payoffs 1, -1, 2, -2 for player 1.
    assert_eq!(tree.outcome_arena().len(), 4);
    assert_eq!(tree.image_of(root).unwrap().len(), 4);
}

#[test]
fn one_card_poker_strategic_form() {
    init();
    let tree = ExtensiveFormGameBuilder::new(&["pl1", "pl2"])
        .make_game(&OneCardPoker::new(0.5))
        .unwrap();
    let form = build_strategic_form(&tree).unwrap();

    assert_eq!(form.num_strategies(), &[4, 2]);
    let labels: Vec<_> = form
        .strategies(PlayerId(0))
        .iter()
        .map(|s| s.label())
        .collect();
    assert_eq!(labels, vec!["11", "12", "21", "22"]);
    assert!(form.is_zero_sum());

    // Rows: (bet, bet), (bet, fold), (fold, bet), (fold, fold) on (high, low).
    // Columns: call, fold.
    let expected = [[0.0, 1.0], [0.5, 0.0], [-1.5, 0.0], [-1.0, -1.0]];
    for (i, row) in expected.iter().enumerate() {
        for (j, value) in row.iter().enumerate() {
            assert_approx_eq!(form.payoff(&[i, j]).unwrap()[0], *value);
        }
    }
}

#[test]
fn uneven_chance_is_weighted() {
    init();
    let tree = ExtensiveFormGameBuilder::new(&["pl1", "pl2"])
        .make_game(&OneCardPoker::new(0.75))
        .unwrap();
    let form = build_strategic_form(&tree).unwrap();

    // Always bet against a caller: 0.75 * 2 - 0.25 * 2.
    assert_approx_eq!(form.payoff(&[0, 0]).unwrap()[0], 1.0);
}

#[test]
fn invalid_chance_probabilities() {
    init();
    let mut vertex = OneCardPoker::new(0.5);
    vertex.high_probability = 1.5;
    let result = ExtensiveFormGameBuilder::new(&["pl1", "pl2"]).make_game(&vertex);
    match result {
        Err(BuildError::Game(GameError::NegativeProbability { .. })) => {}
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn undeclared_player() {
    init();
    let result = ExtensiveFormGameBuilder::new(&["pl1"]).make_game(&OneCardPoker::new(0.5));
    assert_eq!(result.unwrap_err(), BuildError::UnknownPlayer(PlayerId(1), 1));
}

/// A vertex whose information set offers different actions depending on a detail
/// hidden from the player.
#[derive(Debug, Clone)]
struct Inconsistent {
    depth: usize,
}

impl GameTreeVertex for Inconsistent {
    type PlayerInfo = ();
    type Action = usize;

    fn next_player(&self) -> ChanceOrPlayer {
        ChanceOrPlayer::Player(PlayerId(0))
    }

    fn player_information(&self) {}

    fn available_actions(&self) -> Box<[(usize, f64)]> {
        (0..self.depth + 2)
            .map(|a| (a, 0.0))
            .collect::<Vec<_>>()
            .into_boxed_slice()
    }

    fn next_state(&self, action: &usize) -> VertexOrLeaf<Inconsistent> {
        if self.depth == 0 && *action == 0 {
            VertexOrLeaf::Vertex(Inconsistent { depth: 1 })
        } else {
            VertexOrLeaf::Leaf(Leaf::new(vec![*action as f64]))
        }
    }
}

#[test]
fn inconsistent_actions() {
    init();
    let result = ExtensiveFormGameBuilder::new(&["pl1"]).make_game(&Inconsistent { depth: 0 });
    match result {
        Err(BuildError::InconsistentActions { expected, found, .. }) => {
            assert_eq!(expected, "[0, 1]");
            assert_eq!(found, "[0, 1, 2]");
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn wrong_payoff_arity() {
    init();
    let result =
        ExtensiveFormGameBuilder::new(&["pl1", "pl2"]).make_game(&Inconsistent { depth: 1 });
    match result {
        Err(BuildError::Game(GameError::PayoffArity {
            expected: 2,
            found: 1,
            ..
        })) => {}
        other => panic!("unexpected result {:?}", other),
    }
}
