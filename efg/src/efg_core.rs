//! Extensive-form games and their reduced strategic form.
//!
//! A `GameTree` is an arena of nodes (terminal, decision and chance nodes) grouped into
//! information sets. `ImageComputer` derives, for every node, the set of outcomes
//! reachable from it, and `ReducedFormBuilder` uses those images to merge actions that
//! can never change the outcome before enumerating reduced pure strategies and their
//! expected payoffs.

#[macro_use]
extern crate approx;

pub mod game;
pub mod image;
pub mod reduced;

pub use self::game::{GameError, GameTree, GameTreeBuilder};
pub use self::image::{ImageComputer, NodeImages};
pub use self::reduced::{build_strategic_form, ReducedFormBuilder, StrategicForm};
