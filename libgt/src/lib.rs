// (LIB)rary for (G)ame (T)rees.
// Builds an `efg_core::GameTree` by walking a game that is only defined implicitly,
// through the `GameTreeVertex` trait implemented by a game generator.

extern crate efg_core;

pub mod builder;
pub mod game_tree;

pub use builder::{BuildError, ExtensiveFormGameBuilder, GameAnnotations};
pub use efg_core::game::ChanceOrPlayer;
pub use game_tree::{GameTreeVertex, Leaf, VertexOrLeaf};
