/// Defines the main components used to specify an entire game tree.

mod vertex;

pub use vertex::GameTreeVertex;
pub use vertex::Leaf;
pub use vertex::VertexOrLeaf;
