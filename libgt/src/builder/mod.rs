mod annotations;
mod build_error;
mod game_builder;
mod tree_information;

pub use self::annotations::GameAnnotations;
pub use self::build_error::BuildError;
pub use self::game_builder::ExtensiveFormGameBuilder;
pub use self::tree_information::TreeInformation;
