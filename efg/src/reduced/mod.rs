mod action_partition;
mod reduced_form_builder;
mod strategic_form;
mod strategy;
mod union_find;

pub use self::action_partition::ActionPartition;
pub use self::reduced_form_builder::{
    build_strategic_form, ReducedFormBuilder, MAX_ENUMERATED_ASSIGNMENTS,
};
pub use self::strategic_form::{PayoffTable, StrategicForm};
pub use self::strategy::ReducedStrategy;
pub use self::union_find::UnionFind;
