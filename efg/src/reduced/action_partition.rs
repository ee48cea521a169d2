use crate::reduced::UnionFind;

/// Partition of the actions of one information set into classes of
/// interchangeable actions. The representative of a class is its smallest action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionPartition {
    classes: Vec<Vec<usize>>,
    class_of: Vec<usize>,
}

impl ActionPartition {
    pub fn from_union_find(union_find: &mut UnionFind) -> ActionPartition {
        let classes = union_find.classes();
        let mut class_of = vec![0; union_find.len()];
        for (class, actions) in classes.iter().enumerate() {
            for &action in actions {
                class_of[action] = class;
            }
        }
        ActionPartition { classes, class_of }
    }

    pub fn num_actions(&self) -> usize {
        self.class_of.len()
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn classes(&self) -> &[Vec<usize>] {
        &self.classes
    }

    /// Panics if `action` is out of range.
    pub fn class_of(&self, action: usize) -> usize {
        self.class_of[action]
    }

    pub fn representative(&self, class: usize) -> usize {
        self.classes[class][0]
    }

    pub fn are_equivalent(&self, a: usize, b: usize) -> bool {
        self.class_of(a) == self.class_of(b)
    }
}
