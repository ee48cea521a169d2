use std::collections::BTreeMap;

/// Disjoint-set forest over `0..n` with path halving and union by rank.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    pub fn new(n: usize) -> UnionFind {
        UnionFind {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merges the sets holding `a` and `b`. Returns false if they were already merged.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (root_a, root_b) = (self.find(a), self.find(b));
        if root_a == root_b {
            return false;
        }
        if self.rank[root_a] < self.rank[root_b] {
            self.parent[root_a] = root_b;
        } else {
            self.parent[root_b] = root_a;
            if self.rank[root_a] == self.rank[root_b] {
                self.rank[root_a] += 1;
            }
        }
        true
    }

    /// Disjoint sets, each sorted increasingly, ordered by their smallest element.
    pub fn classes(&mut self) -> Vec<Vec<usize>> {
        let mut class_of_root = BTreeMap::<usize, usize>::new();
        let mut classes = Vec::<Vec<usize>>::new();
        for x in 0..self.len() {
            let root = self.find(x);
            let class = *class_of_root.entry(root).or_insert_with(|| {
                classes.push(vec![]);
                classes.len() - 1
            });
            classes[class].push(x);
        }
        classes
    }
}
