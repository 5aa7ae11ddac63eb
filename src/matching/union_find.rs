//! Disjoint-set clustering over market IDs.
//!
//! Each retained candidate pair unions its two IDs; connected components
//! become clusters. Note the transitive-closure approximation this implies:
//! if A-B and B-C both clear the similarity threshold, A and C end up in one
//! cluster even when A-C alone would not match. This is an accepted
//! tradeoff, not a defect to patch with an all-pairs requirement.

use std::collections::HashMap;

use crate::domain::MarketId;

/// Union-find over [`MarketId`]s with path compression.
///
/// Iteration order over clusters follows first-insertion order of the IDs,
/// which keeps the whole pipeline deterministic for a fixed input order.
#[derive(Debug, Default)]
pub struct DisjointSet {
    parent: HashMap<MarketId, MarketId>,
    insertion_order: Vec<MarketId>,
}

impl DisjointSet {
    /// Create an empty disjoint set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure(&mut self, id: &MarketId) {
        if !self.parent.contains_key(id) {
            self.parent.insert(id.clone(), id.clone());
            self.insertion_order.push(id.clone());
        }
    }

    /// Find the root of `id`, compressing the path along the way.
    ///
    /// Inserts `id` as its own singleton set if it was never seen.
    pub fn find(&mut self, id: &MarketId) -> MarketId {
        self.ensure(id);

        // Walk to the root, then point every node on the path at it.
        let mut root = id.clone();
        while self.parent[&root] != root {
            root = self.parent[&root].clone();
        }

        let mut current = id.clone();
        while current != root {
            let next = self.parent[&current].clone();
            self.parent.insert(current, root.clone());
            current = next;
        }

        root
    }

    /// Merge the sets containing `a` and `b`. Idempotent; self-unions are
    /// no-ops.
    pub fn union(&mut self, a: &MarketId, b: &MarketId) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a != root_b {
            self.parent.insert(root_a, root_b);
        }
    }

    /// Derive the connected components.
    ///
    /// Cluster order, and member order within each cluster, follow the
    /// first-insertion order of the IDs.
    pub fn clusters(&mut self) -> Vec<Vec<MarketId>> {
        let ids = self.insertion_order.clone();

        let mut by_root: HashMap<MarketId, usize> = HashMap::new();
        let mut clusters: Vec<Vec<MarketId>> = Vec::new();
        for id in ids {
            let root = self.find(&id);
            let slot = *by_root.entry(root).or_insert_with(|| {
                clusters.push(Vec::new());
                clusters.len() - 1
            });
            clusters[slot].push(id);
        }

        clusters
    }
}
