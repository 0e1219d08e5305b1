//! Which units are working which cluster.
//!
//! The index is owned by the turn loop. The scorer only reads the counts;
//! the mutators exist for the caller that commits a decision.

use std::collections::{BTreeMap, BTreeSet};

use super::registry::ClusterId;

pub type UnitId = String;

/// Units mining, and units heading for, each cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterAssignments {
    mining: BTreeMap<ClusterId, BTreeSet<UnitId>>,
    locating_or_targeting: BTreeMap<ClusterId, BTreeSet<UnitId>>,
}

impl ClusterAssignments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of units mining on `cluster`. A unit standing off every
    /// cluster sees zero miners.
    pub fn units_mining(&self, cluster: Option<ClusterId>) -> usize {
        cluster
            .and_then(|id| self.mining.get(&id))
            .map_or(0, BTreeSet::len)
    }

    /// Number of units already locating on or travelling to `cluster`.
    pub fn units_locating_or_targeting(&self, cluster: ClusterId) -> usize {
        self.locating_or_targeting
            .get(&cluster)
            .map_or(0, BTreeSet::len)
    }

    /// Records `unit` as mining on `cluster`. Returns false if it already was.
    pub fn assign_mining(&mut self, cluster: ClusterId, unit: impl Into<UnitId>) -> bool {
        self.mining.entry(cluster).or_default().insert(unit.into())
    }

    /// Records `unit` as locating on or heading for `cluster`.
    pub fn assign_locating(&mut self, cluster: ClusterId, unit: impl Into<UnitId>) -> bool {
        self.locating_or_targeting
            .entry(cluster)
            .or_default()
            .insert(unit.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, ResourceType};
    use crate::cluster::ClusterBuilder;

    fn two_clusters() -> (ClusterId, ClusterId) {
        let mut b = ClusterBuilder::new(5, 5);
        b.add_tile(Cell::new(0, 0), ResourceType::Wood, 10.0, 1.0).unwrap();
        b.add_tile(Cell::new(4, 4), ResourceType::Coal, 10.0, 1.0).unwrap();
        let r = b.build();
        (
            r.find(Cell::new(0, 0)).unwrap(),
            r.find(Cell::new(4, 4)).unwrap(),
        )
    }

    #[test]
    fn counts_start_at_zero() {
        let (a, _) = two_clusters();
        let idx = ClusterAssignments::new();
        assert_eq!(idx.units_mining(Some(a)), 0);
        assert_eq!(idx.units_mining(None), 0);
        assert_eq!(idx.units_locating_or_targeting(a), 0);
    }

    #[test]
    fn assignments_are_per_cluster_sets() {
        let (a, b) = two_clusters();
        let mut idx = ClusterAssignments::new();
        assert!(idx.assign_mining(a, "u1"));
        assert!(!idx.assign_mining(a, "u1"));
        assert!(idx.assign_mining(a, "u2"));
        assert!(idx.assign_locating(b, "u3"));

        assert_eq!(idx.units_mining(Some(a)), 2);
        assert_eq!(idx.units_mining(Some(b)), 0);
        assert_eq!(idx.units_locating_or_targeting(b), 1);
        assert_eq!(idx.units_locating_or_targeting(a), 0);
    }
}
