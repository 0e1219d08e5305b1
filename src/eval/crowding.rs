//! Crowding policy: should a unit look beyond its current cluster?

/// Outcome of the crowding check for one unit this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrowdingDecision {
    /// The current cluster already has a miner, so other clusters compete.
    pub consider_other: bool,
    /// The current cluster has at least as many miners as tiles.
    pub must_switch: bool,
}

impl CrowdingDecision {
    /// Decides from the number of units mining the unit's current cluster
    /// and that cluster's tile count. A unit off every cluster passes zero
    /// for both, which leaves `consider_other` false.
    pub fn assess(units_on_current: usize, capacity: usize) -> Self {
        CrowdingDecision {
            consider_other: units_on_current > 0,
            must_switch: units_on_current >= capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_cluster_is_kept() {
        let d = CrowdingDecision::assess(0, 3);
        assert!(!d.consider_other);
        assert!(!d.must_switch);
    }

    #[test]
    fn partly_worked_cluster_opens_alternatives() {
        let d = CrowdingDecision::assess(1, 3);
        assert!(d.consider_other);
        assert!(!d.must_switch);
    }

    #[test]
    fn saturated_cluster_forces_switch() {
        assert!(CrowdingDecision::assess(3, 3).must_switch);
        assert!(CrowdingDecision::assess(5, 3).must_switch);
        assert!(CrowdingDecision::assess(5, 3).consider_other);
    }

    #[test]
    fn off_cluster_unit_never_considers_others() {
        let d = CrowdingDecision::assess(0, 0);
        assert!(!d.consider_other);
    }
}
