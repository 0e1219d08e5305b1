//! Resource clustering and per-cluster bookkeeping.
//!
//! Groups orthogonally connected resource tiles into clusters with a
//! union-find pass, and tracks which units are mining or heading for each.

pub mod assignment;
pub mod disjoint_set;
pub mod registry;

pub use assignment::{ClusterAssignments, UnitId};
pub use disjoint_set::DisjointSet;
pub use registry::{Cluster, ClusterBuilder, ClusterId, ClusterRegistry, RegistryError};
