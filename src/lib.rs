//! Prospector target scoring library.
//!
//! Groups resource tiles into clusters, tracks which units work each cluster,
//! and picks a destination cell for every harvesting unit on a turn. The
//! binary and the integration tests drive it through [`planner`] and
//! [`protocol`].

pub mod board;
pub mod cluster;
pub mod config;
pub mod eval;
pub mod fields;
pub mod path;
pub mod planner;
pub mod protocol;
