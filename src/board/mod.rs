//! Map representation and per-turn state.
//!
//! Contains cells and directions, dense per-cell grids, resource kinds,
//! units, and the read-only turn context the scorer consumes.

pub mod cell;
pub mod context;
pub mod grid;
pub mod resource;
pub mod unit;

pub use cell::{Cell, Direction, ALL_DIRECTIONS};
pub use context::{ContextError, Occupancy, StaticFields, TurnContext};
pub use grid::Grid;
pub use resource::{CollectionRates, ResourceSets, ResourceType};
pub use unit::Unit;
