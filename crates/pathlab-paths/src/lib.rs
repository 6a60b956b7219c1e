//! Incremental shortest-path search for pathlab grids.
//!
//! The search is exposed as an iterator so a driver can render each frontier
//! expansion before asking for the next one:
//!
//! - **A\*** with a Manhattan heuristic ([`AstarSearch`], [`astar_path`])
//! - a sequence-ordered [`Frontier`] giving reproducible expansion order
//! - cooperative cancellation ([`CancelToken`]) and step limits
//!
//! Searches consume any [`AstarPather`]; [`pathlab_core::Grid`] implements
//! the whole hierarchy with 4-way unit-cost movement.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | breadth-first style searches |
//! | [`WeightedPather`] : [`Pather`] | uniform-cost searches |
//! | [`AstarPather`] : [`WeightedPather`] | A* |

mod astar;
mod cancel;
mod distance;
mod event;
mod frontier;
mod traits;

pub use astar::{AstarSearch, astar_path};
pub use cancel::CancelToken;
pub use distance::manhattan;
pub use event::{Path, SearchEvent, SearchOutcome};
pub use frontier::{Entry, Frontier};
pub use traits::{AstarPather, Pather, WeightedPather};
