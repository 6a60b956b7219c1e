//! **pathlab-core**: grid and cell types for the pathlab visualizer.
//!
//! This crate provides the board the rest of the workspace operates on:
//! geometry primitives, cells with an explicit [`Role`], the square [`Grid`]
//! with on-demand wall-filtered adjacency, and the shared [`Error`] type.

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;

pub use cell::{Cell, Role};
pub use error::{Error, Missing, Result};
pub use geom::{Point, Range};
pub use grid::{Grid, Neighbors};
