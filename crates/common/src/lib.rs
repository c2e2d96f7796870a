//! Shared value types: lattice coordinates, directions and face cells.
//!
//! # Invariants
//! - All types are plain `Copy` values; equality and addition are componentwise.

mod types;

pub use types::{Cell, Coordinate, Direction, FaceIndex};
