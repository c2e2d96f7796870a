//! Play field: square grids placed as a closed ring of faces.
//!
//! # Invariants
//! - Grids are built once and never resized; only the active face changes.
//! - X edges are portals to the neighbouring face, Y edges are walls.
//! - Free-cell enumeration is face-major then row-major, so seeded target
//!   picks are reproducible.

mod grid;
mod topology;

pub use grid::{Crossing, FaceStep, Grid, GridError};
pub use topology::FaceTopology;

pub fn crate_info() -> &'static str {
    "cubesnake-grid v0.1.0"
}
