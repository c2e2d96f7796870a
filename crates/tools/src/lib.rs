//! Developer tooling: read-only inspection of a running game.
//!
//! # Invariants
//! - Tools never mutate the controller.

mod inspector;

pub use inspector::{CellInfo, GameInspector, GameSummary, Occupant};

pub fn crate_info() -> &'static str {
    "cubesnake-tools v0.1.0"
}
