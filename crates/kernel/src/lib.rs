//! Game kernel: authoritative snake state, move stepping, target placement
//! and the event log presentation reads from.
//!
//! # Invariants
//! - All state mutations flow through explicit [`GameController`] operations.
//! - A move is either committed whole or refused whole; a refused move
//!   changes nothing but the game state.
//! - No two snake cells coincide.
//! - A new target never lands on a body part. With `head_cell_is_free` it may
//!   land on the head cell, which the next move turns into a body part.
//! - Given the same config and the same operations, play is deterministic.

pub mod config;
pub mod event;
pub mod game;
pub mod snake;
pub mod target;
pub mod timer;

pub use config::{ConfigError, GameConfig, MAX_GRID_SIZE};
pub use event::{GameEvent, GameOverReason, GameState};
pub use game::{GameController, MoveOutcome, TransitionError};
pub use snake::Snake;
pub use target::TargetPicker;
pub use timer::{MoveTimer, Teardown};

pub fn crate_info() -> &'static str {
    "cubesnake-kernel v0.1.0"
}
