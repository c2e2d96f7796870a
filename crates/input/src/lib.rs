//! Player input mapped to device-independent actions.
//!
//! # Invariants
//! - The kernel consumes actions, never raw key events.
//! - Within one frame the last turn wins.

pub mod action;

pub use action::{Action, InputError, parse_script};
