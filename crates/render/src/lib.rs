//! Presentation adapter: everything that draws or animates the game.
//!
//! # Invariants
//! - Presentation cannot mutate game truth; it reads the controller and
//!   consumes its drained events.
//! - Scene positions derive from `FaceTopology::position` only.
//!
//! # Backends
//! Only a debug text renderer ships. The [`Renderer`] trait is the seam for a
//! GPU backend; consumers do not change when one is added.

mod renderer;
mod scene;
mod view;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};
pub use scene::{SceneError, SceneMirror};
pub use view::ViewRig;

pub fn crate_info() -> &'static str {
    "cubesnake-render v0.1.0"
}
