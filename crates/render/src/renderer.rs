use std::collections::HashSet;
use std::fmt::Write;

use cubesnake_common::{Cell, Coordinate, FaceIndex};
use cubesnake_kernel::GameController;

use crate::view::ViewRig;

/// What to show and from where.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderView {
    /// Face to draw. `None` follows the controller's current face.
    pub face: Option<FaceIndex>,
    /// Camera yaw about the ring axis, in degrees.
    pub yaw_degrees: f32,
}

impl RenderView {
    /// Follow the current face, with the yaw the rig has reached.
    pub fn from_rig(rig: &ViewRig) -> Self {
        Self {
            face: None,
            yaw_degrees: rig.yaw(),
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads game state and a view, then produces output. It never
/// mutates the game.
pub trait Renderer {
    type Output;

    fn render(&self, game: &GameController, view: &RenderView) -> Self::Output;
}

/// Draws one face as a block of characters.
///
/// `@` head, `o` body, `*` target, `.` empty. The top line is the highest
/// row, so `Up` moves towards the top of the screen.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }

    fn glyph(
        cell: Cell,
        head: Option<Cell>,
        target: Option<Cell>,
        body: &HashSet<Cell>,
    ) -> char {
        if head == Some(cell) {
            '@'
        } else if body.contains(&cell) {
            'o'
        } else if target == Some(cell) {
            '*'
        } else {
            '.'
        }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, game: &GameController, view: &RenderView) -> String {
        let topology = game.topology();
        let face = view.face.unwrap_or(topology.current_face());
        let size = topology.grid_size();
        let snake = game.snake();
        let head = snake.map(|s| s.head());
        let body: HashSet<Cell> = snake.into_iter().flat_map(|s| s.body()).collect();
        let target = game.target();

        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Face {}/{} ({}, moves={}) ===",
            face,
            topology.face_count(),
            game.state(),
            game.moves()
        );
        let _ = writeln!(out, "yaw={:.1}", view.yaw_degrees);
        for y in (0..size).rev() {
            let row: String = (0..size)
                .map(|x| Self::glyph(Cell::new(face, Coordinate::new(x, y)), head, target, &body))
                .collect();
            out.push_str(&row);
            out.push('\n');
        }
        if let Some(reason) = game.last_game_over() {
            let _ = writeln!(out, "{reason}");
        }
        out
    }
}
