use std::fmt;

use cubesnake_common::{Cell, Coordinate, FaceIndex};
use cubesnake_kernel::{GameController, GameOverReason, GameState};
use glam::Vec3;

/// Game inspector for developer tooling.
///
/// Read-only queries against the controller for debugging and CLI output.
pub struct GameInspector;

impl GameInspector {
    /// Produce a summary of the game state.
    pub fn summary(game: &GameController) -> GameSummary {
        let snake = game.snake();
        GameSummary {
            state: game.state(),
            face: game.topology().current_face(),
            face_count: game.topology().face_count(),
            head: snake.map(|s| s.head()),
            length: snake.map_or(0, |s| s.len()),
            target: game.target(),
            moves: game.moves(),
            free_cells: game.free_cells().len(),
            last_game_over: game.last_game_over(),
            pending_events: game.events().len(),
        }
    }

    /// What sits on `cell` and where it is in world space.
    /// `None` when the cell is not on the board.
    pub fn inspect_cell(game: &GameController, cell: Cell) -> Option<CellInfo> {
        let position = game.topology().position(cell).ok()?;
        let snake = game.snake();
        let occupant = if snake.is_some_and(|s| s.head() == cell) {
            Occupant::Head
        } else if let Some(index) = snake.and_then(|s| s.body().position(|part| part == cell)) {
            Occupant::Body(index)
        } else if game.point_has_target(cell) {
            Occupant::Target
        } else {
            Occupant::Empty
        };
        Some(CellInfo {
            cell,
            position: [position.x, position.y, position.z],
            occupant,
        })
    }

    /// Snake cells from head to tail. Empty when no snake exists.
    pub fn list_snake(game: &GameController) -> Vec<Cell> {
        game.snake().map(|s| s.cells().collect()).unwrap_or_default()
    }

    /// World-space centre of every face, in face order.
    pub fn face_centres(game: &GameController) -> Vec<Vec3> {
        let topology = game.topology();
        (0..topology.face_count())
            .filter_map(|face| topology.grid(face))
            .map(|grid| {
                let sum: Vec3 = (0..grid.size())
                    .flat_map(|y| (0..grid.size()).map(move |x| (x, y)))
                    .filter_map(|(x, y)| grid.position(Coordinate::new(x, y)).ok())
                    .sum();
                sum / (grid.size() * grid.size()) as f32
            })
            .collect()
    }
}

/// Summary of the game for the inspector.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSummary {
    pub state: GameState,
    pub face: FaceIndex,
    pub face_count: usize,
    pub head: Option<Cell>,
    pub length: usize,
    pub target: Option<Cell>,
    pub moves: u64,
    pub free_cells: usize,
    pub last_game_over: Option<GameOverReason>,
    pub pending_events: usize,
}

impl fmt::Display for GameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Game: state={} face={}/{} length={} moves={} free={}",
            self.state, self.face, self.face_count, self.length, self.moves, self.free_cells
        )?;
        if let Some(head) = self.head {
            write!(f, " head={head}")?;
        }
        if let Some(target) = self.target {
            write!(f, " target={target}")?;
        }
        if let Some(reason) = self.last_game_over {
            write!(f, " last=\"{reason}\"")?;
        }
        Ok(())
    }
}

/// What occupies a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    Empty,
    Head,
    /// Body part by index from the head.
    Body(usize),
    Target,
}

/// Detailed info about a single cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellInfo {
    pub cell: Cell,
    pub position: [f32; 3],
    pub occupant: Occupant,
}

impl fmt::Display for CellInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cell {} pos=({:.2}, {:.2}, {:.2}) {:?}",
            self.cell, self.position[0], self.position[1], self.position[2], self.occupant
        )
    }
}
