use std::fmt;

use cubesnake_common::{Cell, FaceIndex};
use cubesnake_grid::FaceStep;
use serde::{Deserialize, Serialize};

/// High-level game state. Written only by the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// No game in progress: before the first start and after game over.
    #[default]
    Idle,
    Running,
    Paused,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameState::Idle => "idle",
            GameState::Running => "running",
            GameState::Paused => "paused",
        };
        f.write_str(name)
    }
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOverReason {
    HitWall,
    AteOwnTail,
    /// No free cell left anywhere on the ring.
    Won,
}

impl GameOverReason {
    pub fn message(&self) -> &'static str {
        match self {
            GameOverReason::HitWall => "You hit a wall.",
            GameOverReason::AteOwnTail => "You ate your own tail.",
            GameOverReason::Won => "Game won!",
        }
    }
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A record of every observable change made by the controller.
///
/// Presentation (UI screens, camera, scene objects) consumes these instead of
/// sharing mutable state with the kernel. Body indices count from the part
/// nearest the head.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    GameOver { reason: GameOverReason },
    StateChanged { from: GameState, to: GameState },
    SnakeSpawned { head: Cell },
    HeadMoved { cell: Cell },
    PartMoved { index: usize, cell: Cell },
    PartAdded { index: usize, cell: Cell },
    PartRemoved { index: usize },
    SnakeRemoved,
    FaceChanged {
        from: FaceIndex,
        to: FaceIndex,
        step: FaceStep,
    },
    TargetSpawned { cell: Cell },
    TargetRemoved { cell: Cell },
    /// Camera should return to its starting orientation.
    ViewReset,
    TeardownComplete,
}
