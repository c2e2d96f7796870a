use std::collections::HashSet;

use cubesnake_common::{Cell, Coordinate, Direction};
use cubesnake_grid::{FaceStep, FaceTopology};
use cubesnake_input::Action;

use crate::config::{ConfigError, GameConfig};
use crate::event::{GameEvent, GameOverReason, GameState};
use crate::snake::Snake;
use crate::target::TargetPicker;
use crate::timer::{MoveTimer, Teardown};

/// Errors from state machine operations. The state is left untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransitionError {
    #[error("cannot {action} while {from}")]
    NotAllowed {
        from: GameState,
        action: &'static str,
    },
    #[error("snake cell {0} is off the board")]
    SnakeOffBoard(Cell),
    #[error("snake overlaps itself at {0}")]
    SnakeOverlap(Cell),
}

/// What a single move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { head: Cell },
    /// Moved onto the target and grew.
    Ate { head: Cell },
    /// The move was refused and the game ended.
    Crashed(GameOverReason),
}

enum MovePlan {
    Blocked(GameOverReason),
    Commit {
        raw: Coordinate,
        to: Cell,
        step: Option<FaceStep>,
    },
}

/// The authoritative game.
///
/// Owns the face ring, the snake, the target and every timer. All mutations
/// go through explicit operations and are recorded in an event log that
/// presentation drains once per frame. Given the same configuration (seed
/// included) and the same sequence of operations, two controllers reach
/// identical states.
#[derive(Debug, Clone)]
pub struct GameController {
    config: GameConfig,
    topology: FaceTopology,
    state: GameState,
    snake: Option<Snake>,
    target: Option<Cell>,
    timer: MoveTimer,
    teardown: Option<Teardown>,
    picker: TargetPicker,
    moves: u64,
    last_reason: Option<GameOverReason>,
    event_log: Vec<GameEvent>,
}

impl GameController {
    /// Validate `config` and build the face ring. The game starts idle.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let topology = FaceTopology::new(config.grid_size, config.cell_size, config.face_count);
        let timer = MoveTimer::new(config.move_interval);
        let picker = TargetPicker::new(config.seed);
        Ok(Self {
            config,
            topology,
            state: GameState::Idle,
            snake: None,
            target: None,
            timer,
            teardown: None,
            picker,
            moves: 0,
            last_reason: None,
            event_log: Vec::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn topology(&self) -> &FaceTopology {
        &self.topology
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Present from game start until the teardown finishes.
    pub fn snake(&self) -> Option<&Snake> {
        self.snake.as_ref()
    }

    pub fn target(&self) -> Option<Cell> {
        self.target
    }

    /// Moves committed since the current game started.
    pub fn moves(&self) -> u64 {
        self.moves
    }

    pub fn timer(&self) -> &MoveTimer {
        &self.timer
    }

    pub fn last_game_over(&self) -> Option<GameOverReason> {
        self.last_reason
    }

    pub fn is_tearing_down(&self) -> bool {
        self.teardown.is_some()
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[GameEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Start a game with a bare head at the configured start cell on face 0.
    pub fn start_game(&mut self) -> Result<(), TransitionError> {
        let head = Cell::new(0, self.config.start);
        self.start_game_with(Snake::new(head, self.config.start_direction))
    }

    /// Start a game from a prepared snake. The head's face becomes current.
    pub fn start_game_with(&mut self, snake: Snake) -> Result<(), TransitionError> {
        self.require(GameState::Idle, "start a game")?;
        self.check_snake(&snake)?;
        self.finish_teardown();

        let head = snake.head();
        self.topology
            .set_current_face(head.face)
            .map_err(|_| TransitionError::SnakeOffBoard(head))?;
        self.timer.reset();
        self.moves = 0;
        self.last_reason = None;
        self.target = None;

        self.event_log.push(GameEvent::SnakeSpawned { head });
        self.event_log.extend(
            snake
                .body()
                .enumerate()
                .map(|(index, cell)| GameEvent::PartAdded { index, cell }),
        );
        self.snake = Some(snake);
        self.set_state(GameState::Running);

        tracing::info!(head = %head, faces = self.topology.face_count(), "game started");
        self.event_log.push(GameEvent::GameStarted);
        self.spawn_target();
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), TransitionError> {
        self.require(GameState::Running, "pause")?;
        self.set_state(GameState::Paused);
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), TransitionError> {
        self.require(GameState::Paused, "resume")?;
        self.set_state(GameState::Running);
        Ok(())
    }

    /// End a running game and begin the teardown.
    pub fn game_over(&mut self, reason: GameOverReason) -> Result<(), TransitionError> {
        self.require(GameState::Running, "end the game")?;
        self.end_game(reason);
        Ok(())
    }

    /// Change heading. Ignored when no game is in progress.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if self.state == GameState::Idle {
            return false;
        }
        match self.snake.as_mut() {
            Some(snake) => {
                snake.turn(direction);
                tracing::trace!(?direction, "turn");
                true
            }
            None => false,
        }
    }

    /// Apply one input action.
    pub fn apply(&mut self, action: Action) -> Result<(), TransitionError> {
        match action {
            Action::Turn(direction) => {
                self.turn(direction);
                Ok(())
            }
            Action::Start => self.start_game(),
            Action::Pause => self.pause(),
            Action::Resume => self.resume(),
            Action::Noop => Ok(()),
        }
    }

    /// Advance one frame of `dt` seconds.
    ///
    /// Running: counts down to the next move. Paused: nothing moves and the
    /// countdown is kept. Idle: advances any teardown in progress.
    pub fn update(&mut self, dt: f32) -> Option<MoveOutcome> {
        let _span = tracing::info_span!("game_update").entered();
        match self.state {
            GameState::Running => {
                if self.timer.advance(dt) {
                    self.step()
                } else {
                    None
                }
            }
            GameState::Paused => None,
            GameState::Idle => {
                self.advance_teardown(dt);
                None
            }
        }
    }

    /// Run one move now, ignoring the timer. Only while running.
    pub fn step(&mut self) -> Option<MoveOutcome> {
        if self.state != GameState::Running {
            return None;
        }
        match self.plan_move()? {
            MovePlan::Blocked(reason) => {
                self.end_game(reason);
                Some(MoveOutcome::Crashed(reason))
            }
            MovePlan::Commit { raw, to, step } => self.commit_move(raw, to, step),
        }
    }

    /// Place a new target on a random free cell, replacing any current one.
    /// Ends the game as won when no cell is free.
    pub fn spawn_target(&mut self) -> Option<Cell> {
        if self.state != GameState::Running {
            tracing::debug!(state = %self.state, "target spawn skipped");
            return None;
        }
        if let Some(cell) = self.target.take() {
            self.event_log.push(GameEvent::TargetRemoved { cell });
        }
        let free = self.free_cells();
        match self.picker.pick(&free) {
            Some(cell) => {
                self.target = Some(cell);
                self.event_log.push(GameEvent::TargetSpawned { cell });
                tracing::debug!(target = %cell, free = free.len(), "target spawned");
                Some(cell)
            }
            None => {
                self.end_game(GameOverReason::Won);
                None
            }
        }
    }

    /// Remove the eaten target and spawn the next one.
    pub fn eat_target(&mut self) -> Option<Cell> {
        if let Some(cell) = self.target.take() {
            self.event_log.push(GameEvent::TargetRemoved { cell });
        }
        self.spawn_target()
    }

    pub fn point_has_target(&self, cell: Cell) -> bool {
        self.target == Some(cell)
    }

    /// Head and body cells of the live snake.
    pub fn occupied_cells(&self) -> HashSet<Cell> {
        self.snake.iter().flat_map(|snake| snake.cells()).collect()
    }

    /// Candidate target cells.
    ///
    /// With `head_cell_is_free` only body parts block a cell, and the head
    /// cell is appended once more after the scan, so it is listed twice.
    pub fn free_cells(&self) -> Vec<Cell> {
        match &self.snake {
            Some(snake) if self.config.head_cell_is_free => {
                let body: HashSet<Cell> = snake.body().collect();
                self.topology.free_cells(&body, Some(snake.head()))
            }
            _ => self.topology.free_cells(&self.occupied_cells(), None),
        }
    }

    /// Drop whatever the teardown has left in one go.
    pub fn finish_teardown(&mut self) {
        if self.teardown.take().is_none() {
            return;
        }
        if let Some(mut snake) = self.snake.take() {
            while snake.remove_tail().is_some() {
                self.event_log.push(GameEvent::PartRemoved {
                    index: snake.body_len(),
                });
            }
            self.event_log.push(GameEvent::SnakeRemoved);
        }
        if let Some(cell) = self.target.take() {
            self.event_log.push(GameEvent::TargetRemoved { cell });
        }
        self.event_log.push(GameEvent::ViewReset);
        self.event_log.push(GameEvent::TeardownComplete);
        tracing::debug!("teardown complete");
    }

    /// Deterministic hash of the game state for replay comparison.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        let mix_cell = |h: &mut u64, cell: Cell| {
            mix(h, &(cell.face as u64).to_le_bytes());
            mix(h, &cell.coord.x.to_le_bytes());
            mix(h, &cell.coord.y.to_le_bytes());
        };
        mix(&mut h, &[self.state as u8]);
        mix(&mut h, &(self.topology.current_face() as u64).to_le_bytes());
        mix(&mut h, &self.moves.to_le_bytes());
        if let Some(target) = self.target {
            mix_cell(&mut h, target);
        }
        if let Some(snake) = &self.snake {
            mix(&mut h, &[snake.direction() as u8]);
            for cell in snake.cells() {
                mix_cell(&mut h, cell);
            }
        }
        h
    }

    fn require(&self, expected: GameState, action: &'static str) -> Result<(), TransitionError> {
        if self.state == expected {
            return Ok(());
        }
        tracing::debug!(state = %self.state, action, "transition rejected");
        Err(TransitionError::NotAllowed {
            from: self.state,
            action,
        })
    }

    fn check_snake(&self, snake: &Snake) -> Result<(), TransitionError> {
        let mut seen = HashSet::new();
        for cell in snake.cells() {
            if self.topology.position(cell).is_err() {
                return Err(TransitionError::SnakeOffBoard(cell));
            }
            if !seen.insert(cell) {
                return Err(TransitionError::SnakeOverlap(cell));
            }
        }
        Ok(())
    }

    fn set_state(&mut self, to: GameState) {
        let from = self.state;
        if from != to {
            self.state = to;
            self.event_log.push(GameEvent::StateChanged { from, to });
        }
    }

    fn end_game(&mut self, reason: GameOverReason) {
        self.set_state(GameState::Idle);
        self.last_reason = Some(reason);
        tracing::info!(
            %reason,
            moves = self.moves,
            length = self.snake.as_ref().map_or(0, Snake::len),
            "game over"
        );
        self.event_log.push(GameEvent::GameOver { reason });
        self.teardown = Some(Teardown::new(self.config.teardown_interval));
    }

    /// Resolve the next cell without touching any state.
    ///
    /// Border wrapping is resolved first, then walls, then the body.
    fn plan_move(&self) -> Option<MovePlan> {
        let snake = self.snake.as_ref()?;
        let grid = self.topology.current_grid();
        let raw = snake.next_coord();

        let (coord, step) = if grid.is_crossing_border(raw) {
            let crossing = grid.wrap_border(raw);
            (crossing.coord, crossing.step)
        } else {
            (raw, None)
        };
        if !grid.has_point(coord) {
            return Some(MovePlan::Blocked(GameOverReason::HitWall));
        }

        let face = step.map_or(self.topology.current_face(), |s| self.topology.neighbour(s));
        let to = Cell::new(face, coord);
        if snake.occupies(to) {
            return Some(MovePlan::Blocked(GameOverReason::AteOwnTail));
        }
        Some(MovePlan::Commit { raw, to, step })
    }

    fn commit_move(
        &mut self,
        raw: Coordinate,
        to: Cell,
        step: Option<FaceStep>,
    ) -> Option<MoveOutcome> {
        if let Some(step) = step {
            let from = self.topology.current_face();
            self.topology.cross_border(raw);
            let now = self.topology.current_face();
            tracing::debug!(from, to = now, ?step, "face changed");
            self.event_log.push(GameEvent::FaceChanged {
                from,
                to: now,
                step,
            });
        }

        let snake = self.snake.as_mut()?;
        let vacated = snake.advance(to);
        self.moves += 1;
        self.event_log.push(GameEvent::HeadMoved { cell: to });
        self.event_log.extend(
            snake
                .body()
                .enumerate()
                .map(|(index, cell)| GameEvent::PartMoved { index, cell }),
        );
        tracing::trace!(head = %to, moves = self.moves, "snake moved");

        if self.target != Some(to) {
            return Some(MoveOutcome::Moved { head: to });
        }

        let index = snake.grow(vacated);
        self.event_log.push(GameEvent::PartAdded {
            index,
            cell: vacated,
        });
        self.eat_target();
        Some(MoveOutcome::Ate { head: to })
    }

    fn advance_teardown(&mut self, dt: f32) {
        let Some(teardown) = self.teardown.as_mut() else {
            return;
        };
        let due = teardown.advance(dt);
        if let Some(snake) = self.snake.as_mut() {
            for _ in 0..due {
                if snake.remove_tail().is_none() {
                    break;
                }
                self.event_log.push(GameEvent::PartRemoved {
                    index: snake.body_len(),
                });
            }
            if snake.body_len() > 0 {
                return;
            }
        }
        self.finish_teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(face: usize, x: i32, y: i32) -> Cell {
        Cell::new(face, Coordinate::new(x, y))
    }

    fn config(grid_size: i32, face_count: usize, start: (i32, i32), dir: Direction) -> GameConfig {
        GameConfig {
            grid_size,
            face_count,
            start: Coordinate::new(start.0, start.1),
            start_direction: dir,
            teardown_interval: 0.0,
            ..GameConfig::default()
        }
    }

    fn started(config: GameConfig) -> GameController {
        let mut game = GameController::new(config).unwrap();
        game.start_game().unwrap();
        game
    }

    fn head(game: &GameController) -> Cell {
        game.snake().unwrap().head()
    }

    #[test]
    fn controller_starts_idle() {
        let game = GameController::new(GameConfig::default()).unwrap();
        assert_eq!(game.state(), GameState::Idle);
        assert!(game.snake().is_none());
        assert!(game.target().is_none());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let bad = GameConfig {
            face_count: 0,
            ..GameConfig::default()
        };
        assert!(GameController::new(bad).is_err());
    }

    #[test]
    fn start_game_runs_and_spawns_target() {
        let mut game = started(config(5, 4, (2, 2), Direction::Up));
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(head(&game), cell(0, 2, 2));
        assert_eq!(game.topology().current_face(), 0);
        assert!(game.target().is_some());

        let events = game.drain_events();
        assert!(events.contains(&GameEvent::GameStarted));
        assert!(events.contains(&GameEvent::StateChanged {
            from: GameState::Idle,
            to: GameState::Running
        }));
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::TargetSpawned { .. }))
        );
        assert!(game.events().is_empty());
    }

    #[test]
    fn start_while_running_is_a_no_op() {
        let mut game = started(config(5, 1, (2, 2), Direction::Up));
        let before = game.state_hash();
        let err = game.start_game().unwrap_err();
        assert_eq!(
            err,
            TransitionError::NotAllowed {
                from: GameState::Running,
                action: "start a game"
            }
        );
        assert_eq!(game.state_hash(), before);
    }

    #[test]
    fn pause_and_resume_only_from_matching_states() {
        let mut game = GameController::new(config(5, 1, (2, 2), Direction::Up)).unwrap();
        assert!(game.pause().is_err());
        assert!(game.resume().is_err());

        game.start_game().unwrap();
        assert!(game.resume().is_err());
        game.pause().unwrap();
        assert_eq!(game.state(), GameState::Paused);
        assert!(game.pause().is_err());
        assert!(game.game_over(GameOverReason::HitWall).is_err());
        game.resume().unwrap();
        assert_eq!(game.state(), GameState::Running);
    }

    #[test]
    fn walking_into_the_top_wall_ends_the_game() {
        let mut game = started(config(5, 1, (2, 2), Direction::Up));
        assert!(matches!(game.step(), Some(MoveOutcome::Moved { .. } | MoveOutcome::Ate { .. })));
        assert_eq!(head(&game), cell(0, 2, 3));
        game.step();
        assert_eq!(head(&game), cell(0, 2, 4));

        assert_eq!(game.step(), Some(MoveOutcome::Crashed(GameOverReason::HitWall)));
        assert_eq!(game.state(), GameState::Idle);
        assert_eq!(game.last_game_over(), Some(GameOverReason::HitWall));
        assert_eq!(head(&game), cell(0, 2, 4));
        assert!(game.events().contains(&GameEvent::GameOver {
            reason: GameOverReason::HitWall
        }));

        assert_eq!(game.step(), None);
    }

    #[test]
    fn leaving_the_left_edge_retreats_a_face() {
        let mut game = started(config(5, 4, (0, 2), Direction::Left));
        game.drain_events();
        game.step();
        assert_eq!(head(&game), cell(3, 4, 2));
        assert_eq!(game.topology().current_face(), 3);
        let changes: Vec<_> = game
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::FaceChanged { .. }))
            .collect();
        assert_eq!(
            changes,
            vec![&GameEvent::FaceChanged {
                from: 0,
                to: 3,
                step: FaceStep::Retreat
            }]
        );
    }

    #[test]
    fn leaving_the_right_edge_advances_a_face() {
        let mut game = started(config(5, 4, (4, 1), Direction::Right));
        game.step();
        assert_eq!(head(&game), cell(1, 0, 1));
        assert_eq!(game.topology().current_face(), 1);
    }

    #[test]
    fn straight_run_wraps_around_the_ring() {
        let mut game = started(config(5, 4, (2, 2), Direction::Right));
        for _ in 0..7 {
            game.step();
        }
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(head(&game), cell(1, 4, 2));
        assert_eq!(game.moves(), 7);
    }

    #[test]
    fn running_into_the_body_ends_the_game() {
        let mut game = GameController::new(config(5, 1, (2, 2), Direction::Up)).unwrap();
        let snake = Snake::with_body(
            cell(0, 2, 2),
            Direction::Up,
            [cell(0, 1, 2), cell(0, 1, 3), cell(0, 2, 3)],
        );
        game.start_game_with(snake.clone()).unwrap();

        assert_eq!(game.step(), Some(MoveOutcome::Crashed(GameOverReason::AteOwnTail)));
        assert_eq!(game.state(), GameState::Idle);
        assert_eq!(game.last_game_over(), Some(GameOverReason::AteOwnTail));
        assert_eq!(game.snake(), Some(&snake));
    }

    #[test]
    fn reversing_bites_the_neck() {
        let mut game = GameController::new(config(5, 1, (2, 2), Direction::Up)).unwrap();
        game.start_game_with(Snake::with_body(
            cell(0, 2, 2),
            Direction::Up,
            [cell(0, 2, 1)],
        ))
        .unwrap();
        assert!(game.turn(Direction::Down));
        assert_eq!(game.step(), Some(MoveOutcome::Crashed(GameOverReason::AteOwnTail)));
    }

    #[test]
    fn crash_after_crossing_keeps_the_face() {
        let mut game = GameController::new(config(5, 4, (0, 2), Direction::Left)).unwrap();
        let snake = Snake::with_body(
            cell(0, 0, 2),
            Direction::Left,
            [cell(0, 0, 3), cell(3, 4, 3), cell(3, 4, 2)],
        );
        game.start_game_with(snake).unwrap();
        assert_eq!(game.step(), Some(MoveOutcome::Crashed(GameOverReason::AteOwnTail)));
        assert_eq!(game.topology().current_face(), 0);
    }

    #[test]
    fn eating_grows_by_one_and_respawns_elsewhere() {
        let mut game = started(GameConfig {
            head_cell_is_free: false,
            ..config(5, 2, (2, 2), Direction::Up)
        });
        game.target = Some(cell(0, 2, 3));
        let free_before = game.free_cells().len();
        game.drain_events();

        assert_eq!(game.step(), Some(MoveOutcome::Ate { head: cell(0, 2, 3) }));
        let snake = game.snake().unwrap();
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.body().collect::<Vec<_>>(), vec![cell(0, 2, 2)]);

        let target = game.target().unwrap();
        assert!(!game.occupied_cells().contains(&target));
        assert_eq!(game.free_cells().len(), free_before - 1);

        let events = game.events();
        assert!(events.contains(&GameEvent::PartAdded {
            index: 0,
            cell: cell(0, 2, 2)
        }));
        assert!(events.contains(&GameEvent::TargetRemoved { cell: cell(0, 2, 3) }));
        assert!(events.contains(&GameEvent::TargetSpawned { cell: target }));
    }

    #[test]
    fn filling_the_board_wins() {
        let mut game = GameController::new(GameConfig {
            head_cell_is_free: false,
            ..config(2, 1, (0, 0), Direction::Up)
        })
        .unwrap();
        game.start_game_with(Snake::with_body(
            cell(0, 0, 0),
            Direction::Up,
            [cell(0, 1, 0), cell(0, 1, 1)],
        ))
        .unwrap();
        assert_eq!(game.target(), Some(cell(0, 0, 1)));

        assert_eq!(game.step(), Some(MoveOutcome::Ate { head: cell(0, 0, 1) }));
        assert_eq!(game.state(), GameState::Idle);
        assert_eq!(game.last_game_over(), Some(GameOverReason::Won));
        assert!(game.free_cells().is_empty());
    }

    #[test]
    fn head_cell_counts_as_free_by_default() {
        let game = started(config(2, 1, (0, 0), Direction::Up));
        let free = game.free_cells();
        assert_eq!(free.len(), 5);
        assert_eq!(free.last(), Some(&cell(0, 0, 0)));
        assert_eq!(free.iter().filter(|c| **c == cell(0, 0, 0)).count(), 2);
    }

    #[test]
    fn head_cell_is_blocked_when_configured() {
        let game = started(GameConfig {
            head_cell_is_free: false,
            ..config(2, 1, (0, 0), Direction::Up)
        });
        let free = game.free_cells();
        assert_eq!(free.len(), 3);
        assert!(!free.contains(&cell(0, 0, 0)));
    }

    #[test]
    fn paused_frames_keep_the_countdown() {
        let mut game = started(GameConfig {
            move_interval: 1.0,
            ..config(9, 1, (4, 1), Direction::Up)
        });
        assert_eq!(game.update(0.5), None);
        game.pause().unwrap();
        let before = head(&game);
        for _ in 0..3 {
            assert_eq!(game.update(5.0), None);
        }
        assert_eq!(head(&game), before);
        assert_eq!(game.timer().remaining(), 0.5);

        game.resume().unwrap();
        assert_eq!(game.update(0.25), None);
        assert!(game.update(0.25).is_some());
        assert_eq!(head(&game).coord, Coordinate::new(4, 2));
    }

    #[test]
    fn teardown_removes_tail_first_then_completes() {
        let mut game = GameController::new(GameConfig {
            teardown_interval: 0.5,
            ..config(5, 1, (2, 2), Direction::Up)
        })
        .unwrap();
        game.start_game_with(Snake::with_body(
            cell(0, 2, 2),
            Direction::Up,
            [cell(0, 2, 1), cell(0, 2, 0), cell(0, 1, 0)],
        ))
        .unwrap();
        game.turn(Direction::Down);
        game.step();
        game.drain_events();
        assert!(game.is_tearing_down());

        let mut frames = 0;
        while game.is_tearing_down() && frames < 20 {
            game.update(0.25);
            frames += 1;
        }
        assert!(!game.is_tearing_down());
        assert!(game.snake().is_none());
        assert!(game.target().is_none());

        let events = game.drain_events();
        let removed: Vec<usize> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::PartRemoved { index } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(removed, vec![2, 1, 0]);
        assert_eq!(events.last(), Some(&GameEvent::TeardownComplete));
        assert!(events.contains(&GameEvent::ViewReset));
        assert!(frames > 1);
    }

    #[test]
    fn tiny_teardown_interval_still_completes() {
        let mut game = GameController::new(GameConfig {
            teardown_interval: 1e-9,
            ..config(5, 1, (2, 2), Direction::Up)
        })
        .unwrap();
        game.start_game_with(Snake::with_body(
            cell(0, 2, 2),
            Direction::Up,
            [cell(0, 2, 1), cell(0, 2, 0), cell(0, 1, 0)],
        ))
        .unwrap();
        game.turn(Direction::Down);
        game.step();
        assert!(game.is_tearing_down());

        for _ in 0..3 {
            game.update(1.0);
        }
        assert!(!game.is_tearing_down());
        assert!(game.snake().is_none());
        assert_eq!(game.drain_events().last(), Some(&GameEvent::TeardownComplete));
    }

    #[test]
    fn restarting_finishes_a_pending_teardown() {
        let mut game = GameController::new(GameConfig {
            teardown_interval: 10.0,
            ..config(5, 1, (2, 4), Direction::Up)
        })
        .unwrap();
        game.start_game().unwrap();
        game.step();
        assert!(game.is_tearing_down());
        game.drain_events();

        game.start_game().unwrap();
        let events = game.drain_events();
        let complete = events
            .iter()
            .position(|e| *e == GameEvent::TeardownComplete)
            .unwrap();
        let started = events
            .iter()
            .position(|e| *e == GameEvent::GameStarted)
            .unwrap();
        assert!(complete < started);
        assert_eq!(game.state(), GameState::Running);
    }

    #[test]
    fn turning_is_ignored_when_idle() {
        let mut game = GameController::new(GameConfig::default()).unwrap();
        assert!(!game.turn(Direction::Left));
    }

    #[test]
    fn prepared_snake_must_fit_the_board() {
        let mut game = GameController::new(config(5, 2, (2, 2), Direction::Up)).unwrap();
        let off = Snake::new(cell(2, 0, 0), Direction::Up);
        assert_eq!(
            game.start_game_with(off),
            Err(TransitionError::SnakeOffBoard(cell(2, 0, 0)))
        );
        let overlapping = Snake::with_body(cell(1, 0, 0), Direction::Up, [cell(1, 0, 0)]);
        assert_eq!(
            game.start_game_with(overlapping),
            Err(TransitionError::SnakeOverlap(cell(1, 0, 0)))
        );
        assert_eq!(game.state(), GameState::Idle);
    }

    #[test]
    fn prepared_snake_sets_the_current_face() {
        let mut game = GameController::new(config(5, 4, (2, 2), Direction::Up)).unwrap();
        game.start_game_with(Snake::new(cell(2, 1, 1), Direction::Right)).unwrap();
        assert_eq!(game.topology().current_face(), 2);
    }

    #[test]
    fn actions_drive_the_state_machine() {
        let mut game = GameController::new(config(5, 1, (2, 2), Direction::Up)).unwrap();
        game.apply(Action::Start).unwrap();
        game.apply(Action::Turn(Direction::Right)).unwrap();
        assert_eq!(game.snake().unwrap().direction(), Direction::Right);
        game.apply(Action::Pause).unwrap();
        assert!(game.apply(Action::Pause).is_err());
        game.apply(Action::Resume).unwrap();
        game.apply(Action::Noop).unwrap();
        assert_eq!(game.state(), GameState::Running);
    }

    #[test]
    fn same_seed_same_game() {
        let run = |seed: u64| {
            let mut game = started(config(7, 4, (3, 3), Direction::Right).with_seed(seed));
            let mut targets = Vec::new();
            for i in 0..40 {
                if i % 9 == 4 {
                    game.turn(Direction::Up);
                }
                if i % 9 == 6 {
                    game.turn(Direction::Right);
                }
                game.step();
                targets.push(game.target());
            }
            (game.state_hash(), targets)
        };
        assert_eq!(run(11), run(11));
    }

    #[test]
    fn different_seeds_pick_different_targets() {
        let picks = |seed: u64| {
            let mut game = started(GameConfig::default().with_seed(seed));
            (0..10).map(|_| game.spawn_target()).collect::<Vec<_>>()
        };
        assert_ne!(picks(1), picks(2));
    }
}
