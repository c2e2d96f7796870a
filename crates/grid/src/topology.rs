use std::collections::HashSet;

use cubesnake_common::{Cell, Coordinate, FaceIndex};
use glam::Vec3;

use crate::grid::{FaceStep, Grid, GridError};

/// A closed ring of equally sized grids.
///
/// Face `i` is rotated by `-360 / face_count * i` degrees about the shared
/// Z axis and pushed out along its normal, so walking off the right edge of
/// one face lands on the left edge of the next. Placement is fixed once
/// built; only the active face index changes.
#[derive(Debug, Clone)]
pub struct FaceTopology {
    grids: Vec<Grid>,
    current: FaceIndex,
}

impl FaceTopology {
    pub fn new(grid_size: i32, cell_size: f32, face_count: usize) -> Self {
        assert!(face_count > 0, "face_count must be positive");
        let step = -360.0 / face_count as f32;
        let distance = ((grid_size + 1) / 2) as f32 * cell_size;
        let grids = (0..face_count)
            .map(|i| {
                let mut grid = Grid::new(grid_size, cell_size);
                grid.rotate_points(step * i as f32);
                grid.translate_points(distance);
                grid
            })
            .collect();
        Self { grids, current: 0 }
    }

    pub fn face_count(&self) -> usize {
        self.grids.len()
    }

    pub fn grid_size(&self) -> i32 {
        self.grids[0].size()
    }

    /// Total number of cells across all faces.
    pub fn cell_count(&self) -> usize {
        let side = self.grid_size() as usize;
        side * side * self.face_count()
    }

    pub fn current_face(&self) -> FaceIndex {
        self.current
    }

    pub fn grid(&self, face: FaceIndex) -> Option<&Grid> {
        self.grids.get(face)
    }

    pub fn current_grid(&self) -> &Grid {
        &self.grids[self.current]
    }

    pub fn advance_face(&mut self) {
        self.current = (self.current + 1) % self.grids.len();
    }

    pub fn retreat_face(&mut self) {
        let n = self.grids.len();
        self.current = (self.current + n - 1) % n;
    }

    /// Make `face` the active one, e.g. face 0 for a fresh game.
    pub fn set_current_face(&mut self, face: FaceIndex) -> Result<(), GridError> {
        if face >= self.grids.len() {
            return Err(GridError::UnknownFace {
                face,
                face_count: self.grids.len(),
            });
        }
        self.current = face;
        Ok(())
    }

    pub fn apply_step(&mut self, step: FaceStep) {
        match step {
            FaceStep::Advance => self.advance_face(),
            FaceStep::Retreat => self.retreat_face(),
        }
    }

    /// Face the current one would become after `step`, without moving.
    pub fn neighbour(&self, step: FaceStep) -> FaceIndex {
        let n = self.grids.len();
        match step {
            FaceStep::Advance => (self.current + 1) % n,
            FaceStep::Retreat => (self.current + n - 1) % n,
        }
    }

    /// Wrap `coord` across the X edge of the current face and switch faces.
    pub fn cross_border(&mut self, coord: Coordinate) -> Coordinate {
        let crossing = self.current_grid().wrap_border(coord);
        if let Some(step) = crossing.step {
            self.apply_step(step);
        }
        crossing.coord
    }

    pub fn position(&self, cell: Cell) -> Result<Vec3, GridError> {
        self.grids
            .get(cell.face)
            .ok_or(GridError::UnknownFace {
                face: cell.face,
                face_count: self.grids.len(),
            })?
            .position(cell.coord)
    }

    /// Every in-bounds cell not in `occupied`, face-major then row-major.
    ///
    /// When `head` is given it is appended last even if occupied, making the
    /// head's own cell eligible for a target.
    pub fn free_cells(&self, occupied: &HashSet<Cell>, head: Option<Cell>) -> Vec<Cell> {
        let size = self.grid_size();
        let mut cells: Vec<Cell> = (0..self.grids.len())
            .flat_map(|face| {
                (0..size).flat_map(move |y| {
                    (0..size).map(move |x| Cell::new(face, Coordinate::new(x, y)))
                })
            })
            .filter(|cell| !occupied.contains(cell))
            .collect();
        cells.extend(head);
        cells
    }
}
