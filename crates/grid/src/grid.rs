use cubesnake_common::{Coordinate, FaceIndex};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Errors from grid and topology position lookups.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("coordinate {coord} is outside the {size}x{size} grid")]
    OutOfBounds { coord: Coordinate, size: i32 },
    #[error("face {face} does not exist (ring has {face_count} faces)")]
    UnknownFace { face: FaceIndex, face_count: usize },
}

/// Which way the active face moves when the X border is crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceStep {
    /// Past `x = size - 1`, onto the next face.
    Advance,
    /// Past `x = 0`, onto the previous face.
    Retreat,
}

/// Outcome of wrapping a coordinate across the X border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crossing {
    pub coord: Coordinate,
    pub step: Option<FaceStep>,
}

/// One square face of the play field.
///
/// Holds the lattice and its world-space placement only. The X edges are
/// portals to the neighbouring faces; the Y edges are walls.
#[derive(Debug, Clone)]
pub struct Grid {
    size: i32,
    cell_size: f32,
    normal: Vec3,
    points: Vec<Vec3>,
}

impl Grid {
    /// Create a `size x size` grid centred at the origin.
    pub fn new(size: i32, cell_size: f32) -> Self {
        let mut grid = Self {
            size: 0,
            cell_size: 0.0,
            normal: Vec3::Y,
            points: Vec::new(),
        };
        grid.initialize(size, cell_size);
        grid
    }

    /// (Re)build the position table. Discards any earlier placement.
    pub fn initialize(&mut self, size: i32, cell_size: f32) {
        assert!(size > 0, "grid size must be positive");
        self.size = size;
        self.cell_size = cell_size;
        self.normal = Vec3::Y;

        let half = size / 2;
        self.points = (0..size)
            .flat_map(|y| (0..size).map(move |x| (x, y)))
            .map(|(x, y)| {
                Vec3::Z * cell_size * (y - half) as f32 + Vec3::X * cell_size * (x - half) as f32
            })
            .collect();
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Outward normal of the face.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn has_point(&self, coord: Coordinate) -> bool {
        (0..self.size).contains(&coord.x) && (0..self.size).contains(&coord.y)
    }

    /// World-space centre of a cell.
    pub fn position(&self, coord: Coordinate) -> Result<Vec3, GridError> {
        if !self.has_point(coord) {
            return Err(GridError::OutOfBounds {
                coord,
                size: self.size,
            });
        }
        Ok(self.points[(coord.y * self.size + coord.x) as usize])
    }

    /// True when X has left the grid. Y never crosses, it hits a wall.
    pub fn is_crossing_border(&self, coord: Coordinate) -> bool {
        coord.x < 0 || coord.x >= self.size
    }

    /// Wrap X to the opposite edge and report the face step it implies.
    pub fn wrap_border(&self, coord: Coordinate) -> Crossing {
        if coord.x < 0 {
            Crossing {
                coord: Coordinate::new(self.size - 1, coord.y),
                step: Some(FaceStep::Retreat),
            }
        } else if coord.x >= self.size {
            Crossing {
                coord: Coordinate::new(0, coord.y),
                step: Some(FaceStep::Advance),
            }
        } else {
            Crossing { coord, step: None }
        }
    }

    /// Rotate every point and the normal about the Z axis through the origin.
    pub fn rotate_points(&mut self, angle_degrees: f32) {
        let rotation = Quat::from_rotation_z(angle_degrees.to_radians());
        self.normal = rotation * self.normal;
        for p in &mut self.points {
            *p = rotation * *p;
        }
    }

    /// Push every point along the normal.
    pub fn translate_points(&mut self, distance: f32) {
        let offset = self.normal * distance;
        for p in &mut self.points {
            *p += offset;
        }
    }
}
