use cubesnake_grid::{FaceTopology, GridError};
use cubesnake_kernel::GameEvent;
use glam::Vec3;

/// Errors from applying events out of order.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("no body part {index} (body has {len})")]
    MissingPart { index: usize, len: usize },
}

/// World-space copy of what the game shows, rebuilt from drained events.
///
/// Holds one position per renderable object: the head, each body part by
/// index, and the target. A scene graph or GPU backend syncs from here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneMirror {
    head: Option<Vec3>,
    parts: Vec<Vec3>,
    target: Option<Vec3>,
}

impl SceneMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn head(&self) -> Option<Vec3> {
        self.head
    }

    pub fn parts(&self) -> &[Vec3] {
        &self.parts
    }

    pub fn target(&self) -> Option<Vec3> {
        self.target
    }

    /// Number of objects currently shown.
    pub fn object_count(&self) -> usize {
        self.head.is_some() as usize + self.parts.len() + self.target.is_some() as usize
    }

    pub fn apply(&mut self, topology: &FaceTopology, event: &GameEvent) -> Result<(), SceneError> {
        match event {
            GameEvent::SnakeSpawned { head } => {
                self.head = Some(topology.position(*head)?);
                self.parts.clear();
            }
            GameEvent::HeadMoved { cell } => {
                self.head = Some(topology.position(*cell)?);
            }
            GameEvent::PartMoved { index, cell } => {
                let len = self.parts.len();
                let part = self
                    .parts
                    .get_mut(*index)
                    .ok_or(SceneError::MissingPart { index: *index, len })?;
                *part = topology.position(*cell)?;
            }
            GameEvent::PartAdded { index, cell } => {
                if *index > self.parts.len() {
                    return Err(SceneError::MissingPart {
                        index: *index,
                        len: self.parts.len(),
                    });
                }
                self.parts.insert(*index, topology.position(*cell)?);
            }
            GameEvent::PartRemoved { index } => {
                if *index >= self.parts.len() {
                    return Err(SceneError::MissingPart {
                        index: *index,
                        len: self.parts.len(),
                    });
                }
                self.parts.remove(*index);
            }
            GameEvent::SnakeRemoved => {
                self.head = None;
                self.parts.clear();
            }
            GameEvent::TargetSpawned { cell } => {
                self.target = Some(topology.position(*cell)?);
            }
            GameEvent::TargetRemoved { .. } => {
                self.target = None;
            }
            _ => {}
        }
        Ok(())
    }

    /// Apply a batch, stopping at the first event that does not fit.
    pub fn apply_all<'a>(
        &mut self,
        topology: &FaceTopology,
        events: impl IntoIterator<Item = &'a GameEvent>,
    ) -> Result<(), SceneError> {
        for event in events {
            self.apply(topology, event)?;
        }
        Ok(())
    }
}
