use cubesnake_grid::FaceStep;
use cubesnake_kernel::GameEvent;
use glam::{Quat, Vec3};

const DEFAULT_TURN_TIME: f32 = 0.3;
const DEFAULT_RESET_TIME: f32 = 0.5;
const DEFAULT_LOOK_DISTANCE: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Turn {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
}

/// Camera yaw about the ring axis, animated from game events.
///
/// Leaving a face turns the view one face over; a view reset turns it back
/// to the start by the shorter way round. Purely cosmetic: the game is only
/// affected when the driver chooses to pause while [`ViewRig::is_turning`].
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRig {
    step_degrees: f32,
    turn_time: f32,
    reset_time: f32,
    look_distance: f32,
    yaw: f32,
    turn: Option<Turn>,
}

impl ViewRig {
    pub fn new(face_count: usize) -> Self {
        Self {
            step_degrees: 360.0 / face_count.max(1) as f32,
            turn_time: DEFAULT_TURN_TIME,
            reset_time: DEFAULT_RESET_TIME,
            look_distance: DEFAULT_LOOK_DISTANCE,
            yaw: 0.0,
            turn: None,
        }
    }

    /// Seconds for a face turn and for the reset turn.
    pub fn with_timing(mut self, turn_time: f32, reset_time: f32) -> Self {
        self.turn_time = turn_time.max(0.0);
        self.reset_time = reset_time.max(0.0);
        self
    }

    pub fn with_look_distance(mut self, distance: f32) -> Self {
        self.look_distance = distance;
        self
    }

    /// Current yaw in degrees.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn is_turning(&self) -> bool {
        self.turn.is_some()
    }

    /// Camera position: outside the ring, facing the face under the yaw.
    pub fn eye(&self) -> Vec3 {
        Quat::from_rotation_z(self.yaw.to_radians()) * Vec3::Y * self.look_distance
    }

    /// React to one game event. Events other than face changes and view
    /// resets are ignored.
    pub fn observe(&mut self, event: &GameEvent) {
        match event {
            GameEvent::FaceChanged { step, .. } => {
                let delta = match step {
                    FaceStep::Advance => -self.step_degrees,
                    FaceStep::Retreat => self.step_degrees,
                };
                let base = self.turn.map_or(self.yaw, |t| t.to);
                self.start_turn(base + delta, self.turn_time);
            }
            GameEvent::ViewReset => {
                let yaw = wrap_degrees(self.yaw);
                self.yaw = yaw;
                self.start_turn(0.0, self.reset_time);
            }
            _ => {}
        }
    }

    /// Advance the animation. Returns true on the frame a turn finishes.
    pub fn update(&mut self, dt: f32) -> bool {
        let Some(turn) = self.turn.as_mut() else {
            return false;
        };
        turn.elapsed += dt;
        if turn.elapsed >= turn.duration {
            self.yaw = wrap_degrees(turn.to);
            self.turn = None;
            tracing::trace!(yaw = self.yaw, "view turn finished");
            return true;
        }
        let t = turn.elapsed / turn.duration;
        self.yaw = turn.from + (turn.to - turn.from) * t;
        false
    }

    fn start_turn(&mut self, to: f32, duration: f32) {
        if duration <= 0.0 {
            self.yaw = wrap_degrees(to);
            self.turn = None;
            return;
        }
        self.turn = Some(Turn {
            from: self.yaw,
            to,
            elapsed: 0.0,
            duration,
        });
    }
}

/// Map an angle into `(-180, 180]`.
fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 { wrapped - 360.0 } else { wrapped }
}
