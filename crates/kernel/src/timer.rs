/// Fixed-period move countdown, driven by frame time.
///
/// Fires at most once per frame. Frames that are not fed to it (paused game)
/// leave the countdown where it was.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveTimer {
    interval: f32,
    countdown: f32,
}

impl MoveTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            countdown: interval,
        }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Seconds left until the next move.
    pub fn remaining(&self) -> f32 {
        self.countdown
    }

    pub fn reset(&mut self) {
        self.countdown = self.interval;
    }

    /// Consume `dt` seconds. Returns true when a move is due.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.countdown -= dt;
        if self.countdown <= 0.0 {
            self.countdown = self.interval;
            true
        } else {
            false
        }
    }
}

/// Paces body part removal after game over.
///
/// The first removal is due immediately, then one per `interval`. An interval
/// of zero releases every part in a single frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Teardown {
    interval: f32,
    countdown: f32,
}

impl Teardown {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            countdown: 0.0,
        }
    }

    /// Number of parts that may be removed this frame.
    pub fn advance(&mut self, dt: f32) -> usize {
        if self.interval <= 0.0 {
            return usize::MAX;
        }
        let mut due = 0;
        if self.countdown <= 0.0 {
            let behind = (-self.countdown / self.interval).floor();
            due = (behind as usize).saturating_add(1);
            self.countdown += due as f32 * self.interval;
            // Intervals below the countdown's precision would never catch up.
            if self.countdown <= 0.0 {
                self.countdown = self.interval;
            }
        }
        self.countdown -= dt;
        due
    }
}
