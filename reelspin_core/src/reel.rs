use serde::{Deserialize, Serialize};

/// Scroll state of a single lane.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Reel {
    pub position: f64,
    pub speed: f64,
    spinning: bool,
}

impl Reel {
    pub fn new(position: f64, speed: f64) -> Self {
        Self {
            position,
            speed,
            spinning: true,
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    /// Returns true only on the spinning -> stopped transition.
    pub fn stop(&mut self) -> bool {
        std::mem::replace(&mut self.spinning, false)
    }

    /// Scroll one step up the track, keeping `position` in `[0, track_length)`.
    pub fn advance(&mut self, track_length: f64) {
        if !self.spinning {
            return;
        }
        self.position = wrap_decrement(self.position, self.speed, track_length);
    }
}

/// `(position - step) mod track_length` by subtract-and-correct.
pub fn wrap_decrement(position: f64, step: f64, track_length: f64) -> f64 {
    let mut next = position - step % track_length;
    if next < 0.0 {
        next += track_length;
    }
    // a tiny negative plus track_length can round up to track_length itself
    if next >= track_length {
        next -= track_length;
    }
    next
}
