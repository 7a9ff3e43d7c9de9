use serde::{Deserialize, Serialize};

/// Qualitative bucket for a spread score, best first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResultTier {
    Jackpot,
    Close,
    Near,
    Miss,
}

/// Result of a match-scan once every lane has stopped.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Outcome {
    /// Pixel distance between the topmost and bottommost guide line.
    pub spread: f64,
    pub tier: ResultTier,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LaneSnapshot {
    pub lane: usize,
    pub position: f64,
    pub spinning: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MachineSnapshot {
    pub frame: u64,
    pub lanes: Vec<LaneSnapshot>,
    pub outcome: Option<Outcome>,
}

impl MachineSnapshot {
    pub fn all_stopped(&self) -> bool {
        self.lanes.iter().all(|l| !l.spinning)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ReelError {
    #[error("lane {lane} out of range (machine has {lanes} lanes)")]
    LaneOutOfRange { lane: usize, lanes: usize },
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
    #[error("invalid track set: {0}")]
    InvalidTracks(String),
    #[error("invalid speed for lane {lane}: {speed}")]
    InvalidSpeed { lane: usize, speed: f64 },
    #[error("invalid result table: {0}")]
    InvalidResults(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type ReelResult<T> = Result<T, ReelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_serializes_snake_case() {
        let json = serde_json::to_string(&ResultTier::Jackpot).unwrap();
        assert_eq!(json, "\"jackpot\"");
    }

    #[test]
    fn snapshot_all_stopped() {
        let lane = |lane, spinning| LaneSnapshot {
            lane,
            position: 0.0,
            spinning,
        };
        let mut snap = MachineSnapshot {
            frame: 3,
            lanes: vec![lane(0, false), lane(1, true), lane(2, false)],
            outcome: None,
        };
        assert!(!snap.all_stopped());
        snap.lanes[1].spinning = false;
        assert!(snap.all_stopped());
    }

    #[test]
    fn lane_error_message() {
        let err = ReelError::LaneOutOfRange { lane: 5, lanes: 3 };
        assert_eq!(err.to_string(), "lane 5 out of range (machine has 3 lanes)");
    }
}
