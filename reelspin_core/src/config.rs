use reelspin_shared::{ReelError, ReelResult};
use serde::{Deserialize, Serialize};

use crate::{
    layout::Layout,
    paytable::ResultTable,
    symbols::{TrackSet, LANES},
};

/// Everything needed to build a machine. Missing JSON fields fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    pub layout: Layout,
    /// Pixels scrolled per tick, per lane.
    pub speeds: [f64; LANES],
    pub tracks: TrackSet,
    pub results: ResultTable,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            speeds: [5.0; LANES],
            tracks: TrackSet::default(),
            results: ResultTable::default(),
        }
    }
}

impl MachineConfig {
    pub fn from_json(text: &str) -> ReelResult<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ReelError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ReelResult<()> {
        self.layout.validate()?;
        self.tracks.validate()?;
        self.results.validate()?;
        for (lane, &speed) in self.speeds.iter().enumerate() {
            if !speed.is_finite() || speed < 0.0 {
                return Err(ReelError::InvalidSpeed { lane, speed });
            }
        }
        Ok(())
    }

    pub fn track_length(&self) -> f64 {
        self.layout.track_length(self.tracks.symbol_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let c = MachineConfig::from_json(r#"{ "speeds": [3.0, 4.0, 5.0] }"#).unwrap();
        assert_eq!(c.speeds, [3.0, 4.0, 5.0]);
        assert_eq!(c.layout, Layout::default());
        assert_eq!(c.track_length(), 600.0);
    }

    #[test]
    fn rejects_negative_speed() {
        let err = MachineConfig::from_json(r#"{ "speeds": [3.0, -1.0, 5.0] }"#).unwrap_err();
        assert_eq!(err, ReelError::InvalidSpeed { lane: 1, speed: -1.0 });
    }

    #[test]
    fn rejects_empty_result_table() {
        assert!(matches!(
            MachineConfig::from_json(r#"{ "results": [] }"#),
            Err(ReelError::InvalidResults(_))
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            MachineConfig::from_json("{ speeds"),
            Err(ReelError::InvalidConfig(_))
        ));
    }
}
