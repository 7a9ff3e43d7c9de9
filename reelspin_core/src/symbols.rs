use reelspin_shared::{ReelError, ReelResult};
use serde::{Deserialize, Serialize};

pub const LANES: usize = 3;

/// One lane's cyclic strip of glyphs. Index 0 holds the target glyph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Track(pub Vec<String>);

impl Track {
    /// Target glyph at index 0 followed by `fillers` copies of `filler`.
    pub fn with_filler(target: &str, filler: &str, fillers: usize) -> Self {
        let mut glyphs = Vec::with_capacity(fillers + 1);
        glyphs.push(target.to_string());
        glyphs.extend(std::iter::repeat(filler.to_string()).take(fillers));
        Self(glyphs)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Glyph at any integer index, wrapping in both directions.
    pub fn glyph(&self, index: i64) -> &str {
        let idx = index.rem_euclid(self.0.len() as i64) as usize;
        &self.0[idx]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct TrackSet(pub [Track; LANES]);

impl TrackSet {
    pub fn default_party() -> Self {
        Self([
            Track::with_filler("🎉", "🍒", 5),
            Track::with_filler("🎉", "🍭", 5),
            Track::with_filler("🎉", "🍇", 5),
        ])
    }

    /// Same strip on every lane.
    pub fn uniform(track: Track) -> Self {
        Self([track.clone(), track.clone(), track])
    }

    pub fn lane(&self, lane: usize) -> &Track {
        &self.0[lane]
    }

    pub fn target(&self) -> &str {
        &self.0[0].0[0]
    }

    pub fn symbol_count(&self) -> usize {
        self.0[0].len()
    }

    pub fn validate(&self) -> ReelResult<()> {
        let count = self.symbol_count();
        if count == 0 {
            return Err(ReelError::InvalidTracks("lane 0 track is empty".into()));
        }
        let target = self.target();
        for (lane, track) in self.0.iter().enumerate() {
            if track.len() != count {
                return Err(ReelError::InvalidTracks(format!(
                    "lane {lane} has {} symbols, expected {count}",
                    track.len()
                )));
            }
            if track.0[0] != target {
                return Err(ReelError::InvalidTracks(format!(
                    "lane {lane} does not start with target glyph {target}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for TrackSet {
    fn default() -> Self {
        Self::default_party()
    }
}
