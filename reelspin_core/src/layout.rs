use reelspin_shared::{ReelError, ReelResult};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::symbols::LANES;

/// Upper bound on `reel_height / symbol_height`, which sets the per-lane draw count.
pub const MAX_BANDS_PER_REEL: f64 = 256.0;

/// Pixel metrics of the drawing surface and the reels placed on it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Layout {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub reel_width: f64,
    pub reel_height: f64,
    pub symbol_height: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            canvas_width: 600.0,
            canvas_height: 400.0,
            reel_width: 150.0,
            reel_height: 400.0,
            symbol_height: 100.0,
        }
    }
}

impl Layout {
    pub fn validate(&self) -> ReelResult<()> {
        let fields = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("reel_width", self.reel_width),
            ("reel_height", self.reel_height),
            ("symbol_height", self.symbol_height),
        ];
        for (name, v) in fields {
            if !v.is_finite() || v <= 0.0 {
                return Err(ReelError::InvalidLayout(format!(
                    "{name} must be positive, got {v}"
                )));
            }
        }
        let ratio = self.reel_height / self.symbol_height;
        if ratio > MAX_BANDS_PER_REEL {
            return Err(ReelError::InvalidLayout(format!(
                "reel_height / symbol_height is {ratio}, at most {MAX_BANDS_PER_REEL} allowed"
            )));
        }
        Ok(())
    }

    /// Left edge of lane 0; reels are centred on the canvas.
    pub fn offset_x(&self) -> f64 {
        (self.canvas_width - self.reel_width * LANES as f64) / 2.0
    }

    /// Horizontal centre of a lane, where its glyphs are drawn.
    pub fn lane_center_x(&self, lane: usize) -> f64 {
        self.offset_x() + lane as f64 * self.reel_width + self.reel_width / 2.0
    }

    /// Band indices drawn each frame: one above the reel plus enough to cover it.
    pub fn visible_bands(&self) -> RangeInclusive<i64> {
        -1..=(self.reel_height / self.symbol_height).ceil() as i64
    }

    pub fn track_length(&self, symbol_count: usize) -> f64 {
        symbol_count as f64 * self.symbol_height
    }

    /// Top edge of band `band` for a reel scrolled to `position`.
    pub fn band_top(&self, band: i64, position: f64) -> f64 {
        band as f64 * self.symbol_height - position.rem_euclid(self.symbol_height)
    }

    /// Track index shown in band `band`, before wraparound.
    pub fn band_symbol(&self, band: i64, position: f64) -> i64 {
        ((position + band as f64 * self.symbol_height) / self.symbol_height).floor() as i64
    }

    /// Adopt a new canvas size. Symbol metrics stay fixed.
    pub fn fit(&mut self, width: f64, height: f64) -> ReelResult<()> {
        let next = Self {
            canvas_width: width,
            canvas_height: height,
            ..*self
        };
        next.validate()?;
        *self = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_spans_six_bands() {
        let l = Layout::default();
        assert_eq!(l.visible_bands(), -1..=4);
        assert_eq!(l.offset_x(), 75.0);
        assert_eq!(l.lane_center_x(1), 300.0);
    }

    #[test]
    fn band_geometry_follows_position() {
        let l = Layout::default();
        assert_eq!(l.band_top(0, 130.0), -30.0);
        assert_eq!(l.band_symbol(0, 130.0), 1);
        assert_eq!(l.band_symbol(-1, 50.0), -1);
    }

    #[test]
    fn rejects_too_many_bands() {
        let tiny = Layout {
            symbol_height: 1e-12,
            ..Layout::default()
        };
        assert!(matches!(tiny.validate(), Err(ReelError::InvalidLayout(_))));
        let edge = Layout {
            symbol_height: 400.0 / MAX_BANDS_PER_REEL,
            ..Layout::default()
        };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn fit_rejects_degenerate_canvas() {
        let mut l = Layout::default();
        assert!(l.fit(0.0, 300.0).is_err());
        assert_eq!(l.canvas_width, 600.0);
        l.fit(900.0, 500.0).unwrap();
        assert_eq!(l.offset_x(), 225.0);
    }
}
