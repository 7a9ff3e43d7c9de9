use reelspin_shared::{LaneSnapshot, MachineSnapshot, Outcome, ReelError, ReelResult};

use crate::{
    config::MachineConfig,
    layout::Layout,
    reel::Reel,
    rng::PositionSeed,
    surface::Surface,
    symbols::LANES,
};

#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub frame: u64,
    /// Present on every frame once all lanes have stopped and each shows a target glyph.
    pub outcome: Option<Outcome>,
}

/// Owns the three reels and drives them one display frame at a time.
#[derive(Debug, Clone)]
pub struct ReelAnimator {
    config: MachineConfig,
    reels: [Reel; LANES],
    frame: u64,
    last_outcome: Option<Outcome>,
}

impl ReelAnimator {
    /// Start positions are folded into the track; every lane starts spinning.
    pub fn new(config: MachineConfig, positions: [f64; LANES]) -> ReelResult<Self> {
        config.validate()?;
        let track_length = config.track_length();
        let mut reels = [Reel::new(0.0, 0.0); LANES];
        for (lane, reel) in reels.iter_mut().enumerate() {
            let p = positions[lane];
            if !p.is_finite() {
                return Err(ReelError::InvalidConfig(format!(
                    "start position for lane {lane} is {p}"
                )));
            }
            let p = p.rem_euclid(track_length);
            *reel = Reel::new(if p < track_length { p } else { 0.0 }, config.speeds[lane]);
        }
        tracing::debug!(?positions, track_length, "reels initialised");
        Ok(Self {
            config,
            reels,
            frame: 0,
            last_outcome: None,
        })
    }

    pub fn seeded(config: MachineConfig, seed: &PositionSeed) -> ReelResult<Self> {
        let p = seed.positions(LANES, config.track_length());
        Self::new(config, [p[0], p[1], p[2]])
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.config.layout
    }

    pub fn reels(&self) -> &[Reel; LANES] {
        &self.reels
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn track_length(&self) -> f64 {
        self.config.track_length()
    }

    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    /// Returns `Ok(true)` if the lane was spinning, `Ok(false)` if it had already stopped.
    pub fn stop(&mut self, lane: usize) -> ReelResult<bool> {
        let reel = self
            .reels
            .get_mut(lane)
            .ok_or(ReelError::LaneOutOfRange { lane, lanes: LANES })?;
        let stopped = reel.stop();
        if stopped {
            tracing::info!(lane, position = reel.position, "lane stopped");
        }
        Ok(stopped)
    }

    pub fn any_spinning(&self) -> bool {
        self.reels.iter().any(Reel::is_spinning)
    }

    pub fn all_stopped(&self) -> bool {
        !self.any_spinning()
    }

    /// New canvas size; takes effect on the next tick.
    pub fn resize(&mut self, width: f64, height: f64) -> ReelResult<()> {
        self.config.layout.fit(width, height)?;
        tracing::debug!(width, height, offset_x = self.config.layout.offset_x(), "resized");
        Ok(())
    }

    pub fn advance(&mut self) {
        let track_length = self.track_length();
        for reel in self.reels.iter_mut() {
            reel.advance(track_length);
        }
    }

    /// Clear the surface and paint every visible band of every lane.
    pub fn render<S: Surface>(&self, surface: &mut S) {
        let layout = &self.config.layout;
        surface.clear(layout.canvas_width, layout.canvas_height);
        for (lane, reel) in self.reels.iter().enumerate() {
            let track = self.config.tracks.lane(lane);
            let x = layout.lane_center_x(lane);
            for band in layout.visible_bands() {
                let glyph = track.glyph(layout.band_symbol(band, reel.position));
                let y = layout.band_top(band, reel.position) + layout.symbol_height / 2.0;
                surface.draw_glyph(glyph, x, y);
            }
        }
    }

    /// Guide line through every visible target glyph; returns the vertical spread.
    ///
    /// Does nothing while any lane is still spinning. Lines are drawn for every match,
    /// but the spread is `None` unless each lane shows at least one target glyph.
    pub fn match_scan<S: Surface>(&self, surface: &mut S) -> Option<f64> {
        if self.any_spinning() {
            return None;
        }
        let layout = &self.config.layout;
        let target = self.config.tracks.target();
        let mut bounds: Option<(f64, f64)> = None;
        let mut every_lane = true;
        for (lane, reel) in self.reels.iter().enumerate() {
            let track = self.config.tracks.lane(lane);
            let mut matched = false;
            for band in layout.visible_bands() {
                let index = layout.band_symbol(band, reel.position);
                let glyph = track.glyph(index);
                tracing::trace!(lane, band, index, glyph, target, "scan");
                if glyph != target {
                    continue;
                }
                matched = true;
                let y = layout.band_top(band, reel.position) + layout.symbol_height / 2.0;
                surface.draw_guide_line(y, layout.canvas_width);
                bounds = Some(match bounds {
                    Some((lo, hi)) => (lo.min(y), hi.max(y)),
                    None => (y, y),
                });
            }
            if !matched {
                tracing::debug!(lane, "no target glyph in view");
                every_lane = false;
            }
        }
        bounds
            .filter(|_| every_lane)
            .map(|(lo, hi)| hi - lo)
    }

    /// One display frame: advance spinning lanes, redraw, and rescan once all have stopped.
    pub fn tick<S: Surface>(&mut self, surface: &mut S) -> TickReport {
        self.advance();
        self.render(surface);
        let outcome = self
            .match_scan(surface)
            .map(|spread| self.config.results.classify(spread));
        self.frame += 1;
        if outcome.is_some() {
            self.last_outcome = outcome.clone();
        }
        TickReport {
            frame: self.frame,
            outcome,
        }
    }

    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot {
            frame: self.frame,
            lanes: self
                .reels
                .iter()
                .enumerate()
                .map(|(lane, r)| LaneSnapshot {
                    lane,
                    position: r.position,
                    spinning: r.is_spinning(),
                })
                .collect(),
            outcome: self.last_outcome.clone(),
        }
    }
}
