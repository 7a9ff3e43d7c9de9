use proptest::prelude::*;
use reelspin_core::{
    wrap_decrement, MachineConfig, PositionSeed, Recorder, ReelAnimator, ResultReporter,
    ResultTier, Track, TrackSet, LANES,
};

fn star_config() -> MachineConfig {
    MachineConfig {
        tracks: TrackSet::uniform(Track::with_filler("★", "x", 5)),
        ..MachineConfig::default()
    }
}

fn stop_all(m: &mut ReelAnimator) {
    for lane in 0..LANES {
        m.stop(lane).unwrap();
    }
}

#[test]
fn aligned_stars_hit_jackpot() {
    let mut m = ReelAnimator::new(star_config(), [0.0, 0.0, 0.0]).unwrap();
    stop_all(&mut m);
    let mut s = Recorder::new();
    let out = m.tick(&mut s).outcome.unwrap();
    assert_eq!(out.spread, 0.0);
    assert_eq!(out.tier, ResultTier::Jackpot);
    assert_eq!(s.guide_lines(), vec![50.0, 50.0, 50.0]);
    assert!(m.snapshot().all_stopped());
}

#[test]
fn one_symbol_offset_is_a_miss() {
    let mut m = ReelAnimator::new(star_config(), [0.0, 100.0, 0.0]).unwrap();
    stop_all(&mut m);
    let mut s = Recorder::new();
    let out = m.tick(&mut s).outcome.unwrap();
    assert_eq!(out.spread, 100.0);
    assert_eq!(out.tier, ResultTier::Miss);
}

#[test]
fn partial_stop_does_not_scan() {
    let mut m = ReelAnimator::new(star_config(), [0.0, 0.0, 0.0]).unwrap();
    m.stop(0).unwrap();
    let mut s = Recorder::new();
    for _ in 0..10 {
        let report = m.tick(&mut s);
        assert!(report.outcome.is_none());
        assert!(s.guide_lines().is_empty());
    }
    assert_eq!(m.reels()[0].position, 0.0);
    assert_eq!(m.reels()[1].position, 550.0);
    assert!(!m.snapshot().all_stopped());
}

#[test]
fn lane_without_target_scores_nothing() {
    let config = MachineConfig {
        tracks: TrackSet::uniform(Track::with_filler("★", "x", 9)),
        ..MachineConfig::default()
    };
    let mut m = ReelAnimator::new(config, [0.0, 500.0, 0.0]).unwrap();
    stop_all(&mut m);
    let mut s = Recorder::new();
    let report = m.tick(&mut s);
    assert!(report.outcome.is_none());
    // lanes 0 and 2 still get their lines
    assert_eq!(s.guide_lines(), vec![50.0, 50.0]);
    assert!(m.last_outcome().is_none());
}

#[test]
fn stop_is_idempotent() {
    let mut once = ReelAnimator::new(star_config(), [10.0, 20.0, 30.0]).unwrap();
    let mut twice = once.clone();
    assert!(once.stop(1).unwrap());
    assert!(twice.stop(1).unwrap());
    assert!(!twice.stop(1).unwrap());
    assert_eq!(once.snapshot(), twice.snapshot());
}

#[test]
fn scan_reruns_every_frame_but_reports_once() {
    let mut m = ReelAnimator::new(star_config(), [0.0, 10.0, 0.0]).unwrap();
    stop_all(&mut m);
    let mut s = Recorder::new();
    let mut reporter = ResultReporter::default();
    let mut published = 0;
    for _ in 0..5 {
        let report = m.tick(&mut s);
        assert_eq!(s.guide_lines().len(), 3);
        if reporter.observe(report.outcome.as_ref()).is_some() {
            published += 1;
        }
    }
    assert_eq!(published, 1);
    assert_eq!(reporter.published().map(|o| o.tier), Some(ResultTier::Close));
    assert_eq!(m.snapshot().frame, 5);
}

#[test]
fn seeded_runs_repeat() {
    let seed = PositionSeed::new("demo", 42);
    let a = ReelAnimator::seeded(MachineConfig::default(), &seed).unwrap();
    let b = ReelAnimator::seeded(MachineConfig::default(), &seed).unwrap();
    assert_eq!(a.snapshot(), b.snapshot());
}

proptest! {
    #[test]
    fn position_stays_on_track(p in 0.0f64..600.0, s in 0.0f64..5000.0) {
        let next = wrap_decrement(p, s, 600.0);
        prop_assert!((0.0..600.0).contains(&next));
    }

    #[test]
    fn ticks_keep_every_lane_in_range(
        start in prop::array::uniform3(0.0f64..600.0),
        speeds in prop::array::uniform3(0.0f64..1500.0),
        ticks in 1usize..50,
    ) {
        let config = MachineConfig { speeds, ..MachineConfig::default() };
        let mut m = ReelAnimator::new(config, start).unwrap();
        let mut s = Recorder::new();
        for _ in 0..ticks {
            m.tick(&mut s);
            for reel in m.reels() {
                prop_assert!((0.0..600.0).contains(&reel.position));
            }
        }
    }
}
