use reelspin_core::{MachineConfig, PositionSeed, Recorder, ReelAnimator};

fn main() {
    // Spin for a while, stop the lanes one by one, then read the result
    let seed = PositionSeed::new("example-seed", 1);
    let mut machine =
        ReelAnimator::seeded(MachineConfig::default(), &seed).expect("default config is valid");
    let mut surface = Recorder::new();
    for frame in 0..180 {
        if frame % 60 == 59 {
            machine.stop(frame / 60).expect("lane in range");
        }
        machine.tick(&mut surface);
    }
    let report = machine.tick(&mut surface);
    println!(
        "seed={} nonce={} lines={:?} outcome={:?}",
        seed.seed,
        seed.nonce,
        surface.guide_lines(),
        report.outcome
    );
}
