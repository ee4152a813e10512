use chatty_io::{Session, SimulationEngine, SimulationParams, StatsReport};
use std::thread;

fn replicate(seed: u64) -> (Vec<usize>, StatsReport) {
    let engine = SimulationEngine::with_seed(SimulationParams::default(), seed).expect("default params should be valid");
    let mut session = Session::with_window(engine, 2_000);
    while session.advance(25) {}
    let queue_lengths = session.history().map(|sample| sample.queue_len).collect();
    (queue_lengths, session.report())
}

#[test]
fn replications_on_separate_threads_agree() {
    let results: Vec<(Vec<usize>, StatsReport)> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| replicate(2_718_281_828))).collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("replication should not panic"))
            .collect()
    });

    let (reference_history, reference_report) = &results[0];
    assert_eq!(2_000, reference_history.len(), "every tick should be sampled");
    for (history, report) in &results[1..] {
        assert_eq!(reference_history, history, "equally seeded replications diverged");
        assert_eq!(reference_report, report, "equally seeded replications reported differently");
    }
}

#[test]
fn differently_seeded_replications_are_independent() {
    let (first, _) = replicate(1);
    let (second, _) = replicate(2);
    assert_ne!(first, second, "distinct seeds should not produce the same queue history");
}
