//! Compares the same chatty workload against three admission-buffer
//! sizes, each run on its own thread.
//!
//! Every configuration is handed the same seed, so all three engines
//! start from identical random streams. This is the common random
//! numbers idea from design of experiments: rather than rolling a fresh
//! workload per configuration, the differences in the output mostly
//! come from the configuration itself. The streams do drift apart once
//! one configuration dispatches a sub-request that another rejects, so
//! the pairing is approximate, and the results should be read as paired
//! observations rather than independent ones.
//!
//! A larger buffer turns rejections into waiting; with chatty clients
//! it mostly delays the point at which the buffer fills.

use chatty_io::{SimulationEngine, SimulationParams, StatsReport};
use std::thread;

fn run_sim(seed: u64, buffer_size: usize) -> StatsReport {
    let params = SimulationParams::default().with_buffer_size(buffer_size);
    let mut engine = SimulationEngine::with_seed(params, seed).expect("params should be valid");
    engine.run_to_end();
    engine.report()
}

fn main() {
    chatty_io::logging::init_logging_with_level("warn");

    let seed: u64 = rand::random();
    let handles: Vec<_> = [10, 30, 120]
        .into_iter()
        .map(|buffer_size| (buffer_size, thread::spawn(move || run_sim(seed, buffer_size))))
        .collect();

    println!("Comparing buffer sizes using the seed {}:", seed);
    for (buffer_size, handle) in handles {
        let report = handle.join().expect("thread should return normally");
        println!(
            "buffer {:>3}: {} of {} sub-requests rejected ({:.1}%), {} processed, utilization {:.1}%",
            buffer_size,
            report.rejected_sub_requests,
            report.total_sub_requests,
            report.rejection_probability,
            report.processed_requests,
            report.average_utilization,
        );
    }
}
