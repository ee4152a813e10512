use crate::SimulationEngine;

use serde::Serialize;

/// Snapshot of the metrics a presentation layer displays for a run.
///
/// Every percentage floors its denominator at one, so a report taken before the first tick, or before any
/// sub-request has arrived, reads zero rather than failing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatsReport {
    /// Ticks simulated so far.
    pub elapsed: u64,
    /// Length of the run.
    pub total_time: u64,
    /// Primary (logical) requests generated.
    pub total_primary_requests: u64,
    /// Primary requests that fanned out into several sub-requests.
    pub chatty_requests: u64,
    /// Sub-requests offered to the buffer, admitted or not.
    pub total_sub_requests: u64,
    /// Sub-requests handed to a server.
    pub processed_requests: u64,
    /// Sub-requests turned away by a full buffer.
    pub rejected_sub_requests: u64,
    /// `rejected / total_sub_requests`, as a percentage.
    pub rejection_probability: f64,
    /// Booked busy ticks of each server over elapsed ticks, as a percentage, in pool order.
    pub per_server_utilization: Vec<f64>,
    /// Mean of `per_server_utilization`; zero for an empty pool.
    pub average_utilization: f64,
    /// Sub-requests waiting in the buffer.
    pub queue_len: usize,
    /// Capacity of the admission buffer.
    pub buffer_capacity: usize,
}

pub(crate) fn report(engine: &SimulationEngine) -> StatsReport {
    let stats = engine.stats();
    let elapsed = engine.current_time();

    let per_server_utilization: Vec<f64> = engine
        .servers()
        .iter()
        .map(|server| percentage(server.total_busy_ticks(), elapsed))
        .collect();

    StatsReport {
        elapsed,
        total_time: engine.params().total_time,
        total_primary_requests: stats.generated_requests,
        chatty_requests: stats.chatty_requests,
        total_sub_requests: stats.total_sub_requests,
        processed_requests: stats.processed_requests,
        rejected_sub_requests: stats.rejected_sub_requests,
        rejection_probability: percentage(stats.rejected_sub_requests, stats.total_sub_requests),
        average_utilization: mean(&per_server_utilization),
        per_server_utilization,
        queue_len: engine.buffer().len(),
        buffer_capacity: engine.buffer().capacity(),
    }
}

fn percentage(part: u64, whole: u64) -> f64 {
    part as f64 / whole.max(1) as f64 * 100.0
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
