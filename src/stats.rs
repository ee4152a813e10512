use serde::Serialize;

/// Running counters of a simulation. All of them only ever grow.
///
/// `total_sub_requests` counts every admission attempt, admitted or rejected, so
/// `total_sub_requests == admitted_sub_requests() + rejected_sub_requests` holds after every tick.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimulationStats {
    /// Primary (logical) requests generated.
    pub generated_requests: u64,
    /// Primary requests that fanned out into several sub-requests.
    pub chatty_requests: u64,
    /// Sub-requests offered to the admission buffer.
    pub total_sub_requests: u64,
    /// Sub-requests handed to a server.
    pub processed_requests: u64,
    /// Sub-requests turned away by a full buffer.
    pub rejected_sub_requests: u64,
}

impl SimulationStats {
    /// Sub-requests that made it into the buffer.
    pub fn admitted_sub_requests(&self) -> u64 {
        self.total_sub_requests - self.rejected_sub_requests
    }
}
