use crate::{report, AdmissionBuffer, Error, RandomRange, Result, Server, SimulationParams, SimulationStats, StatsReport};

use rand_distr::Bernoulli;
use std::fmt::{Display, Formatter};
use tracing::{debug, info, trace};

/// Owns the clock, admission buffer, server pool and counters of one run, and is the only thing that mutates them.
///
/// The engine advances in fixed unit ticks. Each call to [`step()`] performs, in order:
///
/// 1. **Arrival.** If the clock has reached the next arrival time, one primary request is generated. With probability
///    `prob_chatty` it is chatty and fans out into a number of sub-requests drawn from `chatty_range`; otherwise it is
///    a single sub-request. Each sub-request is offered to the buffer and is either queued or rejected. The next
///    arrival is then scheduled a draw from `arrival_interval` ticks later.
/// 2. **Dispatch.** Servers are visited in pool order. A free server takes the oldest queued sub-request and starts a
///    job lasting a draw from `service_time` plus `network_latency`. Every server, freshly assigned or not, then
///    advances one tick.
/// 3. **Clock.** The current time moves forward by one.
///
/// The expected workflow is:
///
/// 1. Build and validate a [`SimulationParams`].
/// 2. Pass it to [`new()`] or, for a reproducible run, [`with_seed()`]. Handle any error it might return.
/// 3. Call [`step()`] until it returns `false` (or use [`run_to_end()`]), reading [`report()`], [`buffer()`] and
///    [`servers()`] between steps as often as the caller likes.
///
/// ```
/// # use chatty_io::{SimulationEngine, SimulationParams};
/// let params = SimulationParams::default().with_total_time(500);
/// let mut engine = SimulationEngine::with_seed(params, 7).unwrap();
/// while engine.step() {}
/// let report = engine.report();
/// assert_eq!(500, report.elapsed);
/// assert!(report.rejection_probability <= 100.0);
/// ```
///
/// [`new()`]: SimulationEngine::new
/// [`with_seed()`]: SimulationEngine::with_seed
/// [`step()`]: SimulationEngine::step
/// [`run_to_end()`]: SimulationEngine::run_to_end
/// [`report()`]: SimulationEngine::report
/// [`buffer()`]: SimulationEngine::buffer
/// [`servers()`]: SimulationEngine::servers
#[derive(Clone, Debug)]
pub struct SimulationEngine {
    params: SimulationParams,
    rng: RandomRange,
    chatty_trial: Bernoulli,
    current_time: u64,
    next_arrival_time: u64,
    buffer: AdmissionBuffer,
    servers: Vec<Server>,
    stats: SimulationStats,
}

impl SimulationEngine {
    /// Build an engine drawing from an unseeded random source.
    ///
    /// # Errors
    ///
    /// Returns whatever [`SimulationParams::validate()`] reports for `params`.
    pub fn new(params: SimulationParams) -> Result<Self> {
        Self::with_random_source(params, RandomRange::from_entropy())
    }

    /// Build an engine whose every draw derives from `seed`. Two engines with equal params and seeds evolve identically.
    ///
    /// # Errors
    ///
    /// Returns whatever [`SimulationParams::validate()`] reports for `params`.
    pub fn with_seed(params: SimulationParams, seed: u64) -> Result<Self> {
        Self::with_random_source(params, RandomRange::from_seed(seed))
    }

    /// Build an engine around a caller-supplied random source.
    ///
    /// The first arrival is scheduled immediately, a draw from `arrival_interval` ticks after time zero.
    ///
    /// # Errors
    ///
    /// Returns whatever [`SimulationParams::validate()`] reports for `params`.
    pub fn with_random_source(params: SimulationParams, mut rng: RandomRange) -> Result<Self> {
        params.validate()?;
        let chatty_trial = Bernoulli::new(params.prob_chatty).map_err(|_| Error::InvalidProbability(params.prob_chatty))?;
        let next_arrival_time = rng.draw(params.arrival_interval);

        info!(
            total_time = params.total_time,
            servers = params.num_servers,
            buffer_size = params.buffer_size,
            prob_chatty = params.prob_chatty,
            "simulation engine created"
        );

        Ok(Self {
            buffer: AdmissionBuffer::new(params.buffer_size),
            servers: (0..params.num_servers).map(Server::new).collect(),
            stats: SimulationStats::default(),
            current_time: 0,
            next_arrival_time,
            chatty_trial,
            rng,
            params,
        })
    }

    /// Advance the whole system by exactly one tick.
    ///
    /// Returns `false`, changing nothing, once the clock has reached `total_time`; `true` otherwise. Callers may
    /// therefore loop on this method unconditionally.
    pub fn step(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }

        if self.current_time >= self.next_arrival_time {
            self.arrive();
        }
        self.dispatch();

        self.current_time += 1;
        trace!(time = self.current_time, queue_len = self.buffer.len(), "tick complete");
        if self.is_finished() {
            info!(
                time = self.current_time,
                processed = self.stats.processed_requests,
                rejected = self.stats.rejected_sub_requests,
                "simulation finished"
            );
        }
        true
    }

    /// Step until the run is over. Returns the number of ticks advanced by this call.
    pub fn run_to_end(&mut self) -> u64 {
        let start = self.current_time;
        while self.step() {}
        self.current_time - start
    }

    /// Project the current state onto a [`StatsReport`]. Callable at any time, including before the first step.
    pub fn report(&self) -> StatsReport {
        report::report(self)
    }

    fn arrive(&mut self) {
        self.stats.generated_requests += 1;
        let sub_requests = if self.rng.trial(&self.chatty_trial) {
            self.stats.chatty_requests += 1;
            self.rng.draw(self.params.chatty_range)
        } else {
            1
        };

        let mut rejected = 0;
        for _ in 0..sub_requests {
            self.stats.total_sub_requests += 1;
            if !self.buffer.try_admit(self.current_time) {
                self.stats.rejected_sub_requests += 1;
                rejected += 1;
            }
        }
        if rejected > 0 {
            debug!(
                time = self.current_time,
                sub_requests,
                rejected,
                capacity = self.buffer.capacity(),
                "admission buffer full"
            );
        }

        self.next_arrival_time = self.current_time + self.rng.draw(self.params.arrival_interval);
    }

    fn dispatch(&mut self) {
        for server in self.servers.iter_mut() {
            if server.is_free() {
                if let Some(arrived_at) = self.buffer.pop_oldest() {
                    let duration = self.rng.draw(self.params.service_time) + self.params.network_latency;
                    server.assign(duration);
                    self.stats.processed_requests += 1;
                    trace!(
                        time = self.current_time,
                        server = %server,
                        duration,
                        waited = self.current_time - arrived_at,
                        "sub-request dispatched"
                    );
                }
            }
            server.tick();
        }
    }

    /// Get a shared reference to the parameters of this run.
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Ticks simulated so far.
    pub fn current_time(&self) -> u64 {
        self.current_time
    }

    /// Tick at which the next primary request arrives.
    pub fn next_arrival_time(&self) -> u64 {
        self.next_arrival_time
    }

    /// Whether the clock has reached `total_time`.
    pub fn is_finished(&self) -> bool {
        self.current_time >= self.params.total_time
    }

    /// Get a shared reference to the admission buffer.
    pub fn buffer(&self) -> &AdmissionBuffer {
        &self.buffer
    }

    /// The server pool, in dispatch order.
    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    /// Get a shared reference to the running counters.
    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }
}

impl Display for SimulationEngine {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Simulation at time {} of {} ({}/{} queued)",
            self.current_time,
            self.params.total_time,
            self.buffer.len(),
            self.buffer.capacity()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_server_params() -> SimulationParams {
        SimulationParams::default()
            .with_total_time(20)
            .with_servers(1)
            .with_buffer_size(1)
            .with_service_time(5, 5)
            .with_network_latency(0)
            .with_arrival_interval(1, 1)
            .with_prob_chatty(0.0)
    }

    #[test]
    fn invalid_params_never_build_an_engine() {
        let params = SimulationParams::default().with_service_time(8, 2);
        assert!(
            SimulationEngine::with_seed(params, 0).is_err(),
            "engine built from an empty service interval"
        );
    }

    #[test]
    fn first_arrival_is_drawn_from_arrival_interval() {
        let params = single_server_params().with_arrival_interval(4, 4);
        let engine = SimulationEngine::with_seed(params, 0).unwrap();
        assert_eq!(4, engine.next_arrival_time());
        assert_eq!(0, engine.current_time());
    }

    #[test]
    fn step_after_end_is_a_no_op() {
        let mut engine = SimulationEngine::with_seed(single_server_params().with_total_time(3), 5).unwrap();
        assert_eq!(3, engine.run_to_end(), "unexpected number of ticks advanced");
        let stats = engine.stats().clone();
        let queued = engine.buffer().len();

        assert!(!engine.step(), "finished engine should refuse to step");
        assert!(!engine.step());
        assert_eq!(3, engine.current_time());
        assert_eq!(&stats, engine.stats(), "stats changed after the run ended");
        assert_eq!(queued, engine.buffer().len());
        assert_eq!(0, engine.run_to_end());
    }

    #[test]
    fn assigned_server_consumes_a_tick_immediately() {
        let mut engine = SimulationEngine::with_seed(single_server_params(), 1).unwrap();
        engine.step(); // t=0, nothing arrives yet
        engine.step(); // t=1, arrival dispatched straight to the server
        let server = &engine.servers()[0];
        assert_eq!(5, server.total_busy_ticks());
        assert_eq!(4, server.remaining_ticks(), "assignment tick should count against the job");
        assert_eq!(1, engine.stats().processed_requests);
        assert!(engine.buffer().is_empty());
    }

    #[test]
    fn dispatch_prefers_lower_indexed_servers() {
        let params = single_server_params()
            .with_servers(3)
            .with_buffer_size(5)
            .with_arrival_interval(50, 50)
            .with_total_time(100);
        let mut engine = SimulationEngine::with_seed(params, 3).unwrap();
        while engine.current_time() <= 50 {
            engine.step();
        }
        let busy: Vec<bool> = engine.servers().iter().map(|s| !s.is_free()).collect();
        assert_eq!(vec![true, false, false], busy, "single sub-request should land on the first server");
    }

    #[test]
    fn latency_extends_every_job() {
        let params = single_server_params().with_network_latency(10).with_arrival_interval(1, 1);
        let mut engine = SimulationEngine::with_seed(params, 0).unwrap();
        engine.step();
        engine.step();
        assert_eq!(15, engine.servers()[0].total_busy_ticks());
    }

    #[test]
    fn overflowing_job_length_never_reaches_step() {
        let params = single_server_params()
            .with_total_time(5)
            .with_service_time(1, 1)
            .with_network_latency(u64::MAX);
        assert_eq!(
            Some(Error::TickOverflow { name: "network_latency" }),
            SimulationEngine::with_seed(params, 0).err(),
            "engine built with a job length that overflows"
        );

        let params = single_server_params()
            .with_total_time(5)
            .with_service_time(1, 1)
            .with_network_latency(u64::MAX - 1 - 5);
        let mut engine = SimulationEngine::with_seed(params, 0).unwrap();
        assert_eq!(5, engine.run_to_end(), "largest accepted latency should still run");
        assert_eq!(u64::MAX - 5, engine.servers()[0].total_busy_ticks());
    }

    #[test]
    fn display_shows_clock_and_queue() {
        let engine = SimulationEngine::with_seed(single_server_params(), 0).unwrap();
        assert_eq!("Simulation at time 0 of 20 (0/1 queued)", engine.to_string());
    }
}
