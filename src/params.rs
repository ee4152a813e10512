use crate::{Error, Result};

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A closed range of whole ticks or counts, inclusive on both ends.
///
/// Used for the gap between arrivals, the service time of a single sub-request, and the number of sub-requests a chatty
/// request fans out into. An [`Interval`] with `min == max` is a constant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// Smallest value that may be drawn.
    pub min: u64,
    /// Largest value that may be drawn.
    pub max: u64,
}

impl Interval {
    /// Construct an interval without checking its bounds. [`SimulationParams::validate()`] performs the checks.
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// An interval holding exactly one value.
    pub const fn constant(value: u64) -> Self {
        Self::new(value, value)
    }

    fn check(&self, name: &'static str, least: u64) -> Result<()> {
        if self.min > self.max {
            return Err(Error::EmptyInterval {
                name,
                min: self.min,
                max: self.max,
            });
        }
        check_at_least(name, self.min, least)
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

fn check_at_least(name: &'static str, value: u64, min: u64) -> Result<()> {
    if value < min {
        return Err(Error::BelowMinimum { name, value, min });
    }
    Ok(())
}

/// Immutable inputs of a single simulation run.
///
/// The defaults reproduce the reference dashboard's initial controls: a 2000-tick run, arrivals every 3 to 12 ticks,
/// 70% of requests chatty with 5 to 15 sub-requests each, 4 to 12 ticks of service plus 15 ticks of network latency per
/// sub-request, four servers and room for thirty queued sub-requests.
///
/// Deserializing fills any missing field from [`Default`], so a configuration file only needs to name what it changes:
///
/// ```
/// # use chatty_io::SimulationParams;
/// let params: SimulationParams = serde_json::from_str(r#"{ "num_servers": 8 }"#).unwrap();
/// assert_eq!(8, params.num_servers);
/// assert_eq!(30, params.buffer_size);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Number of ticks the run lasts.
    pub total_time: u64,
    /// Gap between consecutive primary requests.
    pub arrival_interval: Interval,
    /// Probability that a primary request is chatty.
    pub prob_chatty: f64,
    /// Processing time of one sub-request, before latency.
    pub service_time: Interval,
    /// Ticks added to the service time of every sub-request.
    pub network_latency: u64,
    /// Size of the server pool.
    pub num_servers: usize,
    /// Capacity of the admission buffer.
    pub buffer_size: usize,
    /// Number of sub-requests a chatty request expands into.
    pub chatty_range: Interval,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            total_time: 2000,
            arrival_interval: Interval::new(3, 12),
            prob_chatty: 0.7,
            service_time: Interval::new(4, 12),
            network_latency: 15,
            num_servers: 4,
            buffer_size: 30,
            chatty_range: Interval::new(5, 15),
        }
    }
}

impl SimulationParams {
    /// Set the number of ticks the run lasts.
    pub fn with_total_time(mut self, total_time: u64) -> Self {
        self.total_time = total_time;
        self
    }

    /// Set the closed range of gaps between primary requests.
    pub fn with_arrival_interval(mut self, min: u64, max: u64) -> Self {
        self.arrival_interval = Interval::new(min, max);
        self
    }

    /// Set the probability that a primary request is chatty.
    pub fn with_prob_chatty(mut self, prob_chatty: f64) -> Self {
        self.prob_chatty = prob_chatty;
        self
    }

    /// Set the closed range of per-sub-request processing times.
    pub fn with_service_time(mut self, min: u64, max: u64) -> Self {
        self.service_time = Interval::new(min, max);
        self
    }

    /// Set the ticks added to every sub-request's service time.
    pub fn with_network_latency(mut self, network_latency: u64) -> Self {
        self.network_latency = network_latency;
        self
    }

    /// Set the size of the server pool.
    pub fn with_servers(mut self, num_servers: usize) -> Self {
        self.num_servers = num_servers;
        self
    }

    /// Set the capacity of the admission buffer.
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Set the closed range of sub-requests a chatty request fans out into.
    pub fn with_chatty_range(mut self, min: u64, max: u64) -> Self {
        self.chatty_range = Interval::new(min, max);
        self
    }

    /// Check every bound the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, checking fields in declaration order:
    ///
    /// * [`Error::BelowMinimum`] for a zero `total_time`, `num_servers` or `buffer_size`, an interval whose lower bound
    ///   is below 1 (arrivals and service) or below 2 (chatty fan-out).
    /// * [`Error::EmptyInterval`] for an interval with `min > max`.
    /// * [`Error::InvalidProbability`] for a `prob_chatty` that is NaN or outside `[0, 1]`.
    /// * [`Error::TickOverflow`] when the longest job (`service_time.max + network_latency`), the latest possible
    ///   arrival time, or the busy ticks a server can book would not fit in a `u64`.
    pub fn validate(&self) -> Result<()> {
        check_at_least("total_time", self.total_time, 1)?;
        self.arrival_interval.check("arrival_interval", 1)?;
        if !(0.0..=1.0).contains(&self.prob_chatty) {
            return Err(Error::InvalidProbability(self.prob_chatty));
        }
        self.service_time.check("service_time", 1)?;
        check_at_least("num_servers", self.num_servers as u64, 1)?;
        check_at_least("buffer_size", self.buffer_size as u64, 1)?;
        self.chatty_range.check("chatty_range", 2)?;
        self.check_tick_arithmetic()
    }

    /// The latest arrival is scheduled before `total_time` plus one gap, and a server never books more than the run
    /// length plus one job.
    fn check_tick_arithmetic(&self) -> Result<()> {
        let longest_job = self
            .service_time
            .max
            .checked_add(self.network_latency)
            .ok_or(Error::TickOverflow { name: "network_latency" })?;
        self.total_time
            .checked_add(self.arrival_interval.max)
            .ok_or(Error::TickOverflow { name: "arrival_interval" })?;
        self.total_time
            .checked_add(longest_job)
            .ok_or(Error::TickOverflow { name: "service_time" })?;
        Ok(())
    }
}
