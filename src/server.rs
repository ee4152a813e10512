use std::fmt::{Display, Formatter};

/// One unit of processing capacity in the pool.
///
/// A server is free once its remaining ticks reach zero. Busy time is booked in full when a job is assigned, so
/// [`total_busy_ticks()`] may run ahead of the simulation clock while that job is still in flight; use
/// [`completed_busy_ticks()`] for the portion already served.
///
/// [`total_busy_ticks()`]: Server::total_busy_ticks
/// [`completed_busy_ticks()`]: Server::completed_busy_ticks
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Server {
    id: usize,
    remaining_ticks: u64,
    total_busy_ticks: u64,
}

impl Server {
    /// An idle server with no busy history. `id` is its position in the pool.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            remaining_ticks: 0,
            total_busy_ticks: 0,
        }
    }

    /// Position of this server in the pool.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Whether the server can take a new job this tick.
    pub fn is_free(&self) -> bool {
        self.remaining_ticks == 0
    }

    /// Ticks left on the current job; zero when free.
    pub fn remaining_ticks(&self) -> u64 {
        self.remaining_ticks
    }

    /// Cumulative duration of every job ever assigned. Never decreases.
    pub fn total_busy_ticks(&self) -> u64 {
        self.total_busy_ticks
    }

    /// Busy ticks already elapsed. Never exceeds the number of ticks the server has been advanced.
    pub fn completed_busy_ticks(&self) -> u64 {
        self.total_busy_ticks - self.remaining_ticks
    }

    /// Start a job lasting `duration` ticks.
    ///
    /// The caller must check [`is_free()`] first; assigning to a busy server would silently drop the rest of the
    /// current job.
    ///
    /// [`is_free()`]: Server::is_free
    pub fn assign(&mut self, duration: u64) {
        debug_assert!(self.is_free(), "{} assigned while busy", self);
        debug_assert!(duration > 0, "{} assigned an empty job", self);
        self.remaining_ticks = duration;
        self.total_busy_ticks += duration;
    }

    /// Advance one tick. No-op on a free server.
    pub fn tick(&mut self) {
        if self.remaining_ticks > 0 {
            self.remaining_ticks -= 1;
        }
    }
}

impl Display for Server {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Server-{}", self.id + 1)
    }
}
