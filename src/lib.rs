//! # Overview
//!
//! chatty-io models the "Chatty I/O" antipattern: a client that, instead of issuing one request per logical operation,
//! fans it out into many small sub-requests against a pool of servers guarded by a bounded queue. The crate is the
//! simulation core only. It generates arrivals, expands chatty requests, admits or rejects sub-requests at a finite
//! buffer, advances the server pool tick by tick and accumulates utilization and rejection statistics. Rendering,
//! input widgets and timing policy belong to whatever drives it.
//!
//! * A [`SimulationEngine`] owns all state of one run and advances it by exactly one tick per [`step()`]. It never
//!   sleeps, blocks or spawns work; cancelling a run simply means no longer calling [`step()`].
//! * [`SimulationEngine::report()`] is a read-only projection onto a [`StatsReport`], safe to call at any tick.
//! * A [`Session`] wraps an engine for a presentation layer, batching ticks and keeping a bounded window of queue
//!   lengths for charting.
//!
//! Time advances in fixed unit ticks. There is no event queue and no jumping between event times.
//!
//! # Reproducibility
//!
//! Each engine owns its random source. Engines built with [`SimulationEngine::with_seed()`] from equal parameters and
//! seeds produce identical tick-by-tick queue lengths and identical final statistics, whichever thread they run on,
//! so independent replications can be run side by side without coupling their outcomes.
//!
//! # Logging
//!
//! The engine reports through [`tracing`]; see [`logging`] for a ready-made subscriber.
//!
//! [`step()`]: SimulationEngine::step

mod buffer;
mod engine;
mod error;
pub mod logging;
mod params;
mod random;
mod report;
mod server;
mod session;
mod stats;

pub use buffer::{AdmissionBuffer, BufferLoad};
pub use engine::SimulationEngine;
pub use error::{Error, Result};
pub use params::{Interval, SimulationParams};
pub use random::RandomRange;
pub use report::StatsReport;
pub use server::Server;
pub use session::{QueueSample, Session, DEFAULT_HISTORY_WINDOW};
pub use stats::SimulationStats;
