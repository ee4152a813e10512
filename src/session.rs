use crate::{SimulationEngine, StatsReport};

use serde::Serialize;
use std::collections::VecDeque;
use tracing::debug;

/// Number of queue-length samples a [`Session`] keeps unless told otherwise.
pub const DEFAULT_HISTORY_WINDOW: usize = 500;

/// Queue length observed right after a tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueueSample {
    /// Clock value after the tick.
    pub time: u64,
    /// Sub-requests waiting in the buffer after the tick.
    pub queue_len: usize,
}

/// A running simulation as seen by a presentation layer: one engine, a run flag, and a bounded window of recent
/// queue lengths for charting.
///
/// The session decides nothing about timing. The caller picks how many ticks to batch per call to [`advance()`] (the
/// "speed" of the display) and how often to render; the session only records what happened.
///
/// [`advance()`]: Session::advance
#[derive(Clone, Debug)]
pub struct Session {
    engine: SimulationEngine,
    history: VecDeque<QueueSample>,
    window: usize,
    running: bool,
}

impl Session {
    /// Wrap `engine`, keeping the last [`DEFAULT_HISTORY_WINDOW`] samples.
    pub fn new(engine: SimulationEngine) -> Self {
        Self::with_window(engine, DEFAULT_HISTORY_WINDOW)
    }

    /// Keep at most `window` samples; a window of zero is raised to one.
    pub fn with_window(engine: SimulationEngine, window: usize) -> Self {
        let window = window.max(1);
        let running = !engine.is_finished();
        Self {
            engine,
            history: VecDeque::with_capacity(window),
            window,
            running,
        }
    }

    /// Step the engine up to `batch` times (at least once), sampling the queue length after every tick.
    ///
    /// Returns `false` once the session is stopped or the engine has finished; the session stops itself in the
    /// latter case.
    pub fn advance(&mut self, batch: usize) -> bool {
        if !self.running {
            return false;
        }

        for _ in 0..batch.max(1) {
            if !self.engine.step() {
                break;
            }
            self.record();
        }

        if self.engine.is_finished() {
            debug!(time = self.engine.current_time(), "session reached end of run");
            self.running = false;
        }
        self.running
    }

    fn record(&mut self) {
        if self.history.len() == self.window {
            self.history.pop_front();
        }
        self.history.push_back(QueueSample {
            time: self.engine.current_time(),
            queue_len: self.engine.buffer().len(),
        });
    }

    /// Halt the session. Later calls to [`advance()`] do nothing.
    ///
    /// [`advance()`]: Session::advance
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Whether further calls to [`advance()`](Session::advance) may step the engine.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Project the engine state onto a [`StatsReport`].
    pub fn report(&self) -> StatsReport {
        self.engine.report()
    }

    /// Get a shared reference to the wrapped engine.
    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    /// Recent samples, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &QueueSample> + '_ {
        self.history.iter()
    }

    /// Most samples the history will retain.
    pub fn window(&self) -> usize {
        self.window
    }
}
