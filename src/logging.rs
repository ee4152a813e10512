//! Structured logging for simulation runs.
//!
//! The engine emits `tracing` events at these levels:
//!
//! - **TRACE**: every tick and every dispatch (very verbose)
//! - **DEBUG**: arrivals that found the admission buffer full, sessions reaching the end of a run
//! - **INFO**: engine construction and the end of a run
//!
//! Nothing is printed unless a subscriber is installed. The helpers here install a formatting subscriber whose filter
//! can be overridden with `RUST_LOG`, e.g. `RUST_LOG=chatty_io=debug`.

use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a subscriber at `info` level.
pub fn init_logging() -> bool {
    init_logging_with_level("info")
}

/// Install a subscriber for this crate at `level` ("trace", "debug", "info", "warn" or "error"), unless `RUST_LOG`
/// is set.
///
/// Returns `false` if a global subscriber was already installed, in which case nothing changes.
pub fn init_logging_with_level(level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| format!("chatty_io={}", level).into());

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_level(true))
        .with(filter)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_initialisation_is_harmless() {
        let _ = init_logging_with_level("debug");
        assert!(!init_logging(), "a subscriber should already be installed");
    }
}
