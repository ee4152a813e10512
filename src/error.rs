/// Errors that may be encountered while building a simulation.
///
/// Every variant describes a [`SimulationParams`] value that breaks one of the model's bounds. These are raised once,
/// by [`SimulationParams::validate()`] or [`SimulationEngine::new()`], so that a malformed engine can never be stepped.
/// Nothing after construction can fail: [`SimulationEngine::step()`] past the end of a run is a no-op, and derived
/// metrics floor their denominators instead of dividing by zero.
///
/// [`SimulationParams`]: crate::SimulationParams
/// [`SimulationParams::validate()`]: crate::SimulationParams::validate
/// [`SimulationEngine::new()`]: crate::SimulationEngine::new
/// [`SimulationEngine::step()`]: crate::SimulationEngine::step
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// An interval parameter has its lower bound above its upper bound.
    #[error("{name} interval is empty: min {min} is greater than max {max}")]
    EmptyInterval {
        /// Parameter name.
        name: &'static str,
        /// Lower bound as given.
        min: u64,
        /// Upper bound as given.
        max: u64,
    },
    /// A count or interval bound is smaller than the least value the model accepts.
    #[error("{name} must be at least {min}, got {value}")]
    BelowMinimum {
        /// Parameter name.
        name: &'static str,
        /// Value as given.
        value: u64,
        /// Least accepted value.
        min: u64,
    },
    /// The chatty probability is NaN or outside `[0, 1]`.
    #[error("chatty probability must lie in [0, 1], got {0}")]
    InvalidProbability(f64),
    /// Tick arithmetic on the named parameter would exceed `u64::MAX` during the run.
    #[error("{name} is too large: tick arithmetic would overflow")]
    TickOverflow {
        /// Parameter name.
        name: &'static str,
    },
}

/// [`std::result::Result`]`<T, `[`chatty_io::Error`]`>`
///
/// A type alias that simplifies the signatures of the fallible constructors in this crate.
///
/// [`chatty_io::Error`]: Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_parameter() {
        let err = Error::EmptyInterval {
            name: "service_time",
            min: 9,
            max: 3,
        };
        assert_eq!(
            "service_time interval is empty: min 9 is greater than max 3",
            err.to_string(),
            "unexpected message for empty interval"
        );

        let err = Error::BelowMinimum {
            name: "buffer_size",
            value: 0,
            min: 1,
        };
        assert_eq!(
            "buffer_size must be at least 1, got 0",
            err.to_string(),
            "unexpected message for undersized parameter"
        );
    }
}
