//! Call lifecycle: `Idle → InFlight → Completed(Success | Failure)`.

use std::time::{Duration, Instant};

use crate::observability::event::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn from_success(successful: bool) -> Self {
        if successful {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }

    pub fn level(self) -> Level {
        match self {
            Outcome::Success => Level::Info,
            Outcome::Failure => Level::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    Idle,
    InFlight { started: Instant },
    Completed { elapsed: Duration, outcome: Outcome },
}

impl CallState {
    /// Start the timer. Only valid from `Idle`; otherwise a no-op.
    pub fn start(self) -> Self {
        match self {
            CallState::Idle => CallState::InFlight {
                started: Instant::now(),
            },
            other => other,
        }
    }

    /// Stop the timer and record the outcome. Only valid from `InFlight`,
    /// so a call completes at most once.
    pub fn complete(self, successful: bool) -> Self {
        match self {
            CallState::InFlight { started } => CallState::Completed {
                elapsed: started.elapsed(),
                outcome: Outcome::from_success(successful),
            },
            other => other,
        }
    }

    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            CallState::Completed { elapsed, .. } => Some(*elapsed),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            CallState::Completed { outcome, .. } => Some(*outcome),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let state = CallState::Idle;
        assert_eq!(state.complete(true), CallState::Idle);

        let in_flight = state.start();
        assert!(matches!(in_flight, CallState::InFlight { .. }));
        assert_eq!(in_flight.start(), in_flight);

        let done = in_flight.complete(false);
        assert_eq!(done.outcome(), Some(Outcome::Failure));
        assert_eq!(done.outcome().unwrap().level(), Level::Error);

        // completing twice keeps the first result
        assert_eq!(done.complete(true), done);
    }
}
