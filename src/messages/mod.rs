use std::fmt;

use tokio::sync::oneshot;

use crate::domain::Location;

/// One-shot channel the worker answers each ride request on.
pub type CompletionSender = oneshot::Sender<RideCompletion>;
pub type CompletionReceiver = oneshot::Receiver<RideCompletion>;

/// A ride assigned to a driver, waiting to be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideRequest {
    pub rider: String,
    pub source: Location,
    pub destination: Location,
    pub driver: String,
}

/// Why a queued ride was not executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The driver became unavailable between matching and processing.
    DriverUnavailable,
    DriverNotFound,
    /// Processing the ride panicked.
    Internal,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::DriverUnavailable => write!(f, "driver is not available"),
            RejectReason::DriverNotFound => write!(f, "driver not found"),
            RejectReason::Internal => write!(f, "internal error"),
        }
    }
}

/// Terminal state of a dispatched ride.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RideOutcome {
    Completed { fare: u64 },
    Rejected { reason: RejectReason },
}

/// Delivered exactly once for every request the worker dequeues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideCompletion {
    pub request: RideRequest,
    pub outcome: RideOutcome,
}

/// Messages accepted by the dispatch worker.
#[derive(Debug)]
pub enum DispatchRequest {
    Ride {
        request: RideRequest,
        respond_to: CompletionSender,
    },
    Shutdown,
    /// A ride whose processing panics inside the worker.
    #[cfg(test)]
    FailingRide {
        request: RideRequest,
        respond_to: CompletionSender,
    },
}
