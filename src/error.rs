use std::time::Duration;

use thiserror::Error;

/// Errors surfaced to callers of the dispatch pipeline.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Rider not found: {0}")]
    RiderNotFound(String),
    #[error("Dispatcher is closed")]
    DispatcherClosed,
    #[error("Ride completion timed out after {0:?}")]
    Timeout(Duration),
    #[error("Dispatch worker dropped the request without answering")]
    WorkerDropped,
}

/// Errors from starting or stopping the system.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SystemError {
    #[error("Dispatch worker did not stop within {0:?}")]
    ShutdownTimeout(Duration),
    #[error("Dispatch worker failed: {0}")]
    WorkerPanicked(String),
}

/// Errors from parsing free-text onboarding details.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OnboardingError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),
    #[error("Invalid age: {0}")]
    InvalidAge(String),
    #[error("Unexpected trailing input: {0}")]
    TrailingInput(String),
}
