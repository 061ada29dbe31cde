use std::time::Duration;

use tracing::warn;

pub const COMPLETION_TIMEOUT_ENV: &str = "CAB_COMPLETION_TIMEOUT_MS";
pub const SHUTDOWN_TIMEOUT_ENV: &str = "CAB_SHUTDOWN_TIMEOUT_MS";

/// Wait bounds applied by callers of the dispatch system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchConfig {
    /// How long a caller waits for a queued ride to complete.
    pub completion_timeout: Duration,
    /// How long shutdown waits for the worker to exit.
    pub shutdown_timeout: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            completion_timeout: Duration::from_secs(5),
            shutdown_timeout: Duration::from_secs(5),
        }
    }
}

impl DispatchConfig {
    /// Defaults overridden by `CAB_COMPLETION_TIMEOUT_MS` / `CAB_SHUTDOWN_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            completion_timeout: millis_or(
                &lookup,
                COMPLETION_TIMEOUT_ENV,
                defaults.completion_timeout,
            ),
            shutdown_timeout: millis_or(&lookup, SHUTDOWN_TIMEOUT_ENV, defaults.shutdown_timeout),
        }
    }
}

fn millis_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: Duration) -> Duration {
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(ms) => Duration::from_millis(ms),
            Err(_) => {
                warn!(key, value = %raw, "Ignoring invalid timeout, using default");
                default
            }
        },
    }
}
