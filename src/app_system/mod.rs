//! System startup, configuration, and shutdown.

pub mod cab_system;
pub mod config;
pub mod tracing;

pub use self::cab_system::*;
pub use self::config::*;
pub use self::tracing::setup_tracing;
