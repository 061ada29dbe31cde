//! # Cab Dispatch
//!
//! In-memory ride-hailing dispatch core: a registry of riders and drivers, a
//! distance-based matcher, and a single background worker that executes
//! queued rides.
//!
//! ## Layout
//!
//! - **Domain types** - riders, drivers, locations → [`domain`]
//! - **Registry** - shared rider/driver maps with per-driver locks → [`registry::Registry`]
//! - **Matcher** - available drivers within [`matching::MATCH_RADIUS`] → [`matching::find_candidates`]
//! - **Billing** - fare from grid distance → [`billing::fare`]
//! - **Worker** - FIFO ride execution with a per-request completion signal → [`actors::DispatchService`]
//! - **Client** - request side of the worker → [`clients::DispatchClient`]
//! - **System** - startup, configuration, tracing, shutdown → [`app_system::CabSystem`]
//!
//! ## Flow
//!
//! ```text
//! caller -> Registry -> find_candidates -> DispatchClient::request_ride
//!        -> [worker] DispatchService::process -> Registry -> RideTicket::wait
//! ```

pub mod actors;
pub mod app_system;
pub mod billing;
pub mod clients;
pub mod domain;
pub mod error;
pub mod matching;
pub mod messages;
pub mod onboarding;
pub mod registry;

#[cfg(test)]
mod mock_framework;
