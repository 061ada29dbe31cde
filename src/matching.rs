//! Distance-based driver matching.

use tracing::{debug, info, instrument};

use crate::domain::{DriverSummary, Location};
use crate::error::DispatchError;
use crate::registry::Registry;

/// Maximum grid distance between a rider and a candidate driver.
pub const MATCH_RADIUS: u64 = 5;

/// Returns every available driver within [`MATCH_RADIUS`] of the rider's registered location.
///
/// The scan is a full pass over the driver map. Result order is unspecified; an
/// empty vector means no ride was found.
#[instrument(skip(registry))]
pub fn find_candidates(
    registry: &Registry,
    rider: &str,
    source: Location,
    destination: Location,
) -> Result<Vec<DriverSummary>, DispatchError> {
    let rider = registry.rider(rider).ok_or_else(|| {
        debug!("Rider not found");
        DispatchError::RiderNotFound(rider.to_string())
    })?;

    let candidates = registry.select_drivers(|location, available| {
        available && location.manhattan_distance(&rider.location) <= MATCH_RADIUS
    });

    if candidates.is_empty() {
        info!("No ride found");
    } else {
        let names: Vec<&str> = candidates.iter().map(|driver| driver.name.as_str()).collect();
        info!(?names, "Available rides");
    }
    Ok(candidates)
}
