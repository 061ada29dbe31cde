//! Fare calculation.

use crate::domain::Location;

/// Currency units charged per unit of grid distance.
pub const FARE_PER_UNIT: u64 = 10;

/// Fare for a ride: `manhattan_distance(source, destination) * FARE_PER_UNIT`.
///
/// Saturates at `u64::MAX` for rides across the far ends of the grid.
pub fn fare(source: Location, destination: Location) -> u64 {
    source
        .manhattan_distance(&destination)
        .saturating_mul(FARE_PER_UNIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fare_scales_with_grid_distance() {
        assert_eq!(fare(Location::new(10, 0), Location::new(15, 3)), 80);
        assert_eq!(fare(Location::new(15, 6), Location::new(20, 4)), 70);
    }

    #[test]
    fn fare_saturates_instead_of_overflowing() {
        assert_eq!(fare(Location::ORIGIN, Location::new(i64::MAX, 0)), u64::MAX);
        assert_eq!(
            fare(Location::new(i64::MIN, i64::MIN), Location::new(i64::MAX, i64::MAX)),
            u64::MAX
        );
        // Largest distance that still bills exactly.
        let exact = (u64::MAX / FARE_PER_UNIT) as i64;
        assert_eq!(
            fare(Location::ORIGIN, Location::new(exact, 0)),
            (exact as u64) * FARE_PER_UNIT
        );
    }

    #[test]
    fn zero_length_ride_is_free() {
        assert_eq!(fare(Location::new(3, 3), Location::new(3, 3)), 0);
    }
}
