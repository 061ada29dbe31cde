//! Parsing of the free-text onboarding formats.
//!
//! Riders and drivers arrive as `"Name, Gender, Age"`; vehicles as `"Make, Plate"`.

use std::str::FromStr;

use crate::domain::{DriverCreate, Location, RiderCreate, Vehicle};
use crate::error::OnboardingError;

fn next_field<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
    name: &'static str,
) -> Result<&'a str, OnboardingError> {
    match fields.next().map(str::trim) {
        Some(field) if !field.is_empty() => Ok(field),
        _ => Err(OnboardingError::MissingField(name)),
    }
}

fn ensure_consumed<'a>(mut fields: impl Iterator<Item = &'a str>) -> Result<(), OnboardingError> {
    match fields.next() {
        Some(rest) => Err(OnboardingError::TrailingInput(rest.trim().to_string())),
        None => Ok(()),
    }
}

/// Splits `"Name, Gender, Age"`.
fn parse_profile(details: &str) -> Result<(String, String, u32), OnboardingError> {
    let mut fields = details.split(',');
    let name = next_field(&mut fields, "name")?;
    let gender = next_field(&mut fields, "gender")?;
    let age = next_field(&mut fields, "age")?;
    ensure_consumed(fields)?;

    let age = age
        .parse::<u32>()
        .map_err(|_| OnboardingError::InvalidAge(age.to_string()))?;
    Ok((name.to_string(), gender.to_string(), age))
}

impl FromStr for RiderCreate {
    type Err = OnboardingError;

    fn from_str(details: &str) -> Result<Self, Self::Err> {
        let (name, gender, age) = parse_profile(details)?;
        Ok(RiderCreate::new(name, gender, age))
    }
}

impl FromStr for Vehicle {
    type Err = OnboardingError;

    fn from_str(details: &str) -> Result<Self, Self::Err> {
        let mut fields = details.split(',');
        let make = next_field(&mut fields, "vehicle")?;
        let plate = next_field(&mut fields, "plate")?;
        ensure_consumed(fields)?;
        Ok(Vehicle::new(make, plate))
    }
}

impl DriverCreate {
    /// Builds a driver from `"Name, Gender, Age"` and `"Make, Plate"` texts.
    pub fn parse(
        details: &str,
        vehicle: &str,
        location: impl Into<Location>,
    ) -> Result<Self, OnboardingError> {
        let (name, gender, age) = parse_profile(details)?;
        let vehicle = vehicle.parse::<Vehicle>()?;
        Ok(DriverCreate::new(name, gender, age, vehicle, location))
    }
}
