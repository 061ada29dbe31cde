use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::Location;

/// Vehicle a driver operates. Carried for reporting only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    pub make: String,
    pub plate: String,
}

impl Vehicle {
    pub fn new(make: impl Into<String>, plate: impl Into<String>) -> Self {
        Self {
            make: make.into(),
            plate: plate.into(),
        }
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.make, self.plate)
    }
}

/// Payload for onboarding a driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverCreate {
    pub name: String,
    pub gender: String,
    pub age: u32,
    pub vehicle: Vehicle,
    pub location: Location,
}

impl DriverCreate {
    pub fn new(
        name: impl Into<String>,
        gender: impl Into<String>,
        age: u32,
        vehicle: Vehicle,
        location: impl Into<Location>,
    ) -> Self {
        Self {
            name: name.into(),
            gender: gender.into(),
            age,
            vehicle,
            location: location.into(),
        }
    }
}

/// Fields of a driver that change while the system runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DriverState {
    location: Location,
    available: bool,
    earnings: u64,
}

/// A registered driver.
///
/// Identity and profile are immutable; location, availability and earnings sit
/// behind the driver's own lock so that writers of different drivers never
/// contend and writers of the same driver are totally ordered.
#[derive(Debug)]
pub struct Driver {
    name: String,
    gender: String,
    age: u32,
    vehicle: Vehicle,
    state: Mutex<DriverState>,
}

/// Copy-out view of a driver at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverSummary {
    pub name: String,
    pub gender: String,
    pub age: u32,
    pub vehicle: Vehicle,
    pub location: Location,
    pub available: bool,
    pub earnings: u64,
}

impl Driver {
    /// New drivers start available with no earnings.
    pub fn from_create(params: DriverCreate) -> Self {
        Self {
            name: params.name,
            gender: params.gender,
            age: params.age,
            vehicle: params.vehicle,
            state: Mutex::new(DriverState {
                location: params.location,
                available: true,
                earnings: 0,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // Every critical section leaves the state valid, so a poisoned lock is still usable.
    fn state(&self) -> MutexGuard<'_, DriverState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn location(&self) -> Location {
        self.state().location
    }

    /// Location and availability read under one lock acquisition.
    pub fn position(&self) -> (Location, bool) {
        let state = self.state();
        (state.location, state.available)
    }

    pub fn is_available(&self) -> bool {
        self.state().available
    }

    pub fn earnings(&self) -> u64 {
        self.state().earnings
    }

    pub fn update_location(&self, location: Location) {
        self.state().location = location;
    }

    pub fn set_available(&self, available: bool) {
        self.state().available = available;
    }

    /// Credits `amount` and returns the new total.
    pub fn add_earnings(&self, amount: u64) -> u64 {
        let mut state = self.state();
        state.earnings = state.earnings.saturating_add(amount);
        state.earnings
    }

    pub fn summary(&self) -> DriverSummary {
        let state = *self.state();
        DriverSummary {
            name: self.name.clone(),
            gender: self.gender.clone(),
            age: self.age,
            vehicle: self.vehicle.clone(),
            location: state.location,
            available: state.available,
            earnings: state.earnings,
        }
    }
}
