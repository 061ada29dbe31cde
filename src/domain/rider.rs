use super::Location;

/// Represents a registered rider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rider {
    pub name: String,
    pub gender: String,
    pub age: u32,
    pub location: Location,
}

/// Payload for onboarding a rider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiderCreate {
    pub name: String,
    pub gender: String,
    pub age: u32,
    pub location: Location,
}

/// Partial update of a rider's details. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct RiderPatch {
    pub gender: Option<String>,
    pub age: Option<u32>,
    pub location: Option<Location>,
}

impl RiderCreate {
    /// Creates onboarding details for a rider standing at the origin.
    pub fn new(name: impl Into<String>, gender: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            gender: gender.into(),
            age,
            location: Location::ORIGIN,
        }
    }

    pub fn at(mut self, location: impl Into<Location>) -> Self {
        self.location = location.into();
        self
    }
}

impl Rider {
    pub fn from_create(params: RiderCreate) -> Self {
        Self {
            name: params.name,
            gender: params.gender,
            age: params.age,
            location: params.location,
        }
    }

    /// Merges the set fields of `patch` into this rider.
    pub fn apply(&mut self, patch: RiderPatch) {
        if let Some(gender) = patch.gender {
            self.gender = gender;
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
    }
}
