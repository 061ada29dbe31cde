use std::fmt;

/// A point on the integer grid riders and drivers move on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    pub x: i64,
    pub y: i64,
}

impl Location {
    pub const ORIGIN: Location = Location { x: 0, y: 0 };

    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Grid distance `|dx| + |dy|` to `other`, saturating at `u64::MAX`.
    pub fn manhattan_distance(&self, other: &Location) -> u64 {
        self.x
            .abs_diff(other.x)
            .saturating_add(self.y.abs_diff(other.y))
    }
}

impl From<(i64, i64)> for Location {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
