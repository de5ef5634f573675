use std::fmt;

use serde::{Deserialize, Serialize};

/// An absolute instant in milliseconds since the Unix epoch.
///
/// This is the resolution the reminder backend stores, and it travels on the
/// wire as a base-10 numeric string (see [`EpochMillis::to_wire`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpochMillis(i64);

impl EpochMillis {
    #[must_use]
    pub const fn new(millis: i64) -> Self {
        Self(millis)
    }

    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Add a non-negative offset, saturating at `i64::MAX`.
    #[must_use]
    pub fn saturating_add_millis(self, offset: u64) -> Self {
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);
        Self(self.0.saturating_add(offset))
    }

    /// Milliseconds from `earlier` to `self` (negative if `self` is before it).
    #[must_use]
    pub fn millis_since(self, earlier: Self) -> i64 {
        self.0.saturating_sub(earlier.0)
    }

    #[must_use]
    pub fn to_wire(self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for EpochMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
