//! Duration inputs as the user enters them.
//!
//! Turning these into an absolute fire time needs a clock, so that lives in the
//! core crate. Everything here is the pure arithmetic and parsing policy.

use serde::{Deserialize, Serialize};

/// Default magnitude for the minutes-only (targeted) composer.
pub const DEFAULT_TARGETED_MINUTES: u64 = 60;

/// Unit selector for the classic composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Minutes,
    #[default]
    Hours,
    Days,
}

impl DurationUnit {
    pub const ALL: [DurationUnit; 3] = [Self::Minutes, Self::Hours, Self::Days];

    #[must_use]
    pub const fn seconds(self) -> u64 {
        match self {
            Self::Minutes => 60,
            Self::Hours => 3_600,
            Self::Days => 86_400,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::Days => "days",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Minutes => "Minutes",
            Self::Hours => "Hours",
            Self::Days => "Days",
        }
    }

    /// Map a raw selector value to a unit.
    ///
    /// Never fails: anything unrecognized is treated as hours.
    #[must_use]
    pub fn from_selector(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "minutes" => Self::Minutes,
            "hours" => Self::Hours,
            "days" => Self::Days,
            _ => Self::Hours,
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Minutes => Self::Hours,
            Self::Hours => Self::Days,
            Self::Days => Self::Minutes,
        }
    }

    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Minutes => Self::Days,
            Self::Hours => Self::Minutes,
            Self::Days => Self::Hours,
        }
    }
}

/// Magnitude plus unit, as entered in the classic composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationInput {
    pub magnitude: u64,
    pub unit: DurationUnit,
}

impl Default for DurationInput {
    fn default() -> Self {
        Self {
            magnitude: 1,
            unit: DurationUnit::Hours,
        }
    }
}

impl DurationInput {
    #[must_use]
    pub const fn new(magnitude: u64, unit: DurationUnit) -> Self {
        Self { magnitude, unit }
    }

    #[must_use]
    pub const fn minutes(magnitude: u64) -> Self {
        Self::new(magnitude, DurationUnit::Minutes)
    }

    /// Offset from "now" in milliseconds, saturating on overflow.
    #[must_use]
    pub const fn offset_millis(self) -> u64 {
        self.magnitude
            .saturating_mul(self.unit.seconds())
            .saturating_mul(1_000)
    }
}

/// Coerce a raw numeric field into a magnitude.
///
/// Takes the leading run of decimal digits after optional whitespace, so
/// `"12abc"` yields 12. Empty, non-numeric, and negative input all yield 0.
/// Values past `u64::MAX` saturate.
#[must_use]
pub fn parse_magnitude(raw: &str) -> u64 {
    let trimmed = raw.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let mut value: u64 = 0;
    for ch in trimmed.chars() {
        let Some(digit) = ch.to_digit(10) else {
            break;
        };
        value = value.saturating_mul(10).saturating_add(u64::from(digit));
    }
    value
}
