//! Duration model: user-entered duration to absolute fire time.
//!
//! Input policies are lenient by design of the form, not error paths:
//! non-numeric magnitudes coerce to 0 and unknown unit selectors resolve as
//! hours. Both policies live in [`postreminder_types`]; this module applies
//! them against a point in time.

use postreminder_types::{DurationInput, DurationUnit, EpochMillis, parse_magnitude};

/// `now + magnitude * seconds(unit) * 1000`, saturating.
#[must_use]
pub fn resolve(input: DurationInput, now: EpochMillis) -> EpochMillis {
    now.saturating_add_millis(input.offset_millis())
}

/// Resolve a raw magnitude and unit selector as typed into the form.
#[must_use]
pub fn resolve_selector(magnitude: &str, unit: &str, now: EpochMillis) -> EpochMillis {
    resolve(
        DurationInput::new(parse_magnitude(magnitude), DurationUnit::from_selector(unit)),
        now,
    )
}

/// Minutes-only resolution used by the targeted composer.
#[must_use]
pub fn resolve_minutes(magnitude: u64, now: EpochMillis) -> EpochMillis {
    resolve(DurationInput::minutes(magnitude), now)
}
