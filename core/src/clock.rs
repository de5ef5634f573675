//! Boundary: the only place the composer reads wall-clock time.

use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
};

use postreminder_types::EpochMillis;

pub trait Clock {
    fn now(&self) -> EpochMillis;
}

/// Wall clock in UTC milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> EpochMillis {
        EpochMillis::new(chrono::Utc::now().timestamp_millis())
    }
}

/// Manually driven clock. Clones share the same instant.
#[derive(Debug, Clone, Default)]
pub struct FixedClock(Arc<AtomicI64>);

impl FixedClock {
    #[must_use]
    pub fn at(now: EpochMillis) -> Self {
        Self(Arc::new(AtomicI64::new(now.value())))
    }

    pub fn set(&self, now: EpochMillis) {
        self.0.store(now.value(), Ordering::Release);
    }

    pub fn advance_millis(&self, delta: i64) {
        self.0.fetch_add(delta, Ordering::AcqRel);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> EpochMillis {
        EpochMillis::new(self.0.load(Ordering::Acquire))
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> EpochMillis {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, FixedClock, SystemClock};
    use postreminder_types::EpochMillis;

    #[test]
    fn fixed_clock_clones_share_time() {
        let clock = FixedClock::at(EpochMillis::new(1_000));
        let handle = clock.clone();
        handle.advance_millis(500);
        assert_eq!(clock.now(), EpochMillis::new(1_500));
        handle.set(EpochMillis::new(7));
        assert_eq!(clock.now(), EpochMillis::new(7));
    }

    #[test]
    fn system_clock_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now() > EpochMillis::new(1_577_836_800_000));
    }
}
