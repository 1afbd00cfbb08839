// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Virtual sleeper.

use cadence_core::sleep::Sleeper;
use cadence_core::time::Duration;

use crate::SimClock;

/// A [`Sleeper`] that advances a [`SimClock`] instead of blocking.
///
/// By default it advances by exactly the requested duration. Real coarse
/// timers are less tidy, so it can be configured to wake early (a fraction
/// of the request), to oversleep by a fixed amount, or to fail every `n`th
/// call without advancing time.
#[derive(Clone, Debug)]
pub struct SimSleeper {
    clock: SimClock,
    percent: u64,
    overshoot: Duration,
    fail_every: u64,
    calls: u64,
    failures: u64,
    requested: Duration,
}

impl SimSleeper {
    /// Creates a sleeper that advances `clock` by exactly the request.
    #[must_use]
    pub fn new(clock: SimClock) -> Self {
        Self {
            clock,
            percent: 100,
            overshoot: Duration::ZERO,
            fail_every: 0,
            calls: 0,
            failures: 0,
            requested: Duration::ZERO,
        }
    }

    /// Advances only `percent` of each request (values below 100 wake early).
    #[must_use]
    pub fn with_scale_percent(mut self, percent: u64) -> Self {
        self.percent = percent;
        self
    }

    /// Adds `overshoot` to every successful sleep.
    #[must_use]
    pub fn with_overshoot(mut self, overshoot: Duration) -> Self {
        self.overshoot = overshoot;
        self
    }

    /// Makes every `n`th call fail (`1` fails them all, `0` never fails).
    #[must_use]
    pub fn with_failure_every(mut self, n: u64) -> Self {
        self.fail_every = n;
        self
    }

    /// Total calls to [`sleep_for`](Sleeper::sleep_for).
    #[must_use]
    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// Calls that reported failure.
    #[must_use]
    pub fn failures(&self) -> u64 {
        self.failures
    }

    /// Sum of all requested durations.
    #[must_use]
    pub fn requested(&self) -> Duration {
        self.requested
    }
}

impl Sleeper for SimSleeper {
    fn sleep_for(&mut self, duration: Duration) -> bool {
        self.calls += 1;
        self.requested = self.requested.saturating_add(duration);
        if self.fail_every != 0 && self.calls % self.fail_every == 0 {
            self.failures += 1;
            return false;
        }
        let scaled = u128::from(duration.ticks()) * u128::from(self.percent) / 100;
        let advanced = Duration(u64::try_from(scaled).unwrap_or(u64::MAX));
        self.clock.advance(advanced.saturating_add(self.overshoot));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::time::HostTime;

    #[test]
    fn advances_by_request() {
        let clock = SimClock::new(HostTime(0));
        let mut sleeper = SimSleeper::new(clock.clone());
        assert!(sleeper.sleep_for(Duration(1_000)));
        assert_eq!(clock.peek(), HostTime(1_000));
        assert_eq!(sleeper.calls(), 1);
        assert_eq!(sleeper.requested(), Duration(1_000));
    }

    #[test]
    fn scale_and_overshoot_combine() {
        let clock = SimClock::new(HostTime(0));
        let mut sleeper = SimSleeper::new(clock.clone())
            .with_scale_percent(50)
            .with_overshoot(Duration(7));
        sleeper.sleep_for(Duration(1_000));
        assert_eq!(clock.peek(), HostTime(507));
    }

    #[test]
    fn failures_do_not_advance_time() {
        let clock = SimClock::new(HostTime(0));
        let mut sleeper = SimSleeper::new(clock.clone()).with_failure_every(2);
        assert!(sleeper.sleep_for(Duration(10)));
        assert!(!sleeper.sleep_for(Duration(10)));
        assert!(sleeper.sleep_for(Duration(10)));
        assert_eq!(sleeper.failures(), 1);
        assert_eq!(clock.peek(), HostTime(20));
    }
}
