// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hybrid coarse-sleep / spin wait.
//!
//! [`HybridWait`] reaches a deadline in two phases:
//!
//! 1. **Coarse**: ask the [`Sleeper`] for the remaining time minus a spin
//!    margin. This yields the core to the OS but is imprecise.
//! 2. **Spin**: poll the [`Clock`] until the deadline has passed.
//!
//! The spin phase runs whatever the coarse phase did, so a sleeper that
//! fails or wakes early only costs CPU time, and the loop never runs a frame
//! before its deadline. A sleeper that overshoots makes the frame late; the
//! pacer then absorbs it as lag.

use crate::clock::Clock;
use crate::config::DEFAULT_SPIN_MARGIN;
use crate::sleep::Sleeper;
use crate::time::{Duration, HostTime};

/// What happened during one [`HybridWait::wait_until`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WaitReport {
    /// The deadline waited for.
    pub deadline: HostTime,
    /// Clock reading when the wait began.
    pub started_at: HostTime,
    /// Duration requested from the sleeper, if the coarse phase ran.
    pub coarse_request: Option<Duration>,
    /// The sleeper's result, if the coarse phase ran.
    pub slept: Option<bool>,
    /// Clock polls made by the spin phase.
    pub spins: u64,
    /// First clock reading at or after the deadline.
    pub woke_at: HostTime,
}

impl WaitReport {
    /// Returns how far past the deadline the wait ended.
    #[must_use]
    pub fn overshoot(&self) -> Duration {
        self.woke_at.saturating_duration_since(self.deadline)
    }

    /// Returns the total time spent waiting.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.woke_at.saturating_duration_since(self.started_at)
    }
}

/// Two-phase wait strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HybridWait {
    spin_margin: Duration,
}

impl Default for HybridWait {
    fn default() -> Self {
        Self::new(DEFAULT_SPIN_MARGIN)
    }
}

impl HybridWait {
    /// Creates a wait strategy that leaves `spin_margin` of every wait to the
    /// spin phase.
    #[must_use]
    pub const fn new(spin_margin: Duration) -> Self {
        Self { spin_margin }
    }

    /// Returns the spin margin.
    #[must_use]
    pub const fn spin_margin(&self) -> Duration {
        self.spin_margin
    }

    /// Blocks until `clock` reads at or after `deadline`.
    pub fn wait_until<C, S>(&self, clock: &C, sleeper: &mut S, deadline: HostTime) -> WaitReport
    where
        C: Clock + ?Sized,
        S: Sleeper + ?Sized,
    {
        let now = clock.now();
        let mut report = WaitReport {
            deadline,
            started_at: now,
            coarse_request: None,
            slept: None,
            spins: 0,
            woke_at: now,
        };
        if now >= deadline {
            return report;
        }

        let coarse = (deadline - now).saturating_sub(self.spin_margin);
        if coarse > Duration::ZERO {
            report.coarse_request = Some(coarse);
            report.slept = Some(sleeper.sleep_for(coarse));
        }

        loop {
            let t = clock.now();
            report.spins += 1;
            if t >= deadline {
                report.woke_at = t;
                return report;
            }
            core::hint::spin_loop();
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::cell::Cell;

    use super::*;

    /// Virtual clock that advances by `step` on every read.
    struct StepClock {
        t: Cell<u64>,
        step: u64,
    }

    impl StepClock {
        fn new(start: u64, step: u64) -> Self {
            Self {
                t: Cell::new(start),
                step,
            }
        }

        fn advance(&self, d: Duration) {
            self.t.set(self.t.get() + d.ticks());
        }
    }

    impl Clock for StepClock {
        fn now(&self) -> HostTime {
            let t = self.t.get();
            self.t.set(t + self.step);
            HostTime(t)
        }
    }

    /// Sleeper that advances a [`StepClock`] by a scaled request.
    struct ScaledSleeper<'a> {
        clock: &'a StepClock,
        percent: u64,
        succeed: bool,
        requests: Vec<Duration>,
    }

    impl Sleeper for ScaledSleeper<'_> {
        fn sleep_for(&mut self, duration: Duration) -> bool {
            self.requests.push(duration);
            self.clock
                .advance(Duration(duration.ticks() * self.percent / 100));
            self.succeed
        }
    }

    #[test]
    fn sleeps_short_by_margin_then_spins() {
        let clock = StepClock::new(0, 100_000);
        let mut sleeper = ScaledSleeper {
            clock: &clock,
            percent: 100,
            succeed: true,
            requests: Vec::new(),
        };
        let wait = HybridWait::new(Duration::from_millis(1));
        let report = wait.wait_until(&clock, &mut sleeper, HostTime(10_000_000));

        assert_eq!(sleeper.requests, [Duration(9_000_000)], "10ms - 1ms margin");
        assert_eq!(report.slept, Some(true));
        assert!(report.spins > 0, "margin is covered by spinning");
        assert!(report.woke_at >= HostTime(10_000_000), "never early");
    }

    #[test]
    fn failed_sleep_still_reaches_deadline() {
        let clock = StepClock::new(0, 50_000);
        let mut sleeper = ScaledSleeper {
            clock: &clock,
            percent: 0,
            succeed: false,
            requests: Vec::new(),
        };
        let report = HybridWait::default().wait_until(&clock, &mut sleeper, HostTime(5_000_000));

        assert_eq!(report.slept, Some(false));
        assert!(report.woke_at >= report.deadline, "spin enforces deadline");
        assert_eq!(report.spins, 100, "5ms of 50us polls");
    }

    #[test]
    fn early_wake_is_covered_by_spin() {
        let clock = StepClock::new(0, 10_000);
        let mut sleeper = ScaledSleeper {
            clock: &clock,
            percent: 50,
            succeed: true,
            requests: Vec::new(),
        };
        let report = HybridWait::default().wait_until(&clock, &mut sleeper, HostTime(20_000_000));
        assert!(report.woke_at >= report.deadline, "spin enforces deadline");
        assert!(report.overshoot() < Duration(10_000), "within one poll");
    }

    #[test]
    fn oversleep_returns_late_without_spinning_long() {
        let clock = StepClock::new(0, 1);
        let mut sleeper = ScaledSleeper {
            clock: &clock,
            percent: 300,
            succeed: true,
            requests: Vec::new(),
        };
        let report = HybridWait::default().wait_until(&clock, &mut sleeper, HostTime(5_000_000));
        assert_eq!(report.spins, 1, "first poll is already late");
        assert!(report.overshoot() > Duration::ZERO);
    }

    #[test]
    fn past_deadline_returns_without_sleeping() {
        let clock = StepClock::new(10_000_000, 1);
        let mut sleeper = ScaledSleeper {
            clock: &clock,
            percent: 100,
            succeed: true,
            requests: Vec::new(),
        };
        let report = HybridWait::default().wait_until(&clock, &mut sleeper, HostTime(5_000_000));
        assert!(sleeper.requests.is_empty(), "no sleep when late");
        assert_eq!(report.coarse_request, None);
        assert_eq!(report.spins, 0);
        assert_eq!(report.woke_at, HostTime(10_000_000));
        assert_eq!(report.elapsed(), Duration::ZERO);
    }

    #[test]
    fn deadline_inside_margin_only_spins() {
        let clock = StepClock::new(0, 100_000);
        let mut sleeper = ScaledSleeper {
            clock: &clock,
            percent: 100,
            succeed: true,
            requests: Vec::new(),
        };
        let report = HybridWait::new(Duration::from_millis(1)).wait_until(
            &clock,
            &mut sleeper,
            HostTime(500_000),
        );
        assert!(sleeper.requests.is_empty(), "remaining time is below the margin");
        assert_eq!(report.slept, None);
        assert_eq!(report.woke_at, HostTime(500_000));
    }
}
