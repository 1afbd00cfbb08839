// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Virtual clocks.

use std::cell::Cell;
use std::rc::Rc;

use cadence_core::clock::Clock;
use cadence_core::time::{Duration, HostTime};

/// Shared virtual time.
///
/// Every [`now`](Clock::now) returns the current time and then moves it
/// forward by the configured step. A non-zero step is what lets a spin wait
/// on a `SimClock` make progress; with a zero step, time only moves through
/// [`advance`](Self::advance) (for example from a [`SimSleeper`](crate::SimSleeper)).
#[derive(Clone, Debug)]
pub struct SimClock {
    now: Rc<Cell<u64>>,
    step: Duration,
}

impl SimClock {
    /// Creates a clock at `start` that does not move on reads.
    #[must_use]
    pub fn new(start: HostTime) -> Self {
        Self {
            now: Rc::new(Cell::new(start.ticks())),
            step: Duration::ZERO,
        }
    }

    /// Sets how far each read advances time. Clones made afterwards share the
    /// timeline but each keeps its own step.
    #[must_use]
    pub fn with_step(mut self, step: Duration) -> Self {
        self.step = step;
        self
    }

    /// Returns the current time without advancing it.
    #[must_use]
    pub fn peek(&self) -> HostTime {
        HostTime(self.now.get())
    }

    /// Moves time forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get().saturating_add(by.ticks()));
    }

    /// Sets the current time. Moving backwards is allowed; callers decide
    /// whether that is meaningful for their test.
    pub fn set(&self, to: HostTime) {
        self.now.set(to.ticks());
    }
}

impl Clock for SimClock {
    fn now(&self) -> HostTime {
        let t = self.now.get();
        self.now.set(t.saturating_add(self.step.ticks()));
        HostTime(t)
    }
}

/// Replays a fixed list of readings.
///
/// Once the script is exhausted the clock keeps counting up from the last
/// reading by `tail_step` per read, so a wait that outlives the script still
/// terminates.
#[derive(Debug)]
pub struct ScriptedClock {
    readings: Vec<HostTime>,
    next: Cell<usize>,
    tail_step: Duration,
}

impl ScriptedClock {
    /// Creates a clock that returns `readings` in order, then steps by 1ns.
    ///
    /// # Panics
    ///
    /// Panics if `readings` is empty.
    #[must_use]
    pub fn new(readings: impl IntoIterator<Item = HostTime>) -> Self {
        let readings: Vec<HostTime> = readings.into_iter().collect();
        assert!(!readings.is_empty(), "a scripted clock needs at least one reading");
        Self {
            readings,
            next: Cell::new(0),
            tail_step: Duration(1),
        }
    }

    /// Sets the per-read increment used after the script runs out.
    #[must_use]
    pub fn with_tail_step(mut self, step: Duration) -> Self {
        self.tail_step = step;
        self
    }

    /// Number of reads made so far.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.next.get()
    }

    /// Returns `true` once every scripted reading has been returned.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.next.get() >= self.readings.len()
    }
}

impl Clock for ScriptedClock {
    fn now(&self) -> HostTime {
        let i = self.next.get();
        self.next.set(i + 1);
        if let Some(&t) = self.readings.get(i) {
            return t;
        }
        let last = self.readings.len() - 1;
        let extra = u64::try_from(i - last).unwrap_or(u64::MAX);
        self.readings[last].saturating_add(self.tail_step.saturating_mul(extra))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_time() {
        let a = SimClock::new(HostTime(100));
        let b = a.clone();
        a.advance(Duration(50));
        assert_eq!(b.peek(), HostTime(150));
        b.set(HostTime(7));
        assert_eq!(a.now(), HostTime(7));
    }

    #[test]
    fn step_applies_after_each_read() {
        let clock = SimClock::new(HostTime(0)).with_step(Duration(10));
        assert_eq!(clock.now(), HostTime(0));
        assert_eq!(clock.now(), HostTime(10));
        assert_eq!(clock.peek(), HostTime(20));
    }

    #[test]
    fn scripted_replays_then_counts_up() {
        let clock = ScriptedClock::new([HostTime(5), HostTime(9)]).with_tail_step(Duration(3));
        assert_eq!(clock.now(), HostTime(5));
        assert!(!clock.is_exhausted());
        assert_eq!(clock.now(), HostTime(9));
        assert!(clock.is_exhausted());
        assert_eq!(clock.now(), HostTime(12));
        assert_eq!(clock.now(), HostTime(15));
        assert_eq!(clock.reads(), 4);
    }

    #[test]
    #[should_panic(expected = "at least one reading")]
    fn scripted_rejects_empty_script() {
        let _ = ScriptedClock::new([]);
    }
}
