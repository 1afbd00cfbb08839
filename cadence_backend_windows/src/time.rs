// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `QueryPerformanceCounter` clock.

use cadence_core::clock::Clock;
use cadence_core::time::{HostTime, Timebase};
use windows::Win32::System::Performance::{QueryPerformanceCounter, QueryPerformanceFrequency};

/// The performance counter as a [`Clock`], in nanoseconds.
///
/// Raw counter ticks are converted with a [`Timebase`] of
/// `1e9 / frequency`, read once at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QpcClock {
    timebase: Timebase,
}

impl Default for QpcClock {
    fn default() -> Self {
        Self::new()
    }
}

impl QpcClock {
    /// Reads the counter frequency and builds the clock.
    ///
    /// The frequency is fixed at boot and the call cannot fail on any
    /// supported Windows version. Should it report zero anyway, ticks are
    /// treated as nanoseconds.
    #[must_use]
    pub fn new() -> Self {
        let mut frequency = 0_i64;
        // SAFETY: `frequency` is a valid, writable i64.
        let ok = unsafe { QueryPerformanceFrequency(&mut frequency) }.is_ok();
        let timebase = u64::try_from(frequency)
            .ok()
            .filter(|_| ok)
            .and_then(Timebase::from_frequency)
            .unwrap_or(Timebase::NANOS);
        Self { timebase }
    }

    /// Returns the tick-to-nanosecond conversion in use.
    #[must_use]
    pub const fn timebase(&self) -> Timebase {
        self.timebase
    }
}

impl Clock for QpcClock {
    fn now(&self) -> HostTime {
        let mut counter = 0_i64;
        // SAFETY: `counter` is a valid, writable i64.
        if unsafe { QueryPerformanceCounter(&mut counter) }.is_err() {
            return HostTime(0);
        }
        let ticks = u64::try_from(counter).unwrap_or(0);
        HostTime(self.timebase.ticks_to_nanos(ticks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_are_non_decreasing() {
        let clock = QpcClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a, "performance counter should not go backwards");
    }

    #[test]
    fn timebase_has_nonzero_denominator() {
        assert_ne!(QpcClock::new().timebase().denom, 0);
    }
}
