// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Relative `clock_nanosleep` on `CLOCK_MONOTONIC`.

use cadence_core::sleep::Sleeper;
use cadence_core::time::{Duration, NANOS_PER_SECOND};
use rustix::thread::{NanosleepRelativeResult, clock_nanosleep_relative};
use rustix::time::{ClockId, Timespec};

/// Coarse sleeper backed by `clock_nanosleep`.
///
/// An interrupted sleep (`EINTR`) is not resumed; it reports `false` and the
/// spin phase covers the rest of the wait.
#[derive(Clone, Copy, Debug, Default)]
pub struct NanoSleeper {
    interrupted: u64,
    failed: u64,
}

impl NanoSleeper {
    /// Number of sleeps cut short by a signal.
    #[must_use]
    pub fn interrupted(&self) -> u64 {
        self.interrupted
    }

    /// Number of sleeps the kernel rejected.
    #[must_use]
    pub fn failed(&self) -> u64 {
        self.failed
    }
}

impl Sleeper for NanoSleeper {
    fn sleep_for(&mut self, duration: Duration) -> bool {
        match clock_nanosleep_relative(ClockId::Monotonic, &duration_to_timespec(duration)) {
            NanosleepRelativeResult::Ok => true,
            NanosleepRelativeResult::Interrupted(_remaining) => {
                self.interrupted += 1;
                false
            }
            NanosleepRelativeResult::Err(_errno) => {
                self.failed += 1;
                false
            }
        }
    }
}

fn duration_to_timespec(duration: Duration) -> Timespec {
    let ticks = duration.ticks();
    Timespec {
        tv_sec: i64::try_from(ticks / NANOS_PER_SECOND).unwrap_or(i64::MAX),
        tv_nsec: (ticks % NANOS_PER_SECOND).try_into().unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn splits_seconds_and_nanos() {
        let ts = duration_to_timespec(Duration(2_500_000_123));
        assert_eq!(ts.tv_sec, 2);
        assert_eq!(ts.tv_nsec, 500_000_123);
    }

    #[test]
    fn sleeps_at_least_the_request() {
        let mut sleeper = NanoSleeper::default();
        let start = Instant::now();
        assert!(sleeper.sleep_for(Duration::from_millis(2)), "uninterrupted sleep");
        assert!(start.elapsed() >= std::time::Duration::from_millis(2));
        assert_eq!(sleeper.interrupted(), 0);
        assert_eq!(sleeper.failed(), 0);
    }
}
