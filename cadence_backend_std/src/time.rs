// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic clock over `std::time::Instant`.

use std::time::Instant;

use cadence_core::clock::Clock;
use cadence_core::time::HostTime;

/// Reports nanoseconds elapsed since the clock was created.
#[derive(Clone, Copy, Debug)]
pub struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    /// Creates a clock whose timeline starts now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn now(&self) -> HostTime {
        let nanos = self.origin.elapsed().as_nanos();
        HostTime(u64::try_from(nanos).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_monotonic_non_decreasing() {
        let clock = InstantClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first, "monotonic clock should not go backwards");
    }

    #[test]
    fn copies_share_the_origin() {
        let clock = InstantClock::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let copy = clock;
        assert!(copy.now().ticks() >= 2_000_000, "copy keeps the original origin");
    }
}
