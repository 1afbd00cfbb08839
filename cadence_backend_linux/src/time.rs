// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kernel monotonic clock reads.

use cadence_core::clock::Clock;
use cadence_core::time::{HostTime, NANOS_PER_SECOND, Timebase};
use rustix::time::{ClockId, Timespec, clock_gettime};

/// Returns the Linux backend [`Timebase`]: host ticks are nanoseconds.
#[must_use]
pub const fn timebase() -> Timebase {
    Timebase::NANOS
}

/// `CLOCK_MONOTONIC` as a [`Clock`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> HostTime {
        timespec_to_host_time(clock_gettime(ClockId::Monotonic))
    }
}

fn timespec_to_host_time(timespec: Timespec) -> HostTime {
    let seconds = u64::try_from(timespec.tv_sec).unwrap_or(0);
    let nanos = u64::try_from(timespec.tv_nsec)
        .unwrap_or(0)
        .min(NANOS_PER_SECOND - 1);

    let ticks_u128 = u128::from(seconds)
        .saturating_mul(u128::from(NANOS_PER_SECOND))
        .saturating_add(u128::from(nanos));
    HostTime(u64::try_from(ticks_u128).unwrap_or(u64::MAX))
}
