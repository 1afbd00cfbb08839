// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The monotonic clock capability consumed by the frame loop.
//!
//! Backend crates provide implementations (e.g.
//! `cadence_backend_std::InstantClock`,
//! `cadence_backend_linux::MonotonicClock`). Tests and demos use the
//! simulated clocks from `cadence_sim`.

use crate::time::HostTime;

/// A source of monotonic timestamps in nanosecond ticks.
///
/// Successive readings must never decrease. The timeline is not tied to wall
/// clock time and its origin is arbitrary.
pub trait Clock {
    /// Returns the current time.
    fn now(&self) -> HostTime;
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now(&self) -> HostTime {
        (**self).now()
    }
}
