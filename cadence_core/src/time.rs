// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic host time, durations, and timebase conversion.
//!
//! [`HostTime`] is a point on a monotonic timeline. Inside the frame loop all
//! ticks are nanoseconds: every [`Clock`](crate::clock::Clock) reports
//! nanosecond ticks, and backends whose native counter runs at a different
//! rate (e.g. `QueryPerformanceCounter`) convert through a [`Timebase`].
//!
//! [`Duration`] is a span in the same tick units. Conversions use `u128`
//! intermediates to avoid overflow.

use core::fmt;
use core::ops::{Add, Sub};

/// Number of nanosecond ticks in one second.
pub const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// A point in time expressed as monotonic nanosecond ticks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HostTime(pub u64);

impl HostTime {
    /// Returns the raw tick value.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Returns the duration between `self` and an earlier time, or zero if
    /// `earlier` is after `self`.
    #[inline]
    #[must_use]
    pub const fn saturating_duration_since(self, earlier: Self) -> Duration {
        Duration(self.0.saturating_sub(earlier.0))
    }

    /// Saturating addition of a duration.
    #[inline]
    #[must_use]
    pub const fn saturating_add(self, duration: Duration) -> Self {
        Self(self.0.saturating_add(duration.0))
    }

    /// Checked addition of a duration.
    #[inline]
    #[must_use]
    pub const fn checked_add(self, duration: Duration) -> Option<Self> {
        match self.0.checked_add(duration.0) {
            Some(t) => Some(Self(t)),
            None => None,
        }
    }
}

impl Add<Duration> for HostTime {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Duration) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for HostTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: Self) -> Duration {
        Duration(self.0 - rhs.0)
    }
}

impl fmt::Debug for HostTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostTime({})", self.0)
    }
}

/// A span of time in nanosecond ticks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration(pub u64);

impl Duration {
    /// A zero-length duration.
    pub const ZERO: Self = Self(0);

    /// One second.
    pub const SECOND: Self = Self(NANOS_PER_SECOND);

    /// Returns the raw tick value.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Creates a duration from whole microseconds.
    #[inline]
    #[must_use]
    pub const fn from_micros(micros: u64) -> Self {
        Self(micros.saturating_mul(1_000))
    }

    /// Creates a duration from whole milliseconds.
    #[inline]
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis.saturating_mul(1_000_000))
    }

    /// Returns the frame period for a rate in frames per second, rounded to
    /// the nearest nanosecond.
    ///
    /// The caller is responsible for passing a finite, positive rate; see
    /// [`LoopConfig::validate`](crate::config::LoopConfig::validate).
    #[inline]
    #[must_use]
    pub fn from_fps(fps: f64) -> Self {
        let nanos = NANOS_PER_SECOND as f64 / fps + 0.5;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "float-to-int casts saturate; validated rates give periods in range"
        )]
        {
            Self(nanos as u64)
        }
    }

    /// Returns this duration as floating-point seconds.
    #[inline]
    #[must_use]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / NANOS_PER_SECOND as f64
    }

    /// Saturating addition.
    #[inline]
    #[must_use]
    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Saturating subtraction.
    #[inline]
    #[must_use]
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    /// Saturating multiplication by an integer factor.
    #[inline]
    #[must_use]
    pub const fn saturating_mul(self, factor: u64) -> Self {
        Self(self.0.saturating_mul(factor))
    }
}

impl Add for Duration {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Duration {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duration({})", self.0)
    }
}

/// Rational conversion factor from native counter ticks to nanoseconds.
///
/// `nanoseconds = ticks * numer / denom`
///
/// Backends with a non-nanosecond counter build one of these once and
/// convert every reading before handing it to the loop.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timebase {
    /// Numerator of the ticks-to-nanoseconds ratio.
    pub numer: u32,
    /// Denominator of the ticks-to-nanoseconds ratio.
    pub denom: u32,
}

impl Timebase {
    /// A timebase where ticks are already nanoseconds (1:1).
    pub const NANOS: Self = Self { numer: 1, denom: 1 };

    /// Creates a new timebase with the given numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if `denom` is zero.
    #[inline]
    #[must_use]
    pub const fn new(numer: u32, denom: u32) -> Self {
        assert!(denom != 0, "timebase denominator must not be zero");
        Self { numer, denom }
    }

    /// Builds the timebase for a counter running at `hz` ticks per second.
    ///
    /// The ratio `1e9 / hz` is reduced to lowest terms. A reduced
    /// denominator that still exceeds `u32::MAX` is halved together with the
    /// numerator until it fits, trading the low bits of both for range.
    ///
    /// Returns `None` for a zero frequency, or one so large that the
    /// numerator would vanish.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "both terms are reduced to at most u32::MAX before narrowing"
    )]
    pub const fn from_frequency(hz: u64) -> Option<Self> {
        if hz == 0 {
            return None;
        }
        let g = gcd(NANOS_PER_SECOND, hz);
        let mut numer = NANOS_PER_SECOND / g;
        let mut denom = hz / g;
        while denom > u32::MAX as u64 {
            numer >>= 1;
            denom >>= 1;
        }
        if numer == 0 {
            return None;
        }
        Some(Self {
            numer: numer as u32,
            denom: denom as u32,
        })
    }

    /// Converts a native tick count to nanoseconds.
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "u128 intermediate avoids overflow; truncation back to u64 is intentional"
    )]
    pub const fn ticks_to_nanos(self, ticks: u64) -> u64 {
        let wide = ticks as u128 * self.numer as u128 / self.denom as u128;
        wide as u64
    }

    /// Converts nanoseconds to a native tick count.
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "u128 intermediate avoids overflow; truncation back to u64 is intentional"
    )]
    pub const fn nanos_to_ticks(self, nanos: u64) -> u64 {
        let wide = nanos as u128 * self.denom as u128 / self.numer as u128;
        wide as u64
    }
}

const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

impl fmt::Debug for Timebase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timebase({}/{})", self.numer, self.denom)
    }
}
