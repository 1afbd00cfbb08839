// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The coarse-sleep capability consumed by the wait strategy.
//!
//! A [`Sleeper`] is the low-precision, low-CPU half of the
//! [hybrid wait](crate::wait::HybridWait). It yields the thread to the OS for
//! roughly the requested time; the spin phase that follows owns correctness,
//! so a sleeper may wake early, wake late, or fail outright.

use crate::time::Duration;

/// Blocks the calling thread for approximately a requested duration.
pub trait Sleeper {
    /// Sleeps for about `duration`.
    ///
    /// Returns `false` if the sleep could not be performed or was cut short
    /// by the platform. Failure is never fatal to the caller.
    fn sleep_for(&mut self, duration: Duration) -> bool;
}

impl<S: Sleeper + ?Sized> Sleeper for &mut S {
    #[inline]
    fn sleep_for(&mut self, duration: Duration) -> bool {
        (**self).sleep_for(duration)
    }
}

/// A [`Sleeper`] that never sleeps.
///
/// Every request reports failure, so paced waits degrade to pure spinning.
/// Useful on targets without a blocking timer.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpinOnly;

impl Sleeper for SpinOnly {
    #[inline]
    fn sleep_for(&mut self, duration: Duration) -> bool {
        _ = duration;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_only_always_declines() {
        let mut s = SpinOnly;
        assert!(!s.sleep_for(Duration::from_millis(5)), "no blocking timer");
        assert!(!s.sleep_for(Duration::ZERO), "no blocking timer");
    }

    #[test]
    fn mutable_reference_forwards() {
        struct Counter(u32);
        impl Sleeper for Counter {
            fn sleep_for(&mut self, _duration: Duration) -> bool {
                self.0 += 1;
                true
            }
        }

        fn sleep_once<S: Sleeper>(mut sleeper: S) -> bool {
            sleeper.sleep_for(Duration(1))
        }

        let mut inner = Counter(0);
        assert!(sleep_once(&mut inner), "forwarded result");
        assert!(sleep_once(&mut inner), "forwarded result");
        assert_eq!(inner.0, 2, "inner sleeper saw both calls");
    }
}
