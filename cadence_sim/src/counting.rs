// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Call-counting wrappers.

use std::cell::Cell;

use cadence_core::clock::Clock;
use cadence_core::sleep::Sleeper;
use cadence_core::time::{Duration, HostTime};

/// Wraps a [`Clock`] and counts reads.
#[derive(Debug, Default)]
pub struct CountingClock<C> {
    inner: C,
    reads: Cell<u64>,
}

impl<C> CountingClock<C> {
    /// Wraps `inner`.
    #[must_use]
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            reads: Cell::new(0),
        }
    }

    /// Number of reads so far.
    #[must_use]
    pub fn reads(&self) -> u64 {
        self.reads.get()
    }

    /// Returns the wrapped clock.
    #[must_use]
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: Clock> Clock for CountingClock<C> {
    fn now(&self) -> HostTime {
        self.reads.set(self.reads.get() + 1);
        self.inner.now()
    }
}

/// Wraps a [`Sleeper`] and counts calls.
#[derive(Debug, Default)]
pub struct CountingSleeper<S> {
    inner: S,
    calls: u64,
    last_request: Option<Duration>,
}

impl<S> CountingSleeper<S> {
    /// Wraps `inner`.
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            calls: 0,
            last_request: None,
        }
    }

    /// Number of sleeps requested so far.
    #[must_use]
    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// Most recent requested duration.
    #[must_use]
    pub fn last_request(&self) -> Option<Duration> {
        self.last_request
    }

    /// Returns the wrapped sleeper.
    #[must_use]
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Sleeper> Sleeper for CountingSleeper<S> {
    fn sleep_for(&mut self, duration: Duration) -> bool {
        self.calls += 1;
        self.last_request = Some(duration);
        self.inner.sleep_for(duration)
    }
}
