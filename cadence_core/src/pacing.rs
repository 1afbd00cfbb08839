// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor-based pacing with a reset-on-lag catch-up policy.
//!
//! The [`Pacer`] holds two anchors on the monotonic timeline: `last`, the
//! nominal start of the frame being run, and `next`, the deadline the loop
//! waits for before running the following one.
//!
//! # Catch-up policy
//!
//! Each frame the loop calls [`Pacer::reconcile`] with the current time:
//!
//! - **On schedule** (`now - last < 2 * period`): both anchors advance by
//!   exactly one period from where they were, regardless of the measured
//!   delta. Jitter within that window never accumulates, so the long-run
//!   cadence matches the target rate.
//! - **Lag** (`now - last >= 2 * period`): the anchors are rebased on `now`.
//!   Any backlog is dropped; a stall is never followed by a burst of
//!   back-to-back frames.
//!
//! Either way the measured delta is returned unmodified so history records
//! what actually happened.
//!
//! An unthrottled loop runs the same machine with a zero period, which always
//! takes the lag branch and so records plain frame-to-frame deltas.

use crate::time::{Duration, HostTime};

/// Which branch of the catch-up policy a reconciliation took.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reconciliation {
    /// Anchors advanced by one nominal period.
    OnSchedule,
    /// Anchors were rebased on the current time.
    Lag,
}

/// Result of one [`Pacer::reconcile`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Reconciled {
    /// Measured time since the previous `last` anchor.
    pub delta: Duration,
    /// Which branch was taken.
    pub outcome: Reconciliation,
}

/// Two-anchor pacing state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pacer {
    period: Duration,
    last: HostTime,
    next: HostTime,
}

impl Pacer {
    /// Creates a pacer with both anchors at `now`.
    #[must_use]
    pub const fn new(period: Duration, now: HostTime) -> Self {
        Self {
            period,
            last: now,
            next: now,
        }
    }

    /// Moves both anchors to `now`, discarding any schedule.
    pub fn reset(&mut self, now: HostTime) {
        self.last = now;
        self.next = now;
    }

    /// Sets the period used by subsequent reconciliations. Existing anchors
    /// are left untouched.
    pub fn set_period(&mut self, period: Duration) {
        self.period = period;
    }

    /// Returns the target period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Returns the nominal start of the current frame.
    #[must_use]
    pub const fn last_anchor(&self) -> HostTime {
        self.last
    }

    /// Returns the deadline for the next frame.
    #[must_use]
    pub const fn next_anchor(&self) -> HostTime {
        self.next
    }

    /// Applies the catch-up policy at time `now` and returns the measured
    /// frame delta.
    pub fn reconcile(&mut self, now: HostTime) -> Reconciled {
        let delta = now.saturating_duration_since(self.last);
        let two_periods = self.period.saturating_mul(2);

        let outcome = if delta < two_periods {
            self.next = self.last.saturating_add(two_periods);
            self.last = self.last.saturating_add(self.period);
            Reconciliation::OnSchedule
        } else {
            self.next = now.saturating_add(self.period);
            self.last = now;
            Reconciliation::Lag
        };

        Reconciled { delta, outcome }
    }
}
