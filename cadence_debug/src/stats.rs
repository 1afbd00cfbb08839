// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Aggregate loop statistics.

use std::fmt;

use cadence_core::config::PacingMode;
use cadence_core::pacing::Reconciliation;
use cadence_core::time::Duration;
use cadence_core::trace::{FrameEvent, LoopBeginEvent, ReconcileEvent, TraceSink, WaitEvent};

/// Counts what the loop did without keeping per-frame records.
///
/// `Display` renders a one-line report, e.g.
/// `frames=600 lag=2 sleeps=598/600 spins=4210 worst_delta=512.3ms worst_late=0.1ms`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StatsSink {
    runs: u64,
    frames: u64,
    lag_frames: u64,
    waits: u64,
    sleeps: u64,
    failed_sleeps: u64,
    spin_polls: u64,
    worst_delta: Duration,
    worst_overshoot: Duration,
    paced: bool,
}

impl StatsSink {
    /// Creates a sink with all counters at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `begin` calls observed.
    #[must_use]
    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Frames delivered to the callback.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Paced frames whose reconciliation rebased the schedule.
    #[must_use]
    pub fn lag_frames(&self) -> u64 {
        self.lag_frames
    }

    /// Paced waits performed.
    #[must_use]
    pub fn waits(&self) -> u64 {
        self.waits
    }

    /// Coarse sleeps requested.
    #[must_use]
    pub fn sleeps(&self) -> u64 {
        self.sleeps
    }

    /// Coarse sleeps the sleeper reported as failed.
    #[must_use]
    pub fn failed_sleeps(&self) -> u64 {
        self.failed_sleeps
    }

    /// Clock polls made by spin phases.
    #[must_use]
    pub fn spin_polls(&self) -> u64 {
        self.spin_polls
    }

    /// Largest frame delta seen.
    #[must_use]
    pub fn worst_delta(&self) -> Duration {
        self.worst_delta
    }

    /// Latest wake-up past a deadline.
    #[must_use]
    pub fn worst_overshoot(&self) -> Duration {
        self.worst_overshoot
    }
}

impl TraceSink for StatsSink {
    fn on_loop_begin(&mut self, e: &LoopBeginEvent) {
        self.runs += 1;
        self.paced = e.mode == PacingMode::Paced;
    }

    fn on_wait(&mut self, e: &WaitEvent) {
        self.waits += 1;
        self.spin_polls += e.spins;
        if let Some(ok) = e.slept {
            self.sleeps += 1;
            if !ok {
                self.failed_sleeps += 1;
            }
        }
        self.worst_overshoot = self
            .worst_overshoot
            .max(e.woke_at.saturating_duration_since(e.deadline));
    }

    fn on_reconcile(&mut self, e: &ReconcileEvent) {
        // Unthrottled frames always take the lag branch; that is not a stall.
        if self.paced && e.outcome == Reconciliation::Lag {
            self.lag_frames += 1;
        }
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        self.frames += 1;
        self.worst_delta = self.worst_delta.max(e.delta);
    }
}

impl fmt::Display for StatsSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frames={} lag={} sleeps={}/{} spins={} worst_delta={:.1}ms worst_late={:.1}ms",
            self.frames,
            self.lag_frames,
            self.sleeps - self.failed_sleeps,
            self.sleeps,
            self.spin_polls,
            self.worst_delta.as_secs_f64() * 1e3,
            self.worst_overshoot.as_secs_f64() * 1e3,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::time::HostTime;

    const PERIOD: Duration = Duration(16_666_667);

    fn begin(sink: &mut StatsSink, mode: PacingMode, period: Duration) {
        sink.on_loop_begin(&LoopBeginEvent {
            now: HostTime(0),
            mode,
            period,
        });
    }

    fn reconcile(sink: &mut StatsSink, outcome: Reconciliation, period: Duration) {
        sink.on_reconcile(&ReconcileEvent {
            frame_index: 0,
            now: HostTime(0),
            delta: Duration::ZERO,
            outcome,
            period,
            last_anchor: HostTime(0),
            next_anchor: HostTime(0),
        });
    }

    #[test]
    fn counts_sleeps_and_failures() {
        let mut sink = StatsSink::new();
        begin(&mut sink, PacingMode::Paced, PERIOD);
        for (slept, spins) in [(Some(true), 3), (Some(false), 50), (None, 7)] {
            sink.on_wait(&WaitEvent {
                frame_index: 0,
                deadline: HostTime(1_000),
                started_at: HostTime(0),
                coarse_request: slept.map(|_| Duration(500)),
                slept,
                spins,
                woke_at: HostTime(1_200),
            });
        }
        assert_eq!(sink.waits(), 3);
        assert_eq!(sink.sleeps(), 2);
        assert_eq!(sink.failed_sleeps(), 1);
        assert_eq!(sink.spin_polls(), 60);
        assert_eq!(sink.worst_overshoot(), Duration(200));
    }

    #[test]
    fn lag_only_counts_when_paced() {
        let mut sink = StatsSink::new();
        begin(&mut sink, PacingMode::Unthrottled, Duration::ZERO);
        reconcile(&mut sink, Reconciliation::Lag, Duration::ZERO);
        assert_eq!(sink.lag_frames(), 0, "unthrottled frames always rebase");

        begin(&mut sink, PacingMode::Paced, PERIOD);
        reconcile(&mut sink, Reconciliation::OnSchedule, PERIOD);
        reconcile(&mut sink, Reconciliation::Lag, PERIOD);
        assert_eq!(sink.lag_frames(), 1);
        assert_eq!(sink.runs(), 2);
    }

    #[test]
    fn lag_follows_mode_not_period() {
        let mut sink = StatsSink::new();
        begin(&mut sink, PacingMode::Unthrottled, PERIOD);
        reconcile(&mut sink, Reconciliation::Lag, PERIOD);
        assert_eq!(sink.lag_frames(), 0, "unthrottled with a stale period");

        begin(&mut sink, PacingMode::Paced, Duration(1));
        reconcile(&mut sink, Reconciliation::Lag, Duration(1));
        assert_eq!(sink.lag_frames(), 1, "paced at a tiny period");
    }

    #[test]
    fn report_line() {
        let mut sink = StatsSink::new();
        begin(&mut sink, PacingMode::Paced, PERIOD);
        for ms in [16, 17, 500] {
            sink.on_frame(&FrameEvent {
                frame_index: 0,
                fps_estimate: 60,
                delta: Duration::from_millis(ms),
            });
        }
        let line = sink.to_string();
        assert!(line.starts_with("frames=3 lag=0"), "got: {line}");
        assert!(line.contains("worst_delta=500.0ms"), "got: {line}");
    }
}
