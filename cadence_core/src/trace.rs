// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the frame loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! loop calls at each stage of a frame. All method bodies default to no-ops,
//! so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! Ready-made sinks (pretty printing, Chrome trace export, aggregate stats)
//! live in the `cadence_debug` crate.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use crate::config::PacingMode;
use crate::pacing::{Reconciled, Reconciliation};
use crate::time::{Duration, HostTime};
use crate::timing::Timing;
use crate::wait::WaitReport;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted once when `begin` anchors the pacer.
#[derive(Clone, Copy, Debug)]
pub struct LoopBeginEvent {
    /// Host time both anchors were set to.
    pub now: HostTime,
    /// Pacing mode of the loop.
    pub mode: PacingMode,
    /// Target period (zero when unthrottled).
    pub period: Duration,
}

/// Emitted after the loop waited for a frame deadline (paced mode only).
#[derive(Clone, Copy, Debug)]
pub struct WaitEvent {
    /// Frame the wait preceded.
    pub frame_index: u64,
    /// Deadline waited for.
    pub deadline: HostTime,
    /// Host time the wait began.
    pub started_at: HostTime,
    /// Duration requested from the sleeper, if any.
    pub coarse_request: Option<Duration>,
    /// Sleeper result, if it was called.
    pub slept: Option<bool>,
    /// Clock polls made while spinning.
    pub spins: u64,
    /// Host time the wait ended.
    pub woke_at: HostTime,
}

impl WaitEvent {
    /// Creates a `WaitEvent` from a [`WaitReport`].
    #[must_use]
    pub fn new(frame_index: u64, report: &WaitReport) -> Self {
        Self {
            frame_index,
            deadline: report.deadline,
            started_at: report.started_at,
            coarse_request: report.coarse_request,
            slept: report.slept,
            spins: report.spins,
            woke_at: report.woke_at,
        }
    }
}

/// Emitted after the pacer applied its catch-up policy.
#[derive(Clone, Copy, Debug)]
pub struct ReconcileEvent {
    /// Frame being reconciled.
    pub frame_index: u64,
    /// Host time the reconciliation used.
    pub now: HostTime,
    /// Measured frame delta.
    pub delta: Duration,
    /// Branch taken by the catch-up policy.
    pub outcome: Reconciliation,
    /// Period in effect.
    pub period: Duration,
    /// `last` anchor after the call.
    pub last_anchor: HostTime,
    /// `next` anchor after the call.
    pub next_anchor: HostTime,
}

impl ReconcileEvent {
    /// Creates a `ReconcileEvent` from a [`Reconciled`] result plus the
    /// pacer state it left behind.
    #[must_use]
    pub fn new(
        frame_index: u64,
        now: HostTime,
        reconciled: &Reconciled,
        period: Duration,
        last_anchor: HostTime,
        next_anchor: HostTime,
    ) -> Self {
        Self {
            frame_index,
            now,
            delta: reconciled.delta,
            outcome: reconciled.outcome,
            period,
            last_anchor,
            next_anchor,
        }
    }
}

/// Emitted just before the frame callback runs.
#[derive(Clone, Copy, Debug)]
pub struct FrameEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// FPS estimate handed to the callback.
    pub fps_estimate: u32,
    /// Frame delta handed to the callback.
    pub delta: Duration,
}

impl From<&Timing> for FrameEvent {
    fn from(timing: &Timing) -> Self {
        Self {
            frame_index: timing.frame_index,
            fps_estimate: timing.fps_estimate,
            delta: timing.delta(),
        }
    }
}

/// Emitted when `begin` returns normally.
#[derive(Clone, Copy, Debug)]
pub struct LoopEndEvent {
    /// Frames delivered during the call.
    pub frames: u64,
    /// Last host time the loop observed.
    pub last_seen: HostTime,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the frame loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when the loop starts.
    fn on_loop_begin(&mut self, e: &LoopBeginEvent) {
        _ = e;
    }

    /// Called after each paced wait.
    fn on_wait(&mut self, e: &WaitEvent) {
        _ = e;
    }

    /// Called after each reconciliation.
    fn on_reconcile(&mut self, e: &ReconcileEvent) {
        _ = e;
    }

    /// Called before each frame callback.
    fn on_frame(&mut self, e: &FrameEvent) {
        _ = e;
    }

    /// Called when the loop exits.
    fn on_loop_end(&mut self, e: &LoopEndEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`LoopBeginEvent`].
    #[inline]
    pub fn loop_begin(&mut self, e: &LoopBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_loop_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`WaitEvent`].
    #[inline]
    pub fn wait(&mut self, e: &WaitEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_wait(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ReconcileEvent`].
    #[inline]
    pub fn reconcile(&mut self, e: &ReconcileEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_reconcile(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FrameEvent`].
    #[inline]
    pub fn frame(&mut self, e: &FrameEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LoopEndEvent`].
    #[inline]
    pub fn loop_end(&mut self, e: &LoopEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_loop_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> WaitReport {
        WaitReport {
            deadline: HostTime(1_016_667),
            started_at: HostTime(1_000_000),
            coarse_request: Some(Duration(15_000)),
            slept: Some(true),
            spins: 12,
            woke_at: HostTime(1_016_700),
        }
    }

    #[test]
    fn wait_event_from_report() {
        let evt = WaitEvent::new(9, &sample_report());
        assert_eq!(evt.frame_index, 9);
        assert_eq!(evt.deadline, HostTime(1_016_667));
        assert_eq!(evt.slept, Some(true));
        assert_eq!(evt.spins, 12);
    }

    #[test]
    fn frame_event_from_timing() {
        let timing = Timing::new(4, Duration(16_000_000), 58);
        let evt = FrameEvent::from(&timing);
        assert_eq!(evt.frame_index, 4);
        assert_eq!(evt.fps_estimate, 58);
        assert_eq!(evt.delta, Duration(16_000_000));
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_wait(&WaitEvent::new(0, &sample_report()));
        sink.on_loop_end(&LoopEndEvent {
            frames: 0,
            last_seen: HostTime(0),
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.wait(&WaitEvent::new(0, &sample_report()));
        tracer.frame(&FrameEvent::from(&Timing::new(0, Duration::ZERO, 0)));
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            frames: Vec<u64>,
        }
        impl TraceSink for RecordingSink {
            fn on_frame(&mut self, e: &FrameEvent) {
                self.frames.push(e.frame_index);
            }
        }

        let mut sink = RecordingSink { frames: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.frame(&FrameEvent::from(&Timing::new(42, Duration(1), 1)));
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.frames, &[42]);
    }
}
