// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Times are
//! printed in microseconds.

use std::io::Write;

use cadence_core::config::PacingMode;
use cadence_core::pacing::Reconciliation;
use cadence_core::trace::{
    FrameEvent, LoopBeginEvent, LoopEndEvent, ReconcileEvent, TraceSink, WaitEvent,
};

use crate::nanos_to_us;

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_loop_begin(&mut self, e: &LoopBeginEvent) {
        let mode = match e.mode {
            PacingMode::Paced => "paced",
            PacingMode::Unthrottled => "unthrottled",
        };
        let _ = writeln!(
            self.writer,
            "[begin] {mode} period={:.1}µs at {:.1}µs",
            nanos_to_us(e.period.ticks()),
            nanos_to_us(e.now.ticks()),
        );
    }

    fn on_wait(&mut self, e: &WaitEvent) {
        let slept = match e.slept {
            Some(true) => "ok",
            Some(false) => "FAILED",
            None => "-",
        };
        let _ = writeln!(
            self.writer,
            "[wait] frame={} deadline={:.1}µs sleep={slept} spins={} late={:.1}µs",
            e.frame_index,
            nanos_to_us(e.deadline.ticks()),
            e.spins,
            nanos_to_us(e.woke_at.saturating_duration_since(e.deadline).ticks()),
        );
    }

    fn on_reconcile(&mut self, e: &ReconcileEvent) {
        let outcome = match e.outcome {
            Reconciliation::OnSchedule => "on-schedule",
            Reconciliation::Lag => "LAG",
        };
        let _ = writeln!(
            self.writer,
            "[reconcile] frame={} delta={:.1}µs {outcome} next={:.1}µs",
            e.frame_index,
            nanos_to_us(e.delta.ticks()),
            nanos_to_us(e.next_anchor.ticks()),
        );
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        let _ = writeln!(
            self.writer,
            "[frame] frame={} fps={} delta={:.1}µs",
            e.frame_index,
            e.fps_estimate,
            nanos_to_us(e.delta.ticks()),
        );
    }

    fn on_loop_end(&mut self, e: &LoopEndEvent) {
        let _ = writeln!(
            self.writer,
            "[end] frames={} at {:.1}µs",
            e.frames,
            nanos_to_us(e.last_seen.ticks()),
        );
    }
}
