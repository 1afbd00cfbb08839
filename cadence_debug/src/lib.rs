// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing, Chrome trace export, and aggregate stats for cadence
//! diagnostics.
//!
//! This crate provides [`TraceSink`](cadence_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`chrome::ChromeTraceSink`]: Chrome Trace Event Format JSON.
//! - [`stats::StatsSink`]: running counters with a one-line report.
//!
//! Sinks are combined with [`Fanout`] when more than one should see the same
//! loop.

use cadence_core::trace::{
    FrameEvent, LoopBeginEvent, LoopEndEvent, ReconcileEvent, TraceSink, WaitEvent,
};

pub mod chrome;
pub mod pretty;
pub mod stats;

/// Forwards every event to two sinks, first `a` then `b`.
#[derive(Debug)]
pub struct Fanout<A, B> {
    /// First sink.
    pub a: A,
    /// Second sink.
    pub b: B,
}

impl<A: TraceSink, B: TraceSink> TraceSink for Fanout<A, B> {
    fn on_loop_begin(&mut self, e: &LoopBeginEvent) {
        self.a.on_loop_begin(e);
        self.b.on_loop_begin(e);
    }

    fn on_wait(&mut self, e: &WaitEvent) {
        self.a.on_wait(e);
        self.b.on_wait(e);
    }

    fn on_reconcile(&mut self, e: &ReconcileEvent) {
        self.a.on_reconcile(e);
        self.b.on_reconcile(e);
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        self.a.on_frame(e);
        self.b.on_frame(e);
    }

    fn on_loop_end(&mut self, e: &LoopEndEvent) {
        self.a.on_loop_end(e);
        self.b.on_loop_end(e);
    }
}

/// Core ticks are nanoseconds; trace output is in microseconds.
fn nanos_to_us(nanos: u64) -> f64 {
    nanos as f64 / 1000.0
}
