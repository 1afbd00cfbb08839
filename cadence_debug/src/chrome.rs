// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format export.
//!
//! [`ChromeTraceSink`] buffers loop events as [Chrome Trace Event Format][spec]
//! objects and [`write`](ChromeTraceSink::write)s them as a JSON array,
//! suitable for loading into `chrome://tracing` or
//! [Perfetto](https://ui.perfetto.dev/).
//!
//! Waits become complete (`X`) slices, lag resets become instant events, and
//! the FPS estimate and frame delta are emitted as counters so they plot as
//! tracks.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use cadence_core::pacing::Reconciliation;
use cadence_core::time::HostTime;
use cadence_core::trace::{
    FrameEvent, LoopBeginEvent, LoopEndEvent, ReconcileEvent, TraceSink, WaitEvent,
};

use crate::nanos_to_us;

/// Collects trace events as Chrome Trace Event Format JSON values.
#[derive(Debug, Default)]
pub struct ChromeTraceSink {
    events: Vec<Value>,
    // Timestamp of the most recent reconcile; frame counters are placed there.
    frame_time: HostTime,
}

impl ChromeTraceSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected events.
    #[must_use]
    pub fn events(&self) -> &[Value] {
        &self.events
    }

    /// Writes the collected events as a pretty-printed JSON array.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from `writer`.
    pub fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(writer, &self.events)?;
        Ok(())
    }
}

impl TraceSink for ChromeTraceSink {
    fn on_loop_begin(&mut self, e: &LoopBeginEvent) {
        self.frame_time = e.now;
        let event = json!({
            "ph": "i",
            "name": "LoopBegin",
            "cat": "Loop",
            "ts": nanos_to_us(e.now.ticks()),
            "pid": 0,
            "tid": 0,
            "s": "g",
            "args": {
                "mode": format!("{:?}", e.mode),
                "period_us": nanos_to_us(e.period.ticks()),
            }
        });
        self.events.push(event);
    }

    fn on_wait(&mut self, e: &WaitEvent) {
        let dur = e.woke_at.saturating_duration_since(e.started_at);
        let event = json!({
            "ph": "X",
            "name": "Wait",
            "cat": "Wait",
            "ts": nanos_to_us(e.started_at.ticks()),
            "dur": nanos_to_us(dur.ticks()),
            "pid": 0,
            "tid": 0,
            "args": {
                "frame_index": e.frame_index,
                "coarse_us": e.coarse_request.map(|d| nanos_to_us(d.ticks())),
                "slept": e.slept,
                "spins": e.spins,
                "overshoot_us": nanos_to_us(
                    e.woke_at.saturating_duration_since(e.deadline).ticks()
                ),
            }
        });
        self.events.push(event);
    }

    fn on_reconcile(&mut self, e: &ReconcileEvent) {
        self.frame_time = e.now;
        if e.outcome == Reconciliation::Lag && e.period.ticks() != 0 {
            let event = json!({
                "ph": "i",
                "name": "LagReset",
                "cat": "Pacer",
                "ts": nanos_to_us(e.now.ticks()),
                "pid": 0,
                "tid": 0,
                "s": "t",
                "args": {
                    "frame_index": e.frame_index,
                    "delta_us": nanos_to_us(e.delta.ticks()),
                    "next_us": nanos_to_us(e.next_anchor.ticks()),
                }
            });
            self.events.push(event);
        }
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        let event = json!({
            "ph": "C",
            "name": "Frame",
            "cat": "Frame",
            "ts": nanos_to_us(self.frame_time.ticks()),
            "pid": 0,
            "tid": 0,
            "args": {
                "fps": e.fps_estimate,
                "delta_ms": nanos_to_us(e.delta.ticks()) / 1000.0,
            }
        });
        self.events.push(event);
    }

    fn on_loop_end(&mut self, e: &LoopEndEvent) {
        let event = json!({
            "ph": "i",
            "name": "LoopEnd",
            "cat": "Loop",
            "ts": nanos_to_us(e.last_seen.ticks()),
            "pid": 0,
            "tid": 0,
            "s": "g",
            "args": {
                "frames": e.frames,
            }
        });
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::config::PacingMode;
    use cadence_core::time::Duration;

    #[test]
    fn export_produces_valid_json() {
        let mut sink = ChromeTraceSink::new();
        sink.on_loop_begin(&LoopBeginEvent {
            now: HostTime(1_000_000),
            mode: PacingMode::Paced,
            period: Duration(16_666_667),
        });
        sink.on_wait(&WaitEvent {
            frame_index: 1,
            deadline: HostTime(34_333_334),
            started_at: HostTime(2_000_000),
            coarse_request: Some(Duration(31_333_334)),
            slept: Some(true),
            spins: 3,
            woke_at: HostTime(34_400_000),
        });
        sink.on_reconcile(&ReconcileEvent {
            frame_index: 1,
            now: HostTime(34_400_000),
            delta: Duration(33_400_000),
            outcome: Reconciliation::OnSchedule,
            period: Duration(16_666_667),
            last_anchor: HostTime(34_333_334),
            next_anchor: HostTime(51_000_001),
        });
        sink.on_frame(&FrameEvent {
            frame_index: 1,
            fps_estimate: 60,
            delta: Duration(33_400_000),
        });

        let mut out = Vec::new();
        sink.write(&mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&String::from_utf8(out).unwrap()).unwrap();

        // On-schedule reconciles are not exported; the counter carries the data.
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0]["name"], "LoopBegin");
        assert_eq!(parsed[1]["ph"], "X");
        assert_eq!(parsed[1]["ts"], 2000.0);
        assert_eq!(parsed[1]["dur"], 32400.0);
        assert_eq!(parsed[2]["ph"], "C");
        assert_eq!(parsed[2]["ts"], 34400.0);
        assert_eq!(parsed[2]["args"]["fps"], 60);
    }

    #[test]
    fn nanosecond_ticks_export_as_microseconds() {
        let mut sink = ChromeTraceSink::new();
        sink.on_loop_begin(&LoopBeginEvent {
            now: HostTime(2_500_000_000),
            mode: PacingMode::Paced,
            period: Duration(16_666_667),
        });
        let begin = &sink.events()[0];
        assert_eq!(begin["ts"], 2_500_000.0, "2.5s of nanosecond ticks");
        assert_eq!(begin["args"]["period_us"], 16_666.667, "one 60 fps period");
    }

    #[test]
    fn lag_is_an_instant_event() {
        let mut sink = ChromeTraceSink::new();
        sink.on_reconcile(&ReconcileEvent {
            frame_index: 4,
            now: HostTime(600_000_000),
            delta: Duration(500_000_000),
            outcome: Reconciliation::Lag,
            period: Duration(16_666_667),
            last_anchor: HostTime(600_000_000),
            next_anchor: HostTime(616_666_667),
        });
        assert_eq!(sink.events().len(), 1);
        assert_eq!(sink.events()[0]["name"], "LagReset");
        assert_eq!(sink.events()[0]["args"]["frame_index"], 4);
    }

    #[test]
    fn unthrottled_reconciles_are_not_lag() {
        let mut sink = ChromeTraceSink::new();
        sink.on_reconcile(&ReconcileEvent {
            frame_index: 0,
            now: HostTime(10),
            delta: Duration(10),
            outcome: Reconciliation::Lag,
            period: Duration::ZERO,
            last_anchor: HostTime(10),
            next_anchor: HostTime(10),
        });
        assert!(sink.events().is_empty());
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        ChromeTraceSink::new().write(&mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&String::from_utf8(out).unwrap()).unwrap();
        assert!(parsed.is_empty());
    }
}
