// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated frame loop that exercises the pacing and diagnostics pipeline.
//!
//! Runs 90 frames at 60 fps on virtual time. Frame work varies from frame to
//! frame, one frame stalls for half a second, and the coarse sleeper
//! oversleeps slightly and fails now and then. Events go to a
//! [`PrettyPrintSink`], a [`ChromeTraceSink`], and a [`StatsSink`]; the
//! Chrome trace is written to `pacing_trace.json`.

use std::cell::Cell;
use std::fs::File;
use std::io::BufWriter;

use cadence_core::frame_loop::FrameLoop;
use cadence_core::time::{Duration, HostTime};
use cadence_core::trace::Tracer;
use cadence_debug::Fanout;
use cadence_debug::chrome::ChromeTraceSink;
use cadence_debug::pretty::PrettyPrintSink;
use cadence_debug::stats::StatsSink;
use cadence_sim::{SimClock, SimSleeper};

const FRAME_COUNT: u64 = 90;
const TARGET_FPS: f64 = 60.0;
const STALL_FRAME: u64 = 45;

fn main() {
    // -- sinks -------------------------------------------------------------
    let mut sinks = Fanout {
        a: PrettyPrintSink::with_writer(std::io::stdout()),
        b: Fanout {
            a: ChromeTraceSink::new(),
            b: StatsSink::new(),
        },
    };

    // -- simulated platform ------------------------------------------------
    // Every clock read costs 5µs so spin phases make progress.
    let clock = SimClock::new(HostTime(1_000_000_000)).with_step(Duration::from_micros(5));
    let sleeper = SimSleeper::new(clock.clone())
        .with_overshoot(Duration::from_micros(300))
        .with_failure_every(7);

    let mut frame_loop =
        FrameLoop::paced(clock.clone(), sleeper, TARGET_FPS).expect("60 fps is a valid rate");

    // -- run ---------------------------------------------------------------
    let frames = Cell::new(0_u64);
    {
        let mut tracer = Tracer::new(&mut sinks);
        frame_loop.begin_traced(
            &mut tracer,
            || frames.get() == FRAME_COUNT,
            |timing| {
                let work_us = 2_000 + (timing.frame_index * 1_300) % 9_000;
                clock.advance(Duration::from_micros(work_us));
                if timing.frame_index == STALL_FRAME {
                    clock.advance(Duration::from_millis(500));
                }
                frames.set(frames.get() + 1);
            },
        );
    }

    println!("{}", sinks.b.b);
    println!(
        "sleeper: {} calls, {} failed",
        frame_loop.sleeper().calls(),
        frame_loop.sleeper().failures()
    );

    // -- export Chrome trace -----------------------------------------------
    let path = "pacing_trace.json";
    let file = File::create(path).expect("failed to create pacing_trace.json");
    let mut writer = BufWriter::new(file);
    sinks
        .b
        .a
        .write(&mut writer)
        .expect("failed to write Chrome trace");

    println!("Wrote {path} ({FRAME_COUNT} frames)");
}
