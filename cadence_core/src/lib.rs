// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-pacing scheduler for real-time loops.
//!
//! `cadence_core` runs a per-frame callback at a target rate, absorbs stalls
//! without bursting to catch up, and reports a windowed estimate of the
//! achieved frame rate. It is `no_std` compatible (with `alloc`) and reaches
//! the platform only through two small capability traits.
//!
//! # Architecture
//!
//! ```text
//!   exit()? ──► HybridWait::wait_until(next)     (paced only)
//!                  │  Sleeper::sleep_for, then spin on Clock::now
//!                  ▼
//!   Clock::now ──► Pacer::reconcile ──► FrameHistory::record
//!                                            │
//!                                            ▼
//!                 frame(&Timing) ◄── FrameHistory::estimate_fps
//! ```
//!
//! **[`frame_loop`]**: [`FrameLoop`](frame_loop::FrameLoop), the blocking
//! orchestrator with `begin`, `try_begin` and `set_fps`.
//!
//! **[`pacing`]**: Two-anchor state machine with a reset-on-lag catch-up
//! policy.
//!
//! **[`history`]**: Fixed-capacity ring of frame durations and the windowed
//! FPS estimator.
//!
//! **[`wait`]**: Hybrid coarse-sleep / spin wait.
//!
//! **[`clock`]** and **[`sleep`]**: The [`Clock`](clock::Clock) and
//! [`Sleeper`](sleep::Sleeper) capabilities backends implement.
//!
//! **[`config`]**: [`LoopConfig`](config::LoopConfig) presets and
//! construction-time validation.
//!
//! **[`timing`]**: The [`Timing`](timing::Timing) snapshot handed to the
//! callback.
//!
//! **[`time`]**: Monotonic host time, durations, and timebases.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! loop instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod clock;
pub mod config;
pub mod frame_loop;
pub mod history;
pub mod pacing;
pub mod sleep;
pub mod time;
pub mod timing;
pub mod trace;
pub mod wait;
