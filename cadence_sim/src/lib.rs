// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic clocks and sleepers for testing frame loops.
//!
//! A [`SimClock`] is a handle to shared virtual time: clones observe the same
//! timeline, so a test can hand one clone to the loop, another to a
//! [`SimSleeper`], and keep a third to simulate work inside the frame
//! callback.
//!
//! ```
//! use cadence_core::frame_loop::FrameLoop;
//! use cadence_core::time::{Duration, HostTime};
//! use cadence_sim::{SimClock, SimSleeper};
//! use std::cell::Cell;
//!
//! let clock = SimClock::new(HostTime(0)).with_step(Duration::from_micros(10));
//! let sleeper = SimSleeper::new(clock.clone());
//! let mut frame_loop = FrameLoop::paced(clock.clone(), sleeper, 60.0).unwrap();
//!
//! let frames = Cell::new(0);
//! frame_loop.begin(
//!     || frames.get() == 120,
//!     |_| {
//!         clock.advance(Duration::from_millis(4));
//!         frames.set(frames.get() + 1);
//!     },
//! );
//! // 120 frames at 60 fps take two seconds of virtual time.
//! assert!(clock.peek() >= HostTime(2_000_000_000));
//! ```

mod clock;
mod counting;
mod sleeper;

pub use clock::{ScriptedClock, SimClock};
pub use counting::{CountingClock, CountingSleeper};
pub use sleeper::SimSleeper;
