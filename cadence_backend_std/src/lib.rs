// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Portable std backend for cadence.
//!
//! - [`InstantClock`]: monotonic nanosecond ticks from [`std::time::Instant`]
//! - [`ThreadSleeper`]: coarse waits via [`std::thread::sleep`]
//! - [`paced`] / [`unthrottled`]: a [`FrameLoop`] wired to both
//!
//! `std::thread::sleep` typically overshoots by tens of microseconds to a
//! few milliseconds depending on the OS scheduler. The spin phase of the
//! hybrid wait covers undershoot; set
//! [`LoopConfig::spin_margin`](cadence_core::config::LoopConfig::spin_margin)
//! to at least the platform's typical overshoot.

use cadence_core::config::{ConfigError, LoopConfig};
use cadence_core::frame_loop::FrameLoop;

mod sleep;
mod time;

pub use sleep::ThreadSleeper;
pub use time::InstantClock;

/// A frame loop on the std clock and sleeper.
pub type StdFrameLoop = FrameLoop<InstantClock, ThreadSleeper>;

/// Creates a paced loop at `fps` frames per second.
///
/// # Errors
///
/// Returns a [`ConfigError`] for an unusable rate.
pub fn paced(fps: f64) -> Result<StdFrameLoop, ConfigError> {
    FrameLoop::paced(InstantClock::new(), ThreadSleeper, fps)
}

/// Creates an unthrottled loop.
#[must_use]
pub fn unthrottled() -> StdFrameLoop {
    FrameLoop::unthrottled(InstantClock::new(), ThreadSleeper)
}

/// Creates a loop from a full configuration.
///
/// # Errors
///
/// Returns the [`ConfigError`] reported by
/// [`LoopConfig::validate`](cadence_core::config::LoopConfig::validate).
pub fn with_config(config: LoopConfig) -> Result<StdFrameLoop, ConfigError> {
    FrameLoop::new(InstantClock::new(), ThreadSleeper, config)
}
