// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linux backend for cadence.
//!
//! - [`MonotonicClock`]: `clock_gettime(CLOCK_MONOTONIC)` in nanoseconds
//! - [`NanoSleeper`]: relative `clock_nanosleep` on the same clock, which
//!   reports signal interruptions instead of silently retrying
//! - [`timebase`]: host ticks are nanoseconds

use cadence_core::config::{ConfigError, LoopConfig};
use cadence_core::frame_loop::FrameLoop;

mod sleep;
mod time;

pub use sleep::NanoSleeper;
pub use time::{MonotonicClock, timebase};

/// A frame loop on the kernel monotonic clock.
pub type LinuxFrameLoop = FrameLoop<MonotonicClock, NanoSleeper>;

/// Creates a loop from a full configuration.
///
/// # Errors
///
/// Returns the [`ConfigError`] reported by
/// [`LoopConfig::validate`](cadence_core::config::LoopConfig::validate).
pub fn with_config(config: LoopConfig) -> Result<LinuxFrameLoop, ConfigError> {
    FrameLoop::new(MonotonicClock, NanoSleeper::default(), config)
}
