// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Windows backend for cadence.
//!
//! - [`QpcClock`]: `QueryPerformanceCounter` ticks converted to nanoseconds
//! - [`WaitableTimerSleeper`]: high-resolution waitable timer for the coarse
//!   phase of the hybrid wait

#![cfg(windows)]
#![expect(unsafe_code, reason = "Win32 timing APIs are only exposed as unsafe functions")]

use cadence_core::config::{ConfigError, LoopConfig};
use cadence_core::frame_loop::FrameLoop;

mod sleep;
mod time;

pub use sleep::WaitableTimerSleeper;
pub use time::QpcClock;

/// A frame loop on the performance counter.
pub type WindowsFrameLoop = FrameLoop<QpcClock, WaitableTimerSleeper>;

/// Creates a loop from a full configuration.
///
/// # Errors
///
/// Returns the [`ConfigError`] reported by
/// [`LoopConfig::validate`](cadence_core::config::LoopConfig::validate).
pub fn with_config(config: LoopConfig) -> Result<WindowsFrameLoop, ConfigError> {
    FrameLoop::new(QpcClock::new(), WaitableTimerSleeper::new(), config)
}
