// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame snapshot handed to the frame callback.

use crate::time::{Duration, NANOS_PER_SECOND};

/// Timing information for one frame.
///
/// Built fresh by the loop each frame and lent to the callback; it describes
/// the frame that just elapsed, not the one about to be produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    /// Frames counted in the trailing ~1 second window.
    pub fps_estimate: u32,
    /// Duration of the just-completed frame in nanoseconds.
    pub delta_ticks: u64,
    /// `delta_ticks` in seconds.
    pub delta_seconds: f64,
    /// Zero-based index of this frame within the current `begin` call.
    pub frame_index: u64,
}

impl Timing {
    /// Builds a snapshot from a measured delta.
    #[must_use]
    pub fn new(frame_index: u64, delta: Duration, fps_estimate: u32) -> Self {
        Self {
            fps_estimate,
            delta_ticks: delta.ticks(),
            delta_seconds: delta.ticks() as f64 / NANOS_PER_SECOND as f64,
            frame_index,
        }
    }

    /// Returns the frame delta as a [`Duration`].
    #[inline]
    #[must_use]
    pub const fn delta(&self) -> Duration {
        Duration(self.delta_ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_mirror_ticks() {
        let t = Timing::new(3, Duration(16_667_000), 60);
        assert_eq!(t.delta_ticks, 16_667_000);
        assert!((t.delta_seconds - 0.016_667).abs() < 1e-12, "{}", t.delta_seconds);
        assert_eq!(t.delta(), Duration(16_667_000));
        assert_eq!(t.fps_estimate, 60);
        assert_eq!(t.frame_index, 3);
    }
}
