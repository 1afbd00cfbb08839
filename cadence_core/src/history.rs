// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-capacity frame history with a windowed FPS estimator.
//!
//! [`FrameHistory`] keeps the last `N` frame durations in a ring. Storage is
//! allocated once and zero-filled, so the buffer always holds exactly `N`
//! samples and recording never allocates.
//!
//! # Estimating FPS
//!
//! [`estimate_fps`](FrameHistory::estimate_fps) walks backward from the
//! newest sample, summing durations, and returns how many samples it visited
//! when either the sum first exceeds one second (the crossing sample counts)
//! or the caller's cap is reached.
//!
//! Right after construction the zero-filled slots never push the sum over one
//! second, so the estimate sits at the cap until about a second of real
//! samples has been recorded.

use alloc::boxed::Box;
use alloc::vec;

use crate::time::Duration;

/// Ring buffer of per-frame durations.
#[derive(Clone, Debug)]
pub struct FrameHistory {
    samples: Box<[Duration]>,
    /// Slot the next sample is written to. Always `< samples.len()`.
    cursor: usize,
    total_recorded: u64,
}

impl FrameHistory {
    /// Creates a zero-filled history holding `capacity` samples.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity != 0, "frame history capacity must not be zero");
        Self {
            samples: vec![Duration::ZERO; capacity].into_boxed_slice(),
            cursor: 0,
            total_recorded: 0,
        }
    }

    /// Returns the fixed number of slots.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Returns how many samples have been recorded since construction,
    /// including ones that have since been overwritten.
    #[inline]
    #[must_use]
    pub fn total_recorded(&self) -> u64 {
        self.total_recorded
    }

    /// Overwrites the oldest slot with `duration` and advances the cursor.
    pub fn record(&mut self, duration: Duration) {
        self.samples[self.cursor] = duration;
        self.cursor = (self.cursor + 1) % self.samples.len();
        self.total_recorded = self.total_recorded.saturating_add(1);
    }

    /// Returns the most recently written slot (zero before any record).
    #[must_use]
    pub fn latest(&self) -> Duration {
        self.samples[self.newest_index()]
    }

    /// Iterates over every slot from newest to oldest.
    pub fn iter_recent(&self) -> impl Iterator<Item = Duration> + '_ {
        let len = self.samples.len();
        let newest = self.newest_index();
        (0..len).map(move |i| self.samples[(newest + len - i) % len])
    }

    /// Counts the newest samples that cover the trailing second, up to
    /// `target_cap` samples (and never more than the capacity).
    #[must_use]
    pub fn estimate_fps(&self, target_cap: u32) -> u32 {
        let limit = usize::try_from(target_cap)
            .unwrap_or(usize::MAX)
            .min(self.samples.len());
        let mut sum = Duration::ZERO;
        let mut walked: u32 = 0;
        for sample in self.iter_recent().take(limit) {
            sum = sum.saturating_add(sample);
            walked += 1;
            if sum > Duration::SECOND {
                break;
            }
        }
        walked
    }

    /// Returns the mean of the newest `n` slots (clamped to the capacity), or
    /// zero when `n` is zero.
    #[must_use]
    pub fn mean_recent(&self, n: usize) -> Duration {
        let n = n.min(self.samples.len());
        if n == 0 {
            return Duration::ZERO;
        }
        let sum: u128 = self
            .iter_recent()
            .take(n)
            .map(|d| u128::from(d.ticks()))
            .sum();
        Duration(u64::try_from(sum / n as u128).unwrap_or(u64::MAX))
    }

    fn newest_index(&self) -> usize {
        let len = self.samples.len();
        (self.cursor + len - 1) % len
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    const FRAME_60: Duration = Duration(16_667_000);

    #[test]
    fn cold_start_estimate_is_pinned_at_cap() {
        let history = FrameHistory::new(300);
        assert_eq!(history.estimate_fps(60), 60, "walks 60 zero slots");
        assert_eq!(history.latest(), Duration::ZERO);
    }

    #[test]
    fn crossing_sample_is_counted() {
        let mut history = FrameHistory::new(300);
        for _ in 0..60 {
            history.record(FRAME_60);
        }
        // 60 * 16.667ms = 1.00002s; the 60th sample crosses the second.
        assert_eq!(history.estimate_fps(60), 60);
        // A larger cap stops at the crossing sample too.
        assert_eq!(history.estimate_fps(120), 60);
    }

    #[test]
    fn exactly_one_second_does_not_cross() {
        let mut history = FrameHistory::new(10);
        for _ in 0..4 {
            history.record(Duration::from_millis(250));
        }
        // Sum reaches exactly 1s after four samples; the walk keeps going
        // into the zero slots until the cap.
        assert_eq!(history.estimate_fps(6), 6);
    }

    #[test]
    fn slow_frames_lower_the_estimate() {
        let mut history = FrameHistory::new(300);
        for _ in 0..100 {
            history.record(Duration::from_millis(40));
        }
        // 26 * 40ms = 1.04s is the first sum over one second.
        assert_eq!(history.estimate_fps(60), 26);
    }

    #[test]
    fn stall_sample_is_kept_and_counted() {
        let mut history = FrameHistory::new(300);
        for _ in 0..60 {
            history.record(FRAME_60);
        }
        history.record(Duration::from_millis(500));
        assert_eq!(history.latest(), Duration::from_millis(500), "not clipped");

        // 500ms + 30 * 16.667ms = 1.00001s, so 31 samples cover the second.
        assert_eq!(history.estimate_fps(60), 31);
    }

    #[test]
    fn cap_is_bounded_by_capacity() {
        let history = FrameHistory::new(8);
        assert_eq!(history.estimate_fps(60), 8, "never walks a slot twice");
        assert_eq!(history.estimate_fps(0), 0);
    }

    #[test]
    fn cursor_wraps_and_overwrites_oldest() {
        let mut history = FrameHistory::new(3);
        for ms in 1..=5 {
            history.record(Duration::from_millis(ms));
        }
        let recent: Vec<u64> = history.iter_recent().map(|d| d.ticks() / 1_000_000).collect();
        assert_eq!(recent, [5, 4, 3], "newest first after wrapping");
        assert_eq!(history.total_recorded(), 5);
        assert_eq!(history.capacity(), 3);
    }

    #[test]
    fn mean_of_recent_samples() {
        let mut history = FrameHistory::new(4);
        history.record(Duration(10));
        history.record(Duration(20));
        history.record(Duration(30));
        assert_eq!(history.mean_recent(2), Duration(25));
        assert_eq!(history.mean_recent(0), Duration::ZERO);
        // Clamped to capacity; includes the untouched zero slot.
        assert_eq!(history.mean_recent(100), Duration(15));
    }

    #[test]
    #[should_panic(expected = "capacity must not be zero")]
    fn zero_capacity_panics() {
        let _ = FrameHistory::new(0);
    }
}
