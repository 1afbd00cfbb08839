// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loop configuration and construction-time validation.
//!
//! [`LoopConfig`] is a plain value with `const` presets. The loop validates it
//! once at construction (and again on every rate change), so a bad target
//! rate is rejected loudly instead of turning into a division by zero or a
//! silently clipped FPS estimate.

use core::fmt;

use crate::time::Duration;

/// Default number of per-frame samples kept by the history buffer.
pub const DEFAULT_HISTORY_CAPACITY: usize = 300;

/// Default safety margin subtracted from the coarse sleep so the sleeper
/// does not overshoot the deadline.
pub const DEFAULT_SPIN_MARGIN: Duration = Duration::from_millis(1);

/// Highest accepted target rate (a one-nanosecond period).
pub const MAX_TARGET_FPS: f64 = 1_000_000_000.0;

/// Whether the loop waits for frame deadlines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PacingMode {
    /// Wait until each frame's deadline before running it.
    Paced,
    /// Run frames back-to-back with no waiting (benchmarks, headless runs).
    Unthrottled,
}

/// Configuration for a [`FrameLoop`](crate::frame_loop::FrameLoop).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoopConfig {
    /// Pacing mode.
    pub mode: PacingMode,
    /// Target frame rate in frames per second. Ignored in
    /// [`PacingMode::Unthrottled`].
    pub target_fps: f64,
    /// Number of samples kept by the history buffer.
    pub history_capacity: usize,
    /// Portion of each wait left to the spin phase.
    pub spin_margin: Duration,
}

impl LoopConfig {
    /// Paced at 60 frames per second with default history and margin.
    pub const DEFAULT: Self = Self::paced(60.0);

    /// Paced configuration at the given rate.
    #[must_use]
    pub const fn paced(target_fps: f64) -> Self {
        Self {
            mode: PacingMode::Paced,
            target_fps,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            spin_margin: DEFAULT_SPIN_MARGIN,
        }
    }

    /// Unthrottled configuration.
    #[must_use]
    pub const fn unthrottled() -> Self {
        Self {
            mode: PacingMode::Unthrottled,
            ..Self::DEFAULT
        }
    }

    /// Returns a copy with a different target rate.
    #[must_use]
    pub const fn with_target_fps(mut self, target_fps: f64) -> Self {
        self.target_fps = target_fps;
        self
    }

    /// Returns a copy with a different history capacity.
    #[must_use]
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Returns a copy with a different spin margin.
    #[must_use]
    pub const fn with_spin_margin(mut self, margin: Duration) -> Self {
        self.spin_margin = margin;
        self
    }

    /// Checks the configuration for errors.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroCapacity`] if the history buffer would be empty.
    /// - [`ConfigError::InvalidFps`] if the mode is paced and the rate is not
    ///   a finite, positive number.
    /// - [`ConfigError::FpsTooHigh`] if the rate exceeds [`MAX_TARGET_FPS`].
    /// - [`ConfigError::CapacityBelowFps`] if the history buffer cannot hold
    ///   one second of frames at the target rate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.mode == PacingMode::Unthrottled {
            return Ok(());
        }
        if !self.target_fps.is_finite() || self.target_fps <= 0.0 {
            return Err(ConfigError::InvalidFps(self.target_fps));
        }
        if self.target_fps > MAX_TARGET_FPS {
            return Err(ConfigError::FpsTooHigh(self.target_fps));
        }
        let target_cap = self.estimator_cap();
        if !usize::try_from(target_cap).is_ok_and(|cap| cap <= self.history_capacity) {
            return Err(ConfigError::CapacityBelowFps {
                capacity: self.history_capacity,
                target_fps: target_cap,
            });
        }
        Ok(())
    }

    /// Returns the frame period, or zero when unthrottled.
    #[must_use]
    pub fn period(&self) -> Duration {
        match self.mode {
            PacingMode::Paced => Duration::from_fps(self.target_fps),
            PacingMode::Unthrottled => Duration::ZERO,
        }
    }

    /// Returns the sample cap for the FPS estimator.
    ///
    /// Paced loops cap at the nominal rate rounded to a whole frame (at least
    /// one). Unthrottled loops cap at the history capacity.
    #[must_use]
    pub fn estimator_cap(&self) -> u32 {
        match self.mode {
            PacingMode::Paced => {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "float-to-int casts saturate; rate is bounded by MAX_TARGET_FPS"
                )]
                let rounded = (self.target_fps + 0.5) as u32;
                rounded.max(1)
            }
            PacingMode::Unthrottled => u32::try_from(self.history_capacity).unwrap_or(u32::MAX),
        }
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Errors from [`LoopConfig::validate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// The target rate is zero, negative, or not finite.
    InvalidFps(f64),
    /// The target rate would need a period shorter than one nanosecond.
    FpsTooHigh(f64),
    /// The history buffer capacity is zero.
    ZeroCapacity,
    /// The history buffer holds fewer samples than one second of frames.
    CapacityBelowFps {
        /// Configured history capacity.
        capacity: usize,
        /// Target rate rounded to whole frames.
        target_fps: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFps(fps) => {
                write!(f, "target fps must be finite and positive (got {fps})")
            }
            Self::FpsTooHigh(fps) => {
                write!(f, "target fps {fps} exceeds the maximum of {MAX_TARGET_FPS}")
            }
            Self::ZeroCapacity => write!(f, "history capacity must be non-zero"),
            Self::CapacityBelowFps {
                capacity,
                target_fps,
            } => write!(
                f,
                "history capacity {capacity} is smaller than the target rate of {target_fps} fps"
            ),
        }
    }
}

impl core::error::Error for ConfigError {}
