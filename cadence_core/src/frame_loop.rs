// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The blocking frame loop.
//!
//! [`FrameLoop`] composes the [`Pacer`], [`FrameHistory`] and [`HybridWait`]
//! around an injected [`Clock`] and [`Sleeper`], and drives a host callback
//! once per frame on the calling thread.
//!
//! # Frame step
//!
//! Every iteration of [`begin`](FrameLoop::begin) runs, strictly in order:
//!
//! 1. the exit predicate (the loop returns as soon as it reports `true`),
//! 2. in [`PacingMode::Paced`], a hybrid wait for the pacer's `next` anchor,
//! 3. reconciliation of the anchors against the current time,
//! 4. recording of the measured delta in the history ring,
//! 5. the windowed FPS estimate,
//! 6. the frame callback with a fresh [`Timing`].
//!
//! # Usage
//!
//! ```rust
//! use core::cell::Cell;
//! use cadence_core::clock::Clock;
//! use cadence_core::frame_loop::FrameLoop;
//! use cadence_core::sleep::SpinOnly;
//! use cadence_core::time::HostTime;
//!
//! // A clock that advances 4ms per read.
//! struct Fake(Cell<u64>);
//! impl Clock for Fake {
//!     fn now(&self) -> HostTime {
//!         let t = self.0.get();
//!         self.0.set(t + 4_000_000);
//!         HostTime(t)
//!     }
//! }
//!
//! let mut frame_loop = FrameLoop::paced(Fake(Cell::new(0)), SpinOnly, 60.0)?;
//! let frames = Cell::new(0);
//! frame_loop.begin(
//!     || frames.get() == 10,
//!     |timing| {
//!         assert!(timing.delta_seconds > 0.0);
//!         frames.set(frames.get() + 1);
//!     },
//! );
//! # Ok::<(), cadence_core::config::ConfigError>(())
//! ```

use core::convert::Infallible;

use crate::clock::Clock;
use crate::config::{ConfigError, LoopConfig, PacingMode};
use crate::history::FrameHistory;
use crate::pacing::Pacer;
use crate::sleep::Sleeper;
use crate::time::{Duration, HostTime};
use crate::timing::Timing;
use crate::trace::{FrameEvent, LoopBeginEvent, LoopEndEvent, ReconcileEvent, Tracer, WaitEvent};
use crate::wait::HybridWait;

/// Frame-pacing loop over an injected clock and sleeper.
///
/// `begin` borrows the loop mutably for its whole run, so it cannot be
/// re-entered from the frame callback.
#[derive(Debug)]
pub struct FrameLoop<C, S> {
    clock: C,
    sleeper: S,
    config: LoopConfig,
    pacer: Pacer,
    history: FrameHistory,
    wait: HybridWait,
    estimator_cap: u32,
    frame_index: u64,
}

impl<C: Clock, S: Sleeper> FrameLoop<C, S> {
    /// Creates a loop from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`LoopConfig::validate`].
    pub fn new(clock: C, sleeper: S, config: LoopConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(clock, sleeper, config))
    }

    /// Creates a paced loop targeting `fps` frames per second.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `fps` is not a usable rate or exceeds the
    /// default history capacity.
    pub fn paced(clock: C, sleeper: S, fps: f64) -> Result<Self, ConfigError> {
        Self::new(clock, sleeper, LoopConfig::paced(fps))
    }

    /// Creates an unthrottled loop. The sleeper is never used.
    #[must_use]
    pub fn unthrottled(clock: C, sleeper: S) -> Self {
        Self::from_valid(clock, sleeper, LoopConfig::unthrottled())
    }

    /// Creates a loop in either mode. `fps` is only checked when paced.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an unusable paced rate.
    pub fn with_mode(clock: C, sleeper: S, unthrottled: bool, fps: f64) -> Result<Self, ConfigError> {
        let config = if unthrottled {
            LoopConfig::unthrottled().with_target_fps(fps)
        } else {
            LoopConfig::paced(fps)
        };
        Self::new(clock, sleeper, config)
    }

    fn from_valid(clock: C, sleeper: S, config: LoopConfig) -> Self {
        Self {
            clock,
            sleeper,
            pacer: Pacer::new(config.period(), HostTime::default()),
            history: FrameHistory::new(config.history_capacity),
            wait: HybridWait::new(config.spin_margin),
            estimator_cap: config.estimator_cap(),
            frame_index: 0,
            config,
        }
    }

    /// Changes the target rate starting with the next reconciliation.
    ///
    /// Anchors already computed are kept, and the pacing mode does not
    /// change: an unthrottled loop remembers the rate but keeps running
    /// unthrottled.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] and leaves the loop unchanged if the new
    /// rate is unusable.
    pub fn set_fps(&mut self, fps: f64) -> Result<(), ConfigError> {
        let candidate = self.config.with_target_fps(fps);
        candidate.validate()?;
        self.config = candidate;
        self.pacer.set_period(candidate.period());
        self.estimator_cap = candidate.estimator_cap();
        Ok(())
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// Returns the pacing mode.
    #[must_use]
    pub fn mode(&self) -> PacingMode {
        self.config.mode
    }

    /// Returns the target period (zero when unthrottled).
    #[must_use]
    pub fn period(&self) -> Duration {
        self.pacer.period()
    }

    /// Returns the pacing state machine.
    #[must_use]
    pub fn pacer(&self) -> &Pacer {
        &self.pacer
    }

    /// Returns the frame history.
    #[must_use]
    pub fn history(&self) -> &FrameHistory {
        &self.history
    }

    /// Returns the injected clock.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Returns the injected sleeper.
    #[must_use]
    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Runs frames on the calling thread until `exit` returns `true`.
    ///
    /// `exit` is checked before every frame, including the first. A panic in
    /// `frame` unwinds out of this call.
    pub fn begin<E, F>(&mut self, exit: E, frame: F)
    where
        E: FnMut() -> bool,
        F: FnMut(&Timing),
    {
        self.begin_traced(&mut Tracer::none(), exit, frame);
    }

    /// [`begin`](Self::begin), reporting each stage to `tracer`.
    pub fn begin_traced<E, F>(&mut self, tracer: &mut Tracer<'_>, exit: E, mut frame: F)
    where
        E: FnMut() -> bool,
        F: FnMut(&Timing),
    {
        let result: Result<(), Infallible> = self.run(tracer, exit, |timing| {
            frame(timing);
            Ok(())
        });
        match result {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    /// Like [`begin`](Self::begin), but stops at the first error returned by
    /// `frame`.
    ///
    /// # Errors
    ///
    /// Returns the callback's error unchanged. The frame that failed has
    /// already been recorded in the history.
    pub fn try_begin<X, E, F>(&mut self, exit: E, frame: F) -> Result<(), X>
    where
        E: FnMut() -> bool,
        F: FnMut(&Timing) -> Result<(), X>,
    {
        self.run(&mut Tracer::none(), exit, frame)
    }

    /// [`try_begin`](Self::try_begin), reporting each stage to `tracer`.
    ///
    /// # Errors
    ///
    /// Returns the callback's error unchanged.
    pub fn try_begin_traced<X, E, F>(
        &mut self,
        tracer: &mut Tracer<'_>,
        exit: E,
        frame: F,
    ) -> Result<(), X>
    where
        E: FnMut() -> bool,
        F: FnMut(&Timing) -> Result<(), X>,
    {
        self.run(tracer, exit, frame)
    }

    /// Re-anchors the pacer on `now` and restarts frame numbering.
    ///
    /// Hosts that drive frames from their own event loop call this once, then
    /// [`step_at`](Self::step_at) per frame.
    pub fn restart(&mut self, now: HostTime) {
        self.pacer.reset(now);
        self.frame_index = 0;
    }

    /// Returns the time the next frame is due (the pacer's `next` anchor).
    #[must_use]
    pub fn next_deadline(&self) -> HostTime {
        self.pacer.next_anchor()
    }

    /// Runs the bookkeeping half of a frame at `now` without waiting:
    /// reconciles the anchors, records the delta, and returns the frame's
    /// [`Timing`].
    pub fn step_at(&mut self, now: HostTime) -> Timing {
        self.step(&mut Tracer::none(), now)
    }

    fn run<X, E, F>(&mut self, tracer: &mut Tracer<'_>, mut exit: E, mut frame: F) -> Result<(), X>
    where
        E: FnMut() -> bool,
        F: FnMut(&Timing) -> Result<(), X>,
    {
        let start = self.clock.now();
        self.restart(start);
        tracer.loop_begin(&LoopBeginEvent {
            now: start,
            mode: self.config.mode,
            period: self.pacer.period(),
        });

        let mut last_seen = start;
        while !exit() {
            if self.config.mode == PacingMode::Paced {
                let report =
                    self.wait
                        .wait_until(&self.clock, &mut self.sleeper, self.pacer.next_anchor());
                tracer.wait(&WaitEvent::new(self.frame_index, &report));
            }

            let now = self.clock.now();
            last_seen = now;
            let timing = self.step(tracer, now);
            frame(&timing)?;
        }

        tracer.loop_end(&LoopEndEvent {
            frames: self.frame_index,
            last_seen,
        });
        Ok(())
    }

    fn step(&mut self, tracer: &mut Tracer<'_>, now: HostTime) -> Timing {
        let reconciled = self.pacer.reconcile(now);
        tracer.reconcile(&ReconcileEvent::new(
            self.frame_index,
            now,
            &reconciled,
            self.pacer.period(),
            self.pacer.last_anchor(),
            self.pacer.next_anchor(),
        ));

        self.history.record(reconciled.delta);
        let fps_estimate = self.history.estimate_fps(self.estimator_cap);

        let timing = Timing::new(self.frame_index, reconciled.delta, fps_estimate);
        tracer.frame(&FrameEvent::from(&timing));
        self.frame_index += 1;
        timing
    }
}
