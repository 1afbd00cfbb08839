// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! High-resolution waitable timer sleeper.

use cadence_core::sleep::Sleeper;
use cadence_core::time::Duration;
use windows::Win32::Foundation::{CloseHandle, HANDLE, WAIT_OBJECT_0};
use windows::Win32::System::Threading::{
    CreateWaitableTimerExW, INFINITE, SetWaitableTimer, WaitForSingleObject,
};
use windows_core::PCWSTR;

// winbase.h / winnt.h values.
const CREATE_WAITABLE_TIMER_HIGH_RESOLUTION: u32 = 0x0000_0002;
const TIMER_ALL_ACCESS: u32 = 0x001F_0003;

/// Coarse sleeper backed by a waitable timer.
///
/// The timer is created lazily on the first sleep. If creation fails (older
/// systems without high-resolution timers, handle exhaustion), every sleep
/// returns `false` and the wait falls back to spinning.
#[derive(Debug, Default)]
pub struct WaitableTimerSleeper {
    timer: Option<HANDLE>,
    unavailable: bool,
}

impl WaitableTimerSleeper {
    /// Creates a sleeper; no kernel object is allocated until first use.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn timer(&mut self) -> Option<HANDLE> {
        if self.timer.is_none() && !self.unavailable {
            // SAFETY: null attributes and name are permitted; the returned
            // handle is owned by `self` and closed in `Drop`.
            let created = unsafe {
                CreateWaitableTimerExW(
                    None,
                    PCWSTR::null(),
                    CREATE_WAITABLE_TIMER_HIGH_RESOLUTION,
                    TIMER_ALL_ACCESS,
                )
            };
            match created {
                Ok(handle) => self.timer = Some(handle),
                Err(_) => self.unavailable = true,
            }
        }
        self.timer
    }
}

impl Sleeper for WaitableTimerSleeper {
    fn sleep_for(&mut self, duration: Duration) -> bool {
        let Some(timer) = self.timer() else {
            return false;
        };
        // Negative due times are relative, in 100ns units.
        let hundreds = i64::try_from(duration.ticks() / 100).unwrap_or(i64::MAX);
        let due = -hundreds.max(1);
        // SAFETY: `timer` is a live handle owned by `self`; `due` outlives the call.
        if unsafe { SetWaitableTimer(timer, &due, 0, None, None, false) }.is_err() {
            return false;
        }
        // SAFETY: `timer` is a live handle owned by `self`.
        unsafe { WaitForSingleObject(timer, INFINITE) == WAIT_OBJECT_0 }
    }
}

impl Drop for WaitableTimerSleeper {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            // SAFETY: the handle was created by this sleeper and is closed once.
            _ = unsafe { CloseHandle(timer) };
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn sleeps_at_least_the_request() {
        let mut sleeper = WaitableTimerSleeper::new();
        let start = Instant::now();
        if sleeper.sleep_for(Duration::from_millis(3)) {
            assert!(start.elapsed() >= std::time::Duration::from_millis(2));
        }
    }
}
