// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coarse sleeper over `std::thread::sleep`.

use cadence_core::sleep::Sleeper;
use cadence_core::time::Duration;

/// Sleeps with [`std::thread::sleep`].
///
/// `std` retries interrupted sleeps internally, so this always reports
/// success.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep_for(&mut self, duration: Duration) -> bool {
        std::thread::sleep(std::time::Duration::from_nanos(duration.ticks()));
        true
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn sleeps_at_least_the_request() {
        let start = Instant::now();
        assert!(ThreadSleeper.sleep_for(Duration::from_millis(3)), "std sleep succeeds");
        assert!(start.elapsed() >= std::time::Duration::from_millis(3));
    }
}
