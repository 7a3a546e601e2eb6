#![forbid(unsafe_code)]

//! Monotonic frame clock.
//!
//! Flip sessions are sampled against a `Duration` timestamp rather than a
//! wall-clock `Instant`, so the same board can be driven by a real frame loop
//! or stepped deterministically in tests. The clock only moves forward.

use std::time::Duration;

/// Accumulates frame deltas into a monotonic timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameClock {
    now: Duration,
    frames: u64,
}

impl FrameClock {
    /// A clock at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame of length `dt`.
    pub fn tick(&mut self, dt: Duration) -> Duration {
        self.now = self.now.saturating_add(dt);
        self.frames = self.frames.saturating_add(1);
        self.now
    }

    /// Jump forward to `at`. Earlier timestamps are ignored.
    pub fn advance_to(&mut self, at: Duration) -> Duration {
        if at > self.now {
            self.now = at;
            self.frames = self.frames.saturating_add(1);
        }
        self.now
    }

    /// Current timestamp.
    #[inline]
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of frames that moved the clock.
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
