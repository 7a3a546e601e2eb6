#![forbid(unsafe_code)]

//! Per-cell flip animation state machine.
//!
//! A [`FlipAnimator`] owns at most one [`FlipSession`]: a stored
//! `{start value, target index, start time, duration}` record evaluated by a
//! stateless [`FlipSession::value_at`]. Nothing ticks in the background;
//! the host samples the animator once per frame.
//!
//! ```text
//!            retarget (distance > 0)
//!   Idle ───────────────────────────▶ Animating
//!    ▲                                 │   │
//!    │        settle (elapsed)         │   │ retarget: restart from the
//!    └─────────────────────────────────┘   │ live value, old session dropped
//!                                          ▼
//!                                      Animating
//! ```
//!
//! # Invariants
//!
//! 1. A retarget starts the new session from the value sampled at that
//!    instant, fraction included. The cell never snaps back to a whole index.
//! 2. Session duration is `distance * cycle`; per-step flap speed is constant.
//! 3. `value_at` is monotonically non-decreasing within a session and returns
//!    exactly the target index once the duration has elapsed.
//! 4. A zero-distance retarget never starts a session.

use std::time::Duration;

use crate::alphabet::Alphabet;
use crate::animation::Easing;
use crate::sequencer::{FlipPlan, plan_flip};

/// Time one flap step takes on the reference board.
pub const TICKER_CYCLE: Duration = Duration::from_millis(300);

/// One in-flight flip: start value, absolute target, start time and length.
#[derive(Debug, Clone, Copy)]
pub struct FlipSession {
    start_value: f32,
    target_index: i64,
    started_at: Duration,
    duration: Duration,
    easing: Easing,
}

impl FlipSession {
    /// Value the session started from.
    #[must_use]
    pub fn start_value(&self) -> f32 {
        self.start_value
    }

    /// Absolute index the session ends on.
    #[must_use]
    pub fn target_index(&self) -> i64 {
        self.target_index
    }

    /// Timestamp the session was created at.
    #[must_use]
    pub fn started_at(&self) -> Duration {
        self.started_at
    }

    /// Total session length.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Timestamp at which the session reaches its target.
    #[must_use]
    pub fn ends_at(&self) -> Duration {
        self.started_at.saturating_add(self.duration)
    }

    /// Whether `now` is at or past the end of the session.
    #[must_use]
    pub fn is_complete(&self, now: Duration) -> bool {
        now.saturating_sub(self.started_at) >= self.duration
    }

    /// Elapsed fraction of the duration at `now`, before easing, in [0, 1].
    #[must_use]
    pub fn raw_progress(&self, now: Duration) -> f32 {
        if self.is_complete(now) {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started_at);
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }

    /// Progress value at `now`.
    #[must_use]
    pub fn value_at(&self, now: Duration) -> f32 {
        if self.is_complete(now) {
            return self.target_index as f32;
        }
        let eased = self.easing.apply(self.raw_progress(now));
        let span = self.target_index as f32 - self.start_value;
        self.start_value + span * eased
    }
}

/// Coarse animator state at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipState {
    /// At rest on a glyph.
    Idle,
    /// A session is running.
    Animating,
}

/// Drives one cell's progress value through successive flip sessions.
#[derive(Debug, Clone)]
pub struct FlipAnimator {
    rest_value: f32,
    session: Option<FlipSession>,
    cycle: Duration,
    easing: Easing,
}

impl FlipAnimator {
    /// An idle animator resting on index 0, using `cycle` per flap step.
    #[must_use]
    pub fn new(cycle: Duration, easing: Easing) -> Self {
        Self {
            rest_value: 0.0,
            session: None,
            cycle,
            easing,
        }
    }

    /// An idle animator resting on `index`.
    #[must_use]
    pub fn resting_at(index: i64, cycle: Duration, easing: Easing) -> Self {
        Self {
            rest_value: index as f32,
            ..Self::new(cycle, easing)
        }
    }

    /// Per-step duration.
    #[must_use]
    pub fn cycle(&self) -> Duration {
        self.cycle
    }

    /// Easing applied to new sessions.
    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// The active session, if any (finished but unsettled sessions included).
    #[must_use]
    pub fn session(&self) -> Option<&FlipSession> {
        self.session.as_ref()
    }

    /// Progress value at `now`.
    #[must_use]
    pub fn value_at(&self, now: Duration) -> f32 {
        match &self.session {
            Some(session) => session.value_at(now),
            None => self.rest_value,
        }
    }

    /// State at `now`.
    #[must_use]
    pub fn state(&self, now: Duration) -> FlipState {
        match &self.session {
            Some(session) if !session.is_complete(now) => FlipState::Animating,
            _ => FlipState::Idle,
        }
    }

    /// Whether a session is still running at `now`.
    #[must_use]
    pub fn is_animating(&self, now: Duration) -> bool {
        self.state(now) == FlipState::Animating
    }

    /// Start flipping toward `target` from wherever the cell is at `now`.
    ///
    /// Any running session is abandoned; the new one begins at its live value.
    pub fn retarget(&mut self, alphabet: &Alphabet, target: char, now: Duration) -> FlipPlan {
        let current = self.value_at(now);
        let plan = plan_flip(alphabet, current, target);

        if plan.is_noop() {
            self.session = None;
            self.rest_value = plan.target_index.rem_euclid(alphabet.size()) as f32;
            crate::trace!(
                start = current,
                target = plan.target_index,
                "flip retarget needs no steps"
            );
            return plan;
        }

        let duration = self.cycle.saturating_mul(plan.distance);
        crate::debug!(
            start = current,
            target = plan.target_index,
            distance = plan.distance,
            duration_ms = duration.as_millis() as u64,
            easing = self.easing.as_str(),
            "flip retargeted"
        );
        self.session = Some(FlipSession {
            start_value: current,
            target_index: plan.target_index,
            started_at: now,
            duration,
            easing: self.easing,
        });
        plan
    }

    /// Retire a finished session, normalizing the rest value into the first
    /// lap. Returns `true` if a session was retired.
    pub fn settle(&mut self, alphabet: &Alphabet, now: Duration) -> bool {
        match self.session {
            Some(session) if session.is_complete(now) => {
                self.rest_value = session.target_index.rem_euclid(alphabet.size()) as f32;
                self.session = None;
                crate::trace!(rest = self.rest_value, "flip settled");
                true
            }
            _ => false,
        }
    }
}

impl Default for FlipAnimator {
    fn default() -> Self {
        Self::new(TICKER_CYCLE, Easing::default())
    }
}
