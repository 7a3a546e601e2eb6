#![forbid(unsafe_code)]

//! Easing curves and the frame clock that drive flip sessions.
//!
//! Everything here is time-based and allocation-free. Easing functions map a
//! normalized elapsed fraction `t` in [0, 1] to eased progress in [0, 1];
//! [`Easing`] names the curves a board can be configured with.

pub mod clock;

pub use clock::FrameClock;

use std::fmt;

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f32) -> f32;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in-out (slow start and end, symmetric about t = 0.5).
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Cubic ease-in-out.
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Material "fast out, slow in": `cubic-bezier(0.4, 0.0, 0.2, 1.0)`.
///
/// Asymmetric: accelerates quickly and spends longer settling.
#[inline]
pub fn fast_out_slow_in(t: f32) -> f32 {
    cubic_bezier(t.clamp(0.0, 1.0), 0.4, 0.0, 0.2, 1.0)
}

/// Sample a CSS-style cubic bezier `(x1, y1, x2, y2)` at horizontal
/// position `x`.
///
/// The curve parameter is found by fixed-depth bisection, so the result is
/// non-decreasing in `x` whenever `x1` and `x2` lie in [0, 1].
fn cubic_bezier(x: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let x = f64::from(x);
    let (x1, y1, x2, y2) = (f64::from(x1), f64::from(y1), f64::from(x2), f64::from(y2));
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    for _ in 0..BEZIER_BISECT_STEPS {
        let mid = 0.5 * (lo + hi);
        if bezier_axis(mid, x1, x2) < x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    let t = 0.5 * (lo + hi);
    (bezier_axis(t, y1, y2) as f32).clamp(0.0, 1.0)
}

/// Enough halvings to put the parameter error well below f32 resolution.
const BEZIER_BISECT_STEPS: u32 = 40;

fn bezier_axis(t: f64, p1: f64, p2: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
}

// ---------------------------------------------------------------------------
// Named curves
// ---------------------------------------------------------------------------

/// Easing curve applied to a flip session's elapsed fraction.
#[derive(Debug, Clone, Copy, Default)]
pub enum Easing {
    /// Constant flap speed.
    Linear,
    /// Quadratic slow-fast-slow. Symmetric, so half the time covers half the
    /// distance.
    #[default]
    EaseInOut,
    /// Cubic slow-fast-slow.
    EaseInOutCubic,
    /// Material fast-out-slow-in bezier.
    FastOutSlowIn,
    /// Caller-supplied curve.
    Custom(EasingFn),
}

impl Easing {
    /// Apply the curve to `t`.
    #[inline]
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Self::Linear => linear(t),
            Self::EaseInOut => ease_in_out(t),
            Self::EaseInOutCubic => ease_in_out_cubic(t),
            Self::FastOutSlowIn => fast_out_slow_in(t),
            Self::Custom(f) => f(t.clamp(0.0, 1.0)).clamp(0.0, 1.0),
        }
    }

    /// Parse a curve name as used in configuration.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "linear" => Some(Self::Linear),
            "ease-in-out" | "ease_in_out" | "easeinout" => Some(Self::EaseInOut),
            "ease-in-out-cubic" | "ease_in_out_cubic" | "cubic" => Some(Self::EaseInOutCubic),
            "fast-out-slow-in" | "fast_out_slow_in" | "material" => Some(Self::FastOutSlowIn),
            _ => None,
        }
    }

    /// Stable name for configuration and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseInOut => "ease-in-out",
            Self::EaseInOutCubic => "ease-in-out-cubic",
            Self::FastOutSlowIn => "fast-out-slow-in",
            Self::Custom(_) => "custom",
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
