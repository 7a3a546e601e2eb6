#![forbid(unsafe_code)]

//! Forward-only flip planning.
//!
//! A flap can only turn forward. Given where a cell currently sits and the
//! glyph it should end on, [`plan_flip`] picks the absolute index to animate
//! to and the number of discrete steps in between. When the target glyph lies
//! behind the current one, the plan adds one wrap lap.
//!
//! # Invariants
//!
//! 1. `distance >= 0` for any starting value, including ones that have run
//!    past a full lap or below zero.
//! 2. `alphabet.letter_at(target_index)` is the glyph `index_of(target)`
//!    resolves to.
//! 3. For a starting value in `[0, len)`, a target at or after the current
//!    floor needs no lap; a target strictly behind it needs exactly one.

use crate::alphabet::Alphabet;

/// Where a flip ends and how many steps it takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipPlan {
    /// Floor of the value the flip starts from.
    pub from_index: i64,
    /// Absolute (unwrapped) index the flip ends on.
    pub target_index: i64,
    /// Number of flap steps from `from_index` to `target_index`.
    pub distance: u32,
}

impl FlipPlan {
    /// Whether the plan needs no animation.
    #[inline]
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.distance == 0
    }

    /// Indices the flap passes through, excluding the start and including
    /// the target.
    pub fn steps(self) -> impl Iterator<Item = i64> {
        (self.from_index + 1)..=self.target_index
    }

    /// Glyphs revealed at each step, in order.
    pub fn glyphs<'a>(self, alphabet: &'a Alphabet) -> impl Iterator<Item = char> + 'a {
        self.steps().map(move |i| alphabet.letter_at(i))
    }
}

/// Plan a forward flip from `current` (possibly fractional) to `target`.
#[must_use]
pub fn plan_flip(alphabet: &Alphabet, current: f32, target: char) -> FlipPlan {
    let size = alphabet.size();
    let base = alphabet.index_of(target) as i64;
    let from_index = current.floor() as i64;

    // Compare inside the lap `current` sits in, then carry the lap offset.
    let lap_start = from_index.div_euclid(size) * size;
    let within_lap = from_index - lap_start;
    let target_index = if base < within_lap {
        base + size
    } else {
        base
    } + lap_start;

    FlipPlan {
        from_index,
        target_index,
        distance: (target_index - from_index) as u32,
    }
}
