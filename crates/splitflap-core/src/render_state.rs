#![forbid(unsafe_code)]

//! What a cell should paint for a given progress value.
//!
//! A split-flap cell is drawn as two static half panes plus one rotating
//! half pane. The static top always shows the glyph about to be exposed and
//! the static bottom always shows the glyph being left, so only the rotating
//! pane moves:
//!
//! ```text
//!   fraction 0.0 ─────────── 0.5 ─────────── 1.0
//!   angle      0°           -90°           -180°
//!   pane       upper half, current glyph  │ lower half, next glyph
//!              (collapsing toward viewer) │ (revealing, flipped upright)
//! ```
//!
//! [`CellVisualState::from_value`] is a pure function of the value: there is
//! no stored render state, and the same value always yields the same output.

use crate::alphabet::Alphabet;

/// Which half the rotating pane currently occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlapPhase {
    /// `fraction <= 0.5`: the upper half of the current glyph falls from 0°
    /// to -90°.
    UpperCollapsing,
    /// `fraction > 0.5`: the lower half of the next glyph falls from -90° to
    /// -180°.
    LowerRevealing,
}

impl FlapPhase {
    /// Extra rotation applied to the pane about its own axis so the glyph
    /// reads upright once the pane is past vertical.
    #[must_use]
    pub const fn pane_self_rotation_degrees(self) -> f32 {
        match self {
            Self::UpperCollapsing => 0.0,
            Self::LowerRevealing => 180.0,
        }
    }
}

/// Derived drawing instructions for one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellVisualState {
    /// Glyph on the static top half pane (the next glyph).
    pub top_glyph: char,
    /// Glyph on the static bottom half pane (the current glyph).
    pub bottom_glyph: char,
    /// Glyph on the rotating pane.
    pub rotating_glyph: char,
    /// Rotation of the flap about the center line, in `(-180, 0]`.
    pub rotation_degrees: f32,
    /// Which half the rotating pane covers.
    pub phase: FlapPhase,
}

impl CellVisualState {
    /// Derive the cell's drawing state from a progress value.
    #[must_use]
    pub fn from_value(alphabet: &Alphabet, value: f32) -> Self {
        let whole = value.floor();
        let fraction = value - whole;
        let whole = whole as i64;

        let current = alphabet.letter_at(whole);
        let next = alphabet.letter_at(whole + 1);

        let (phase, rotating_glyph) = if fraction <= 0.5 {
            (FlapPhase::UpperCollapsing, current)
        } else {
            (FlapPhase::LowerRevealing, next)
        };

        Self {
            top_glyph: next,
            bottom_glyph: current,
            rotating_glyph,
            rotation_degrees: -180.0 * fraction,
            phase,
        }
    }

    /// Whether the flap is lying flat (no step in progress).
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.rotation_degrees == 0.0
    }

    /// Glyph a viewer reads when the cell is at rest.
    ///
    /// At rest the rotating pane covers the top half with the current glyph,
    /// and the bottom half shows the same glyph.
    #[must_use]
    pub fn resting_glyph(&self) -> char {
        self.bottom_glyph
    }

    /// Glyph visible in the top half of the cell, taking the rotating pane
    /// into account.
    #[must_use]
    pub fn visible_top(&self) -> char {
        match self.phase {
            FlapPhase::UpperCollapsing => self.rotating_glyph,
            FlapPhase::LowerRevealing => self.top_glyph,
        }
    }

    /// Glyph visible in the bottom half of the cell, taking the rotating pane
    /// into account.
    #[must_use]
    pub fn visible_bottom(&self) -> char {
        match self.phase {
            FlapPhase::UpperCollapsing => self.bottom_glyph,
            FlapPhase::LowerRevealing => self.rotating_glyph,
        }
    }

    /// Apparent height of the rotating pane as a share of a half cell, from
    /// 1.0 (flat) down to 0.0 (edge-on at -90°).
    #[must_use]
    pub fn pane_foreshortening(&self) -> f32 {
        self.rotation_degrees.to_radians().cos().abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alphabet() -> Alphabet {
        Alphabet::standard()
    }

    #[test]
    fn at_rest() {
        let s = CellVisualState::from_value(&alphabet(), 3.0);
        assert_eq!(s.bottom_glyph, 'C');
        assert_eq!(s.top_glyph, 'D');
        assert_eq!(s.rotating_glyph, 'C');
        assert_eq!(s.rotation_degrees, 0.0);
        assert_eq!(s.phase, FlapPhase::UpperCollapsing);
        assert!(s.is_at_rest());
        assert_eq!(s.resting_glyph(), 'C');
        assert_eq!(s.visible_top(), 'C');
        assert_eq!(s.visible_bottom(), 'C');
    }

    #[test]
    fn halfway_is_upper_phase() {
        let s = CellVisualState::from_value(&alphabet(), 1.5);
        assert_eq!(s.bottom_glyph, 'A');
        assert_eq!(s.top_glyph, 'B');
        assert_eq!(s.rotating_glyph, 'A');
        assert_eq!(s.rotation_degrees, -90.0);
        assert_eq!(s.phase, FlapPhase::UpperCollapsing);
        assert!(s.pane_foreshortening() < 1e-6);
    }

    #[test]
    fn past_halfway_is_lower_phase() {
        let s = CellVisualState::from_value(&alphabet(), 1.75);
        assert_eq!(s.phase, FlapPhase::LowerRevealing);
        assert_eq!(s.rotating_glyph, 'B');
        assert_eq!(s.rotation_degrees, -135.0);
        assert_eq!(s.visible_top(), 'B');
        assert_eq!(s.visible_bottom(), 'B');
        assert_eq!(s.phase.pane_self_rotation_degrees(), 180.0);
    }

    #[test]
    fn early_upper_phase_shows_old_glyph_on_pane() {
        let s = CellVisualState::from_value(&alphabet(), 1.25);
        assert_eq!(s.visible_top(), 'A');
        assert_eq!(s.visible_bottom(), 'A');
        assert_eq!(s.rotation_degrees, -45.0);
        assert_eq!(s.phase.pane_self_rotation_degrees(), 0.0);
    }

    #[test]
    fn wraps_past_end_of_alphabet() {
        let s = CellVisualState::from_value(&alphabet(), 37.25);
        assert_eq!(s.bottom_glyph, '•');
        assert_eq!(s.top_glyph, ' ');
    }

    #[test]
    fn unwrapped_value_renders_like_first_lap() {
        let a = alphabet();
        let first = CellVisualState::from_value(&a, 2.25);
        let second = CellVisualState::from_value(&a, 2.25 + 38.0);
        assert_eq!(first, second);
    }

    #[test]
    fn idempotent() {
        let a = alphabet();
        let x = CellVisualState::from_value(&a, 12.8);
        let y = CellVisualState::from_value(&a, 12.8);
        assert_eq!(x, y);
    }
}
