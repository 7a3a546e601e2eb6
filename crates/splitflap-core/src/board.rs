#![forbid(unsafe_code)]

//! A fixed grid of flip cells.
//!
//! The [`Board`] spreads a target string across `columns x rows` cells in
//! reading order. Shorter text is padded with [`BLANK`], longer text is
//! truncated. Each cell owns its own [`FlipAnimator`]; cells share nothing
//! mutable, and one sampling pass per frame ([`Board::frame`]) produces every
//! cell's [`CellVisualState`].
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use splitflap_core::board::Board;
//! use splitflap_core::config::BoardConfig;
//!
//! let mut board = Board::new(BoardConfig::default())?;
//! board.set_text("HELLO", Duration::ZERO);
//! let frame = board.frame(Duration::from_millis(450));
//! assert_eq!(frame.rows().len(), 4);
//! # Ok::<(), splitflap_core::config::BoardConfigError>(())
//! ```
//!
//! # Invariants
//!
//! 1. Cell `(row, col)` always receives character `row * columns + col` of
//!    the padded text.
//! 2. A cell whose target character is unchanged keeps its running session.
//! 3. `frame` takes `&self`; sampling never mutates the board.

use std::time::Duration;

use crate::alphabet::{Alphabet, BLANK};
use crate::animator::FlipAnimator;
use crate::config::{BoardConfig, BoardConfigError, FlapStyle};
use crate::render_state::CellVisualState;

/// One position on the board.
#[derive(Debug, Clone)]
pub struct FlipCell {
    target: char,
    animator: FlipAnimator,
}

impl FlipCell {
    fn new(config: &BoardConfig) -> Self {
        Self {
            target: BLANK,
            animator: FlipAnimator::new(config.cycle, config.easing),
        }
    }

    /// Character this cell is flipping toward (or resting on).
    #[must_use]
    pub fn target(&self) -> char {
        self.target
    }

    /// The cell's animator.
    #[must_use]
    pub fn animator(&self) -> &FlipAnimator {
        &self.animator
    }
}

/// One row of cells.
#[derive(Debug, Clone)]
pub struct TickerRow {
    cells: Vec<FlipCell>,
}

impl TickerRow {
    /// Cells left to right.
    #[must_use]
    pub fn cells(&self) -> &[FlipCell] {
        &self.cells
    }
}

/// One frame's worth of cell states, row by row.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardFrame {
    rows: Vec<Vec<CellVisualState>>,
}

impl BoardFrame {
    /// Frame made of precomputed cell states.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<CellVisualState>>) -> Self {
        Self { rows }
    }

    /// Rows top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[Vec<CellVisualState>] {
        &self.rows
    }

    /// State of the cell at `(row, col)`.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellVisualState> {
        self.rows.get(row)?.get(col)
    }

    /// Whether every cell is lying flat.
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.rows.iter().flatten().all(CellVisualState::is_at_rest)
    }
}

/// Grid of split-flap cells driven by a target string.
#[derive(Debug, Clone)]
pub struct Board {
    config: BoardConfig,
    alphabet: Alphabet,
    rows: Vec<TickerRow>,
    text: String,
}

impl Board {
    /// Build an all-blank board.
    ///
    /// # Errors
    ///
    /// Returns the first violation if the config does not validate.
    pub fn new(config: BoardConfig) -> Result<Self, BoardConfigError> {
        if let Err(mut errors) = config.validate() {
            return Err(errors.remove(0));
        }
        let alphabet = config.alphabet()?;
        let rows = (0..config.rows)
            .map(|_| TickerRow {
                cells: (0..config.columns).map(|_| FlipCell::new(&config)).collect(),
            })
            .collect();
        Ok(Self {
            text: BLANK.to_string().repeat(config.capacity()),
            config,
            alphabet,
            rows,
        })
    }

    /// The configuration the board was built with.
    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Pass-through presentation settings.
    #[must_use]
    pub fn style(&self) -> &FlapStyle {
        &self.config.style
    }

    /// The board's glyph ring.
    #[must_use]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Number of cells.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.config.capacity()
    }

    /// Rows top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[TickerRow] {
        &self.rows
    }

    /// Committed target text, padded to capacity.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Assign `text` to the board at time `now`.
    ///
    /// Returns the number of cells that started a new flip.
    pub fn set_text(&mut self, text: &str, now: Duration) -> usize {
        let _span = crate::trace_span!("board_set_text", len = text.chars().count()).entered();
        let capacity = self.capacity();
        let dropped = text.chars().count().saturating_sub(capacity);
        if dropped > 0 {
            crate::warn!(capacity, dropped, "text longer than board; truncating");
        }

        let padded: Vec<char> = text
            .chars()
            .chain(std::iter::repeat(BLANK))
            .take(capacity)
            .collect();

        let columns = self.config.columns;
        let mut started = 0;
        for (r, row) in self.rows.iter_mut().enumerate() {
            for (c, cell) in row.cells.iter_mut().enumerate() {
                let target = padded[r * columns + c];
                if target == cell.target {
                    continue;
                }
                cell.target = target;
                let plan = cell.animator.retarget(&self.alphabet, target, now);
                crate::debug!(row = r, col = c, %target, distance = plan.distance, "cell retargeted");
                if !plan.is_noop() {
                    started += 1;
                }
            }
        }
        self.text = padded.into_iter().collect();
        started
    }

    /// Sample every cell at `now`.
    #[must_use]
    pub fn frame(&self, now: Duration) -> BoardFrame {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                row.cells
                    .iter()
                    .map(|cell| {
                        CellVisualState::from_value(&self.alphabet, cell.animator.value_at(now))
                    })
                    .collect()
            })
            .collect();
        BoardFrame { rows }
    }

    /// Retire every finished session. Returns how many cells settled.
    pub fn settle(&mut self, now: Duration) -> usize {
        let mut settled = 0;
        for cell in self.rows.iter_mut().flat_map(|row| row.cells.iter_mut()) {
            if cell.animator.settle(&self.alphabet, now) {
                settled += 1;
            }
        }
        settled
    }

    /// Whether any cell is still flipping at `now`.
    #[must_use]
    pub fn is_animating(&self, now: Duration) -> bool {
        self.cells().any(|cell| cell.animator.is_animating(now))
    }

    /// Timestamp at which the last running flip finishes, if any.
    #[must_use]
    pub fn settles_at(&self) -> Option<Duration> {
        self.cells()
            .filter_map(|cell| cell.animator.session())
            .map(|session| session.ends_at())
            .max()
    }

    /// Glyph each cell shows at `now`, ignoring in-flight fractions, in
    /// reading order with rows joined by `'\n'`.
    #[must_use]
    pub fn displayed_text(&self, now: Duration) -> String {
        let mut out = String::with_capacity(self.capacity() + self.config.rows);
        for (r, row) in self.rows.iter().enumerate() {
            if r > 0 {
                out.push('\n');
            }
            for cell in &row.cells {
                let whole = cell.animator.value_at(now).floor() as i64;
                out.push(self.alphabet.letter_at(whole));
            }
        }
        out
    }

    fn cells(&self) -> impl Iterator<Item = &FlipCell> {
        self.rows.iter().flat_map(|row| row.cells.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_state::FlapPhase;

    const MS_450: Duration = Duration::from_millis(450);

    fn board(columns: usize, rows: usize) -> Board {
        Board::new(BoardConfig {
            columns,
            rows,
            ..BoardConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn new_board_is_blank_and_idle() {
        let b = board(5, 4);
        assert_eq!(b.capacity(), 20);
        assert_eq!(b.text(), " ".repeat(20));
        assert!(!b.is_animating(Duration::ZERO));
        assert!(b.frame(Duration::ZERO).is_at_rest());
        assert_eq!(b.settles_at(), None);
    }

    #[test]
    fn text_is_padded_and_laid_out_row_major() {
        let mut b = board(3, 2);
        b.set_text("ABCD", Duration::ZERO);
        assert_eq!(b.text(), "ABCD  ");
        let targets: Vec<char> = b.rows()[1].cells().iter().map(FlipCell::target).collect();
        assert_eq!(targets, vec!['D', ' ', ' ']);
    }

    #[test]
    fn long_text_is_truncated() {
        let mut b = board(2, 1);
        b.set_text("ABCDEF", Duration::ZERO);
        assert_eq!(b.text(), "AB");
    }

    #[test]
    fn only_changed_cells_restart() {
        let mut b = board(3, 1);
        assert_eq!(b.set_text("ABC", Duration::ZERO), 3);
        let before = b.rows()[0].cells()[0].animator().session().unwrap().started_at();
        assert_eq!(b.set_text("ABD", MS_450), 1);
        let after = b.rows()[0].cells()[0].animator().session().unwrap().started_at();
        assert_eq!(before, after);
    }

    #[test]
    fn blank_targets_on_blank_cells_do_nothing() {
        let mut b = board(5, 4);
        assert_eq!(b.set_text("", Duration::ZERO), 0);
        assert!(!b.is_animating(Duration::ZERO));
    }

    #[test]
    fn frame_samples_every_cell() {
        let mut b = board(2, 1);
        b.set_text("C", Duration::ZERO);
        let frame = b.frame(MS_450);
        let cell = frame.cell(0, 0).unwrap();
        assert_eq!(cell.bottom_glyph, 'A');
        assert_eq!(cell.top_glyph, 'B');
        assert_eq!(cell.phase, FlapPhase::UpperCollapsing);
        assert_eq!(cell.rotation_degrees, -90.0);
        assert!(frame.cell(0, 1).unwrap().is_at_rest());
        assert!(frame.cell(1, 0).is_none());
    }

    #[test]
    fn settles_and_reports_end_time() {
        let mut b = board(2, 1);
        b.set_text("CA", Duration::ZERO);
        let end = b.settles_at().unwrap();
        assert_eq!(end, Duration::from_millis(900));
        assert!(b.is_animating(end - Duration::from_millis(1)));
        assert!(!b.is_animating(end));
        assert_eq!(b.settle(end), 2);
        assert_eq!(b.settles_at(), None);
        assert_eq!(b.displayed_text(end), "CA");
    }

    #[test]
    fn displayed_text_tracks_progress() {
        let mut b = board(2, 2);
        b.set_text("C", Duration::ZERO);
        assert_eq!(b.displayed_text(MS_450), "A \n  ");
    }

    #[test]
    fn lowercase_and_unknown_input() {
        let mut b = board(3, 1);
        b.set_text("a?z", Duration::ZERO);
        assert_eq!(b.displayed_text(Duration::from_secs(60)), "A•Z");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = Board::new(BoardConfig {
            columns: 0,
            ..BoardConfig::default()
        })
        .unwrap_err();
        assert_eq!(err.field, "columns");
    }

    #[test]
    fn frame_does_not_mutate() {
        let mut b = board(1, 1);
        b.set_text("Z", Duration::ZERO);
        let t = Duration::from_millis(1234);
        assert_eq!(b.frame(t), b.frame(t));
    }
}
