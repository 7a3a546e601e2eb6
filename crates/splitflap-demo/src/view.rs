#![forbid(unsafe_code)]

//! Text rendering of a board frame.
//!
//! A terminal cannot rotate a pane, so each cell is drawn as three rows:
//! the top half, a divider at the vertical center, and the bottom half. The
//! half covered by the rotating pane shows the pane's glyph until the pane is
//! nearly edge-on, at which point the static glyph behind it shows through.
//!
//! ```text
//!   ┌───┐ ┌───┐
//!   │ A │ │ B │   top half
//!   ├───┤ ├───┤   divider
//!   │ A │ │ A │   bottom half
//!   └───┘ └───┘
//!   rest   edge-on
//! ```
//!
//! [`render_lines`] produces plain strings so layout can be tested without a
//! terminal; [`draw`] writes the same lines with the board's colors.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{Clear, ClearType};
use splitflap_core::board::BoardFrame;
use splitflap_core::config::{FlapStyle, Rgb};
use splitflap_core::render_state::{CellVisualState, FlapPhase};
use unicode_width::UnicodeWidthChar;

use crate::app::DemoApp;

/// Below this apparent height the rotating pane is treated as edge-on.
const EDGE_ON: f32 = 0.3;

/// Terminal geometry for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellLayout {
    /// Columns inside the cell frame.
    pub inner_width: usize,
    /// Blank columns between cells.
    pub column_gap: usize,
    /// Blank lines between rows of cells.
    pub row_gap: usize,
}

impl CellLayout {
    /// Map the board's spacing knobs (points on the reference board) onto
    /// terminal cells.
    #[must_use]
    pub fn from_style(style: &FlapStyle) -> Self {
        Self {
            inner_width: 3,
            column_gap: usize::from(style.column_spacing > 0),
            row_gap: usize::from(style.row_spacing > 0),
        }
    }

    /// Total columns taken by a row of `columns` cells.
    #[must_use]
    pub fn row_width(&self, columns: usize) -> usize {
        let cell = self.inner_width + 2;
        cell * columns + self.column_gap * columns.saturating_sub(1)
    }
}

/// The glyphs a viewer sees in each half of the cell.
#[must_use]
pub fn visible_halves(state: &CellVisualState) -> (char, char) {
    let pane_visible = state.pane_foreshortening() >= EDGE_ON;
    let top = match state.phase {
        FlapPhase::UpperCollapsing if pane_visible => state.rotating_glyph,
        _ => state.top_glyph,
    };
    let bottom = match state.phase {
        FlapPhase::LowerRevealing if pane_visible => state.rotating_glyph,
        _ => state.bottom_glyph,
    };
    (top, bottom)
}

fn centered(glyph: char, width: usize) -> String {
    let glyph_width = glyph.width().unwrap_or(0).min(width);
    let left = (width - glyph_width) / 2;
    let right = width - glyph_width - left;
    let mut out = String::with_capacity(width + 4);
    out.extend(std::iter::repeat_n(' ', left));
    if glyph_width > 0 {
        out.push(glyph);
    }
    out.extend(std::iter::repeat_n(' ', right));
    out
}

/// Render a frame as plain text, one string per terminal line.
#[must_use]
pub fn render_lines(frame: &BoardFrame, layout: CellLayout) -> Vec<String> {
    let gap = " ".repeat(layout.column_gap);
    let bar = "─".repeat(layout.inner_width);
    let mut lines = Vec::new();

    for (r, row) in frame.rows().iter().enumerate() {
        if r > 0 {
            lines.extend(std::iter::repeat_n(String::new(), layout.row_gap));
        }
        let mut top_edge = Vec::with_capacity(row.len());
        let mut top = Vec::with_capacity(row.len());
        let mut divider = Vec::with_capacity(row.len());
        let mut bottom = Vec::with_capacity(row.len());
        let mut bottom_edge = Vec::with_capacity(row.len());
        for state in row {
            let (t, b) = visible_halves(state);
            top_edge.push(format!("┌{bar}┐"));
            top.push(format!("│{}│", centered(t, layout.inner_width)));
            divider.push(format!("├{bar}┤"));
            bottom.push(format!("│{}│", centered(b, layout.inner_width)));
            bottom_edge.push(format!("└{bar}┘"));
        }
        for parts in [top_edge, top, divider, bottom, bottom_edge] {
            lines.push(parts.join(&gap));
        }
    }
    lines
}

/// Status line under the board.
#[must_use]
pub fn input_line(app: &DemoApp) -> String {
    let capacity = app.board().capacity();
    format!(
        "> {}_  ({}/{capacity})  Enter: send  Esc: quit",
        app.input(),
        app.input().chars().count()
    )
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Draw the whole screen.
pub fn draw<W: Write>(out: &mut W, app: &DemoApp) -> io::Result<()> {
    let style = app.board().style();
    let layout = CellLayout::from_style(style);
    let frame = app.frame();
    let lines = render_lines(&frame, layout);

    // Lines are overwritten in place and only their tails are erased.
    for (y, line) in lines.iter().enumerate() {
        queue!(
            out,
            MoveTo(0, y as u16),
            SetForegroundColor(color(style.text_color)),
            SetBackgroundColor(color(style.background_color)),
            SetAttribute(Attribute::Bold),
            Print(line),
            SetAttribute(Attribute::Reset),
            ResetColor,
            Clear(ClearType::UntilNewLine)
        )?;
    }

    let status_y = lines.len() as u16 + 1;
    queue!(
        out,
        MoveTo(0, status_y - 1),
        Clear(ClearType::UntilNewLine),
        MoveTo(0, status_y),
        Print(input_line(app)),
        Clear(ClearType::UntilNewLine)
    )?;
    queue!(
        out,
        MoveTo(0, status_y + 1),
        SetAttribute(Attribute::Dim),
        Print(app.board().config().summary_short()),
        SetAttribute(Attribute::Reset),
        Clear(ClearType::FromCursorDown)
    )?;
    out.flush()
}
