#![forbid(unsafe_code)]

//! Board configuration.
//!
//! [`BoardConfig`] carries the grid shape, flip timing and alphabet that the
//! animation math depends on, plus a [`FlapStyle`] that is passed through to
//! the host untouched.
//!
//! Environment variables (all optional):
//! - `SPLITFLAP_COLUMNS` (positive integer)
//! - `SPLITFLAP_ROWS` (positive integer)
//! - `SPLITFLAP_CYCLE_MS` (positive integer, milliseconds per flap step)
//! - `SPLITFLAP_EASING` = linear|ease-in-out|ease-in-out-cubic|fast-out-slow-in
//! - `SPLITFLAP_ALPHABET` (ordered glyphs; the last one is the fallback)
//! - `SPLITFLAP_TEXT_COLOR` / `SPLITFLAP_BACKGROUND_COLOR` (`#rrggbb`)

use std::env;
use std::fmt;
use std::time::Duration;

use crate::alphabet::{Alphabet, STANDARD_GLYPHS};
use crate::animation::Easing;
use crate::animator::TICKER_CYCLE;

const ENV_COLUMNS: &str = "SPLITFLAP_COLUMNS";
const ENV_ROWS: &str = "SPLITFLAP_ROWS";
const ENV_CYCLE_MS: &str = "SPLITFLAP_CYCLE_MS";
const ENV_EASING: &str = "SPLITFLAP_EASING";
const ENV_ALPHABET: &str = "SPLITFLAP_ALPHABET";
const ENV_TEXT_COLOR: &str = "SPLITFLAP_TEXT_COLOR";
const ENV_BACKGROUND_COLOR: &str = "SPLITFLAP_BACKGROUND_COLOR";

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);
    pub const BLACK: Self = Self::new(0, 0, 0);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`.
    #[must_use]
    pub fn parse_hex(value: &str) -> Option<Self> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Presentation knobs. None of these affect the animation math.
#[derive(Debug, Clone, PartialEq)]
pub struct FlapStyle {
    pub text_color: Rgb,
    pub background_color: Rgb,
    /// Glyph size in host units (points on the reference board).
    pub font_size: f32,
    /// Glyph font family. Fixed-width keeps flap halves aligned.
    pub font_family: String,
    /// Gap between rows, in host units.
    pub row_spacing: u16,
    /// Gap between cells in a row, in host units.
    pub column_spacing: u16,
}

impl Default for FlapStyle {
    fn default() -> Self {
        Self {
            text_color: Rgb::WHITE,
            background_color: Rgb::BLACK,
            font_size: 96.0,
            font_family: "monospace".into(),
            row_spacing: 8,
            column_spacing: 8,
        }
    }
}

/// Grid shape, timing and alphabet for a board.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub columns: usize,
    pub rows: usize,
    /// Time one flap step takes.
    pub cycle: Duration,
    pub easing: Easing,
    /// Ordered glyph ring; the last glyph is the fallback.
    pub glyphs: String,
    pub style: FlapStyle,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: 5,
            rows: 4,
            cycle: TICKER_CYCLE,
            easing: Easing::default(),
            glyphs: STANDARD_GLYPHS.to_string(),
            style: FlapStyle::default(),
        }
    }
}

/// Configuration parse diagnostics (env + validation).
#[derive(Debug, Clone)]
pub struct BoardConfigParse {
    pub config: BoardConfig,
    pub errors: Vec<BoardConfigError>,
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl BoardConfigError {
    pub(crate) fn new(
        field: &'static str,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for BoardConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for BoardConfigError {}

impl BoardConfig {
    /// Number of cells on the board.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.columns.saturating_mul(self.rows)
    }

    /// Build the configured alphabet.
    ///
    /// # Errors
    ///
    /// Returns an error if the glyph ring is too short or repeats a glyph.
    pub fn alphabet(&self) -> Result<Alphabet, BoardConfigError> {
        Alphabet::new(self.glyphs.chars())
            .map_err(|e| BoardConfigError::new("glyphs", self.glyphs.clone(), e.to_string()))
    }

    /// Parse config from environment variables and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> BoardConfigParse {
        from_env_with(|key| env::var(key).ok())
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<BoardConfigError>> {
        let mut errors = Vec::new();
        validate_positive("columns", self.columns, &mut errors);
        validate_positive("rows", self.rows, &mut errors);
        if self.cycle.is_zero() {
            errors.push(BoardConfigError::new(
                "cycle",
                format!("{}ms", self.cycle.as_millis()),
                "must be > 0",
            ));
        }
        if let Err(e) = self.alphabet() {
            errors.push(e);
        }
        if !self.style.font_size.is_finite() || self.style.font_size <= 0.0 {
            errors.push(BoardConfigError::new(
                "font_size",
                self.style.font_size.to_string(),
                "must be a positive number",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Short human-readable summary for status lines.
    #[must_use]
    pub fn summary_short(&self) -> String {
        format!(
            "{}x{} · {}ms/step · {} · {} glyphs",
            self.columns,
            self.rows,
            self.cycle.as_millis(),
            self.easing,
            self.glyphs.chars().count()
        )
    }
}

fn from_env_with<F>(mut get: F) -> BoardConfigParse
where
    F: FnMut(&str) -> Option<String>,
{
    let mut config = BoardConfig::default();
    let mut errors = Vec::new();

    if let Some(value) = get(ENV_COLUMNS) {
        match parse_positive(&value) {
            Some(parsed) => config.columns = parsed,
            None => errors.push(BoardConfigError::new(
                "columns",
                value,
                "expected positive integer",
            )),
        }
    }

    if let Some(value) = get(ENV_ROWS) {
        match parse_positive(&value) {
            Some(parsed) => config.rows = parsed,
            None => errors.push(BoardConfigError::new(
                "rows",
                value,
                "expected positive integer",
            )),
        }
    }

    if let Some(value) = get(ENV_CYCLE_MS) {
        match parse_positive(&value) {
            Some(parsed) => config.cycle = Duration::from_millis(parsed as u64),
            None => errors.push(BoardConfigError::new(
                "cycle",
                value,
                "expected positive integer (milliseconds)",
            )),
        }
    }

    if let Some(value) = get(ENV_EASING) {
        match Easing::parse(&value) {
            Some(parsed) => config.easing = parsed,
            None => errors.push(BoardConfigError::new(
                "easing",
                value,
                "expected linear|ease-in-out|ease-in-out-cubic|fast-out-slow-in",
            )),
        }
    }

    if let Some(value) = get(ENV_ALPHABET) {
        match Alphabet::new(value.chars()) {
            Ok(_) => config.glyphs = value,
            Err(e) => errors.push(BoardConfigError::new("glyphs", value, e.to_string())),
        }
    }

    if let Some(value) = get(ENV_TEXT_COLOR) {
        match Rgb::parse_hex(&value) {
            Some(parsed) => config.style.text_color = parsed,
            None => errors.push(BoardConfigError::new(
                "text_color",
                value,
                "expected #rrggbb",
            )),
        }
    }

    if let Some(value) = get(ENV_BACKGROUND_COLOR) {
        match Rgb::parse_hex(&value) {
            Some(parsed) => config.style.background_color = parsed,
            None => errors.push(BoardConfigError::new(
                "background_color",
                value,
                "expected #rrggbb",
            )),
        }
    }

    BoardConfigParse { config, errors }
}

fn parse_positive(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|n| *n > 0)
}

fn validate_positive(field: &'static str, value: usize, errors: &mut Vec<BoardConfigError>) {
    if value == 0 {
        errors.push(BoardConfigError::new(field, "0", "must be > 0"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(vars: &[(&str, &str)]) -> BoardConfigParse {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        from_env_with(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_match_reference_board() {
        let config = BoardConfig::default();
        assert_eq!(config.columns, 5);
        assert_eq!(config.rows, 4);
        assert_eq!(config.capacity(), 20);
        assert_eq!(config.cycle, Duration::from_millis(300));
        assert!(matches!(config.easing, Easing::EaseInOut));
        assert_eq!(config.style.text_color, Rgb::WHITE);
        assert_eq!(config.style.background_color, Rgb::BLACK);
        assert_eq!(config.style.font_family, "monospace");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_env_gives_defaults() {
        let parsed = parse(&[]);
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.config.capacity(), 20);
    }

    #[test]
    fn env_overrides() {
        let parsed = parse(&[
            (ENV_COLUMNS, "8"),
            (ENV_ROWS, " 2 "),
            (ENV_CYCLE_MS, "120"),
            (ENV_EASING, "linear"),
            (ENV_ALPHABET, " 0123456789?"),
            (ENV_TEXT_COLOR, "#ffcc00"),
            (ENV_BACKGROUND_COLOR, "101010"),
        ]);
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        let c = parsed.config;
        assert_eq!((c.columns, c.rows), (8, 2));
        assert_eq!(c.cycle, Duration::from_millis(120));
        assert!(matches!(c.easing, Easing::Linear));
        assert_eq!(c.alphabet().unwrap().len(), 12);
        assert_eq!(c.style.text_color, Rgb::new(0xff, 0xcc, 0x00));
        assert_eq!(c.style.background_color, Rgb::new(0x10, 0x10, 0x10));
    }

    #[test]
    fn bad_values_are_collected_not_applied() {
        let parsed = parse(&[
            (ENV_COLUMNS, "0"),
            (ENV_ROWS, "many"),
            (ENV_EASING, "bounce"),
            (ENV_ALPHABET, "AA"),
            (ENV_TEXT_COLOR, "red"),
        ]);
        let fields: Vec<_> = parsed.errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["columns", "rows", "easing", "glyphs", "text_color"]
        );
        assert_eq!(parsed.config.columns, 5);
        assert_eq!(parsed.config.glyphs, STANDARD_GLYPHS);
    }

    #[test]
    fn validate_reports_every_violation() {
        let config = BoardConfig {
            columns: 0,
            rows: 0,
            cycle: Duration::ZERO,
            glyphs: "x".into(),
            style: FlapStyle {
                font_size: 0.0,
                ..FlapStyle::default()
            },
            ..BoardConfig::default()
        };
        let errors = config.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["columns", "rows", "cycle", "glyphs", "font_size"]);
    }

    #[test]
    fn validate_rejects_non_finite_font_size() {
        for font_size in [f32::NAN, f32::INFINITY, -12.0] {
            let config = BoardConfig {
                style: FlapStyle {
                    font_size,
                    ..FlapStyle::default()
                },
                ..BoardConfig::default()
            };
            let errors = config.validate().unwrap_err();
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "font_size");
        }
    }

    #[test]
    fn error_display() {
        let err = BoardConfigError::new("rows", "x", "expected positive integer");
        assert_eq!(err.to_string(), "rows=x (expected positive integer)");
    }

    #[test]
    fn rgb_hex_round_trip() {
        let c = Rgb::parse_hex("#0a0B0c").unwrap();
        assert_eq!(c, Rgb::new(10, 11, 12));
        assert_eq!(c.to_string(), "#0a0b0c");
        assert!(Rgb::parse_hex("#12345").is_none());
        assert!(Rgb::parse_hex("#gg0000").is_none());
    }

    #[test]
    fn summary_mentions_shape_and_timing() {
        let s = BoardConfig::default().summary_short();
        assert!(s.contains("5x4"));
        assert!(s.contains("300ms/step"));
        assert!(s.contains("ease-in-out"));
    }
}
