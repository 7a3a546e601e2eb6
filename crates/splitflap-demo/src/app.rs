#![forbid(unsafe_code)]

//! Demo application model.
//!
//! [`DemoApp`] follows a small Elm-style loop: the terminal layer turns
//! crossterm events and frame ticks into [`Msg`]s, [`DemoApp::update`] folds
//! them into state and returns a [`Cmd`], and the view samples the board at
//! the app's clock.
//!
//! The input line mirrors a single-line text field: it is capped at the board
//! capacity and only reaches the board when Enter is pressed.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use splitflap_core::animation::FrameClock;
use splitflap_core::board::{Board, BoardFrame};

/// Input to the model.
#[derive(Debug, Clone)]
pub enum Msg {
    /// A key press.
    Key(KeyEvent),
    /// A frame of length `dt` has passed.
    Tick(Duration),
}

/// What the host loop should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmd {
    None,
    Quit,
}

/// Split-flap board plus its input line.
#[derive(Debug)]
pub struct DemoApp {
    board: Board,
    clock: FrameClock,
    input: String,
    exit_after: Option<Duration>,
}

impl DemoApp {
    /// Wrap `board`. `initial_text`, if any, is committed at time zero.
    #[must_use]
    pub fn new(board: Board, initial_text: Option<&str>, exit_after_ms: u64) -> Self {
        let mut app = Self {
            board,
            clock: FrameClock::new(),
            input: String::new(),
            exit_after: (exit_after_ms > 0).then(|| Duration::from_millis(exit_after_ms)),
        };
        if let Some(text) = initial_text {
            app.input = text.chars().take(app.board.capacity()).collect();
            app.commit();
        }
        app
    }

    /// The board being driven.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current contents of the input line.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Current app time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Sample the board at the current app time.
    #[must_use]
    pub fn frame(&self) -> BoardFrame {
        self.board.frame(self.clock.now())
    }

    /// Whether any cell is still flipping.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.board.is_animating(self.clock.now())
    }

    /// Fold one message into the model.
    pub fn update(&mut self, msg: Msg) -> Cmd {
        match msg {
            Msg::Tick(dt) => {
                let now = self.clock.tick(dt);
                self.board.settle(now);
                match self.exit_after {
                    Some(limit) if now >= limit => {
                        tracing::info!(elapsed_ms = now.as_millis() as u64, "exit-after reached");
                        Cmd::Quit
                    }
                    _ => Cmd::None,
                }
            }
            Msg::Key(key) => self.handle_key(key),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Cmd {
        if key.kind == KeyEventKind::Release {
            return Cmd::None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Cmd::Quit,
            KeyCode::Char('c') if ctrl => return Cmd::Quit,
            KeyCode::Char('u') if ctrl => self.input.clear(),
            KeyCode::Char(ch) if !ctrl => {
                if self.input.chars().count() < self.board.capacity() {
                    self.input.push(ch);
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => self.commit(),
            _ => {}
        }
        Cmd::None
    }

    fn commit(&mut self) {
        let now = self.clock.now();
        let started = self.board.set_text(&self.input, now);
        tracing::debug!(text = %self.input, started, "input committed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use splitflap_core::config::BoardConfig;

    const MS_16: Duration = Duration::from_millis(16);

    fn app(columns: usize, rows: usize) -> DemoApp {
        let board = Board::new(BoardConfig {
            columns,
            rows,
            ..BoardConfig::default()
        })
        .unwrap();
        DemoApp::new(board, None, 0)
    }

    fn key(code: KeyCode) -> Msg {
        Msg::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(ch: char) -> Msg {
        Msg::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
    }

    fn type_str(app: &mut DemoApp, s: &str) {
        for ch in s.chars() {
            app.update(key(KeyCode::Char(ch)));
        }
    }

    fn run_until_rest(app: &mut DemoApp) {
        while app.is_animating() {
            app.update(Msg::Tick(MS_16));
        }
        app.update(Msg::Tick(MS_16));
    }

    #[test]
    fn typing_does_not_touch_board_until_enter() {
        let mut app = app(3, 1);
        type_str(&mut app, "abc");
        assert_eq!(app.input(), "abc");
        assert!(!app.is_animating());

        app.update(key(KeyCode::Enter));
        assert!(app.is_animating());
        run_until_rest(&mut app);
        assert_eq!(app.board().displayed_text(app.now()), "ABC");
    }

    #[test]
    fn input_capped_at_capacity() {
        let mut app = app(2, 2);
        type_str(&mut app, "abcdefgh");
        assert_eq!(app.input(), "abcd");
    }

    #[test]
    fn backspace_and_clear() {
        let mut app = app(5, 1);
        type_str(&mut app, "abc");
        app.update(key(KeyCode::Backspace));
        assert_eq!(app.input(), "ab");
        app.update(ctrl('u'));
        assert_eq!(app.input(), "");
    }

    #[test]
    fn input_survives_commit() {
        let mut app = app(5, 1);
        type_str(&mut app, "hi");
        app.update(key(KeyCode::Enter));
        assert_eq!(app.input(), "hi");
    }

    #[test]
    fn quit_keys() {
        let mut app = app(1, 1);
        assert_eq!(app.update(key(KeyCode::Esc)), Cmd::Quit);
        assert_eq!(app.update(ctrl('c')), Cmd::Quit);
        assert_eq!(app.update(key(KeyCode::Char('c'))), Cmd::None);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut app = app(3, 1);
        let mut release = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        app.update(Msg::Key(release));
        assert_eq!(app.input(), "");
    }

    #[test]
    fn initial_text_is_committed() {
        let board = Board::new(BoardConfig {
            columns: 4,
            rows: 1,
            ..BoardConfig::default()
        })
        .unwrap();
        let mut app = DemoApp::new(board, Some("gate 12"), 0);
        assert_eq!(app.input(), "gate");
        run_until_rest(&mut app);
        assert_eq!(app.board().displayed_text(app.now()), "GATE");
    }

    #[test]
    fn exit_after_elapsed() {
        let board = Board::new(BoardConfig::default()).unwrap();
        let mut app = DemoApp::new(board, None, 100);
        for _ in 0..6 {
            assert_eq!(app.update(Msg::Tick(MS_16)), Cmd::None);
        }
        assert_eq!(app.update(Msg::Tick(MS_16)), Cmd::Quit);
    }

    #[test]
    fn ticks_settle_finished_cells() {
        let mut app = app(1, 1);
        type_str(&mut app, "b");
        app.update(key(KeyCode::Enter));
        run_until_rest(&mut app);
        let cell = &app.board().rows()[0].cells()[0];
        assert!(cell.animator().session().is_none());
    }
}
