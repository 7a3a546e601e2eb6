#![forbid(unsafe_code)]

//! Split-flap demo binary entry point.

use std::io::{self, BufWriter};
use std::process;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use splitflap_core::board::Board;
use splitflap_demo::app::{Cmd, DemoApp, Msg};
use splitflap_demo::cli;
use splitflap_demo::logging;
use splitflap_demo::terminal::TerminalGuard;
use splitflap_demo::view;

/// Poll interval while cells are flipping (about 60 fps).
const FRAME: Duration = Duration::from_millis(16);
/// Poll interval when the board is at rest.
const IDLE: Duration = Duration::from_millis(250);

fn main() {
    let opts = cli::Opts::parse();

    if let Err(e) = logging::init_from_env() {
        eprintln!("Failed to open log file: {e}");
    }
    for warning in &opts.env_warnings {
        tracing::warn!(%warning, "ignoring board environment variable");
        eprintln!("warning: ignoring {warning}");
    }

    let board = match Board::new(opts.board) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Invalid board configuration: {e}");
            process::exit(1);
        }
    };
    tracing::info!(config = %board.config().summary_short(), "board ready");

    let app = DemoApp::new(board, opts.text.as_deref(), opts.exit_after_ms);
    if let Err(e) = run(app) {
        eprintln!("Runtime error: {e}");
        process::exit(1);
    }
}

fn run(mut app: DemoApp) -> io::Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut out = BufWriter::new(io::stdout());
    let mut last = Instant::now();

    loop {
        view::draw(&mut out, &app)?;

        let timeout = if app.is_animating() { FRAME } else { IDLE };
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()?
                && app.update(Msg::Key(key)) == Cmd::Quit
            {
                break;
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last);
        last = now;
        if app.update(Msg::Tick(dt)) == Cmd::Quit {
            break;
        }
    }
    tracing::info!(elapsed_ms = app.now().as_millis() as u64, "demo finished");
    Ok(())
}
