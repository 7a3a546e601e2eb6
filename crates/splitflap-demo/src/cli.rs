#![forbid(unsafe_code)]

//! Command-line argument parsing for the split-flap demo.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via `SPLITFLAP_DEMO_*` prefix;
//! explicit flags win over the environment.

use std::env;
use std::process;
use std::time::Duration;

use splitflap_core::animation::Easing;
use splitflap_core::config::BoardConfig;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Split-Flap Demo: a departure-board ticker in your terminal

USAGE:
    splitflap-demo [OPTIONS]

OPTIONS:
    --columns=N          Cells per row (default: 5)
    --rows=N             Number of rows (default: 4)
    --cycle-ms=N         Milliseconds per flap step (default: 300)
    --easing=NAME        linear | ease-in-out | ease-in-out-cubic | fast-out-slow-in
    --text=STR           Text shown on startup
    --exit-after-ms=N    Auto-quit after N milliseconds (0 = never)
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    type            Edit the input line (capped at board capacity)
    Enter           Send the input line to the board
    Backspace       Delete the last character
    Ctrl+U          Clear the input line
    Esc / Ctrl+C    Quit

ENVIRONMENT VARIABLES:
    SPLITFLAP_DEMO_TEXT           Override --text
    SPLITFLAP_DEMO_EXIT_AFTER_MS  Override --exit-after-ms
    SPLITFLAP_COLUMNS, SPLITFLAP_ROWS, SPLITFLAP_CYCLE_MS, SPLITFLAP_EASING,
    SPLITFLAP_ALPHABET, SPLITFLAP_TEXT_COLOR, SPLITFLAP_BACKGROUND_COLOR
                                  Board defaults (flags override)
    SPLITFLAP_LOG                 Log filter, e.g. debug or splitflap_core=trace
    SPLITFLAP_LOG_FILE            Write logs to this file";

/// Parsed command-line options.
#[derive(Debug, Clone)]
pub struct Opts {
    /// Board shape, timing and style.
    pub board: BoardConfig,
    /// Text committed to the board at startup.
    pub text: Option<String>,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
    /// Problems found in `SPLITFLAP_*` board variables; defaults were kept.
    pub env_warnings: Vec<String>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            text: None,
            exit_after_ms: 0,
            env_warnings: Vec::new(),
        }
    }
}

/// What the command line asked for.
#[derive(Debug)]
pub enum CliAction {
    Run(Opts),
    Help,
    Version,
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Prints help/version or an error and exits the process when the
    /// arguments don't describe a run.
    pub fn parse() -> Self {
        let parsed = BoardConfig::from_env_with_diagnostics();
        let mut opts = Self {
            board: parsed.config,
            env_warnings: parsed.errors.iter().map(ToString::to_string).collect(),
            ..Self::default()
        };
        if let Ok(val) = env::var("SPLITFLAP_DEMO_TEXT") {
            opts.text = Some(val);
        }
        if let Ok(val) = env::var("SPLITFLAP_DEMO_EXIT_AFTER_MS")
            && let Ok(n) = val.parse()
        {
            opts.exit_after_ms = n;
        }

        match parse_args(opts, env::args().skip(1)) {
            Ok(CliAction::Run(opts)) => opts,
            Ok(CliAction::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(CliAction::Version) => {
                println!("splitflap-demo {VERSION}");
                process::exit(0);
            }
            Err(msg) => {
                eprintln!("{msg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }
}

/// Apply command-line flags on top of `opts`.
pub fn parse_args<I>(mut opts: Opts, args: I) -> Result<CliAction, String>
where
    I: IntoIterator<Item = String>,
{
    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return Ok(CliAction::Help),
            "--version" | "-V" => return Ok(CliAction::Version),
            other => {
                if let Some(val) = other.strip_prefix("--columns=") {
                    opts.board.columns = parse_positive("--columns", val)?;
                } else if let Some(val) = other.strip_prefix("--rows=") {
                    opts.board.rows = parse_positive("--rows", val)?;
                } else if let Some(val) = other.strip_prefix("--cycle-ms=") {
                    let ms = parse_positive("--cycle-ms", val)?;
                    opts.board.cycle = Duration::from_millis(ms as u64);
                } else if let Some(val) = other.strip_prefix("--easing=") {
                    opts.board.easing = Easing::parse(val)
                        .ok_or_else(|| format!("Invalid --easing value: {val}"))?;
                } else if let Some(val) = other.strip_prefix("--text=") {
                    opts.text = Some(val.to_string());
                } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                    opts.exit_after_ms = val
                        .parse()
                        .map_err(|_| format!("Invalid --exit-after-ms value: {val}"))?;
                } else {
                    return Err(format!("Unknown argument: {other}"));
                }
            }
        }
    }
    Ok(CliAction::Run(opts))
}

fn parse_positive(flag: &str, val: &str) -> Result<usize, String> {
    match val.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("Invalid {flag} value: {val}")),
    }
}
