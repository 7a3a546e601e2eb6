#![forbid(unsafe_code)]

//! Core: split-flap alphabet, flip planning, animation and per-cell render state.

pub mod alphabet;
pub mod animation;
pub mod animator;
pub mod board;
pub mod config;
pub mod logging;
pub mod render_state;
pub mod sequencer;

pub use alphabet::{Alphabet, AlphabetError};
pub use animation::{Easing, FrameClock};
pub use animator::{FlipAnimator, FlipSession, FlipState, TICKER_CYCLE};
pub use board::{Board, BoardFrame};
pub use config::{BoardConfig, BoardConfigError, FlapStyle, Rgb};
pub use render_state::{CellVisualState, FlapPhase};
pub use sequencer::{FlipPlan, plan_flip};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace, trace_span, warn};
