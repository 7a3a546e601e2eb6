#![forbid(unsafe_code)]

//! Terminal demo for the split-flap board.
//!
//! The binary in `main.rs` wires these modules together: [`cli`] builds the
//! board configuration, [`app`] holds the model, [`view`] draws it and
//! [`terminal`] owns raw mode for the lifetime of the run.

pub mod app;
pub mod cli;
pub mod logging;
pub mod terminal;
pub mod view;
