//! The `esc` command-line tool.
//!
//! Command handlers live in [`commands`]; the binary in `main.rs` only
//! dispatches on the first argument.

pub mod commands;
mod tracing_setup;

pub use tracing_setup::init_tracing;
