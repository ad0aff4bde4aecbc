//! rlint command-line front end.
//!
//! The binary in `main.rs` is a thin argument dispatcher; the commands live
//! here so they can be tested without spawning processes.

pub mod commands;
pub mod discovery;
mod error;
pub mod tracing_setup;

pub use error::CliError;
