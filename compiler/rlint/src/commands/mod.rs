//! Command handlers for the rlint CLI.
//!
//! Each submodule implements one command. Shared utilities like
//! `read_file` live here in the module root.

use std::path::Path;

use crate::CliError;

mod check;
mod debug;

pub use check::{
    check_sources, parse_check_args, run_check, CheckConfig, CheckSummary, FileReport,
};
pub use debug::{lex_file, parse_file};

/// Read a source file, classifying failures for the user.
pub fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|error| CliError::from_io(path, error))
}
