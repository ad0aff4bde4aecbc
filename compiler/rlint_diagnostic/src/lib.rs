//! Lint model and lint output.
//!
//! The parser and the resolution pass report every finding, from a stray
//! token to a whitespace nit, as a [`LintItem`] appended to a [`LintItems`]
//! collector. Nothing here is fatal: a lint list is data, and the caller
//! decides how to render it through an [`emitter`].

mod config;
pub mod emitter;
mod lint;

pub use config::LintConfig;
pub use lint::{LintItem, LintItems, LintKind};
