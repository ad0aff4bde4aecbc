//! Tracing subscriber setup.
//!
//! Nothing is installed unless `RUST_LOG` is set:
//!
//! ```text
//! RUST_LOG=rlint_parse=debug rlint check scripts/
//! RUST_LOG=rlint_parse=trace RLINT_LOG_TREE=1 rlint parse model.R
//! ```
//!
//! `RLINT_LOG_TREE` switches from flat lines to an indented span tree.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tracing_tree::HierarchicalLayer;

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        if std::env::var_os("RUST_LOG").is_none() {
            return;
        }

        let filter = EnvFilter::from_default_env();
        let registry = tracing_subscriber::registry().with(filter);
        let installed = if std::env::var_os("RLINT_LOG_TREE").is_some() {
            registry
                .with(
                    HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()
        };

        if let Err(error) = installed {
            eprintln!("warning: could not install tracing subscriber: {error}");
        }
    });
}
