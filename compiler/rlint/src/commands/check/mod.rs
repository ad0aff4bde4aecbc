//! The `check` command: lint R files and directories.
//!
//! Files are checked independently, in parallel by default, then reported
//! in path order so output is stable from run to run.

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use rlint_diagnostic::emitter::{ColorMode, JsonEmitter, LintEmitter, TerminalEmitter};
use rlint_diagnostic::{LintItem, LintKind};
use rlint_parse::{check, LintFlags, ParseOptions};
use tracing::{debug, warn};

use super::read_file;
use crate::discovery::discover_sources;
use crate::CliError;

/// Settings for one `check` run, built from command-line flags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckConfig {
    pub options: ParseOptions,
    /// Emit JSON instead of terminal lines.
    pub json: bool,
    pub color: ColorMode,
    /// Check files on the rayon pool.
    pub parallel: bool,
    /// Files and directories to check. Defaults to the current directory.
    pub paths: Vec<PathBuf>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        CheckConfig {
            options: ParseOptions::default(),
            json: false,
            color: ColorMode::Auto,
            parallel: true,
            paths: Vec::new(),
        }
    }
}

/// Build a [`CheckConfig`] from the arguments after `check`.
///
/// Later preset flags override earlier ones; `--style` applies on top of
/// whichever preset wins.
pub fn parse_check_args(args: &[String]) -> Result<CheckConfig, CliError> {
    let mut config = CheckConfig::default();
    let mut style = false;

    for arg in args {
        match arg.as_str() {
            "--json" => config.json = true,
            "--style" => style = true,
            "--all" => config.options.flags = ParseOptions::all().flags,
            "--syntax-only" => config.options.flags = ParseOptions::syntax_only().flags,
            "--no-parallel" => config.parallel = false,
            _ => {
                if let Some(globals) = arg.strip_prefix("--globals=") {
                    config.options = config.options.with_globals(
                        globals
                            .split(',')
                            .map(str::trim)
                            .filter(|name| !name.is_empty()),
                    );
                } else if let Some(mode) = arg.strip_prefix("--color=") {
                    config.color = ColorMode::parse(mode).ok_or_else(|| {
                        CliError::usage(format!(
                            "invalid color mode '{mode}' (expected auto, always or never)"
                        ))
                    })?;
                } else if arg.starts_with('-') {
                    return Err(CliError::usage(format!("unknown option '{arg}'")));
                } else {
                    config.paths.push(PathBuf::from(arg));
                }
            }
        }
    }

    if style {
        config.options.flags.insert(LintFlags::RECORD_STYLE);
    }
    if config.paths.is_empty() {
        config.paths.push(PathBuf::from("."));
    }
    Ok(config)
}

/// Lint found in one file, or why the file could not be read.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: Result<Vec<LintItem>, CliError>,
}

/// Totals over a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CheckSummary {
    pub files: usize,
    pub errors: usize,
    pub warnings: usize,
    /// Files that could not be read.
    pub failures: usize,
}

impl CheckSummary {
    /// `check` exits with 1 when anything went wrong.
    pub fn is_failure(&self) -> bool {
        self.errors > 0 || self.failures > 0
    }
}

/// Check every file under `config.paths` and report through the emitter
/// `config` selects.
pub fn run_check(config: &CheckConfig) -> Result<CheckSummary, CliError> {
    let files = discover_sources(&config.paths)?;
    let (reports, summary) = check_sources(&files, config);

    if config.json {
        let mut emitter = JsonEmitter::new(io::stdout());
        emitter.begin();
        emit_reports(&mut emitter, &reports);
        emitter.end();
        emitter.flush();
    } else {
        let is_tty = io::stdout().is_terminal();
        let mut emitter = TerminalEmitter::stdout(config.color, is_tty);
        emit_reports(&mut emitter, &reports);
        emitter.emit_summary(summary.errors, summary.warnings);
        emitter.flush();
    }

    for report in &reports {
        if let Err(error) = &report.outcome {
            eprintln!("error: {error}");
        }
    }
    Ok(summary)
}

/// Check `files`, returning per-file reports in input order and totals.
pub fn check_sources(files: &[PathBuf], config: &CheckConfig) -> (Vec<FileReport>, CheckSummary) {
    let errors = AtomicUsize::new(0);
    let warnings = AtomicUsize::new(0);
    let failures = AtomicUsize::new(0);

    let check_one = |path: &PathBuf| {
        let report = check_file(path, &config.options);
        match &report.outcome {
            Ok(lint) => {
                let (e, w) = count_severities(lint);
                errors.fetch_add(e, Ordering::Relaxed);
                warnings.fetch_add(w, Ordering::Relaxed);
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "file skipped");
                failures.fetch_add(1, Ordering::Relaxed);
            }
        }
        report
    };

    let reports: Vec<FileReport> = if config.parallel && files.len() > 1 {
        files.par_iter().map(check_one).collect()
    } else {
        files.iter().map(check_one).collect()
    };

    let summary = CheckSummary {
        files: files.len(),
        errors: errors.into_inner(),
        warnings: warnings.into_inner(),
        failures: failures.into_inner(),
    };
    debug!(?summary, parallel = config.parallel, "check finished");
    (reports, summary)
}

fn check_file(path: &Path, options: &ParseOptions) -> FileReport {
    let outcome = read_file(path).map(|source| check(&source, options).lint().items().to_vec());
    FileReport {
        path: path.to_path_buf(),
        outcome,
    }
}

fn count_severities(lint: &[LintItem]) -> (usize, usize) {
    lint.iter().fold((0, 0), |(errors, warnings), item| match item.kind {
        LintKind::Error => (errors + 1, warnings),
        LintKind::Warning => (errors, warnings + 1),
        LintKind::Info | LintKind::Style => (errors, warnings),
    })
}

fn emit_reports(emitter: &mut dyn LintEmitter, reports: &[FileReport]) {
    for report in reports {
        if let Ok(lint) = &report.outcome {
            emitter.emit_all(&report.path.display().to_string(), lint);
        }
    }
}
