//! Parse options: which lint to collect and which names are known.

use bitflags::bitflags;
use rlint_diagnostic::LintConfig;
use rustc_hash::FxHashSet;

bitflags! {
    /// Lint switches for a parse.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct LintFlags: u8 {
        /// Record whitespace style lint.
        const RECORD_STYLE = 1 << 0;
        /// Check symbol references inside call argument lists.
        const LINT_R_FUNCTIONS = 1 << 1;
        /// Match call arguments against the formals of functions defined
        /// earlier in the document.
        const CHECK_ARGUMENTS = 1 << 2;
        /// Warn on `x <- x + 1` when `x` has no prior definition.
        const WARN_NO_SUCH_VARIABLE = 1 << 3;
        /// Warn on definitions inside functions that are never used.
        const WARN_UNUSED = 1 << 4;
    }
}

/// Functions whose arguments are evaluated non-standardly. References
/// inside calls to these are recorded but never resolved.
const NSE_FUNCTIONS: &[&str] = &[
    "library",
    "require",
    "quote",
    "substitute",
    "enquote",
    "expression",
    "evalq",
    "subset",
    "summarise",
    "mutate",
    "select",
    "arrange",
    "filter",
    "n",
    "mutate_each",
    "group_by",
    "ntile",
    "rename",
    "data",
    "with",
    "within",
    "bquote",
    "transform",
];

/// Options for one parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    pub flags: LintFlags,
    pub nse_functions: FxHashSet<String>,
    /// Extra names treated as defined everywhere.
    pub globals: FxHashSet<String>,
    /// Errors before the parser stops (0 = unlimited).
    pub error_limit: usize,
}

impl ParseOptions {
    fn with_flags_only(flags: LintFlags) -> Self {
        ParseOptions {
            flags,
            nse_functions: NSE_FUNCTIONS.iter().map(|name| (*name).to_string()).collect(),
            globals: FxHashSet::default(),
            error_limit: LintConfig::default().error_limit,
        }
    }

    /// Structural lint only.
    pub fn syntax_only() -> Self {
        Self::with_flags_only(LintFlags::empty())
    }

    /// Structural lint, reference checks in calls, argument matching and
    /// self-referencing assignment warnings.
    pub fn core() -> Self {
        Self::with_flags_only(
            LintFlags::LINT_R_FUNCTIONS
                | LintFlags::CHECK_ARGUMENTS
                | LintFlags::WARN_NO_SUCH_VARIABLE,
        )
    }

    /// Everything, style included.
    pub fn all() -> Self {
        Self::with_flags_only(LintFlags::all())
    }

    #[inline]
    pub fn has(&self, flag: LintFlags) -> bool {
        self.flags.contains(flag)
    }

    #[must_use]
    pub fn with_flag(mut self, flag: LintFlags, enabled: bool) -> Self {
        self.flags.set(flag, enabled);
        self
    }

    #[must_use]
    pub fn with_style(self, enabled: bool) -> Self {
        self.with_flag(LintFlags::RECORD_STYLE, enabled)
    }

    #[must_use]
    pub fn with_globals<I, S>(mut self, globals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.globals.extend(globals.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_error_limit(mut self, error_limit: usize) -> Self {
        self.error_limit = error_limit;
        self
    }

    pub fn is_nse_function(&self, name: &str) -> bool {
        self.nse_functions.contains(name)
    }

    pub fn is_global(&self, name: &str) -> bool {
        self.globals.contains(name)
    }

    /// Collector configuration derived from these options.
    pub fn lint_config(&self) -> LintConfig {
        LintConfig {
            error_limit: self.error_limit,
            record_style: self.has(LintFlags::RECORD_STYLE),
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::core()
    }
}
