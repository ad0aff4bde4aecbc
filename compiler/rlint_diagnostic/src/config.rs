/// Configuration for lint collection.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct LintConfig {
    /// Maximum number of errors before the parser gives up (0 = unlimited).
    pub error_limit: usize,
    /// Record style lint (whitespace conventions). Off by default.
    pub record_style: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        LintConfig {
            error_limit: 100,
            record_style: false,
        }
    }
}

impl LintConfig {
    /// Create a config with no error limit (for testing).
    pub fn unlimited() -> Self {
        LintConfig {
            error_limit: 0,
            ..LintConfig::default()
        }
    }

    #[must_use]
    pub fn with_style(mut self, record_style: bool) -> Self {
        self.record_style = record_style;
        self
    }

    /// Whether `error_count` errors exhaust the limit.
    pub fn limit_reached(&self, error_count: usize) -> bool {
        self.error_limit != 0 && error_count >= self.error_limit
    }
}
