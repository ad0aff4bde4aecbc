//! Parser and symbol analysis for R source code.
//!
//! The parser walks annotated tokens with an explicit state stack, building
//! a [`ScopeTree`] of definitions and references and collecting lint as it
//! goes. It never fails: malformed input produces lint, not errors.
//!
//! # Entry points
//!
//! - [`parse`]: structural lint plus the scope tree.
//! - [`parse_tokens`]: the same for an existing [`TokenStream`].
//! - [`check`]: [`parse`] followed by the resolution passes, honouring
//!   `# !diagnostics` directives in the source.
//!
//! ```
//! use rlint_parse::{check, ParseOptions};
//!
//! let results = check("f <- function(x) x + y", &ParseOptions::default());
//! assert_eq!(results.lint().len(), 1);
//! ```

mod calls;
mod cursor;
mod directives;
mod known_symbols;
mod options;
mod parser;
mod resolve;
mod scope;
mod status;
pub mod token_class;

use rlint_diagnostic::LintItems;
use rlint_lexer::{AnnotatedTokens, TokenFilter, TokenStream};
use rustc_hash::FxHashSet;
use tracing::debug;

pub use calls::{CallArguments, MatchedCall};
pub use cursor::TokenCursor;
pub use directives::Directives;
pub use known_symbols::is_known_symbol;
pub use options::{LintFlags, ParseOptions};
pub use resolve::{report_unresolved, report_unused, suggest_symbol, unresolved_references};
pub use scope::{
    Formal, PackageSymbols, ParseItem, ScopeId, ScopeNode, ScopeTree, SymbolPositions,
    ROOT_NAME, UNKNOWN_FUNCTION,
};
pub use status::ParseState;

use parser::Parser;

/// Output of one parse: the scope tree, the lint and the names treated as
/// globally defined.
#[derive(Clone, Debug, Default)]
pub struct ParseResults {
    tree: ScopeTree,
    lint: LintItems,
    globals: FxHashSet<String>,
}

impl ParseResults {
    pub fn tree(&self) -> &ScopeTree {
        &self.tree
    }

    pub fn lint(&self) -> &LintItems {
        &self.lint
    }

    pub fn globals(&self) -> &FxHashSet<String> {
        &self.globals
    }

    pub fn into_parts(self) -> (ScopeTree, LintItems) {
        (self.tree, self.lint)
    }
}

/// Parse `source`, collecting structural lint and the scope tree.
pub fn parse(source: &str, options: &ParseOptions) -> ParseResults {
    parse_tokens(TokenStream::new(source, TokenFilter::WithoutComments), options)
}

/// Parse an existing token stream.
pub fn parse_tokens(stream: TokenStream, options: &ParseOptions) -> ParseResults {
    let tokens = AnnotatedTokens::new(&stream);
    let (tree, lint) = if tokens.is_empty() {
        (
            ScopeTree::new(),
            LintItems::with_config(options.lint_config()),
        )
    } else {
        Parser::new(&tokens, options).parse()
    };

    debug!(
        tokens = tokens.len(),
        scopes = tree.len(),
        lint = lint.len(),
        "parsed document"
    );
    ParseResults {
        tree,
        lint,
        globals: options.globals.clone(),
    }
}

/// Parse `source` and run the resolution passes the options ask for.
///
/// `# !diagnostics` comments in the source adjust `options` first; `off`
/// yields empty results.
pub fn check(source: &str, options: &ParseOptions) -> ParseResults {
    let directives = Directives::parse(source);
    if directives.off {
        debug!("diagnostics disabled by directive");
        return ParseResults::default();
    }
    let options = directives.apply(options);

    let mut results = parse(source, &options);
    let is_global = |name: &str| options.is_global(name);
    if options.has(LintFlags::WARN_NO_SUCH_VARIABLE) {
        report_unresolved(&results.tree, is_global, &mut results.lint);
    }
    if options.has(LintFlags::WARN_UNUSED) {
        report_unused(&results.tree, is_global, &mut results.lint);
    }
    results
}
