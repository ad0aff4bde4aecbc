//! Parse status: the explicit state stack and everything the parser
//! mutates while walking tokens.
//!
//! [`ParseStatus`] owns the scope tree under construction, the lint
//! collector, the bracket stack and the stack of open calls. The parser
//! itself only holds a cursor.

use std::fmt;

use rlint_diagnostic::LintItems;
use rlint_lexer::{Position, TokenRef};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::scope::{ParseItem, ScopeId, ScopeTree};
use crate::ParseOptions;

/// A grammar context on the state stack.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParseState {
    TopLevel,
    WithinParens,
    WithinBraces,
    ParenArgumentList,
    SingleBracketArgumentList,
    DoubleBracketArgumentList,
    FunctionArgumentList,
    IfCondition,
    IfStatement,
    IfExpression,
    ForCondition,
    ForStatement,
    ForExpression,
    WhileCondition,
    WhileStatement,
    WhileExpression,
    RepeatStatement,
    RepeatExpression,
    FunctionStatement,
    FunctionExpression,
}

impl ParseState {
    pub const fn name(self) -> &'static str {
        match self {
            ParseState::TopLevel => "TopLevel",
            ParseState::WithinParens => "WithinParens",
            ParseState::WithinBraces => "WithinBraces",
            ParseState::ParenArgumentList => "ParenArgumentList",
            ParseState::SingleBracketArgumentList => "SingleBracketArgumentList",
            ParseState::DoubleBracketArgumentList => "DoubleBracketArgumentList",
            ParseState::FunctionArgumentList => "FunctionArgumentList",
            ParseState::IfCondition => "IfCondition",
            ParseState::IfStatement => "IfStatement",
            ParseState::IfExpression => "IfExpression",
            ParseState::ForCondition => "ForCondition",
            ParseState::ForStatement => "ForStatement",
            ParseState::ForExpression => "ForExpression",
            ParseState::WhileCondition => "WhileCondition",
            ParseState::WhileStatement => "WhileStatement",
            ParseState::WhileExpression => "WhileExpression",
            ParseState::RepeatStatement => "RepeatStatement",
            ParseState::RepeatExpression => "RepeatExpression",
            ParseState::FunctionStatement => "FunctionStatement",
            ParseState::FunctionExpression => "FunctionExpression",
        }
    }

    /// Brace-less bodies. These close implicitly at statement ends.
    pub const fn is_control_flow_statement(self) -> bool {
        matches!(
            self,
            ParseState::IfStatement
                | ParseState::ForStatement
                | ParseState::WhileStatement
                | ParseState::RepeatStatement
                | ParseState::FunctionStatement
        )
    }

    /// Contexts where a line break does not end a statement.
    pub const fn is_parenthetical(self) -> bool {
        matches!(
            self,
            ParseState::WithinParens
                | ParseState::ParenArgumentList
                | ParseState::SingleBracketArgumentList
                | ParseState::DoubleBracketArgumentList
                | ParseState::FunctionArgumentList
                | ParseState::IfCondition
                | ParseState::ForCondition
                | ParseState::WhileCondition
        )
    }

    /// Call and subset argument lists.
    pub const fn is_argument_list(self) -> bool {
        matches!(
            self,
            ParseState::ParenArgumentList
                | ParseState::SingleBracketArgumentList
                | ParseState::DoubleBracketArgumentList
        )
    }

    pub const fn is_function_body(self) -> bool {
        matches!(
            self,
            ParseState::FunctionStatement | ParseState::FunctionExpression
        )
    }
}

impl fmt::Display for ParseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An open call: its callee text and whether its arguments are evaluated
/// non-standardly.
#[derive(Clone, Debug, PartialEq, Eq)]
struct OpenCall {
    name: String,
    nse: bool,
}

/// Mutable parse state threaded through the parser.
pub struct ParseStatus<'o> {
    options: &'o ParseOptions,
    tree: ScopeTree,
    scope: ScopeId,
    states: SmallVec<[ParseState; 16]>,
    brackets: SmallVec<[ParseItem; 16]>,
    calls: SmallVec<[OpenCall; 8]>,
    lint: LintItems,
    end_of_document_reported: bool,
}

impl<'o> ParseStatus<'o> {
    pub fn new(options: &'o ParseOptions) -> Self {
        let mut states = SmallVec::new();
        states.push(ParseState::TopLevel);
        ParseStatus {
            options,
            tree: ScopeTree::new(),
            scope: ScopeId::ROOT,
            states,
            brackets: SmallVec::new(),
            calls: SmallVec::new(),
            lint: LintItems::with_config(options.lint_config()),
            end_of_document_reported: false,
        }
    }

    pub fn options(&self) -> &'o ParseOptions {
        self.options
    }

    pub fn tree(&self) -> &ScopeTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ScopeTree {
        &mut self.tree
    }

    /// The scope symbols are currently recorded in.
    #[inline]
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    pub fn lint(&mut self) -> &mut LintItems {
        &mut self.lint
    }

    pub fn into_parts(self) -> (ScopeTree, LintItems) {
        (self.tree, self.lint)
    }

    // ─── Symbols in the current scope ───

    pub fn define(&mut self, symbol: &str, position: Position) {
        trace!(symbol, row = position.row, column = position.column, "define");
        self.tree.define(self.scope, symbol, position);
    }

    pub fn reference(&mut self, symbol: &str, position: Position) {
        self.tree.reference(self.scope, symbol, position);
    }

    pub fn reference_nse(&mut self, symbol: &str, position: Position) {
        self.tree.reference_nse(self.scope, symbol, position);
    }

    /// `symbol` has a definition visible from `position` in the current
    /// scope.
    pub fn has_definition_in_tree(&self, symbol: &str, position: Position) -> bool {
        self.tree.is_defined(self.scope, symbol, position)
    }

    // ─── State stack ───

    #[inline]
    pub fn current_state(&self) -> ParseState {
        self.peek_state(0)
    }

    /// State `depth` levels below the top. Past the bottom is `TopLevel`.
    pub fn peek_state(&self, depth: usize) -> ParseState {
        self.states
            .len()
            .checked_sub(depth + 1)
            .and_then(|index| self.states.get(index))
            .copied()
            .unwrap_or(ParseState::TopLevel)
    }

    pub fn push_state(&mut self, state: ParseState) {
        trace!(state = %state, depth = self.states.len(), "push state");
        self.states.push(state);
    }

    /// Pop the top state. `TopLevel` is never popped. Leaving a function
    /// body returns to the enclosing scope; leaving an argument list closes
    /// its call.
    pub fn pop_state(&mut self) {
        if self.states.len() <= 1 {
            return;
        }
        let Some(state) = self.states.pop() else {
            return;
        };
        trace!(state = %state, depth = self.states.len(), "pop state");

        if state.is_function_body() {
            if let Some(parent) = self.tree.get(self.scope).parent() {
                self.scope = parent;
            }
        } else if state.is_argument_list() {
            self.calls.pop();
        }
    }

    /// Pop every brace-less control-flow body on top of the stack.
    pub fn pop_control_flow_states(&mut self) {
        while self.is_in_control_flow_statement() {
            self.pop_state();
        }
    }

    pub fn is_at_top_level(&self) -> bool {
        self.current_state() == ParseState::TopLevel
    }

    pub fn is_in_control_flow_statement(&self) -> bool {
        self.current_state().is_control_flow_statement()
    }

    pub fn is_in_if_statement_or_expression(&self) -> bool {
        matches!(
            self.current_state(),
            ParseState::IfStatement | ParseState::IfExpression
        )
    }

    pub fn is_in_parenthetical_scope(&self) -> bool {
        self.current_state().is_parenthetical()
    }

    /// Call, subset or formal argument list.
    pub fn is_in_argument_list(&self) -> bool {
        let state = self.current_state();
        state.is_argument_list() || state == ParseState::FunctionArgumentList
    }

    pub fn is_within_paren_function_call(&self) -> bool {
        self.current_state() == ParseState::ParenArgumentList
    }

    // ─── Calls ───

    /// Open an argument list for the call `name`.
    pub fn push_function_call_state(&mut self, state: ParseState, name: &str, nse: bool) {
        debug!(state = %state, callee = name, nse, "enter argument list");
        self.push_state(state);
        self.calls.push(OpenCall {
            name: name.to_string(),
            nse,
        });
    }

    pub fn is_within_nse_call(&self) -> bool {
        self.calls.last().is_some_and(|call| call.nse)
    }

    /// Callee of the innermost open call.
    pub fn current_call_name(&self) -> Option<&str> {
        self.calls.last().map(|call| call.name.as_str())
    }

    // ─── Function scopes ───

    /// Open a function scope named `name` and enter its argument list.
    pub fn enter_function_scope(&mut self, name: &str, position: Position) {
        let child = self.tree.add_child(self.scope, name, position);
        debug!(
            name,
            row = position.row,
            column = position.column,
            "enter function scope"
        );
        self.scope = child;
        self.push_state(ParseState::FunctionArgumentList);
    }

    /// Whether the parse ended inside a function scope.
    pub fn is_in_function_scope(&self) -> bool {
        self.scope != ScopeId::ROOT
    }

    // ─── Brackets ───

    pub fn push_bracket(&mut self, token: &TokenRef<'_>) {
        self.brackets
            .push(ParseItem::new(token.text, token.position, self.scope));
    }

    /// Close the innermost bracket with `token`. A closer with nothing open
    /// or of the wrong flavour is an error; a mismatched opener is popped
    /// anyway so that later brackets still pair up.
    pub fn pop_bracket(&mut self, token: &TokenRef<'_>) {
        let Some(top) = self.brackets.pop() else {
            self.lint.unexpected_closing_bracket(token, None);
            return;
        };
        if opener_for(token.text) != Some(top.symbol.as_str()) {
            self.lint
                .unexpected_closing_bracket(token, Some((top.symbol.as_str(), top.position)));
        }
    }

    pub fn bracket_depth(&self) -> usize {
        self.brackets.len()
    }

    /// Report a premature end of input once per parse.
    pub fn unexpected_end_of_document(&mut self, token: &TokenRef<'_>) {
        if !self.end_of_document_reported {
            self.end_of_document_reported = true;
            self.lint.unexpected_end_of_document(token);
        }
    }

    /// At the end of the parse, flag every bracket left open.
    pub fn add_lint_if_bracket_stack_not_empty(&mut self, last: &TokenRef<'_>) {
        if self.brackets.is_empty() {
            return;
        }
        let open = std::mem::take(&mut self.brackets);
        for item in &open {
            self.lint.unmatched_bracket(&item.symbol, item.position);
        }
        self.unexpected_end_of_document(last);
    }
}

fn opener_for(closer: &str) -> Option<&'static str> {
    match closer {
        ")" => Some("("),
        "]" => Some("["),
        "]]" => Some("[["),
        "}" => Some("{"),
        _ => None,
    }
}
