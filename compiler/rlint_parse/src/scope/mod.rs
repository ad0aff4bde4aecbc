//! Scope tree.
//!
//! An arena of [`ScopeNode`]s indexed by [`ScopeId`]. The root scope is the
//! document; every function literal opens a child scope. Each node records
//! which symbols it defines and references, and at which positions, so the
//! resolution pass can run over the finished tree without the tokens.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use rlint_lexer::Position;

/// Symbol name to the ordered positions it occurs at.
pub type SymbolPositions = BTreeMap<String, Vec<Position>>;

/// Package name to the symbols looked up through it.
pub type PackageSymbols = BTreeMap<String, BTreeSet<String>>;

/// Name given to function scopes not bound by an assignment.
pub const UNKNOWN_FUNCTION: &str = "(unknown function)";

/// Name of the document scope.
pub const ROOT_NAME: &str = "<root>";

/// Index of a scope in its [`ScopeTree`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct ScopeId(u32);

impl ScopeId {
    pub const ROOT: ScopeId = ScopeId(0);

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A symbol occurrence. Ordered by position first.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParseItem {
    pub symbol: String,
    pub position: Position,
    pub scope: ScopeId,
}

impl ParseItem {
    pub fn new(symbol: impl Into<String>, position: Position, scope: ScopeId) -> Self {
        ParseItem {
            symbol: symbol.into(),
            position,
            scope,
        }
    }
}

impl Ord for ParseItem {
    fn cmp(&self, other: &Self) -> Ordering {
        self.position
            .cmp(&other.position)
            .then_with(|| self.symbol.cmp(&other.symbol))
            .then_with(|| self.scope.cmp(&other.scope))
    }
}

impl PartialOrd for ParseItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A formal parameter of a function defined in the document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Formal {
    pub name: String,
    pub has_default: bool,
    /// The body calls `missing(<name>)`.
    pub missingness_handled: bool,
}

impl Formal {
    pub fn new(name: impl Into<String>, has_default: bool) -> Self {
        Formal {
            name: name.into(),
            has_default,
            missingness_handled: false,
        }
    }
}

/// One lexical scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeNode {
    name: String,
    position: Position,
    parent: Option<ScopeId>,
    children: Vec<ScopeId>,
    defined: SymbolPositions,
    referenced: SymbolPositions,
    nse_referenced: SymbolPositions,
    exported: PackageSymbols,
    internal: PackageSymbols,
    formals: Vec<Formal>,
}

impl ScopeNode {
    fn new(name: String, position: Position, parent: Option<ScopeId>) -> Self {
        ScopeNode {
            name,
            position,
            parent,
            children: Vec::new(),
            defined: SymbolPositions::new(),
            referenced: SymbolPositions::new(),
            nse_referenced: SymbolPositions::new(),
            exported: PackageSymbols::new(),
            internal: PackageSymbols::new(),
            formals: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the token that opened the scope.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    pub fn children(&self) -> &[ScopeId] {
        &self.children
    }

    pub fn defined_symbols(&self) -> &SymbolPositions {
        &self.defined
    }

    pub fn referenced_symbols(&self) -> &SymbolPositions {
        &self.referenced
    }

    /// References made inside non-standard-evaluation calls.
    pub fn nse_referenced_symbols(&self) -> &SymbolPositions {
        &self.nse_referenced
    }

    /// `pkg::name` lookups made in this scope.
    pub fn exported_symbols(&self) -> &PackageSymbols {
        &self.exported
    }

    /// `pkg:::name` lookups made in this scope.
    pub fn internal_symbols(&self) -> &PackageSymbols {
        &self.internal
    }

    pub fn formals(&self) -> &[Formal] {
        &self.formals
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether `symbol` is defined here at or before `position`.
    pub fn defines_at_or_before(&self, symbol: &str, position: Position) -> bool {
        self.defined
            .get(symbol)
            .is_some_and(|positions| positions.iter().any(|p| *p <= position))
    }

    pub fn defines(&self, symbol: &str) -> bool {
        self.defined.contains_key(symbol)
    }
}

fn insert_position(map: &mut SymbolPositions, symbol: &str, position: Position) {
    let positions = map.entry(symbol.to_string()).or_default();
    if let Err(index) = positions.binary_search(&position) {
        positions.insert(index, position);
    }
}

/// Arena-allocated scope tree. [`ScopeId::ROOT`] always exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeTree {
    nodes: Vec<ScopeNode>,
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTree {
    pub fn new() -> Self {
        ScopeTree {
            nodes: vec![ScopeNode::new(
                ROOT_NAME.to_string(),
                Position::default(),
                None,
            )],
        }
    }

    #[inline]
    pub fn root(&self) -> &ScopeNode {
        &self.nodes[0]
    }

    /// Look up a scope. Ids are only minted by this tree, so the lookup
    /// falls back to the root rather than failing.
    #[inline]
    pub fn get(&self, id: ScopeId) -> &ScopeNode {
        self.nodes.get(id.index()).unwrap_or(&self.nodes[0])
    }

    fn node_mut(&mut self, id: ScopeId) -> &mut ScopeNode {
        let index = if id.index() < self.nodes.len() {
            id.index()
        } else {
            0
        };
        &mut self.nodes[index]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Nothing was recorded: no child scopes, and the root holds no
    /// symbols, package uses or formals.
    pub fn is_empty(&self) -> bool {
        let root = self.root();
        self.nodes.len() == 1
            && root.defined.is_empty()
            && root.referenced.is_empty()
            && root.nse_referenced.is_empty()
            && root.exported.is_empty()
            && root.internal.is_empty()
            && root.formals.is_empty()
    }

    /// Open a child scope under `parent`.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "scope count is bounded by the token count, which fits in u32"
    )]
    pub fn add_child(&mut self, parent: ScopeId, name: &str, position: Position) -> ScopeId {
        let id = ScopeId(self.nodes.len() as u32);
        self.nodes
            .push(ScopeNode::new(name.to_string(), position, Some(parent)));
        self.node_mut(parent).children.push(id);
        id
    }

    // ─── Recording ───

    pub fn define(&mut self, scope: ScopeId, symbol: &str, position: Position) {
        insert_position(&mut self.node_mut(scope).defined, symbol, position);
    }

    pub fn reference(&mut self, scope: ScopeId, symbol: &str, position: Position) {
        insert_position(&mut self.node_mut(scope).referenced, symbol, position);
    }

    pub fn reference_nse(&mut self, scope: ScopeId, symbol: &str, position: Position) {
        insert_position(&mut self.node_mut(scope).nse_referenced, symbol, position);
    }

    pub fn add_exported(&mut self, scope: ScopeId, package: &str, symbol: &str) {
        self.node_mut(scope)
            .exported
            .entry(package.to_string())
            .or_default()
            .insert(symbol.to_string());
    }

    pub fn add_internal(&mut self, scope: ScopeId, package: &str, symbol: &str) {
        self.node_mut(scope)
            .internal
            .entry(package.to_string())
            .or_default()
            .insert(symbol.to_string());
    }

    pub fn add_formal(&mut self, scope: ScopeId, formal: Formal) {
        self.node_mut(scope).formals.push(formal);
    }

    /// Record that the function owning `scope` checks `missing(name)`.
    pub fn mark_missingness_handled(&mut self, scope: ScopeId, name: &str) {
        for id in self.ancestors(scope).collect::<Vec<_>>() {
            let node = self.node_mut(id);
            if let Some(formal) = node.formals.iter_mut().find(|f| f.name == name) {
                formal.missingness_handled = true;
                return;
            }
        }
    }

    // ─── Queries ───

    /// `scope` and its ancestors, innermost first.
    pub fn ancestors(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(scope), move |id| self.get(*id).parent)
    }

    /// Scope ids in depth-first pre-order, with their depth.
    pub fn walk(&self) -> Vec<(usize, ScopeId)> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(0usize, ScopeId::ROOT)];
        while let Some((depth, id)) = stack.pop() {
            order.push((depth, id));
            for child in self.get(id).children.iter().rev() {
                stack.push((depth + 1, *child));
            }
        }
        order
    }

    /// A reference at `position` in `scope` resolves against definitions in
    /// `scope` at or before `position`, or anywhere in an ancestor.
    pub fn is_defined(&self, scope: ScopeId, symbol: &str, position: Position) -> bool {
        let mut ancestors = self.ancestors(scope);
        ancestors
            .next()
            .is_some_and(|own| self.get(own).defines_at_or_before(symbol, position))
            || ancestors.any(|id| self.get(id).defines(symbol))
    }

    /// The function scope named `name` visible from `scope`, opened before
    /// `position`. The latest such definition wins.
    pub fn find_function(&self, scope: ScopeId, name: &str, position: Position) -> Option<ScopeId> {
        self.ancestors(scope).find_map(|id| {
            self.get(id)
                .children
                .iter()
                .copied()
                .filter(|child| {
                    let node = self.get(*child);
                    node.name == name && node.position < position
                })
                .max_by_key(|child| self.get(*child).position)
        })
    }
}

#[cfg(test)]
mod tests;
