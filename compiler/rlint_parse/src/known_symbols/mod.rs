//! Names that resolve without a definition in the document.
//!
//! A best-effort table of the base, stats and utils symbols people use
//! most, plus the language's constants and keywords. Unresolved references
//! to these are never reported.

use std::sync::OnceLock;

use rustc_hash::FxHashSet;

const KEYWORDS: &[&str] = &[
    "if", "else", "repeat", "while", "function", "for", "in", "next", "break", "TRUE", "FALSE",
    "NULL", "Inf", "NaN", "NA", "NA_integer_", "NA_real_", "NA_character_", "NA_complex_",
    "T", "F", "...", "..1", "..2", "..3", "..4", "..5",
];

const BASE_SYMBOLS: &[&str] = &[
    // base
    "abs", "all", "all.equal", "any", "anyNA", "aperm", "append", "apply", "Arg", "array",
    "as.character", "as.complex", "as.data.frame", "as.Date", "as.double", "as.environment",
    "as.factor", "as.function", "as.integer", "as.list", "as.logical", "as.matrix",
    "as.name", "as.numeric", "as.POSIXct", "as.symbol", "as.vector", "asNamespace",
    "attr", "attributes", "basename", "bitwAnd", "bitwOr", "body", "bquote", "browser",
    "c", "call", "casefold", "cat", "cbind", "ceiling", "character", "charmatch",
    "chartr", "class", "colMeans", "colnames", "colSums", "complete.cases", "complex",
    "Conj", "cos", "crossprod", "cummax", "cummin", "cumprod", "cumsum", "cut",
    "data.frame", "date", "deparse", "det", "diag", "diff", "difftime", "dim",
    "dimnames", "dir.create", "dirname", "do.call", "double", "dQuote", "droplevels",
    "duplicated", "emptyenv", "endsWith", "environment", "environmentName", "eval",
    "evalq", "exists", "exp", "expand.grid", "expression", "factor", "file",
    "file.exists", "file.path", "Filter", "Find", "floor", "for", "format",
    "formatC", "function", "gamma", "get", "get0", "getElement", "getOption",
    "gettextf", "globalenv", "gregexpr", "grepl", "grep", "gsub", "identical",
    "identity", "ifelse", "integer", "interaction", "intersect", "invisible",
    "is.character", "is.data.frame", "is.element", "is.environment", "is.factor",
    "is.finite", "is.function", "is.infinite", "is.list", "is.logical", "is.matrix",
    "is.na", "is.nan", "is.null", "is.numeric", "is.vector", "isTRUE", "isFALSE",
    "jitter", "julian", "lapply", "length", "letters", "LETTERS", "levels", "library",
    "list", "list.files", "local", "log", "log10", "log1p", "log2", "logical",
    "lower.tri", "ls", "make.names", "make.unique", "Map", "mapply", "match",
    "match.arg", "match.call", "match.fun", "max", "mean", "merge", "message",
    "methods", "min", "missing", "Mod", "mode", "month.abb", "month.name", "names",
    "nargs", "nchar", "ncol", "NCOL", "Negate", "new.env", "NextMethod", "ngettext",
    "nlevels", "noquote", "norm", "nrow", "NROW", "numeric", "on.exit", "options",
    "order", "outer", "packageVersion", "paste", "paste0", "pi", "pmatch", "pmax",
    "pmin", "Position", "pretty", "prettyNum", "print", "prod", "prop.table",
    "quantile", "quit", "quote", "range", "rank", "rapply", "Re", "read.csv",
    "readline", "readLines", "readRDS", "Recall", "Reduce", "regexpr", "regmatches",
    "rep", "rep_len", "replace", "require", "requireNamespace", "return", "rev",
    "rm", "RNGkind", "round", "row.names", "rownames", "rowMeans", "rowsum",
    "rowSums", "sample", "sapply", "saveRDS", "scale", "seq", "seq_along", "seq_len",
    "sequence", "setdiff", "setNames", "shQuote", "sign", "signif", "sin", "sort",
    "source", "split", "sprintf", "sqrt", "sQuote", "stop", "stopifnot",
    "storage.mode", "strsplit", "strtoi", "structure", "sub", "subset", "substr",
    "substring", "sum", "suppressMessages", "suppressWarnings", "svd", "switch",
    "Sys.Date", "Sys.getenv", "Sys.setenv", "Sys.time", "system", "system.file",
    "t", "table", "tabulate", "tail", "tan", "tapply", "tempfile", "tolower",
    "toupper", "tracemem", "transform", "trimws", "trunc", "try", "tryCatch",
    "typeof", "union", "unique", "unlist", "unname", "unsplit", "upper.tri",
    "UseMethod", "utf8ToInt", "vapply", "vector", "Vectorize", "warning", "which",
    "which.max", "which.min", "while", "with", "within", "write", "xor", "zapsmall",
    // stats
    "aggregate", "anova", "coef", "cor", "dbinom", "density", "dnorm", "fitted",
    "glm", "lm", "median", "model.matrix", "na.omit", "optim", "optimize", "pbinom",
    "pnorm", "predict", "qnorm", "rbinom", "residuals", "rnorm", "rpois", "runif",
    "sd", "t.test", "update", "var", "weighted.mean",
    // utils
    "capture.output", "combn", "head", "installed.packages", "modifyList",
    "object.size", "read.table", "str", "write.csv", "write.table",
    // methods
    "new", "setClass", "setGeneric", "setMethod", "setRefClass", "setValidity",
    "show", "slot", "validObject", "is",
];

static KNOWN_SYMBOLS: OnceLock<FxHashSet<&'static str>> = OnceLock::new();

fn known_symbols() -> &'static FxHashSet<&'static str> {
    KNOWN_SYMBOLS.get_or_init(|| KEYWORDS.iter().chain(BASE_SYMBOLS).copied().collect())
}

/// Operator-like names such as `+`, `[<-` or `%in%`, usually seen in
/// backticks.
fn is_operator_name(name: &str) -> bool {
    let infix = name.len() >= 2 && name.starts_with('%') && name.ends_with('%');
    infix || (!name.is_empty() && name.chars().all(|c| c.is_ascii_punctuation()))
}

/// Whether `name` resolves without a definition in the document.
pub fn is_known_symbol(name: &str) -> bool {
    known_symbols().contains(name) || is_operator_name(name)
}
