//! Debug commands: `lex` and `parse` for inspecting analysis internals.

use std::fmt::Write;
use std::path::Path;

use rlint_lexer::{tokenize, AnnotatedTokens};
use rlint_parse::{parse, ParseOptions, ParseResults, SymbolPositions};

use super::read_file;
use crate::CliError;

/// Lex a file and display the token stream.
pub fn lex_file(path: &Path) -> Result<(), CliError> {
    let source = read_file(path)?;
    print!("{}", render_tokens(&source));
    Ok(())
}

/// Parse a file and display its scope tree and structural lint.
pub fn parse_file(path: &Path, options: &ParseOptions) -> Result<(), CliError> {
    let source = read_file(path)?;
    let results = parse(&source, options);

    println!("Parse result for '{}':", path.display());
    print!("{}", render_scopes(&results));

    if !results.lint().is_empty() {
        println!();
        println!("Lint:");
        for item in results.lint().iter() {
            println!(
                "  {}:{}: {}: {}",
                item.start_row + 1,
                item.start_column + 1,
                item.kind.as_str(),
                item.message
            );
        }
    }
    Ok(())
}

/// One line per token: kind, one-based `row:column`, quoted text.
pub(crate) fn render_tokens(source: &str) -> String {
    let tokens = AnnotatedTokens::new(&tokenize(source));
    let mut out = String::new();
    let _ = writeln!(out, "Tokens ({}):", tokens.len());
    for token in tokens.iter() {
        let location = format!("{}:{}", token.row() + 1, token.column() + 1);
        let _ = writeln!(
            out,
            "  {:<10} {:<8} {:?}",
            token.kind.name(),
            location,
            token.text
        );
    }
    out
}

/// The scope tree, one indented block per scope.
pub(crate) fn render_scopes(results: &ParseResults) -> String {
    let tree = results.tree();
    let mut out = String::new();
    for (depth, id) in tree.walk() {
        let node = tree.get(id);
        let indent = "  ".repeat(depth + 1);
        let position = node.position();
        let _ = writeln!(
            out,
            "{indent}{} @ {}:{}",
            node.name(),
            position.row + 1,
            position.column + 1
        );

        if !node.formals().is_empty() {
            let formals: Vec<String> = node
                .formals()
                .iter()
                .map(|formal| {
                    if formal.has_default {
                        format!("{} =", formal.name)
                    } else {
                        formal.name.clone()
                    }
                })
                .collect();
            let _ = writeln!(out, "{indent}  formals: {}", formals.join(", "));
        }
        write_symbols(&mut out, &indent, "defines", node.defined_symbols());
        write_symbols(&mut out, &indent, "references", node.referenced_symbols());
        write_symbols(&mut out, &indent, "nse", node.nse_referenced_symbols());

        for (label, packages) in [
            ("::", node.exported_symbols()),
            (":::", node.internal_symbols()),
        ] {
            for (package, symbols) in packages {
                for symbol in symbols {
                    let _ = writeln!(out, "{indent}  uses: {package}{label}{symbol}");
                }
            }
        }
    }
    out
}

fn write_symbols(out: &mut String, indent: &str, label: &str, symbols: &SymbolPositions) {
    if symbols.is_empty() {
        return;
    }
    let names: Vec<&str> = symbols.keys().map(String::as_str).collect();
    let _ = writeln!(out, "{indent}  {label}: {}", names.join(", "));
}
