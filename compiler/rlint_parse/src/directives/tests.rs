use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_no_directives() {
    let directives = Directives::parse("x <- 1\n# just a comment\n");
    assert_eq!(directives, Directives::default());
}

#[test]
fn test_off_stops_scanning() {
    let directives = Directives::parse("## !diagnostics off\n# !diagnostics suppress=a\n");
    assert!(directives.off);
    assert!(directives.suppressed.is_empty());
}

#[test]
fn test_marker_needs_leading_hash_and_space() {
    assert!(!Directives::parse("#!diagnostics off").off);
    assert!(!Directives::parse("  # !diagnostics off").off);
    assert!(!Directives::parse("x # !diagnostics off").off);
    assert!(Directives::parse("x <- 1\n#\t!diagnostics off  ").off);
}

#[test]
fn test_suppress_adds_globals() {
    let directives = Directives::parse("# !diagnostics suppress = input, output ,\n");
    let expected: BTreeSet<String> = ["input", "output"].iter().map(|s| (*s).to_string()).collect();
    assert_eq!(directives.suppressed, expected);

    let options = directives.apply(&ParseOptions::default());
    assert!(options.is_global("input"));
    assert!(options.is_global("output"));
}

#[test]
fn test_settings_are_collected_in_order() {
    let directives = Directives::parse("# !diagnostics style=yes, level=all\n# !diagnostics style=F");
    assert_eq!(
        directives.settings,
        vec![
            ("style".to_string(), "yes".to_string()),
            ("level".to_string(), "all".to_string()),
            ("style".to_string(), "F".to_string()),
        ]
    );
}

#[test]
fn test_style_toggle() {
    let on = Directives::parse("# !diagnostics style=true").apply(&ParseOptions::core());
    assert!(on.has(LintFlags::RECORD_STYLE));

    let off = Directives::parse("# !diagnostics style=no").apply(&ParseOptions::all());
    assert!(!off.has(LintFlags::RECORD_STYLE));
    assert!(off.has(LintFlags::WARN_UNUSED));
}

#[test]
fn test_level_presets() {
    let syntax = Directives::parse("# !diagnostics level=syntax").apply(&ParseOptions::core());
    assert_eq!(syntax.flags, LintFlags::empty());

    let core = Directives::parse("# !diagnostics level=core")
        .apply(&ParseOptions::syntax_only().with_style(true));
    assert_eq!(
        core.flags,
        ParseOptions::core().flags | LintFlags::RECORD_STYLE
    );

    let all = Directives::parse("# !diagnostics level=all").apply(&ParseOptions::syntax_only());
    assert_eq!(all.flags, LintFlags::all());
}

#[test]
fn test_unknown_settings_are_ignored() {
    let options = Directives::parse("# !diagnostics level=extreme, colour=blue")
        .apply(&ParseOptions::core());
    assert_eq!(options, ParseOptions::core());
}
