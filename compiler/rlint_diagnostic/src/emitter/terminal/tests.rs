use super::*;
use pretty_assertions::assert_eq;
use rlint_lexer::Position;

fn sample_lint() -> LintItem {
    LintItem::new(
        Position::new(0, 12),
        Position::new(0, 13),
        LintKind::Info,
        "'z' is defined after it is used",
    )
}

fn render(mode: ColorMode, f: impl FnOnce(&mut TerminalEmitter<&mut Vec<u8>>)) -> String {
    let mut output = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut output, mode, false);
    f(&mut emitter);
    emitter.flush();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_terminal_emitter_no_color() {
    let text = render(ColorMode::Never, |emitter| {
        emitter.emit("src/a.R", &sample_lint());
    });
    assert_eq!(text, "src/a.R:1:13: info: 'z' is defined after it is used\n");
}

#[test]
fn test_terminal_emitter_with_color() {
    let text = render(ColorMode::Always, |emitter| {
        emitter.emit("a.R", &sample_lint());
    });
    assert!(text.contains(colors::BOLD));
    assert!(text.contains(colors::INFO));
    assert!(text.contains(colors::RESET));
    assert!(text.contains("is defined after it is used"));
}

#[test]
fn test_auto_mode_follows_tty() {
    let text = render(ColorMode::Auto, |emitter| {
        emitter.emit("a.R", &sample_lint());
    });
    assert!(!text.contains('\x1b'));
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Never.should_use_colors(true));
}

#[test]
fn test_color_mode_parse() {
    assert_eq!(ColorMode::parse("always"), Some(ColorMode::Always));
    assert_eq!(ColorMode::parse("never"), Some(ColorMode::Never));
    assert_eq!(ColorMode::parse("auto"), Some(ColorMode::Auto));
    assert_eq!(ColorMode::parse("sometimes"), None);
}

// Summary

#[test]
fn test_summary_errors_and_warnings() {
    let text = render(ColorMode::Never, |emitter| emitter.emit_summary(2, 1));
    assert_eq!(text, "error: 2 errors and 1 warning emitted\n");
}

#[test]
fn test_summary_single_error() {
    let text = render(ColorMode::Never, |emitter| emitter.emit_summary(1, 0));
    assert_eq!(text, "error: 1 error emitted\n");
}

#[test]
fn test_summary_warnings_only() {
    let text = render(ColorMode::Never, |emitter| emitter.emit_summary(0, 3));
    assert_eq!(text, "warning: 3 warnings emitted\n");
}

#[test]
fn test_summary_clean() {
    let text = render(ColorMode::Never, |emitter| emitter.emit_summary(0, 0));
    assert_eq!(text, "");
}
