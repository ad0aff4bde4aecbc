use super::*;
use crate::LintKind;
use pretty_assertions::assert_eq;
use rlint_lexer::Position;

fn sample_lint() -> LintItem {
    LintItem::new(
        Position::new(2, 4),
        Position::new(2, 9),
        LintKind::Warning,
        "no symbol named 'Value' in scope; did you mean 'value'?",
    )
}

#[test]
fn test_json_emitter() {
    let mut output = Vec::new();
    let mut emitter = JsonEmitter::new(&mut output);

    emitter.begin();
    emitter.emit("a.R", &sample_lint());
    emitter.end();
    emitter.flush();

    let text = String::from_utf8(output).unwrap();
    assert_eq!(
        text,
        concat!(
            "[\n",
            "  {\n",
            "    \"file\": \"a.R\",\n",
            "    \"start.row\": 2,\n",
            "    \"start.column\": 4,\n",
            "    \"end.row\": 2,\n",
            "    \"end.column\": 9,\n",
            "    \"type\": \"warning\",\n",
            "    \"text\": \"no symbol named 'Value' in scope; did you mean 'value'?\",\n",
            "    \"raw\": \"no symbol named 'Value' in scope; did you mean 'value'?\"\n",
            "  }\n",
            "]\n",
        )
    );
}

#[test]
fn test_json_emitter_multiple() {
    let mut output = Vec::new();
    let mut emitter = JsonEmitter::new(&mut output);

    let error = LintItem::new(
        Position::new(0, 0),
        Position::new(0, 1),
        LintKind::Error,
        "unexpected token ']'",
    );

    emitter.begin();
    emitter.emit_all("dir\\b.R", &[sample_lint(), error]);
    emitter.end();
    emitter.flush();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("  },\n  {"));
    assert!(text.contains("\"type\": \"error\""));
    assert!(text.contains("\"file\": \"dir\\\\b.R\""));
    assert_eq!(text.matches("\"raw\"").count(), 2);
}

#[test]
fn test_json_emitter_empty() {
    let mut output = Vec::new();
    let mut emitter = JsonEmitter::new(&mut output);
    emitter.begin();
    emitter.end();
    emitter.emit_summary(3, 1);

    assert_eq!(String::from_utf8(output).unwrap(), "[\n\n]\n");
}
