//! Text helpers shared by the language emitters.

/// Make free text safe to embed inside a `/* ... */` comment.
///
/// Model text (descriptions, copyright) is typed by users and may contain
/// a comment terminator; it is broken up so the generated file still
/// parses.
pub fn escape_comment(text: &str) -> String {
    text.replace("*/", "* /").replace("/*", "/ *")
}

/// Prefix every non-empty line of `text` with `indent`.
///
/// Empty lines stay empty so emitted files carry no trailing whitespace.
pub fn indent_lines(text: &str, indent: &str) -> String {
    let mut out = String::with_capacity(text.len() + indent.len() * 4);
    for line in text.split_inclusive('\n') {
        if line.trim().is_empty() {
            out.push_str(line.trim_start_matches([' ', '\t']));
        } else {
            out.push_str(indent);
            out.push_str(line);
        }
    }
    out
}

/// Render `text` as a double-quoted string literal.
///
/// The escaping (`\\`, `\"`, `\n`, `\t`) is valid in C++, Java and
/// Python alike.
pub fn string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
