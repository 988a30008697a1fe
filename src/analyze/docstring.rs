//! Docstring detection on a function body.

use tree_sitter::Node;

/// True when the first statement of `function`'s body is a non-blank plain
/// string literal, optionally parenthesized or implicitly concatenated.
pub fn has_docstring(function: Node<'_>, source: &[u8]) -> bool {
    let Some(body) = function.child_by_field_name("body") else {
        return false;
    };
    let Some(statement) = first_code_child(body) else {
        return false;
    };
    if statement.kind() != "expression_statement" || statement.named_child_count() != 1 {
        return false;
    }
    let Some(mut expression) = statement.named_child(0) else {
        return false;
    };
    while expression.kind() == "parenthesized_expression" {
        match first_code_child(expression) {
            Some(inner) => expression = inner,
            None => return false,
        }
    }

    let value = match expression.kind() {
        "string" => string_value(expression, source),
        "concatenated_string" => {
            let mut cursor = expression.walk();
            let parts = expression
                .named_children(&mut cursor)
                .filter(|part| part.kind() != "comment")
                .map(|part| {
                    if part.kind() == "string" {
                        string_value(part, source)
                    } else {
                        None
                    }
                })
                .collect::<Option<Vec<_>>>();
            parts.map(|parts| parts.concat())
        }
        _ => None,
    };

    value.is_some_and(|value| !is_blank(&value))
}

fn first_code_child(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let first = node
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment");
    first
}

/// Whitespace as Python's `str.strip` sees it.
fn is_blank(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c))
}

/// Runtime value of a string literal, or `None` for f-strings and bytes.
fn string_value(string: Node<'_>, source: &[u8]) -> Option<String> {
    let mut cursor = string.walk();
    let mut raw = false;
    let mut value = String::new();
    for child in string.children(&mut cursor) {
        match child.kind() {
            "string_start" => {
                let opener = child.utf8_text(source).ok()?;
                let prefix = opener.trim_end_matches(['"', '\'']);
                if prefix.contains(['f', 'F', 'b', 'B', 't', 'T']) {
                    return None;
                }
                raw = prefix.contains(['r', 'R']);
            }
            "string_content" => {
                let text = child.utf8_text(source).ok()?;
                if raw {
                    value.push_str(text);
                } else {
                    value.push_str(&unescape(text));
                }
            }
            "interpolation" => return None,
            _ => {}
        }
    }
    Some(value)
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escaped) = chars.next() else {
            out.push('\\');
            break;
        };
        match escaped {
            // line continuation
            '\n' => {}
            '\r' => {
                chars.next_if_eq(&'\n');
            }
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'f' => out.push('\u{0c}'),
            'v' => out.push('\u{0b}'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            '\\' | '\'' | '"' => out.push(escaped),
            '0'..='7' => {
                let mut digits = escaped.to_string();
                while digits.len() < 3 {
                    match chars.next_if(|next| ('0'..='7').contains(next)) {
                        Some(next) => digits.push(next),
                        None => break,
                    }
                }
                out.push(code_point(&digits, 8));
            }
            'x' | 'u' | 'U' => {
                let width = match escaped {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let digits: String = (0..width)
                    .map_while(|_| chars.next_if(char::is_ascii_hexdigit))
                    .collect();
                out.push(code_point(&digits, 16));
            }
            'N' => {
                // \N{NAME}: the name is not resolved, only its presence matters
                if chars.next_if_eq(&'{').is_some() {
                    for next in chars.by_ref() {
                        if next == '}' {
                            break;
                        }
                    }
                }
                out.push(char::REPLACEMENT_CHARACTER);
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    out
}

fn code_point(digits: &str, radix: u32) -> char {
    u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::syntax;

    fn docstring_flags(source: &str) -> Vec<bool> {
        let tree = syntax::parse(source).expect("source should parse");
        syntax::summarize(&tree, source.as_bytes())
            .functions
            .iter()
            .map(|function| function.has_docstring)
            .collect()
    }

    #[test]
    fn docstring_must_be_first_statement() {
        let source = r#"
def documented():
    # leading comment is not a statement
    """Says hello."""
    return "hi"

def late():
    x = 1
    """not a docstring"""

def formatted():
    f"""{x} is interpolated"""

def blank():
    """   """

def concatenated():
    "part one " "part two"
"#;
        assert_eq!(docstring_flags(source), [true, false, false, false, true]);
    }

    #[test]
    fn parenthesized_literal_counts() {
        let source = "def f():\n    (\"wrapped doc\")\n\ndef g():\n    ((\"a \" \"b\"))\n\ndef h():\n    (\"not\", \"doc\")\n";
        assert_eq!(docstring_flags(source), [true, true, false]);
    }

    #[test]
    fn blankness_uses_the_unescaped_value() {
        let source = r#"
def newline_only():
    """\n"""

def tabs_and_feeds():
    "\t\x0b\u000c"

def escaped_letter():
    """\x41"""

def raw_backslash():
    r"""\n"""
"#;
        assert_eq!(docstring_flags(source), [false, false, true, true]);
    }

    #[test]
    fn bytes_literal_is_not_a_docstring() {
        assert_eq!(docstring_flags("def f():\n    b\"bytes\"\n"), [false]);
    }

    #[test]
    fn unescape_handles_common_forms() {
        assert_eq!(unescape(r"a\nb"), "a\nb");
        assert_eq!(unescape(r"\x41B\U00000043"), "ABC");
        assert_eq!(unescape(r"\101\0"), "A\0");
        assert_eq!(unescape("line\\\ncontinued"), "linecontinued");
        assert_eq!(unescape(r"\q"), r"\q");
        assert_eq!(unescape(r"\N{BULLET}"), "\u{fffd}");
    }
}
