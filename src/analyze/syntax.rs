//! Tree-sitter queries over the Python grammar.
//!
//! The walk collects one [`FunctionShape`] per plain `def` anywhere in the
//! tree and counts import statements along the way.

use crate::analyze::docstring::has_docstring;
use crate::error::{QualityError, Result};
use std::collections::BTreeMap;
use tree_sitter::{Node, Parser, Tree};

const IMPORT_KINDS: [&str; 3] = [
    "import_statement",
    "import_from_statement",
    "future_import_statement",
];

/// Python 2 statements the grammar still accepts.
const LEGACY_KINDS: [(&str, &str); 2] = [("print_statement", "print"), ("exec_statement", "exec")];

/// Nodes whose last code child is a nested suite or clause.
const SUITE_KINDS: [&str; 16] = [
    "block",
    "function_definition",
    "class_definition",
    "decorated_definition",
    "if_statement",
    "elif_clause",
    "else_clause",
    "for_statement",
    "while_statement",
    "try_statement",
    "except_clause",
    "except_group_clause",
    "finally_clause",
    "with_statement",
    "match_statement",
    "case_clause",
];

const TAB_SIZE: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionShape {
    /// 1-based line of the `def` keyword.
    pub start_line: usize,
    /// 1-based line of the last body statement.
    pub end_line: usize,
    pub has_docstring: bool,
    pub has_type_hints: bool,
}

impl FunctionShape {
    pub fn span(&self) -> usize {
        self.end_line - self.start_line
    }
}

#[derive(Debug, Clone, Default)]
pub struct SyntaxSummary {
    pub functions: Vec<FunctionShape>,
    pub imports: usize,
}

pub fn parse(source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| QualityError::Grammar(e.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| QualityError::Parse("parser produced no tree".to_string()))?;
    let root = tree.root_node();

    if let Some(node) = first_error(root) {
        let what = if node.is_missing() {
            format!("missing `{}`", node.kind())
        } else {
            "invalid syntax".to_string()
        };
        return Err(parse_error(&what, node));
    }
    if let Some((node, keyword)) = first_legacy_statement(root) {
        return Err(parse_error(
            &format!("missing parentheses in call to '{keyword}'"),
            node,
        ));
    }
    check_indentation(root, source.as_bytes())?;
    Ok(tree)
}

fn parse_error(what: &str, node: Node<'_>) -> QualityError {
    let position = node.start_position();
    QualityError::Parse(format!(
        "{what} at line {}, column {}",
        position.row + 1,
        position.column + 1
    ))
}

/// Earliest ERROR or MISSING node, descending only into subtrees that
/// report an error.
fn first_error(root: Node<'_>) -> Option<Node<'_>> {
    if !root.has_error() {
        return None;
    }
    let mut found: Option<Node<'_>> = None;
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            if found.map_or(true, |best| node.start_byte() < best.start_byte()) {
                found = Some(node);
            }
            continue;
        }
        let mut cursor = node.walk();
        stack.extend(node.children(&mut cursor).filter(|child| child.has_error()));
    }
    found
}

fn first_legacy_statement(root: Node<'_>) -> Option<(Node<'_>, &'static str)> {
    let mut found: Option<(Node<'_>, &'static str)> = None;
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if let Some(&(_, keyword)) = LEGACY_KINDS.iter().find(|(kind, _)| *kind == node.kind()) {
            if found.map_or(true, |(best, _)| node.start_byte() < best.start_byte()) {
                found = Some((node, keyword));
            }
        }
        let mut cursor = node.walk();
        stack.extend(node.named_children(&mut cursor));
    }
    found
}

/// Rejects indentation whose meaning depends on the tab width, comparing
/// each statement line at tab size 8 and tab size 1 the way CPython's
/// tokenizer does.
fn check_indentation(root: Node<'_>, source: &[u8]) -> Result<()> {
    // row -> byte offset of the line start
    let mut lines = BTreeMap::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if matches!(node.kind(), "module" | "block") && child.kind() != "comment" {
                let position = child.start_position();
                lines.insert(position.row, child.start_byte() - position.column);
            }
            stack.push(child);
        }
    }

    let mut levels = vec![(0usize, 0usize)];
    for (row, line_start) in lines {
        let (column, alt_column) = indent_width(&source[line_start..]);
        let (top, alt_top) = levels.last().copied().unwrap_or((0, 0));
        let consistent = if column > top {
            levels.push((column, alt_column));
            alt_column > alt_top
        } else {
            while levels.len() > 1 && levels.last().is_some_and(|&(level, _)| column < level) {
                levels.pop();
            }
            levels
                .last()
                .map_or(true, |&(level, alt_level)| level != column || alt_level == alt_column)
        };
        if !consistent {
            return Err(QualityError::Parse(format!(
                "inconsistent use of tabs and spaces in indentation at line {}",
                row + 1
            )));
        }
    }
    Ok(())
}

/// Indent width at tab size 8 and at tab size 1.
fn indent_width(line: &[u8]) -> (usize, usize) {
    let (mut column, mut alt_column) = (0, 0);
    for &byte in line {
        match byte {
            b' ' => {
                column += 1;
                alt_column += 1;
            }
            b'\t' => {
                column = (column / TAB_SIZE + 1) * TAB_SIZE;
                alt_column += 1;
            }
            // form feed resets the count
            b'\x0c' => {
                column = 0;
                alt_column = 0;
            }
            _ => break,
        }
    }
    (column, alt_column)
}

pub fn summarize(tree: &Tree, source: &[u8]) -> SyntaxSummary {
    let mut summary = SyntaxSummary::default();
    let mut stack = vec![tree.root_node()];

    while let Some(node) = stack.pop() {
        let kind = node.kind();
        if IMPORT_KINDS.contains(&kind) {
            summary.imports += 1;
        } else if kind == "function_definition" && !is_async(node) {
            summary.functions.push(function_shape(node, source));
        }

        let mut cursor = node.walk();
        stack.extend(node.named_children(&mut cursor));
    }

    summary.functions.sort_by_key(|function| function.start_line);
    summary
}

fn is_async(function: Node<'_>) -> bool {
    function
        .child(0)
        .is_some_and(|first| first.kind() == "async")
}

fn function_shape(function: Node<'_>, source: &[u8]) -> FunctionShape {
    FunctionShape {
        start_line: function.start_position().row + 1,
        end_line: last_statement_row(function) + 1,
        has_docstring: has_docstring(function, source),
        has_type_hints: has_type_hints(function),
    }
}

/// Row of the last statement under `node`. Blocks absorb trailing comments,
/// so suites are followed down through their last non-comment child.
fn last_statement_row(node: Node<'_>) -> usize {
    let mut node = node;
    while SUITE_KINDS.contains(&node.kind()) {
        let mut cursor = node.walk();
        let last = node
            .named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .last();
        match last {
            Some(child) => node = child,
            None => break,
        }
    }

    let start = node.start_position();
    let end = node.end_position();
    // a node ending at column 0 stops on the newline of the previous line
    if end.column == 0 && end.row > start.row {
        end.row - 1
    } else {
        end.row
    }
}

fn has_type_hints(function: Node<'_>) -> bool {
    if function.child_by_field_name("return_type").is_some() {
        return true;
    }
    let Some(parameters) = function.child_by_field_name("parameters") else {
        return false;
    };
    let mut cursor = parameters.walk();
    let annotated = parameters.named_children(&mut cursor).any(|parameter| {
        matches!(
            parameter.kind(),
            "typed_parameter" | "typed_default_parameter"
        )
    });
    annotated
}
