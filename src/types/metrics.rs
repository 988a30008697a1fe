use serde::Serialize;

/// Structural counts extracted from one analyzed file.
///
/// `docstrings`, `type_hints` and `long_functions` are each counted over the
/// same function list, so none of them can exceed `functions`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricSet {
    pub lines: usize,
    pub functions: usize,
    pub imports: usize,
    pub docstrings: usize,
    pub type_hints: usize,
    pub long_functions: usize,
}

impl MetricSet {
    /// Field name and value pairs in declaration order.
    pub fn entries(&self) -> [(&'static str, usize); 6] {
        [
            ("lines", self.lines),
            ("functions", self.functions),
            ("imports", self.imports),
            ("docstrings", self.docstrings),
            ("type_hints", self.type_hints),
            ("long_functions", self.long_functions),
        ]
    }
}

/// `long_functions` -> `Long functions`
pub fn humanize(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
