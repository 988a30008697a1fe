mod docstring;
pub mod syntax;

use crate::error::{QualityError, Result};
use crate::scoring::MAX_FUNCTION_LINES;
use crate::types::metrics::MetricSet;
use std::path::Path;
use tracing::debug;

pub fn analyze_file(path: &Path) -> Result<MetricSet> {
    let bytes = std::fs::read(path)?;
    let source = String::from_utf8(bytes).map_err(|e| {
        QualityError::Parse(format!(
            "{} is not valid UTF-8 (byte offset {})",
            path.display(),
            e.utf8_error().valid_up_to()
        ))
    })?;
    debug!(path = %path.display(), bytes = source.len(), "read source file");
    extract_metrics(&source)
}

pub fn extract_metrics(source: &str) -> Result<MetricSet> {
    let code = source.strip_prefix('\u{feff}').unwrap_or(source);
    let tree = syntax::parse(code)?;
    let summary = syntax::summarize(&tree, code.as_bytes());
    let functions = &summary.functions;

    let metrics = MetricSet {
        lines: source.lines().count(),
        functions: functions.len(),
        imports: summary.imports,
        docstrings: functions.iter().filter(|f| f.has_docstring).count(),
        type_hints: functions.iter().filter(|f| f.has_type_hints).count(),
        long_functions: functions
            .iter()
            .filter(|f| f.span() > MAX_FUNCTION_LINES)
            .count(),
    };
    debug!(?metrics, "extracted metrics");
    Ok(metrics)
}
