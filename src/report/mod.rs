pub mod json;
pub mod text;

use crate::error::{QualityError, Result};
use crate::types::report::QualityReport;
use text::Reporter;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn render(report: &QualityReport, format: OutputFormat, reporter: &Reporter) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(reporter.render(report)),
        OutputFormat::Json => json::to_json(report)
            .map(|json| format!("{json}\n"))
            .map_err(QualityError::Json),
    }
}
