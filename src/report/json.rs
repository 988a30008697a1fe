use crate::types::report::QualityReport;

pub fn to_json(report: &QualityReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
