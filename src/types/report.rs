use crate::scoring::ScoreGrade;
use crate::types::metrics::MetricSet;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stats {
    pub runs: usize,
    pub average: f64,
    pub best: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    pub file: String,
    pub metrics: MetricSet,
    pub score: u8,
    pub grade: ScoreGrade,
    pub history: Stats,
    pub generated_at: String,
}
