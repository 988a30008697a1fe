use crate::types::metrics::MetricSet;
use serde::Serialize;

pub const BASE_SCORE: i32 = 100;
pub const NO_FUNCTIONS_PENALTY: i32 = 30;
pub const RULE_PENALTY: i32 = 10;
pub const MAX_FILE_LINES: usize = 300;
pub const MAX_FUNCTION_LINES: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreGrade {
    Good,
    Fair,
    Poor,
}

impl ScoreGrade {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            ScoreGrade::Good
        } else if score >= 60 {
            ScoreGrade::Fair
        } else {
            ScoreGrade::Poor
        }
    }
}

/// Fixed penalty table. A file without functions skips the documentation
/// and annotation rules but still goes through the length rules.
pub fn score(metrics: &MetricSet) -> u8 {
    let mut score = BASE_SCORE;

    if metrics.functions == 0 {
        score -= NO_FUNCTIONS_PENALTY;
    } else {
        if metrics.docstrings < metrics.functions {
            score -= RULE_PENALTY;
        }
        if metrics.type_hints < metrics.functions {
            score -= RULE_PENALTY;
        }
    }

    if metrics.long_functions > 0 {
        score -= RULE_PENALTY;
    }
    if metrics.lines > MAX_FILE_LINES {
        score -= RULE_PENALTY;
    }

    score.clamp(0, BASE_SCORE) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(lines: usize, functions: usize, docstrings: usize, type_hints: usize) -> MetricSet {
        MetricSet {
            lines,
            functions,
            imports: 0,
            docstrings,
            type_hints,
            long_functions: 0,
        }
    }

    #[test]
    fn perfect_file_scores_full_marks() {
        assert_eq!(score(&metrics(50, 1, 1, 1)), 100);
    }

    #[test]
    fn no_functions_costs_thirty() {
        assert_eq!(score(&metrics(50, 0, 0, 0)), 70);
        assert_eq!(score(&metrics(0, 0, 0, 0)), 70);
    }

    #[test]
    fn no_functions_still_applies_length_rules() {
        assert_eq!(score(&metrics(301, 0, 0, 0)), 60);

        let mut unreachable_today = metrics(301, 0, 0, 0);
        unreachable_today.long_functions = 1;
        assert_eq!(score(&unreachable_today), 50);
    }

    #[test]
    fn every_rule_stacks() {
        let mut m = metrics(400, 1, 0, 0);
        m.long_functions = 1;
        assert_eq!(score(&m), 60);
    }

    #[test]
    fn partial_coverage_is_penalized_once_per_rule() {
        assert_eq!(score(&metrics(10, 4, 3, 4)), 90);
        assert_eq!(score(&metrics(10, 4, 3, 1)), 80);
    }

    #[test]
    fn file_length_threshold_is_exclusive() {
        assert_eq!(score(&metrics(300, 1, 1, 1)), 100);
        assert_eq!(score(&metrics(301, 1, 1, 1)), 90);
    }

    #[test]
    fn score_stays_in_range_and_is_deterministic() {
        for functions in 0..4 {
            for covered in 0..=functions {
                for long in 0..=functions {
                    for lines in [0, 300, 301, 10_000] {
                        let m = MetricSet {
                            lines,
                            functions,
                            imports: 7,
                            docstrings: covered,
                            type_hints: covered,
                            long_functions: long,
                        };
                        let first = score(&m);
                        assert!(first <= 100);
                        assert_eq!(first, score(&m));
                    }
                }
            }
        }
    }

    #[test]
    fn grades_follow_color_bands() {
        assert_eq!(ScoreGrade::from_score(100), ScoreGrade::Good);
        assert_eq!(ScoreGrade::from_score(80), ScoreGrade::Good);
        assert_eq!(ScoreGrade::from_score(79), ScoreGrade::Fair);
        assert_eq!(ScoreGrade::from_score(60), ScoreGrade::Fair);
        assert_eq!(ScoreGrade::from_score(59), ScoreGrade::Poor);
        assert_eq!(ScoreGrade::from_score(0), ScoreGrade::Poor);
    }
}
