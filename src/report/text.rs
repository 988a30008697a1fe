//! Boxed terminal report.

use crate::scoring::ScoreGrade;
use crate::types::metrics::humanize;
use crate::types::report::QualityReport;
use console::{measure_text_width, pad_str, style, Alignment, Term};
use std::io;

const TABLE_TITLE: &str = "Code Quality Metrics";

/// Renders reports onto one terminal handle. Construct it once in `main`
/// and pass it to whatever needs to print.
pub struct Reporter {
    term: Term,
    colors: bool,
}

impl Reporter {
    pub fn new(term: Term, colors: bool) -> Self {
        Self { term, colors }
    }

    /// Stdout reporter; colors only when stdout is a terminal.
    pub fn stdout(colors: bool) -> Self {
        let term = Term::stdout();
        let colors = colors && term.is_term();
        Self::new(term, colors)
    }

    pub fn print(&self, rendered: &str) -> io::Result<()> {
        self.term.write_str(rendered)?;
        self.term.flush()
    }

    pub fn render(&self, report: &QualityReport) -> String {
        let mut out = String::new();

        out.push_str(&panel(
            &[format!(
                "Target File: {}",
                style(&report.file).yellow().bold().force_styling(self.colors)
            )],
            None,
            Some(&format!("codeminitor v{}", env!("CARGO_PKG_VERSION"))),
        ));
        out.push_str(&self.metrics_table(report));

        let score_text = format!("{}/100", report.score);
        let score_text = match report.grade {
            ScoreGrade::Good => style(score_text).green(),
            ScoreGrade::Fair => style(score_text).yellow(),
            ScoreGrade::Poor => style(score_text).red(),
        }
        .bold()
        .force_styling(self.colors);
        out.push_str(&panel(&[format!("Final Score: {score_text}")], None, None));

        let stats = &report.history;
        let trends = [
            format!("Total Analyses: {}", stats.runs),
            format!("Lifetime Average: {:.2}", stats.average),
            format!("Personal Best: {}", stats.best),
        ];
        let trends_panel = panel(&trends, Some("Historical Trends"), None);
        out.push_str(&style(trends_panel).dim().force_styling(self.colors).to_string());
        out
    }

    fn metrics_table(&self, report: &QualityReport) -> String {
        let rows: Vec<(String, String)> = report
            .metrics
            .entries()
            .iter()
            .map(|(name, value)| (humanize(name), value.to_string()))
            .collect();

        let name_width = rows
            .iter()
            .map(|(name, _)| measure_text_width(name))
            .chain(std::iter::once("Metric".len()))
            .max()
            .unwrap_or(0);
        let value_width = rows
            .iter()
            .map(|(_, value)| measure_text_width(value))
            .chain(std::iter::once("Value".len()))
            .max()
            .unwrap_or(0);
        let total = name_width + value_width + 7;

        let mut out = String::new();
        let title = pad_str(TABLE_TITLE, total, Alignment::Center, None);
        out.push_str(&format!(
            "{}\n",
            style(title).cyan().bold().force_styling(self.colors)
        ));
        out.push_str(&format!(
            "┏{}┳{}┓\n",
            "━".repeat(name_width + 2),
            "━".repeat(value_width + 2)
        ));
        out.push_str(&format!(
            "┃ {} ┃ {} ┃\n",
            style(pad_str("Metric", name_width, Alignment::Left, None))
                .bold()
                .force_styling(self.colors),
            style(pad_str("Value", value_width, Alignment::Right, None))
                .bold()
                .force_styling(self.colors)
        ));
        out.push_str(&format!(
            "┡{}╇{}┩\n",
            "━".repeat(name_width + 2),
            "━".repeat(value_width + 2)
        ));
        for (name, value) in &rows {
            out.push_str(&format!(
                "│ {} │ {} │\n",
                pad_str(name, name_width, Alignment::Left, None),
                style(pad_str(value, value_width, Alignment::Right, None))
                    .green()
                    .force_styling(self.colors)
            ));
        }
        out.push_str(&format!(
            "└{}┴{}┘\n",
            "─".repeat(name_width + 2),
            "─".repeat(value_width + 2)
        ));
        out
    }
}

/// Rounded box around `lines`, sized to the widest of content, title and
/// subtitle.
fn panel(lines: &[String], title: Option<&str>, subtitle: Option<&str>) -> String {
    let label = |text: Option<&str>| text.map(|text| format!(" {text} "));
    let title = label(title);
    let subtitle = label(subtitle);

    let inner = lines
        .iter()
        .map(|line| measure_text_width(line))
        .chain(title.iter().map(|text| measure_text_width(text)))
        .chain(subtitle.iter().map(|text| measure_text_width(text)))
        .max()
        .unwrap_or(0)
        + 2;

    let border = |text: &Option<String>| match text {
        Some(text) => {
            let remaining = inner - measure_text_width(text);
            let left = remaining / 2;
            format!("{}{}{}", "─".repeat(left), text, "─".repeat(remaining - left))
        }
        None => "─".repeat(inner),
    };

    let mut out = format!("╭{}╮\n", border(&title));
    for line in lines {
        out.push_str(&format!(
            "│ {} │\n",
            pad_str(line, inner - 2, Alignment::Left, None)
        ));
    }
    out.push_str(&format!("╰{}╯\n", border(&subtitle)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring;
    use crate::types::metrics::MetricSet;
    use crate::types::report::Stats;

    fn sample_report(score: u8) -> QualityReport {
        QualityReport {
            file: "sample.py".to_string(),
            metrics: MetricSet {
                lines: 42,
                functions: 3,
                imports: 2,
                docstrings: 1,
                type_hints: 2,
                long_functions: 0,
            },
            score,
            grade: ScoreGrade::from_score(score),
            history: Stats {
                runs: 3,
                average: 256.0 / 3.0,
                best: 100,
            },
            generated_at: "2026-01-01T00:00:00+00:00".to_string(),
        }
    }

    fn plain() -> Reporter {
        Reporter::new(Term::stdout(), false)
    }

    #[test]
    fn report_contains_every_panel() {
        let rendered = plain().render(&sample_report(80));
        assert!(rendered.contains("Target File: sample.py"));
        assert!(rendered.contains("Code Quality Metrics"));
        assert!(rendered.contains("Final Score: 80/100"));
        assert!(rendered.contains("Historical Trends"));
        assert!(rendered.contains("Total Analyses: 3"));
        assert!(rendered.contains("Lifetime Average: 85.33"));
        assert!(rendered.contains("Personal Best: 100"));
    }

    #[test]
    fn metric_rows_are_humanized() {
        let rendered = plain().render(&sample_report(80));
        assert!(rendered.contains("│ Long functions │"));
        assert!(rendered.contains("│ Type hints     │"));
        assert!(!rendered.contains("long_functions"));
    }

    #[test]
    fn plain_output_has_no_escape_codes() {
        let rendered = plain().render(&sample_report(40));
        assert!(!rendered.contains('\u{1b}'));
    }

    fn score_segment(rendered: &str) -> &str {
        let start = rendered.find("Final Score: ").expect("score panel should render");
        let end = start + rendered[start..].find("/100").expect("score should render");
        &rendered[start..end]
    }

    #[test]
    fn score_color_follows_grade() {
        let colored = Reporter::new(Term::stdout(), true);
        let green = colored.render(&sample_report(scoring::BASE_SCORE as u8));
        assert!(score_segment(&green).contains("\u{1b}[32m"));

        let yellow = colored.render(&sample_report(60));
        assert!(score_segment(&yellow).contains("\u{1b}[33m"));

        let red = colored.render(&sample_report(59));
        assert!(score_segment(&red).contains("\u{1b}[31m"));
    }

    #[test]
    fn panel_lines_share_one_width() {
        let rendered = panel(
            &["short".to_string(), "a somewhat longer line".to_string()],
            Some("Title"),
            Some("sub"),
        );
        let widths: Vec<_> = rendered.lines().map(measure_text_width).collect();
        assert!(widths.windows(2).all(|pair| pair[0] == pair[1]), "{rendered}");
    }
}
