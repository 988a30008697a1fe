use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "codeminitor",
    version,
    about = "Python source quality checker with score history"
)]
pub struct Cli {
    /// Python file to analyze
    pub path: PathBuf,

    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_log_filter() {
        let cli = Cli::try_parse_from(["codeminitor", "a.py"]).expect("cli should parse");
        assert_eq!(cli.log_filter(), "warn");

        let cli = Cli::try_parse_from(["codeminitor", "-vv", "a.py"]).expect("cli should parse");
        assert_eq!(cli.log_filter(), "debug");

        let cli = Cli::try_parse_from(["codeminitor", "-q", "a.py"]).expect("cli should parse");
        assert_eq!(cli.log_filter(), "error");
    }

    #[test]
    fn rejects_extra_positional_arguments() {
        assert!(Cli::try_parse_from(["codeminitor", "a.py", "b.py"]).is_err());
        assert!(Cli::try_parse_from(["codeminitor"]).is_err());
    }
}
