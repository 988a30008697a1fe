use crate::error::{QualityError, Result};
use serde::Deserialize;

pub const DEFAULT_HISTORY_FILE: &str = "history.json";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QualityConfig {
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_history_file")]
    pub file: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            file: default_history_file(),
        }
    }
}

fn default_history_file() -> String {
    DEFAULT_HISTORY_FILE.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

fn default_color() -> bool {
    true
}

impl QualityConfig {
    pub fn validate(&self) -> Result<()> {
        if self.history.file.trim().is_empty() {
            return Err(QualityError::ConfigParse(
                "history.file must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
