use thiserror::Error;

#[derive(Error, Debug)]
pub enum QualityError {
    #[error("invalid Python file: {0}")]
    InvalidSourceFile(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("grammar setup failed: {0}")]
    Grammar(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("config parse error in {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, QualityError>;
