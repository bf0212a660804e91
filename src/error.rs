//! Error types

use thiserror::Error;

/// Polarity source failures, recovered by the engine as 0.0
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolarityError {
    #[error("polarity source unavailable: {0}")]
    Unavailable(String),
    #[error("polarity source returned invalid value: {0}")]
    InvalidValue(f64),
}

/// Heat and history persistence failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("corrupted store {path}: {reason}")]
    Corrupted { path: String, reason: String },
}

/// Configuration loading failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Questionnaire answer validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScreeningError {
    #[error("expected {expected} answers, got {got}")]
    WrongAnswerCount { expected: usize, got: usize },
    #[error("answer {item} is {value}, must be between 0 and 3")]
    AnswerOutOfRange { item: usize, value: u8 },
}
