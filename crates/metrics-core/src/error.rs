use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReportError {
    #[error("Please enter at least one ticker.")]
    EmptyInput,

    #[error("{0}")]
    InvalidInput(String),

    #[error("The following ticker are not found: {0:?}")]
    NotFound(Vec<String>),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Export error: {0}")]
    ExportError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}
