use thiserror::Error;

pub type Result<T> = std::result::Result<T, BrowserError>;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("chromium error: {0}")]
    ChromiumError(String),

    #[error("navigation failed: {0}")]
    NavigationError(String),

    #[error("evaluation failed: {0}")]
    EvaluationError(String),

    #[error("snapshot decode failed: {0}")]
    DecodeError(String),

    #[error("timeout: {0}")]
    Timeout(String),
}
