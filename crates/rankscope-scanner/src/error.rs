use rankscope_browser::BrowserError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Feed error: {0}")]
    Feed(#[from] BrowserError),
}

pub type Result<T> = std::result::Result<T, ScanError>;
