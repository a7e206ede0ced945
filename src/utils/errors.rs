use thiserror::Error;

/// Errors surfaced by the chart host and its rendering backends
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Element not found: #{0}")]
    ElementNotFound(String),
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Map any displayable drawing error into `ChartError::Draw` with context
pub fn draw_error<E: std::fmt::Display>(what: &str) -> impl FnOnce(E) -> ChartError + '_ {
    move |e| ChartError::Draw(format!("{}: {}", what, e))
}
