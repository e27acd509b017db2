use thiserror::Error;

/// Raised only by the input-dispatch layer. Markdown parsing itself never fails.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("No CV content supplied: expected `initial_cv`, `content` or `structured_data`")]
    MissingInput,

    #[error("Invalid structured data: {0}")]
    InvalidStructuredData(String),
}
