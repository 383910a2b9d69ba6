use std::io;
use thiserror::Error;

/// Errors raised while checking or annotating a text.
#[derive(Error, Debug)]
pub enum ScribensError {
    /// The direct check was asked to handle a text over the character limit
    #[error("text is {len} characters long, over the {limit} character limit of a direct check")]
    TextTooLong { len: usize, limit: usize },

    /// The long-text path was asked to handle a text within the limit
    #[error("text is {len} characters long, within the {limit} character limit: use a direct check")]
    TextTooShort { len: usize, limit: usize },

    /// Transport failure or non-success status from the service
    #[error("request to the spellchecking service failed: {0}")]
    RequestFailed(String),

    /// The response did not have the expected shape
    #[error("failed to parse the service response: {0}")]
    ResponseParseFailed(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A correction points at a line the text does not have
    #[error("correction targets line {line} but the text has {line_count} lines")]
    LineOutOfRange { line: usize, line_count: usize },

    /// A correction points past the end of its line
    #[error("correction ends at {end} on line {line}, which is {line_len} characters long")]
    SpanOutOfBounds {
        line: usize,
        end: usize,
        line_len: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ScribensError>;

impl From<reqwest::Error> for ScribensError {
    fn from(err: reqwest::Error) -> Self {
        ScribensError::RequestFailed(err.to_string())
    }
}

impl From<serde_json::Error> for ScribensError {
    fn from(err: serde_json::Error) -> Self {
        ScribensError::ResponseParseFailed(err.to_string())
    }
}
