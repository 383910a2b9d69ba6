pub mod annotator;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;

pub use annotator::annotate;
pub use client::ScribensClient;
pub use config::Config;
pub use error::{Result, ScribensError};

use serde::Serialize;

/// One error detected by the service in the checked text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Misspelling {
    /// Zero-based index of the line, as split on `\n`
    pub line: usize,
    pub span: Span,
    /// First correction proposed by the service, if any
    pub suggestion: Option<String>,
    /// First sentence of the service's explanation, tags stripped
    pub annotation: String,
}

/// Half-open `[start, end)` range of characters within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub original: String,
    pub annotated: String,
    pub misspellings: Vec<Misspelling>,
}
