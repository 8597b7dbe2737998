use std::fmt::{self, Display};

use thiserror::Error;

/// Line-level failures shared by the GFF3 and VCF decoders.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Malformed line: expected {expected} tab-separated columns, found {found}")]
    MalformedLine { expected: usize, found: usize },

    #[error("Invalid value for {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error("Invalid header line: {0}")]
    InvalidHeader(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for bioflat decoding.
pub type Result<T> = std::result::Result<T, ParseError>;

///
/// A data line that was dropped during a permissive parse.
///
#[derive(Debug)]
pub struct SkippedLine {
    /// 1-based line number within the input.
    pub line_number: usize,
    pub error: ParseError,
}

impl Display for SkippedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line_number, self.error)
    }
}
