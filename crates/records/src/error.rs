//! Point record error types.

use thiserror::Error;

/// Errors that can occur while reading point records.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Expected {expected} fields, found {found}")]
    MissingField { expected: usize, found: usize },

    #[error("Invalid number in field {field}: {value:?}")]
    InvalidNumber { field: usize, value: String },

    #[error("Invalid corner {0:?}, expected \"easting,northing\"")]
    InvalidCorner(String),

    #[error("Line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<RecordError>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RecordError {
    /// Attach a 1-based line number.
    pub fn at_line(self, line: usize) -> Self {
        RecordError::Line {
            line,
            source: Box::new(self),
        }
    }
}
