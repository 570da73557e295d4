use super::Delimiter;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse {delimiter} table: {details} (at line {line})")]
    Parse {
        delimiter: Delimiter,
        line: usize,
        details: String,
    },

    #[error("the table has no '{0}' column")]
    MissingColumn(&'static str),

    #[error("the table has no header row")]
    EmptyInput,
}

impl Error {
    pub fn parse(delimiter: Delimiter, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            delimiter,
            line,
            details: details.into(),
        }
    }
}
