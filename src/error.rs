use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures of the edge-list conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input edge list could not be opened.
    #[error("input file not found: {}", path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A two-token line held something that is not a vertex id.
    #[error("line {line}: malformed vertex id {token:?}")]
    MalformedToken { line: usize, token: String },

    #[error("failed to read edge list")]
    Read(#[source] io::Error),

    /// The adjacency list could not be created or written.
    #[error("failed to write adjacency list to {}", path.display())]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failures of the timing comparison report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{} not found", path.display())]
    TimingsNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A timing row without exactly two columns or with a non-numeric time.
    #[error("line {line}: malformed timing row {content:?}")]
    MalformedTiming { line: usize, content: String },

    #[error("failed to write comparison to {}", path.display())]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
