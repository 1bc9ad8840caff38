use super::Format;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse {format} data: {details} (at line ~{line})")]
    Parse {
        format: Format,
        line: usize,
        details: String,
    },

    #[error("no '{marker}' delimiter found in {format} data; the file is not a component database")]
    MissingDelimiter {
        format: Format,
        marker: &'static str,
    },

    #[error(transparent)]
    Block(#[from] BlockError),

    #[error("failed to {action} JSON records: {source}")]
    Json {
        action: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub fn parse(format: Format, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            line,
            details: details.into(),
        }
    }

    pub(crate) fn json(action: &'static str, source: serde_json::Error) -> Self {
        Self::Json { action, source }
    }
}

/// A component block that could not be turned into a record.
///
/// Carries enough context to locate the block in the source file: its
/// position among the blocks, the file line of the offending content and a
/// short preview of the block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("component block #{block} (line {line}): {fault}; block starts with \"{preview}\"")]
pub struct BlockError {
    /// 1-based position of the block in the file.
    pub block: usize,
    /// 1-based file line of the offending content.
    pub line: usize,
    pub fault: BlockFault,
    pub preview: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockFault {
    #[error("block is empty")]
    Empty,

    #[error("expected index, name and formula lines, found only {0} line(s)")]
    TooShort(usize),

    #[error("first line carries no index token")]
    MissingIndex,

    #[error("index '{index}' is already used by block #{first_block}")]
    DuplicateIndex { index: String, first_block: usize },
}
