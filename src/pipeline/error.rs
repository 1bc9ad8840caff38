//! Error types for pipeline runs.

use super::Stage;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a pipeline run.
///
/// Every stage failure names the [`Stage`] it happened in and, when a file
/// was involved, its path.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration file could not be read.
    #[error("failed to read pipeline configuration '{}': {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or has unknown keys.
    #[error("failed to parse pipeline configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A stage input could not be opened.
    #[error("{stage} stage could not open '{}': {source}", .path.display())]
    Open {
        stage: Stage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output of an earlier stage is not there to read.
    #[error("{stage} stage needs the {upstream} output '{}': {source}", .path.display())]
    Upstream {
        stage: Stage,
        upstream: Stage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stage input could not be parsed.
    #[error("{stage} stage failed on '{}'", .path.display())]
    Parse {
        stage: Stage,
        path: PathBuf,
        #[source]
        source: crate::io::Error,
    },

    /// Strict mode found malformed component blocks.
    #[error("{stage} stage rejected {count} malformed block(s) in strict mode")]
    Strict {
        stage: Stage,
        count: usize,
        #[source]
        first: crate::io::BlockError,
    },

    /// A stage output could not be written.
    #[error("{stage} stage could not write '{}'", .path.display())]
    Persist {
        stage: Stage,
        path: PathBuf,
        #[source]
        source: crate::io::Error,
    },
}

impl Error {
    /// The stage the error belongs to, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::ConfigRead { .. } | Error::ConfigParse(_) => None,
            Error::Open { stage, .. }
            | Error::Upstream { stage, .. }
            | Error::Parse { stage, .. }
            | Error::Strict { stage, .. }
            | Error::Persist { stage, .. } => Some(*stage),
        }
    }
}
