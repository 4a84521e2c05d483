use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::trial::Phase;

/// Every way a benchmark run can fail.
///
/// All variants are fatal: the harness never retries, because a retried
/// measurement is a biased measurement. The orchestrator stops at the first
/// error and nothing partial is emitted for the trial in flight.
#[derive(Error, Debug)]
pub enum BenchError {
    /// Invalid thread count, block sizes, path, or codec selection.
    /// Raised before any file is opened or any thread is spawned.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An allocation failed or a fixed limit (blocks per file, files per
    /// corpus) was exceeded.
    #[error("resource exhausted ({what}): {detail}")]
    ResourceExhaustion { what: &'static str, detail: String },

    /// A codec failed or reported an implausible size or payload.
    #[error("codec '{codec}' failed: {detail}")]
    Codec { codec: &'static str, detail: String },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the report stream failed.
    #[error("report output failed: {0}")]
    Report(#[source] io::Error),

    #[error("worker thread panicked during {phase} phase of codec '{codec}'")]
    WorkerPanicked { phase: Phase, codec: &'static str },
}

impl BenchError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn codec(codec: &'static str, detail: impl Into<String>) -> Self {
        Self::Codec {
            codec,
            detail: detail.into(),
        }
    }

    pub fn exhausted(what: &'static str, detail: impl Into<String>) -> Self {
        Self::ResourceExhaustion {
            what,
            detail: detail.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

pub type Result<T> = std::result::Result<T, BenchError>;
