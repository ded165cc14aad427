use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the scan core. None of these terminate the process on
/// their own; the binary decides how they are presented.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    ExitStatus { program: String, status: std::process::ExitStatus },

    #[error("failed to read results file {}: {source}", path.display())]
    ResultFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not extract domain from target: {0}")]
    DomainExtraction(String),

    #[error("{0} phase task failed: {1}")]
    PhaseTask(crate::model::ScanType, String),

    #[error("no wordlist configured")]
    NoWordlist,

    #[error("failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ScanError>;
