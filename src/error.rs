//! Error types for dalv.

use std::path::PathBuf;

use thiserror::Error;

/// Every failure dalv can report. Each one aborts the invocation.
#[derive(Error, Debug)]
pub enum Error {
    /// The bucket path argument was an empty string
    #[error("S3 path is empty")]
    EmptyPath,

    /// The bucket path does not start with `s3://`
    #[error("S3 path must start with 's3://': {path}")]
    BadScheme { path: String },

    /// The bucket path has no bucket segment
    #[error("invalid S3 path, a bucket name is required (s3://<bucket>/<prefix>): {path}")]
    MissingBucket { path: String },

    /// No positional bucket path was given on the command line
    #[error("no S3 path given. Usage: dalv [OPTIONS] <S3_PATH>")]
    MissingPath,

    /// The command line could not be parsed
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// The engine binary could not be launched or failed its version probe
    #[error(
        "{engine} is not installed or cannot be run ({reason}). \
         Installation: https://duckdb.org/docs/installation/"
    )]
    EngineNotFound { engine: String, reason: String },

    /// The engine failed to start or exited unsuccessfully
    #[error("{engine} execution failed: {reason}")]
    EngineExecutionFailed { engine: String, reason: String },

    /// The temporary init script could not be created
    #[error("failed to prepare init script at {path}")]
    TempFileError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing help, version or a dry-run script to stdout failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
