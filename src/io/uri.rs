use std::fmt;

use crate::error::{Error, Result};

pub const S3_SCHEME_PREFIX: &str = "s3://";

/// A syntactically valid `s3://<bucket>/<key>` path
///
/// The key may be empty or contain glob wildcards; those are resolved by the
/// engine, never here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Path {
    pub bucket: String,
    pub key: String,
    uri: String,
}

impl S3Path {
    /// Parse a bucket path string into an S3Path
    ///
    /// Purely syntactic: nothing checks that the bucket or objects exist.
    pub fn parse(uri: &str) -> Result<Self> {
        if uri.is_empty() {
            return Err(Error::EmptyPath);
        }

        let rest = uri
            .strip_prefix(S3_SCHEME_PREFIX)
            .ok_or_else(|| Error::BadScheme {
                path: uri.to_string(),
            })?;

        // Need at least "<bucket>/" so the engine sees a prefix, not a bare bucket
        let (bucket, key) = rest
            .split_once('/')
            .filter(|(bucket, _)| !bucket.is_empty())
            .ok_or_else(|| Error::MissingBucket {
                path: uri.to_string(),
            })?;

        Ok(Self {
            bucket: bucket.to_string(),
            key: key.to_string(),
            uri: uri.to_string(),
        })
    }

    /// The path exactly as given on the command line
    pub fn as_str(&self) -> &str {
        &self.uri
    }
}

impl fmt::Display for S3Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

/// Pre-flight checks run before any SQL is generated
#[derive(Debug, Default, Clone, Copy)]
pub struct S3PathValidator;

impl S3PathValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, path: &str) -> Result<S3Path> {
        S3Path::parse(path)
    }

    /// Always succeeds. The executor runs the real engine probe, this is only
    /// the hook for a cheaper check ahead of it.
    pub fn check_engine_available(&self) -> Result<()> {
        Ok(())
    }
}
