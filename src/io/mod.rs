//! Bucket path handling

pub mod uri;

pub use uri::{S3Path, S3PathValidator};
