// Entry points used by the binary
pub mod cli;
pub mod config;
pub mod error;
pub mod runner;

// Pipeline stages, leaf first
pub mod io;
pub mod sql;
pub mod engine;

pub use error::{Error, Result};
