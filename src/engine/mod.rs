//! Launching the external query engine

pub mod executor;

pub use executor::{Executor, InitScript};
