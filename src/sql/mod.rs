//! DuckDB init script generation for ALB access logs

pub mod generator;
pub mod schema;

pub use generator::SqlGenerator;
pub use schema::{ALB_LOG_COLUMNS, Column, CsvOptions, SqlType};
