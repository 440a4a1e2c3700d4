//! High-level runner API for dalv.
//!
//! Sequences one invocation: validate the bucket path, make sure the engine
//! can run, then hand the terminal to the engine with the generated init
//! script. Every stage fails fast; nothing is retried.

use std::io::Write;

use tracing::info;

use crate::cli::Invocation;
use crate::engine::Executor;
use crate::error::Result;
use crate::io::S3PathValidator;
use crate::sql::SqlGenerator;

/// Run a parsed invocation to completion
///
/// With `dry_run` set the init script is written to `out` and the engine is
/// neither probed nor started.
///
/// # Example
///
/// ```no_run
/// use dalv::cli::Invocation;
/// use dalv::runner::run;
///
/// # fn example() -> dalv::Result<()> {
/// let invocation = Invocation {
///     s3_path: "s3://my-bucket/AWSLogs/*.log.gz".to_string(),
///     table_name: Some("alb_logs".to_string()),
///     engine: "duckdb".to_string(),
///     dry_run: false,
///     quiet: false,
/// };
/// run(&invocation, &mut std::io::stdout())?;
/// # Ok(())
/// # }
/// ```
pub fn run<W: Write>(invocation: &Invocation, out: &mut W) -> Result<()> {
    let validator = S3PathValidator::new();
    let s3_path = validator.validate(&invocation.s3_path)?;
    let table_name = invocation.table_name.as_deref();

    info!("S3 path: {} (bucket: {}, prefix: {})", s3_path, s3_path.bucket, s3_path.key);
    if let Some(table) = table_name {
        info!("Table name: {}", table);
    }

    if invocation.dry_run {
        let sql = SqlGenerator::new().complete(s3_path.as_str(), table_name);
        out.write_all(sql.as_bytes())?;
        out.flush()?;
        return Ok(());
    }

    validator.check_engine_available()?;
    let executor = Executor::new(invocation.engine.as_str());
    executor.check_engine_available()?;

    info!("Starting {}...", executor.engine());
    executor.run(s3_path.as_str(), table_name)?;

    info!("Finished successfully");
    Ok(())
}
