use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use tempfile::TempDir;
use tracing::{debug, info};

use crate::config::{
    DEFAULT_ENGINE, ENGINE_INIT_FLAG, ENGINE_VERSION_FLAG, INIT_SCRIPT_NAME, TEMP_DIR_PREFIX,
};
use crate::error::{Error, Result};
use crate::sql::SqlGenerator;

/// An init script written into its own temporary directory
///
/// Dropping it removes the directory and the script with it, on every exit
/// path including engine failure.
#[derive(Debug)]
pub struct InitScript {
    dir: TempDir,
    path: PathBuf,
}

impl InitScript {
    pub fn write(sql: &str) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(TEMP_DIR_PREFIX)
            .tempdir()
            .map_err(|source| Error::TempFileError {
                path: std::env::temp_dir(),
                source,
            })?;

        let path = dir.path().join(INIT_SCRIPT_NAME);
        std::fs::write(&path, sql).map_err(|source| Error::TempFileError {
            path: path.clone(),
            source,
        })?;

        Ok(Self { dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

/// Runs the engine interactively on top of a generated init script
#[derive(Debug, Clone)]
pub struct Executor {
    engine: String,
    generator: SqlGenerator,
}

impl Default for Executor {
    fn default() -> Self {
        Self::new(DEFAULT_ENGINE)
    }
}

impl Executor {
    pub fn new(engine: impl Into<String>) -> Self {
        Self {
            engine: engine.into(),
            generator: SqlGenerator::new(),
        }
    }

    pub fn engine(&self) -> &str {
        &self.engine
    }

    /// Probe the engine with its version flag
    pub fn check_engine_available(&self) -> Result<()> {
        let status = Command::new(&self.engine)
            .arg(ENGINE_VERSION_FLAG)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| Error::EngineNotFound {
                engine: self.engine.clone(),
                reason: e.to_string(),
            })?;

        check_exit_status(status).map_err(|reason| Error::EngineNotFound {
            engine: self.engine.clone(),
            reason,
        })?;

        debug!("{} is available", self.engine);
        Ok(())
    }

    /// Load `s3_path` into `table_name` (generated when absent) and hand the
    /// terminal over to the engine until it exits
    ///
    /// The engine inherits stdin, stdout and stderr, so its prompt and output
    /// share this process's terminal. Blocks until the engine exits.
    pub fn run(&self, s3_path: &str, table_name: Option<&str>) -> Result<()> {
        let table_name = self.generator.resolve_table_name(table_name);
        let sql = self.generator.complete(s3_path, Some(&table_name));

        let script = InitScript::write(&sql)?;
        debug!("Wrote {} into {}", INIT_SCRIPT_NAME, script.dir().display());

        info!("Starting {} with table {}", self.engine, table_name);
        let status = Command::new(&self.engine)
            .arg(ENGINE_INIT_FLAG)
            .arg(script.path())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Error::EngineExecutionFailed {
                engine: self.engine.clone(),
                reason: e.to_string(),
            })?;

        check_exit_status(status).map_err(|reason| Error::EngineExecutionFailed {
            engine: self.engine.clone(),
            reason,
        })?;

        info!("{} exited successfully", self.engine);
        Ok(())
    }
}

fn check_exit_status(status: ExitStatus) -> std::result::Result<(), String> {
    if status.success() {
        return Ok(());
    }
    match status.code() {
        Some(code) => Err(format!("exited with code {}", code)),
        None => Err("process terminated by signal".to_string()),
    }
}
