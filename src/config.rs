//! Configuration constants for dalv
//!
//! This module centralizes the fixed names, flags and formats used throughout
//! the application, plus the version string resolved once at startup.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

// ============================================================================
// Engine Configuration
// ============================================================================

/// Engine binary looked up on PATH unless `--engine` says otherwise
pub const DEFAULT_ENGINE: &str = "duckdb";

/// Flag passed to the engine when probing whether it can run at all
pub const ENGINE_VERSION_FLAG: &str = "--version";

/// Flag that makes the engine execute a SQL file before going interactive
pub const ENGINE_INIT_FLAG: &str = "-init";

// ============================================================================
// Init Script Configuration
// ============================================================================

pub const INIT_SCRIPT_NAME: &str = "init.sql";

pub const TEMP_DIR_PREFIX: &str = "dalv-";

// ============================================================================
// Table Naming
// ============================================================================

pub const TABLE_NAME_PREFIX: &str = "alb_logs_";

/// chrono format for the generated table name suffix (YYYYMMDD_HHMMSS)
///
/// Second resolution only, so two invocations within the same second produce
/// the same name.
pub const TABLE_NAME_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

// ============================================================================
// Version
// ============================================================================

pub const APP_NAME: &str = "dalv";

pub const VERSION_FILE_NAME: &str = "version.txt";

/// Version string reported by `--version`
///
/// Resolved once at startup and handed to the argument parser, so nothing
/// mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub name: String,
    pub version: String,
}

impl VersionInfo {
    /// Version compiled into the binary
    pub fn builtin() -> Self {
        Self {
            name: APP_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Resolve the version from a `version.txt` sidecar, falling back to the
    /// compiled-in version
    ///
    /// Looks next to the install prefix first (`<exe dir>/../version.txt`),
    /// then in the working directory.
    pub fn resolve() -> Self {
        let mut candidates = Vec::with_capacity(2);
        if let Ok(exe) = std::env::current_exe()
            && let Some(dir) = exe.parent()
        {
            candidates.push(dir.join("..").join(VERSION_FILE_NAME));
        }
        candidates.push(PathBuf::from(VERSION_FILE_NAME));

        Self::from_candidates(&candidates)
    }

    /// Use the first readable, non-empty file among `candidates`
    pub fn from_candidates(candidates: &[PathBuf]) -> Self {
        candidates
            .iter()
            .find_map(|path| read_version_file(path))
            .map(|version| Self {
                name: APP_NAME.to_string(),
                version,
            })
            .unwrap_or_else(Self::builtin)
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} version {}", self.name, self.version)
    }
}

fn read_version_file(path: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(path).ok()?;
    let version = contents.trim();
    if version.is_empty() {
        return None;
    }
    debug!("Read version {} from {}", version, path.display());
    Some(version.to_string())
}
