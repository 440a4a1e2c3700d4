//! Command-line argument definitions and parsing.

use std::ffi::OsString;
use std::io::Write;

use clap::Parser;
use clap::error::ErrorKind;

use crate::config::{DEFAULT_ENGINE, VersionInfo};
use crate::error::{Error, Result};

/// Query AWS ALB access logs in S3 with an interactive DuckDB session.
///
/// Loads the logs under S3_PATH into a DuckDB table, then leaves you at the
/// DuckDB prompt to query it. AWS credentials come from the standard
/// credential chain (environment, profile, SSO, instance role).
#[derive(Parser, Debug, Clone)]
#[command(name = "dalv", disable_version_flag = true)]
#[command(after_help = "Example:\n  dalv -t my_logs 's3://bucket/path/to/logs/*.log.gz'")]
pub struct Args {
    /// S3 path holding ALB logs, globs allowed (e.g. s3://bucket/path/to/logs/*.log.gz)
    #[arg(value_name = "S3_PATH")]
    pub s3_path: Option<String>,

    /// Name of the table to create (default: alb_logs_YYYYMMDD_HHMMSS)
    #[arg(short, long, value_name = "NAME")]
    pub table: Option<String>,

    /// Print version information
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// DuckDB binary to run
    #[arg(long, value_name = "PATH", default_value = DEFAULT_ENGINE)]
    pub engine: String,

    /// Print the generated init script instead of starting DuckDB
    #[arg(long)]
    pub dry_run: bool,
}

/// A validated-later request to load one bucket path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub s3_path: String,
    /// `None` means a table name is generated from the clock
    pub table_name: Option<String>,
    pub engine: String,
    pub dry_run: bool,
    pub quiet: bool,
}

/// Parse `args` (program name first)
///
/// Help and version requests are written to `out` and return `Ok(None)`:
/// the caller should exit successfully without doing anything else.
pub fn parse_from<I, T, W>(
    args: I,
    version: &VersionInfo,
    out: &mut W,
) -> Result<Option<Invocation>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
{
    let args = match Args::try_parse_from(args) {
        Ok(args) => args,
        Err(e) if e.kind() == ErrorKind::DisplayHelp => {
            write!(out, "{}", e.render())?;
            return Ok(None);
        }
        Err(e) => return Err(Error::InvalidArguments(clap_message(&e))),
    };

    if args.version {
        writeln!(out, "{}", version)?;
        return Ok(None);
    }

    let s3_path = args.s3_path.ok_or(Error::MissingPath)?;

    Ok(Some(Invocation {
        s3_path,
        table_name: args.table.filter(|t| !t.is_empty()),
        engine: args.engine,
        dry_run: args.dry_run,
        quiet: args.quiet,
    }))
}

/// First line of a clap error without its `error: ` prefix, leaving out the
/// usage block and the `--help` hint
fn clap_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or_default().trim();
    first_line
        .strip_prefix("error:")
        .unwrap_or(first_line)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version() -> VersionInfo {
        VersionInfo {
            name: "dalv".to_string(),
            version: "1.2.3".to_string(),
        }
    }

    fn parse(args: &[&str]) -> (Result<Option<Invocation>>, String) {
        let mut out = Vec::new();
        let argv = std::iter::once("dalv").chain(args.iter().copied());
        let result = parse_from(argv, &version(), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_with_table_flag() {
        for flag in ["-t", "--table"] {
            let (result, out) = parse(&[flag, "test_table", "s3://bucket/path"]);
            let invocation = result.unwrap().unwrap();
            assert_eq!(invocation.s3_path, "s3://bucket/path");
            assert_eq!(invocation.table_name.as_deref(), Some("test_table"));
            assert!(out.is_empty());
        }
    }

    #[test]
    fn test_parse_without_table_flag() {
        let (result, _) = parse(&["s3://bucket/path"]);
        let invocation = result.unwrap().unwrap();
        assert_eq!(
            invocation,
            Invocation {
                s3_path: "s3://bucket/path".to_string(),
                table_name: None,
                engine: "duckdb".to_string(),
                dry_run: false,
                quiet: false,
            }
        );
    }

    #[test]
    fn test_empty_table_name_is_absent() {
        let (result, _) = parse(&["--table", "", "s3://bucket/path"]);
        assert_eq!(result.unwrap().unwrap().table_name, None);
    }

    #[test]
    fn test_parse_help() {
        for flag in ["-h", "--help"] {
            let (result, out) = parse(&[flag]);
            assert!(result.unwrap().is_none());
            assert!(out.contains("Usage:"), "got {out}");
            assert!(out.contains("--table"));
            assert!(out.contains("S3_PATH"));
        }
    }

    #[test]
    fn test_parse_version() {
        for flag in ["-v", "--version"] {
            let (result, out) = parse(&[flag]);
            assert!(result.unwrap().is_none());
            assert_eq!(out, "dalv version 1.2.3\n");
        }
    }

    #[test]
    fn test_version_wins_over_path() {
        let (result, out) = parse(&["-v", "s3://bucket/path"]);
        assert!(result.unwrap().is_none());
        assert_eq!(out, "dalv version 1.2.3\n");
    }

    #[test]
    fn test_missing_path() {
        let (result, _) = parse(&[]);
        assert!(matches!(result, Err(Error::MissingPath)));

        let (result, _) = parse(&["-t", "some_table"]);
        assert!(matches!(result, Err(Error::MissingPath)));
    }

    #[test]
    fn test_invalid_arguments() {
        let (result, _) = parse(&["--bogus", "s3://bucket/path"]);
        match result {
            Err(Error::InvalidArguments(message)) => {
                assert!(message.contains("'--bogus'"), "got {message}");
                assert!(!message.starts_with("error"), "got {message}");
                assert!(!message.contains("Usage"), "got {message}");
                assert!(!message.contains('\n'), "got {message}");
            }
            other => panic!("Expected InvalidArguments, got {other:?}"),
        }

        let (result, _) = parse(&["s3://bucket/a", "s3://bucket/b"]);
        assert!(matches!(result, Err(Error::InvalidArguments(_))));

        let (result, _) = parse(&["s3://bucket/a", "--table"]);
        assert!(matches!(result, Err(Error::InvalidArguments(_))));
    }

    #[test]
    fn test_supplementary_flags() {
        let (result, _) = parse(&["-q", "--dry-run", "--engine", "/opt/duckdb", "s3://b/k"]);
        let invocation = result.unwrap().unwrap();
        assert!(invocation.quiet);
        assert!(invocation.dry_run);
        assert_eq!(invocation.engine, "/opt/duckdb");
    }
}
