//! Drives the built `dalv` binary.

use assert_cmd::Command;

fn dalv() -> Command {
    Command::cargo_bin("dalv").unwrap()
}

#[test]
fn help_exits_zero() {
    let output = dalv().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("s3://bucket/path/to/logs/*.log.gz"));
}

#[test]
fn version_exits_zero() {
    let output = dalv().arg("-v").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("dalv version "), "got {stdout}");
}

#[test]
fn missing_path_exits_one() {
    let output = dalv().output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("no S3 path given"), "got {stderr}");
}

#[test]
fn bad_scheme_exits_one() {
    let output = dalv()
        .args(["--engine", "dalv-test-engine-that-does-not-exist", "http://bucket/x"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("must start with 's3://'"), "got {stderr}");
}

#[test]
fn missing_engine_exits_one() {
    let output = dalv()
        .args(["--engine", "dalv-test-engine-that-does-not-exist", "s3://bucket/logs/"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("https://duckdb.org/docs/installation/"), "got {stderr}");
}

#[test]
fn dry_run_prints_script() {
    let output = dalv()
        .args(["-q", "--dry-run", "-t", "mytable", "s3://bucket/logs/*.log.gz"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("CREATE TABLE mytable AS"));
    assert!(stdout.contains("'s3://bucket/logs/*.log.gz'"));
}

fn leftover_entries(dir: &std::path::Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn missing_engine_creates_no_temp_dir() {
    let scratch = tempfile::TempDir::new().unwrap();

    let output = dalv()
        .env("TMPDIR", scratch.path())
        .args(["--engine", "dalv-test-engine-that-does-not-exist", "s3://b/k"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(leftover_entries(scratch.path()).is_empty());
}

#[cfg(unix)]
#[test]
fn engine_failure_removes_temp_dir() {
    use std::os::unix::fs::PermissionsExt;

    let bin_dir = tempfile::TempDir::new().unwrap();
    let engine = bin_dir.path().join("fake-duckdb");
    std::fs::write(
        &engine,
        "#!/bin/sh\n[ \"$1\" = \"--version\" ] && exit 0\nexit 3\n",
    )
    .unwrap();
    std::fs::set_permissions(&engine, std::fs::Permissions::from_mode(0o755)).unwrap();

    let scratch = tempfile::TempDir::new().unwrap();
    let output = dalv()
        .env("TMPDIR", scratch.path())
        .arg("--engine")
        .arg(&engine)
        .arg("s3://b/k")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("exited with code 3"), "got {stderr}");
    let leftovers: Vec<_> = leftover_entries(scratch.path())
        .into_iter()
        .filter(|name| name.starts_with("dalv-"))
        .collect();
    assert!(leftovers.is_empty(), "left behind {leftovers:?}");
}
