#![cfg(unix)]

use anyhow::Result;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use tempfile::TempDir;

fn create_source(dir: &TempDir, name: &str) -> Result<PathBuf> {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, "int  main( ) { return 0 ; }\n")?;
    Ok(path)
}

/// Writes an executable formatter stand-in outside the scanned trees.
fn create_formatter(dir: &TempDir, name: &str, body: &str) -> Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body))?;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
    Ok(path)
}

/// Runs inside `dir` with HOME pointed there so no user presets leak in.
fn cmd(dir: &TempDir) -> assert_cmd::Command {
    let mut c = cargo_bin_cmd!("fmt_srcs");
    c.current_dir(dir.path()).env("HOME", dir.path());
    c
}

#[test]
fn formats_files_in_place_and_exits_zero() -> Result<()> {
    let dir = TempDir::new()?;
    let source = create_source(&dir, "src/a.cc")?;
    let formatter = create_formatter(
        &dir,
        "fake-format",
        r#"for last; do :; done; printf 'int main() { return 0; }\n' > "$last""#,
    )?;

    cmd(&dir)
        .args(["--dir", "src", "--formatter"])
        .arg(&formatter)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(source)?, "int main() { return 0; }\n");
    Ok(())
}

#[test]
fn timeout_prints_diagnostic_and_exits_minus_one() -> Result<()> {
    let dir = TempDir::new()?;
    create_source(&dir, "src/a.cc")?;
    let formatter = create_formatter(&dir, "slow-format", "exec sleep 5")?;

    cmd(&dir)
        .args(["--dir", "src", "--timeout", "1", "--formatter"])
        .arg(&formatter)
        .assert()
        .failure()
        .code(255)
        .stderr(predicate::str::contains(
            "Time expired when formatting file src/a.cc",
        ));
    Ok(())
}

#[test]
fn formatter_error_output_exits_one() -> Result<()> {
    let dir = TempDir::new()?;
    create_source(&dir, "src/a.cc")?;
    let formatter = create_formatter(&dir, "noisy-format", "echo 'invalid style' >&2")?;

    cmd(&dir)
        .args(["--dir", "src", "--formatter"])
        .arg(&formatter)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid style"))
        .stderr(predicate::str::contains("Time expired").not());
    Ok(())
}

#[test]
fn missing_default_directory_exits_one() -> Result<()> {
    let dir = TempDir::new()?;
    create_source(&dir, "src/a.cc")?;

    cmd(&dir)
        .args(["--formatter", "fmt-srcs-never-spawned"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Expected a directory as input"))
        .stderr(predicate::str::contains("include"));
    Ok(())
}

#[test]
fn list_prints_matching_files_without_formatting() -> Result<()> {
    let dir = TempDir::new()?;
    create_source(&dir, "src/a.cc")?;
    create_source(&dir, "src/notes.txt")?;

    cmd(&dir)
        .args(["--dir", "src", "--list", "--formatter", "fmt-srcs-never-spawned"])
        .assert()
        .success()
        .stdout(predicate::str::contains("src/a.cc"))
        .stdout(predicate::str::contains("notes.txt").not());
    Ok(())
}
