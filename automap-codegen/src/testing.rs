//! Test utilities for language backends.
//!
//! Available with the `testing` feature or during tests.

use std::{path::Path, process::Command};

use eyre::Result;
use thiserror::Error;

/// Generated code that failed to compile.
#[derive(Debug, Error)]
#[error("{message}\n\nOutput:\n{output}")]
pub struct CompileError {
    pub message: String,
    pub output: String,
}

/// Verifies generated code in a crate directory.
pub trait CompileChecker {
    fn check(&self, dir: &Path) -> Result<(), CompileError>;
}

/// Runs `cargo check` in a crate directory.
pub struct RustChecker;

impl CompileChecker for RustChecker {
    fn check(&self, dir: &Path) -> Result<(), CompileError> {
        run_cargo(dir, "check")
    }
}

/// Runs `cargo test` in a crate directory, executing any tests the crate
/// carries next to its generated code.
pub struct RustTester;

impl CompileChecker for RustTester {
    fn check(&self, dir: &Path) -> Result<(), CompileError> {
        run_cargo(dir, "test")
    }
}

fn run_cargo(dir: &Path, subcommand: &str) -> Result<(), CompileError> {
    let output = Command::new("cargo")
        .args([subcommand, "--quiet"])
        .current_dir(dir)
        .output()
        .map_err(|e| CompileError {
            message: format!("failed to run cargo {subcommand}: {e}"),
            output: String::new(),
        })?;

    if output.status.success() {
        return Ok(());
    }
    Err(CompileError {
        message: format!("cargo {subcommand} failed"),
        output: format!(
            "stderr:\n{}\n\nstdout:\n{}",
            String::from_utf8_lossy(&output.stderr),
            String::from_utf8_lossy(&output.stdout)
        ),
    })
}

/// Assert that two strings are equal, reporting the differing lines.
pub fn assert_content_eq(expected: &str, actual: &str) {
    if expected == actual {
        return;
    }
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();

    let mut diff = String::new();
    for i in 0..expected_lines.len().max(actual_lines.len()) {
        let exp = expected_lines.get(i).copied().unwrap_or("<missing>");
        let act = actual_lines.get(i).copied().unwrap_or("<missing>");
        if exp != act {
            diff.push_str(&format!(
                "line {}:\n  expected: {exp}\n  actual:   {act}\n",
                i + 1
            ));
        }
    }
    panic!("content mismatch:\n{diff}");
}

/// Run `generate` against a fresh temporary directory.
///
/// The directory is removed when the returned `TempDir` is dropped.
pub fn generate_to_temp<F>(generate: F) -> Result<tempfile::TempDir>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let temp_dir = tempfile::TempDir::new()?;
    generate(temp_dir.path())?;
    Ok(temp_dir)
}

/// Generate into a temporary directory and run `checker` over it.
pub fn assert_generates_valid_code<F, C>(generate: F, checker: &C)
where
    F: FnOnce(&Path) -> Result<()>,
    C: CompileChecker,
{
    let dir = match generate_to_temp(generate) {
        Ok(dir) => dir,
        Err(e) => panic!("generation failed: {e:?}"),
    };
    if let Err(e) = checker.check(dir.path()) {
        panic!("generated code failed verification:\n{e}");
    }
}
