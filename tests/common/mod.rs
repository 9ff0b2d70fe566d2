//! Common test utilities for Plinth CLI tests.
//!
//! Provides `TestSite`: an isolated site in a temp directory plus helpers
//! to run the plinth binary against it.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Result of running a plinth CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated test site in a temp directory.
pub struct TestSite {
    dir: TempDir,
    bin: PathBuf,
}

impl TestSite {
    /// A fresh empty directory, no site yet
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_plinth")),
        }
    }

    /// A scaffolded site (runs `plinth init`)
    pub fn scaffolded() -> Self {
        let site = Self::empty();
        let result = site.run(&["init"]);
        assert!(result.success, "init failed:\n{}", result.combined_output());
        site
    }

    /// The site root
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Path relative to the site root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Write a file under the site root
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Read a file under the site root
    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative)).expect("Failed to read file")
    }

    /// Run plinth in this site's root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_from(self.dir.path(), args)
    }

    /// Run plinth from a specific working directory
    pub fn run_from(&self, cwd: &Path, args: &[&str]) -> TestResult {
        let output = Command::new(&self.bin)
            .current_dir(cwd)
            .args(args)
            .output()
            .expect("Failed to execute plinth");

        output_to_result(output)
    }

    /// Run the site's deploy script directly with sh (no plinth involved)
    pub fn run_deploy_script_raw(&self, cwd: &Path) -> TestResult {
        let output = Command::new("sh")
            .arg(self.path("_scripts/deploy.sh"))
            .current_dir(cwd)
            .output()
            .expect("Failed to execute deploy script");

        output_to_result(output)
    }

    /// Sorted listing of every file under the site root
    pub fn file_listing(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        collect_files(self.dir.path(), self.dir.path(), &mut files);
        files.sort();
        files
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

fn collect_files(root: &Path, current: &Path, files: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(current) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_files(root, &path, files);
        } else if let Ok(relative) = path.strip_prefix(root) {
            files.push(relative.to_path_buf());
        }
    }
}
