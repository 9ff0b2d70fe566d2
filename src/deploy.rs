//! Running the site's deploy script
//!
//! Plinth does not publish sites itself. It runs the user-editable script
//! scaffolded at `_scripts/deploy.sh`, surfaces everything the script
//! prints, and hands the script's exit status back to the caller.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{PlinthError, PlinthResult};

/// What the deploy script reported back
#[derive(Debug, Clone, Copy)]
pub struct DeployOutcome {
    /// The script's exit code, when it exited normally
    pub code: Option<i32>,
    pub success: bool,
}

/// Run the deploy script with `sh` from the site root.
///
/// The rendered output directory is passed as `$1`. Stdout and stderr are
/// inherited, so script output reaches the caller even when the script
/// fails partway.
pub fn run_deploy_script(root: &Path, script: &Path, out_dir: &Path) -> PlinthResult<DeployOutcome> {
    let script = absolute_under(root, script);
    if !script.is_file() {
        return Err(PlinthError::DeployScriptMissing { path: script });
    }
    let out_dir = absolute_under(root, out_dir);

    let status = Command::new("sh")
        .arg(&script)
        .arg(&out_dir)
        .current_dir(root)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    Ok(DeployOutcome {
        code: status.code(),
        success: status.success(),
    })
}

fn absolute_under(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_script_is_an_error() {
        let dir = tempdir().unwrap();

        let err = run_deploy_script(
            dir.path(),
            Path::new("_scripts/deploy.sh"),
            Path::new("_site"),
        )
        .unwrap_err();

        assert!(matches!(err, PlinthError::DeployScriptMissing { .. }));
        assert!(err.to_string().contains("deploy.sh"));
    }

    #[test]
    fn successful_script_reports_success() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("_scripts")).unwrap();
        fs::write(dir.path().join("_scripts/deploy.sh"), "true\n").unwrap();

        let outcome = run_deploy_script(
            dir.path(),
            Path::new("_scripts/deploy.sh"),
            Path::new("_site"),
        )
        .unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.code, Some(0));
    }

    #[test]
    fn failing_script_propagates_its_exit_code() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("_scripts")).unwrap();
        fs::write(dir.path().join("_scripts/deploy.sh"), "exit 7\n").unwrap();

        let outcome = run_deploy_script(
            dir.path(),
            Path::new("_scripts/deploy.sh"),
            Path::new("_site"),
        )
        .unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.code, Some(7));
    }

    #[test]
    fn script_receives_output_dir_as_first_argument() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("_scripts")).unwrap();
        // Record $1 so the test can observe what the script was handed
        fs::write(
            dir.path().join("_scripts/deploy.sh"),
            "printf '%s' \"$1\" > arg.txt\n",
        )
        .unwrap();

        run_deploy_script(
            dir.path(),
            Path::new("_scripts/deploy.sh"),
            Path::new("out"),
        )
        .unwrap();

        let recorded = fs::read_to_string(dir.path().join("arg.txt")).unwrap();
        assert_eq!(recorded, dir.path().join("out").display().to_string());
    }
}
