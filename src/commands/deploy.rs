//! Deploy command - build, then hand off to the site's deploy script
//!
//! Plinth's half of the contract: build the site, run the script with the
//! output directory, show everything the script prints, and exit with the
//! script's own status so CI sees exactly what the script reported.

use std::path::{Path, PathBuf};

use anyhow::Result;

use plinth::{build_site, run_deploy_script, Site, SiteConfig};

pub fn cmd_deploy(
    source: &Path,
    output: Option<PathBuf>,
    script: Option<PathBuf>,
    skip_build: bool,
    json: bool,
) -> Result<()> {
    let site = Site::open(source)?;
    let (config, warnings) = SiteConfig::load_or_default(site.root())?;
    let out_dir = output.unwrap_or(config.build.output);
    let script = script.unwrap_or(config.deploy.script);

    if !json {
        println!("🚀 Plinth Deploy");
        println!("Source: {}", site.root().display());
        println!("Script: {}", script.display());
        super::print_config_warnings(&warnings, json);
        println!();
    }

    if !skip_build {
        let result = build_site(&site, &out_dir)?;

        if json {
            println!(
                "{}",
                serde_json::json!({
                    "event": "build",
                    "status": if result.is_success() { "success" } else { "partial" },
                    "written": result.written.len(),
                    "errors": result.errors.len(),
                })
            );
        } else {
            println!(
                "✓ Built {} files into {}",
                result.written.len(),
                out_dir.display()
            );
        }

        if !result.is_success() {
            for error in &result.errors {
                eprintln!("  ✗ {}", error);
            }
            anyhow::bail!(
                "not deploying: build finished with {} errors",
                result.errors.len()
            );
        }

        if !json {
            println!();
        }
    }

    let outcome = run_deploy_script(site.root(), &script, &out_dir)?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "event": "deploy",
                "status": if outcome.success { "success" } else { "failed" },
                "code": outcome.code,
            })
        );
    }

    if outcome.success {
        if !json {
            println!("\n✓ Deploy script finished successfully");
        }
        Ok(())
    } else {
        let code = outcome.code.unwrap_or(1);
        if !json {
            eprintln!("\n✗ Deploy script failed (exit code {})", code);
        }
        // The script's status is the deploy's status
        std::process::exit(code);
    }
}
