//! Build command - render the site into the output directory

use std::path::{Path, PathBuf};

use anyhow::Result;

use plinth::{build_site, Site, SiteConfig};

pub fn cmd_build(source: &Path, output: Option<PathBuf>, json: bool, verbose: u8) -> Result<()> {
    let site = Site::open(source)?;
    let (config, warnings) = SiteConfig::load_or_default(site.root())?;
    let out_dir = output.unwrap_or(config.build.output);

    if !json {
        println!("📦 Plinth Build");
        println!("Source: {}", site.root().display());
        println!("Output: {}", out_dir.display());
        super::print_config_warnings(&warnings, json);
        println!();
    }

    let result = build_site(&site, &out_dir)?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "event": "build",
                "status": if result.is_success() { "success" } else { "partial" },
                "written": result.written.len(),
                "hidden": result.hidden.len(),
                "errors": result.errors.len(),
            })
        );
    } else {
        println!("✓ Written: {} files", result.written.len());
        if verbose > 0 {
            for path in &result.written {
                println!("  - {}", path.display());
            }
        }
        if !result.hidden.is_empty() {
            println!("⚠ Unpublished: {} pages withheld", result.hidden.len());
        }
        if !result.errors.is_empty() {
            println!("✗ Errors: {}", result.errors.len());
            for error in &result.errors {
                println!("  - {}", error);
            }
        }
    }

    if !result.is_success() {
        anyhow::bail!("build finished with {} errors", result.errors.len());
    }

    Ok(())
}
