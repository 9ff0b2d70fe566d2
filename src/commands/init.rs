//! Init command - scaffold a new site
//!
//! The starter tree: a config file, a welcome page, a default layout, the
//! placeholder deploy script, and empty asset directories.

use std::path::Path;

use anyhow::{bail, Result};

use plinth::config::CONFIG_FILE;
use plinth::site::{scaffold, Site};

pub fn cmd_init(path: &Path, force: bool, json: bool) -> Result<()> {
    let marker = path.join(CONFIG_FILE);
    if marker.exists() && !force {
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "event": "error",
                    "command": "init",
                    "kind": "already_exists",
                    "path": path.display().to_string(),
                })
            );
        }
        bail!(
            "{} already contains a site. Use --force to scaffold over it.",
            path.display()
        );
    }

    if force {
        std::fs::create_dir_all(path)?;
        scaffold(path)?;
    } else {
        Site::create(path)?;
    }

    if json {
        println!(
            "{}",
            serde_json::json!({
                "event": "complete",
                "command": "init",
                "path": path.display().to_string(),
            })
        );
    } else {
        println!("✓ Created site at {}/", path.display());
        println!();
        println!("  - plinth.toml");
        println!("  - index.md");
        println!("  - _layouts/default.html");
        println!("  - _scripts/deploy.sh");
        println!("  - assets/");
        println!("  - images/");
        println!();
        println!("Next steps:");
        println!("  1. plinth serve     preview at http://localhost:3000");
        println!("  2. plinth build     render into _site/");
        println!("  3. Edit _scripts/deploy.sh, then publish with: plinth deploy");
    }

    Ok(())
}
