//! Page commands - create, rename, and delete pages

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use plinth::{PageKind, Site};

pub fn cmd_page_new(
    source: &Path,
    name: &str,
    dir: Option<PathBuf>,
    directory: bool,
    json: bool,
) -> Result<()> {
    let site = Site::open(source)?;
    let kind = if directory {
        PageKind::Dir
    } else {
        PageKind::Page
    };

    let created = site.create_page(kind, name, dir.as_deref())?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "event": "page_new",
                "path": created.display().to_string(),
                "kind": if directory { "dir" } else { "page" },
            })
        );
    } else {
        println!("✓ Created {}", created.display());
    }

    Ok(())
}

pub fn cmd_page_mv(source: &Path, from: &Path, to: &str, json: bool) -> Result<()> {
    let site = Site::open(source)?;
    let renamed = site.rename_page(from, to)?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "event": "page_mv",
                "from": from.display().to_string(),
                "to": renamed.display().to_string(),
            })
        );
    } else {
        println!("✓ Renamed {} -> {}", from.display(), renamed.display());
    }

    Ok(())
}

pub fn cmd_page_rm(source: &Path, path: &Path, yes: bool, json: bool) -> Result<()> {
    if !yes {
        bail!(
            "refusing to delete {} without --yes",
            path.display()
        );
    }

    let site = Site::open(source)?;
    site.delete_page(path)?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "event": "page_rm",
                "path": path.display().to_string(),
            })
        );
    } else {
        println!("✓ Deleted {}", path.display());
    }

    Ok(())
}
