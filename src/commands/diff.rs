//! Diff command - preview what a build would change

use std::path::{Path, PathBuf};

use anyhow::Result;

use plinth::build::{diff_site, render_unified_diff, DiffState};
use plinth::{Site, SiteConfig};

pub fn cmd_diff(source: &Path, output: Option<PathBuf>, json: bool, verbose: u8) -> Result<()> {
    let site = Site::open(source)?;
    let (config, warnings) = SiteConfig::load_or_default(site.root())?;
    let out_dir = output.unwrap_or(config.build.output);

    if !json {
        println!("📊 Plinth Diff");
        println!("Source: {}", site.root().display());
        super::print_config_warnings(&warnings, json);
        println!();
    }

    let summary = diff_site(&site, &out_dir)?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "event": "diff",
                "new": summary.count(DiffState::New),
                "modified": summary.count(DiffState::Modified),
                "unchanged": summary.count(DiffState::Unchanged),
            })
        );
        return Ok(());
    }

    let new_count = summary.count(DiffState::New);
    let modified_count = summary.count(DiffState::Modified);
    let unchanged_count = summary.count(DiffState::Unchanged);

    if new_count > 0 {
        println!("📁 New files ({}):", new_count);
        for entry in summary.in_state(DiffState::New) {
            println!("  + {}", entry.path.display());
        }
        println!();
    }

    if modified_count > 0 {
        println!("📝 Modified files ({}):", modified_count);
        for entry in summary.in_state(DiffState::Modified) {
            println!("  ~ {}", entry.path.display());
            if verbose > 0 {
                if let (Some(old), Some(new)) = (&entry.old, &entry.new) {
                    print!(
                        "{}",
                        render_unified_diff(&entry.path.display().to_string(), old, new)
                    );
                }
            }
        }
        println!();
    }

    if unchanged_count > 0 {
        println!("✓ Unchanged files: {}", unchanged_count);
    }

    println!();
    println!(
        "Summary: {} new, {} modified, {} unchanged",
        new_count, modified_count, unchanged_count
    );

    Ok(())
}
