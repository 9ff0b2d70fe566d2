//! Watch command - rebuild continuously on change

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;

use plinth::watcher::{watch, WatchEvent, WatchOptions};
use plinth::{Site, SiteConfig};

pub fn cmd_watch(source: &Path, output: Option<PathBuf>, json: bool) -> Result<()> {
    let site = Site::open(source)?;
    let (config, warnings) = SiteConfig::load_or_default(site.root())?;
    let out_dir = output.unwrap_or(config.build.output);

    let options = WatchOptions {
        root: site.root().to_path_buf(),
        out_dir: out_dir.clone(),
    };

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();

    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    if !json {
        println!("👀 Plinth Watch");
        println!("Source: {}", site.root().display());
        println!("Output: {}", out_dir.display());
        super::print_config_warnings(&warnings, json);
        println!("Press Ctrl+C to stop\n");
    }

    watch(options, running, |event| {
        if json {
            println!("{}", event.to_json());
        } else {
            let timestamp = wall_clock();
            match event {
                WatchEvent::WatchStarted { root } => {
                    println!("[{}] 📂 Watching: {}", timestamp, root);
                }
                WatchEvent::FileChanged { path } => {
                    println!("[{}] 📝 Changed: {}", timestamp, path);
                }
                WatchEvent::BuildStarted => {
                    println!("[{}] 🔄 Building...", timestamp);
                }
                WatchEvent::BuildComplete {
                    written,
                    hidden,
                    errors,
                } => {
                    if errors > 0 {
                        println!(
                            "[{}] ⚠ Build: {} written, {} hidden, {} errors",
                            timestamp, written, hidden, errors
                        );
                    } else {
                        println!("[{}] ✓ Build: {} written, {} hidden", timestamp, written, hidden);
                    }
                }
                WatchEvent::Error { message } => {
                    eprintln!("[{}] ✗ Error: {}", timestamp, message);
                }
                WatchEvent::Shutdown => {
                    println!("\n[{}] 👋 Shutting down...", timestamp);
                }
            }
        }
    })?;

    Ok(())
}

// HH:MM:SS in UTC; enough to eyeball rebuild cadence
fn wall_clock() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 86_400;
            let h = secs / 3600;
            let m = (secs % 3600) / 60;
            let s = secs % 60;
            format!("{:02}:{:02}:{:02}", h, m, s)
        })
        .unwrap_or_else(|_| "00:00:00".to_string())
}
