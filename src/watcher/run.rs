//! The watch loop: notify events in, debounced rebuilds out

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::build::build_site;
use crate::error::{PlinthError, PlinthResult};
use crate::fsutil::hash_content;
use crate::render::skipped_path;
use crate::site::Site;

use super::event::{WatchEvent, WatchOptions, WatcherState};

/// Watch the site and rebuild on change until `running` is cleared.
pub fn watch(
    options: WatchOptions,
    running: Arc<AtomicBool>,
    event_callback: impl Fn(WatchEvent),
) -> PlinthResult<()> {
    let site = Site::open(&options.root)?;
    let watch_root = options
        .root
        .canonicalize()
        .unwrap_or_else(|_| options.root.clone());

    event_callback(WatchEvent::WatchStarted {
        root: options.root.display().to_string(),
    });

    // Initial full build (also seeds the content hashes)
    do_build(&site, &options, &event_callback)?;
    let mut content_hashes = initial_hashes(&site);

    // Set up file watcher
    let (tx, rx) = channel();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                for path in event.paths {
                    let _ = tx.send(path);
                }
            }
        },
        Config::default(),
    )
    .map_err(|e| PlinthError::Watch {
        message: e.to_string(),
    })?;

    watcher
        .watch(&options.root, RecursiveMode::Recursive)
        .map_err(|e| PlinthError::Watch {
            message: e.to_string(),
        })?;

    // Startup cooldown: drain any initial events from notify (it sometimes
    // sends events for existing files when the watcher is first registered)
    let cooldown_end = Instant::now() + Duration::from_millis(500);
    while Instant::now() < cooldown_end {
        let _ = rx.recv_timeout(Duration::from_millis(50));
    }

    let mut state = WatcherState::new();

    while running.load(Ordering::SeqCst) {
        // Check for file changes (non-blocking with timeout)
        if let Ok(path) = rx.recv_timeout(Duration::from_millis(50)) {
            if watchable(&path, &watch_root) {
                let canonical = path.canonicalize().unwrap_or(path);

                // Filter out editor auto-save noise: only content changes count
                if let Ok(bytes) = fs::read(&canonical) {
                    let new_hash = hash_content(&bytes);
                    if content_hashes.get(&canonical) == Some(&new_hash) {
                        continue;
                    }
                    content_hashes.insert(canonical.clone(), new_hash);
                    state.add_change(canonical);
                }
            }
        }

        // Rebuild when the debounce window has passed
        if state.should_build() {
            let changes = state.take_changes();
            for path in &changes {
                let display = path
                    .strip_prefix(&watch_root)
                    .unwrap_or(path)
                    .display()
                    .to_string();
                event_callback(WatchEvent::FileChanged { path: display });
            }
            do_build(&site, &options, &event_callback)?;
        }
    }

    event_callback(WatchEvent::Shutdown);
    Ok(())
}

// A change matters when it is inside the watch root and not part of the
// machinery (hidden entries, underscore segments, the output tree).
fn watchable(path: &Path, watch_root: &Path) -> bool {
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    let Ok(relative) = canonical.strip_prefix(watch_root) else {
        return false;
    };
    if skipped_path(relative) {
        return false;
    }
    !relative.iter().any(|segment| {
        segment
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
    })
}

fn initial_hashes(site: &Site) -> HashMap<PathBuf, String> {
    let mut hashes = HashMap::new();
    if let Ok(entries) = site.source_entries() {
        for entry in entries {
            let absolute = site.root().join(&entry);
            if let Ok(bytes) = fs::read(&absolute) {
                let canonical = absolute.canonicalize().unwrap_or(absolute);
                hashes.insert(canonical, hash_content(&bytes));
            }
        }
    }
    hashes
}

fn do_build(
    site: &Site,
    options: &WatchOptions,
    callback: &impl Fn(WatchEvent),
) -> PlinthResult<()> {
    callback(WatchEvent::BuildStarted);

    let result = match build_site(site, &options.out_dir) {
        Ok(result) => result,
        Err(e) => {
            callback(WatchEvent::Error {
                message: e.to_string(),
            });
            return Err(e);
        }
    };

    for error in &result.errors {
        callback(WatchEvent::Error {
            message: error.clone(),
        });
    }

    callback(WatchEvent::BuildComplete {
        written: result.written.len(),
        hidden: result.hidden.len(),
        errors: result.errors.len(),
    });

    Ok(())
}
