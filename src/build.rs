//! Site compilation: render the source tree into an output directory
//!
//! Also provides the dry-run half: diffing would-be outputs against what is
//! already on disk.

use std::fs;
use std::path::{Path, PathBuf};

use similar::{ChangeTag, TextDiff};

use crate::error::PlinthResult;
use crate::fsutil::{atomic_write, hash_file};
use crate::render::{render, RenderOutput};
use crate::site::Site;

/// Result of building a site
#[derive(Debug, Default)]
pub struct BuildResult {
    /// Output-relative paths written (rendered pages and copied raw files)
    pub written: Vec<PathBuf>,
    /// Pages rendered but withheld from the output (`published = false`)
    pub hidden: Vec<PathBuf>,
    /// Per-page failures; the rest of the build continues past them
    pub errors: Vec<String>,
}

impl BuildResult {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Render every source entry into `out_dir` (resolved against the site root
/// when relative).
pub fn build_site(site: &Site, out_dir: &Path) -> PlinthResult<BuildResult> {
    let out_root = resolve_out_dir(site, out_dir);
    fs::create_dir_all(&out_root)?;

    let mut result = BuildResult::default();

    for entry in site.source_entries()? {
        match render(&entry, site.root()) {
            Ok(RenderOutput::Rendered(path, html)) => {
                match atomic_write(&out_root.join(&path), html.as_bytes()) {
                    Ok(()) => result.written.push(path),
                    Err(e) => result.errors.push(format!("{}: {}", path.display(), e)),
                }
            }
            Ok(RenderOutput::Hidden(path, _)) => result.hidden.push(path),
            Ok(RenderOutput::RawFile(path)) => {
                match copy_raw(site.root(), &out_root, &path) {
                    Ok(()) => result.written.push(path),
                    Err(e) => result.errors.push(format!("{}: {}", path.display(), e)),
                }
            }
            Ok(RenderOutput::Dir(path)) => {
                if let Err(e) = fs::create_dir_all(out_root.join(&path)) {
                    result.errors.push(format!("{}: {}", path.display(), e));
                }
            }
            Ok(RenderOutput::NoOutput) => {}
            Err(e) => result.errors.push(format!("{}: {}", entry.display(), e)),
        }
    }

    Ok(result)
}

fn resolve_out_dir(site: &Site, out_dir: &Path) -> PathBuf {
    if out_dir.is_absolute() {
        out_dir.to_path_buf()
    } else {
        site.root().join(out_dir)
    }
}

fn copy_raw(root: &Path, out_root: &Path, path: &Path) -> std::io::Result<()> {
    let target = out_root.join(path);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(root.join(path), target)?;
    Ok(())
}

/// How a would-be output compares to what is on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffState {
    New,
    Modified,
    Unchanged,
}

/// One output file's diff classification
#[derive(Debug)]
pub struct DiffEntry {
    pub path: PathBuf,
    pub state: DiffState,
    /// Current and would-be content, kept for modified text outputs so the
    /// CLI can show a unified diff
    pub old: Option<String>,
    pub new: Option<String>,
}

/// Diff classification for a whole site
#[derive(Debug, Default)]
pub struct DiffSummary {
    pub entries: Vec<DiffEntry>,
}

impl DiffSummary {
    pub fn count(&self, state: DiffState) -> usize {
        self.entries.iter().filter(|e| e.state == state).count()
    }

    pub fn in_state(&self, state: DiffState) -> impl Iterator<Item = &DiffEntry> {
        self.entries.iter().filter(move |e| e.state == state)
    }
}

/// Compare what a build would produce against the output directory,
/// without writing anything.
pub fn diff_site(site: &Site, out_dir: &Path) -> PlinthResult<DiffSummary> {
    let out_root = resolve_out_dir(site, out_dir);
    let mut summary = DiffSummary::default();

    for entry in site.source_entries()? {
        match render(&entry, site.root())? {
            RenderOutput::Rendered(path, html) => {
                let target = out_root.join(&path);
                let entry = if target.exists() {
                    let existing = fs::read_to_string(&target).unwrap_or_default();
                    if existing == html {
                        DiffEntry {
                            path,
                            state: DiffState::Unchanged,
                            old: None,
                            new: None,
                        }
                    } else {
                        DiffEntry {
                            path,
                            state: DiffState::Modified,
                            old: Some(existing),
                            new: Some(html),
                        }
                    }
                } else {
                    DiffEntry {
                        path,
                        state: DiffState::New,
                        old: None,
                        new: Some(html),
                    }
                };
                summary.entries.push(entry);
            }
            RenderOutput::RawFile(path) => {
                let target = out_root.join(&path);
                let state = if target.exists() {
                    let old = hash_file(&target)?;
                    let new = hash_file(&site.root().join(&path))?;
                    if old == new {
                        DiffState::Unchanged
                    } else {
                        DiffState::Modified
                    }
                } else {
                    DiffState::New
                };
                summary.entries.push(DiffEntry {
                    path,
                    state,
                    old: None,
                    new: None,
                });
            }
            RenderOutput::Hidden(_, _) | RenderOutput::NoOutput | RenderOutput::Dir(_) => {}
        }
    }

    Ok(summary)
}

/// Render a unified diff with line numbers (plain text, no color).
pub fn render_unified_diff(path: &str, old: &str, new: &str) -> String {
    let diff = TextDiff::from_lines(old, new);
    let old_lines = old.lines().count().max(1);
    let new_lines = new.lines().count().max(1);
    let width = old_lines.max(new_lines).to_string().len();

    let mut out = String::new();
    out.push_str(&format!("--- a/{}\n", path));
    out.push_str(&format!("+++ b/{}\n", path));

    for change in diff.iter_all_changes() {
        let (old_no, new_no, sign) = match change.tag() {
            ChangeTag::Delete => (change.old_index().map(|i| i + 1), None, "-"),
            ChangeTag::Insert => (None, change.new_index().map(|i| i + 1), "+"),
            ChangeTag::Equal => (
                change.old_index().map(|i| i + 1),
                change.new_index().map(|i| i + 1),
                " ",
            ),
        };

        let old_col = old_no
            .map(|n| format!("{:>width$}", n, width = width))
            .unwrap_or_else(|| " ".repeat(width));
        let new_col = new_no
            .map(|n| format!("{:>width$}", n, width = width))
            .unwrap_or_else(|| " ".repeat(width));

        let value = change.value().trim_end_matches('\n');
        out.push_str(&format!("{old_col} {new_col} {sign} {value}\n"));
    }

    out
}
