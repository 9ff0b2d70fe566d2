//! Site model: opening, scaffolding, walking, and page operations
//!
//! A site is a directory of Markdown pages and raw assets. Underscore
//! directories hold machinery (`_layouts`, `_scripts`, the `_site` output)
//! and never render.

use std::fs;
use std::path::{Component, Path, PathBuf};

use ignore::WalkBuilder;

use crate::error::{PlinthError, PlinthResult};
use crate::render::skipped_path;

/// What kind of page entry to create
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PageKind {
    Page,
    Dir,
}

/// A site rooted at a directory on disk
#[derive(Debug, Clone)]
pub struct Site {
    root: PathBuf,
}

impl Site {
    /// Open an existing site
    pub fn open(root: &Path) -> PlinthResult<Self> {
        if !root.is_dir() {
            return Err(PlinthError::SiteNotFound {
                path: root.to_path_buf(),
            });
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Create a new site: the root must be empty (or absent), and gets the
    /// starter tree scaffolded into it.
    pub fn create(root: &Path) -> PlinthResult<Self> {
        fs::create_dir_all(root)?;
        if root.read_dir()?.next().is_some() {
            return Err(PlinthError::SiteNotEmpty {
                path: root.to_path_buf(),
            });
        }
        scaffold(root)?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// The site root on disk
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the source tree: every renderable entry (files and directories)
    /// as a sorted, root-relative path. Hidden entries and underscore
    /// segments are excluded, so `_layouts`, `_scripts`, and the default
    /// `_site` output never appear.
    pub fn source_entries(&self) -> PlinthResult<Vec<PathBuf>> {
        let mut entries = Vec::new();

        let walk = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .hidden(true)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for entry in walk {
            let entry = entry.map_err(|e| PlinthError::Watch {
                message: e.to_string(),
            })?;
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            if relative.as_os_str().is_empty() || skipped_path(relative) {
                continue;
            }
            // The config file is tool input, not site content
            if relative == Path::new(crate::config::CONFIG_FILE) {
                continue;
            }
            entries.push(relative.to_path_buf());
        }

        Ok(entries)
    }

    /// Create a page or directory under `parent` (the site root if `None`).
    ///
    /// New `.md` pages get a frontmatter template; a bare name gets the
    /// `.md` extension appended; any other extension creates an empty file.
    pub fn create_page(
        &self,
        kind: PageKind,
        name: &str,
        parent: Option<&Path>,
    ) -> PlinthResult<PathBuf> {
        if name.is_empty() || name.contains('/') || name.contains('\\') {
            return Err(PlinthError::PathEscape {
                path: PathBuf::from(name),
            });
        }

        let mut relative = match parent {
            Some(p) => self.contained(p)?,
            None => PathBuf::new(),
        };
        if !relative.as_os_str().is_empty() && !self.root.join(&relative).is_dir() {
            return Err(PlinthError::PageMissing { path: relative });
        }
        relative.push(name);

        if kind == PageKind::Page {
            let has_extension = Path::new(name).extension().is_some();
            if !has_extension {
                relative.set_extension("md");
            }
        }

        let target = self.root.join(&relative);
        if target.exists() {
            return Err(PlinthError::PageExists { path: relative });
        }

        match kind {
            PageKind::Dir => fs::create_dir(&target)?,
            PageKind::Page => {
                let content = if relative.extension().is_some_and(|e| e == "md") {
                    page_template(Path::new(name).file_stem().and_then(|s| s.to_str()).unwrap_or(name))
                } else {
                    String::new()
                };
                fs::write(&target, content)?;
            }
        }

        Ok(relative)
    }

    /// Rename a page or directory in place (the parent directory stays).
    pub fn rename_page(&self, from: &Path, to_name: &str) -> PlinthResult<PathBuf> {
        if to_name.is_empty() || to_name.contains('/') || to_name.contains('\\') {
            return Err(PlinthError::PathEscape {
                path: PathBuf::from(to_name),
            });
        }

        let from = self.contained(from)?;
        let source = self.root.join(&from);
        if !source.exists() {
            return Err(PlinthError::PageMissing { path: from });
        }

        let mut to = from.clone();
        to.set_file_name(to_name);
        let target = self.root.join(&to);
        if target.exists() {
            return Err(PlinthError::PageExists { path: to });
        }

        fs::rename(&source, &target)?;
        Ok(to)
    }

    /// Delete a page (file) or a directory tree.
    pub fn delete_page(&self, path: &Path) -> PlinthResult<()> {
        let relative = self.contained(path)?;
        let target = self.root.join(&relative);
        if !target.exists() {
            return Err(PlinthError::PageMissing { path: relative });
        }
        if target.is_dir() {
            fs::remove_dir_all(&target)?;
        } else {
            fs::remove_file(&target)?;
        }
        Ok(())
    }

    // Normalize a user-supplied path to root-relative and reject anything
    // that would resolve outside the root.
    fn contained(&self, path: &Path) -> PlinthResult<PathBuf> {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return Err(PlinthError::PathEscape {
                path: path.to_path_buf(),
            });
        }
        Ok(relative.to_path_buf())
    }
}

/// Write the starter tree into an (empty) site root.
pub fn scaffold(root: &Path) -> PlinthResult<()> {
    fs::create_dir_all(root.join("_layouts"))?;
    fs::create_dir_all(root.join("_scripts"))?;
    fs::create_dir_all(root.join("assets"))?;
    fs::create_dir_all(root.join("images"))?;
    fs::write(root.join("plinth.toml"), CONFIG_TEMPLATE)?;
    fs::write(root.join("index.md"), INDEX_TEMPLATE)?;
    fs::write(root.join("_layouts/default.html"), LAYOUT_TEMPLATE)?;
    fs::write(root.join("_scripts/deploy.sh"), DEPLOY_TEMPLATE)?;
    fs::write(root.join("assets/.keep"), "")?;
    fs::write(root.join("images/.keep"), "")?;
    Ok(())
}

fn page_template(title: &str) -> String {
    let title = title.replace('"', "\\\"");
    format!("+++\nlayout = \"_layouts/default.html\"\ntitle = \"{title}\"\n+++\n\n# {title}\n")
}

// Template content strings

const CONFIG_TEMPLATE: &str = r#"# Plinth site configuration

[site]
title = "My Site"

[build]
output = "_site"

[serve]
port = 3000

[deploy]
script = "_scripts/deploy.sh"
"#;

const INDEX_TEMPLATE: &str = r#"+++
layout = "_layouts/default.html"
title = "Home"
+++

# Welcome

This site was created with Plinth. Edit `index.md` to get started, then:

- `plinth build` renders the site into `_site/`
- `plinth serve` previews it at <http://localhost:3000>
- `plinth deploy` publishes it with `_scripts/deploy.sh`
"#;

const LAYOUT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>$title</title>
</head>
<body>
$content
</body>
</html>
"#;

// The placeholder deploy script: prints a single reminder line and exits
// successfully until the user replaces it with a real publishing command.
const DEPLOY_TEMPLATE: &str = r#"#!/bin/sh
# Deploy script for this site.
#
# Plinth runs this after a successful build, with the rendered site
# directory as the first argument. Replace the echo below with whatever
# publishes your site, for example:
#
#   rsync -avz "$1"/ user@host:/var/www/site/

echo "deploy.sh is a placeholder - edit _scripts/deploy.sh to publish your site"
"#;
