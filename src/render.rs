//! Markdown rendering
//!
//! Takes site-relative source paths and classifies them into render outputs:
//! Markdown becomes HTML (optionally wrapped in a layout), raw assets pass
//! through untouched, and underscore-prefixed paths are skipped entirely.

use std::fs;
use std::path::{Path, PathBuf};

use markdown::mdast::Node;
use markdown::{Constructs, Options, ParseOptions};
use serde::Deserialize;

use crate::error::{PlinthError, PlinthResult};

/// The things we might produce from rendering a source path
#[derive(Clone, PartialEq, Debug)]
pub enum RenderOutput {
    /// HTML rendered from a Markdown source, destined for the output tree
    Rendered(PathBuf, String),
    /// HTML the preview server should return but the build must not write
    Hidden(PathBuf, String),
    /// A raw file, copied byte-for-byte
    RawFile(PathBuf),
    /// Nothing; the build writes no file and the preview server returns 404
    NoOutput,
    /// A directory; recreated in the output tree
    Dir(PathBuf),
}

/// TOML frontmatter between `+++` fences at the top of a page
#[derive(Debug, Clone, Deserialize)]
pub struct Frontmatter {
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_published")]
    pub published: bool,
}

fn default_published() -> bool {
    true
}

impl Frontmatter {
    fn apply_layout(
        self,
        content: String,
        source: PathBuf,
        root: &Path,
    ) -> PlinthResult<RenderOutput> {
        let title = self.title.unwrap_or_default();
        let wrapped = if let Some(layout) = self.layout {
            let layout_path = root.join(&layout);
            let template =
                fs::read_to_string(&layout_path).map_err(|e| PlinthError::LayoutRead {
                    layout: PathBuf::from(layout),
                    page: source.clone(),
                    message: e.to_string(),
                })?;
            template
                .replace("$title", title.as_str())
                .replace("$content", content.as_str())
        } else {
            content
        };

        let target = source.with_extension("html");
        if self.published {
            Ok(RenderOutput::Rendered(target, wrapped))
        } else {
            Ok(RenderOutput::Hidden(target, wrapped))
        }
    }
}

/// Render one source path (relative to the site root)
pub fn render(source: &Path, root: &Path) -> PlinthResult<RenderOutput> {
    if skipped_path(source) {
        return Ok(RenderOutput::NoOutput);
    }
    if root.join(source).is_dir() {
        return Ok(RenderOutput::Dir(source.to_path_buf()));
    }
    match source.extension().and_then(|e| e.to_str()) {
        Some("md") => render_as_markdown(source, root),
        _ => Ok(RenderOutput::RawFile(source.to_path_buf())),
    }
}

// A path is skipped if any segment starts with an underscore (layouts,
// scripts, the default output directory) or contains `..`.
pub(crate) fn skipped_path(source: &Path) -> bool {
    source.iter().any(|el| match el.to_str() {
        Some("..") => true,
        Some(s) if s.starts_with('_') => true,
        _ => false,
    })
}

fn render_as_markdown(source: &Path, root: &Path) -> PlinthResult<RenderOutput> {
    let absolute = root.join(source);
    let contents = fs::read_to_string(&absolute).map_err(|e| PlinthError::FileRead {
        path: source.to_path_buf(),
        message: e.to_string(),
    })?;

    let options = markdown_options();
    let html = markdown::to_html_with_options(contents.as_str(), &options).map_err(|e| {
        PlinthError::Markdown {
            file: source.to_path_buf(),
            message: e.to_string(),
        }
    })?;
    let ast = markdown::to_mdast(contents.as_str(), &options.parse).map_err(|e| {
        PlinthError::Markdown {
            file: source.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    match find_frontmatter(&ast, source)? {
        Some(frontmatter) => frontmatter.apply_layout(html, source.to_path_buf(), root),
        None => Ok(RenderOutput::Rendered(source.with_extension("html"), html)),
    }
}

// The Markdown dialect: GFM tables plus TOML frontmatter fences.
fn markdown_options() -> Options {
    Options {
        parse: ParseOptions {
            constructs: Constructs {
                frontmatter: true,
                gfm_table: true,
                ..Default::default()
            },
            ..Default::default()
        },
        ..Default::default()
    }
}

fn find_frontmatter(node: &Node, source: &Path) -> PlinthResult<Option<Frontmatter>> {
    let Some(children) = node.children() else {
        return Ok(None);
    };
    for child in children {
        if let Node::Toml(toml_node) = child {
            let frontmatter: Frontmatter =
                toml::from_str(toml_node.value.as_str()).map_err(|e| PlinthError::Frontmatter {
                    file: source.to_path_buf(),
                    message: e.to_string(),
                })?;
            return Ok(Some(frontmatter));
        }
    }
    Ok(None)
}
