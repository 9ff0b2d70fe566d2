//! Error types for Plinth
//!
//! Library errors use `thiserror`; the binary layer wraps them with `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Plinth operations
pub type PlinthResult<T> = Result<T, PlinthError>;

/// Main error type for Plinth operations
#[derive(Error, Debug)]
pub enum PlinthError {
    /// Site root does not exist
    #[error("site root not found: {path}")]
    SiteNotFound { path: PathBuf },

    /// Refusing to scaffold into a populated directory
    #[error("site root {path} is not empty - use --force to scaffold anyway")]
    SiteNotEmpty { path: PathBuf },

    /// A source file could not be read
    #[error("cannot read {path}: {message}")]
    FileRead { path: PathBuf, message: String },

    /// Markdown failed to parse
    #[error("invalid markdown in {file}: {message}")]
    Markdown { file: PathBuf, message: String },

    /// TOML frontmatter failed to parse
    #[error("invalid frontmatter in {file}: {message}")]
    Frontmatter { file: PathBuf, message: String },

    /// The layout a page names could not be read
    #[error("cannot read layout {layout} (used by {page}): {message}")]
    LayoutRead {
        layout: PathBuf,
        page: PathBuf,
        message: String,
    },

    /// Target of a page operation already exists
    #[error("page already exists: {path}")]
    PageExists { path: PathBuf },

    /// Source of a page operation does not exist
    #[error("page not found: {path}")]
    PageMissing { path: PathBuf },

    /// A page name or path would land outside the site root
    #[error("path '{path}' escapes the site root")]
    PathEscape { path: PathBuf },

    /// Invalid configuration file
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Deploy script is missing
    #[error("deploy script not found: {path} - run 'plinth init' or set [deploy] script in plinth.toml")]
    DeployScriptMissing { path: PathBuf },

    /// File watcher failure
    #[error("watch error: {message}")]
    Watch { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
