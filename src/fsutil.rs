//! Atomic file writes and content hashing

use std::fs;
use std::io::Write;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::PlinthResult;

/// Write content to a file atomically
///
/// Uses tempfile + rename so readers never observe a half-written file.
/// Parent directories are created as needed.
pub fn atomic_write(path: &Path, content: &[u8]) -> PlinthResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => std::path::PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&parent)?;
    tmp.write_all(content)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Compute SHA-256 hash of content
pub fn hash_content(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("sha256:{:x}", hasher.finalize())
}

/// Compute SHA-256 hash of a file
pub fn hash_file(path: &Path) -> PlinthResult<String> {
    let content = fs::read(path)?;
    Ok(hash_content(&content))
}
