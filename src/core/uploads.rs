//! Saving uploaded files under the static upload directory.
//!
//! A file keeps its name unless that path is taken, in which case `-1`, `-2`, ...
//! is inserted before the extension until a free path is found.

use crate::errors::{Error, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

/// Directory uploads are written to, relative to the working directory
pub const UPLOAD_DIR: &str = "./static/uploads";

#[allow(clippy::expect_used)] // literal pattern
static FILENAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)(\.\S+)$").expect("filename pattern is valid"));

/// Splits `name.ext` into `("name", ".ext")`; the extension is the last dot suffix.
#[must_use]
pub fn split_extension(filename: &str) -> Option<(&str, &str)> {
    let captures = FILENAME_RE.captures(filename)?;
    Some((captures.get(1)?.as_str(), captures.get(2)?.as_str()))
}

/// First free path for `filename` inside `dir`.
///
/// # Errors
/// `Error::MissingExtension` if the name has no extension.
pub async fn resolve_upload_path(dir: &Path, filename: &str) -> Result<PathBuf> {
    let (stem, extension) = split_extension(filename).ok_or_else(|| Error::MissingExtension {
        filename: filename.to_string(),
    })?;

    let mut path = dir.join(filename);
    let mut suffix = 1_u64;
    while tokio::fs::try_exists(&path).await? {
        path = dir.join(format!("{stem}-{suffix}{extension}"));
        suffix += 1;
    }

    Ok(path)
}

/// Writes `bytes` under `dir` using a collision-free variant of `filename`.
///
/// Nothing is written when the name has no extension.
pub async fn save_file(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
    let path = resolve_upload_path(dir, filename).await?;
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(&path, bytes).await?;
    debug!("Saved upload to {}", path.display());
    Ok(path)
}
