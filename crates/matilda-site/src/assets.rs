//! Output directory preparation and static asset copying.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Errors that can occur while copying the static tree.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("static directory not found: {0}")]
    MissingRoot(PathBuf),

    #[error("failed to walk static directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("static file escapes its root: {0}")]
    InvalidPath(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Delete a directory tree (if present) and recreate it empty.
pub fn clear_dir(dir: &Path) -> io::Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    fs::create_dir_all(dir)
}

/// Copy every file under `source` into `dest`, preserving relative
/// structure. Returns the number of files copied.
///
/// A missing `source` is an error: the static tree is a required input.
pub fn copy_tree(source: &Path, dest: &Path) -> Result<usize, AssetError> {
    if !source.exists() {
        return Err(AssetError::MissingRoot(source.to_path_buf()));
    }

    let mut copied = 0;

    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path
            .strip_prefix(source)
            .map_err(|_| AssetError::InvalidPath(path.to_path_buf()))?;

        let target = dest.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &target)?;

        tracing::debug!("Copied {}", relative.display());
        copied += 1;
    }

    Ok(copied)
}
