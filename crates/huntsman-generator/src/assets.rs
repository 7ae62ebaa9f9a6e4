//! Static asset copying.
//!
//! Mirrors the static directory into the output root, file by file.

use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Asset processing errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// IO error.
    #[error("failed to copy {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed.
    #[error("failed to walk static directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Invalid asset path.
    #[error("invalid asset path: {0}")]
    InvalidPath(PathBuf),
}

/// Result type for asset operations.
pub type Result<T> = std::result::Result<T, AssetError>;

/// Copy every file under `source_dir` into `dest_dir`, keeping relative paths
/// and modification times. Returns the number of files copied.
///
/// A missing source directory copies nothing.
pub fn copy_static(source_dir: &Path, dest_dir: &Path) -> Result<usize> {
    if !source_dir.is_dir() {
        debug!(dir = %source_dir.display(), "static directory does not exist, skipping");
        return Ok(0);
    }

    info!(
        source = %source_dir.display(),
        dest = %dest_dir.display(),
        "copying static assets"
    );

    let mut count = 0;
    for entry in WalkDir::new(source_dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(source_dir)
            .map_err(|_| AssetError::InvalidPath(entry.path().to_path_buf()))?;
        let dest = dest_dir.join(relative);

        copy_file(entry.path(), &dest).map_err(|source| AssetError::Io {
            path: entry.path().to_path_buf(),
            source,
        })?;
        debug!(path = %relative.display(), "copied asset");
        count += 1;
    }

    info!(count, "static assets copied");
    Ok(count)
}

/// Copy contents and permissions, then carry over the modification time.
fn copy_file(src: &Path, dest: &Path) -> std::io::Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dest)?;

    let modified = fs::metadata(src)?.modified()?;
    File::options().write(true).open(dest)?.set_modified(modified)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use super::*;

    #[test]
    fn test_copy_preserves_tree() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();

        fs::create_dir_all(src.path().join("assets/img")).unwrap();
        fs::write(src.path().join("favicon.ico"), "icon").unwrap();
        fs::write(src.path().join("assets/site.css"), "body {}").unwrap();
        fs::write(src.path().join("assets/img/logo.svg"), "<svg/>").unwrap();
        fs::create_dir_all(src.path().join("empty")).unwrap();

        let count = copy_static(src.path(), dest.path()).unwrap();

        assert_eq!(count, 3);
        assert_eq!(
            fs::read_to_string(dest.path().join("assets/site.css")).unwrap(),
            "body {}"
        );
        assert!(dest.path().join("assets/img/logo.svg").is_file());
        assert!(dest.path().join("favicon.ico").is_file());
    }

    #[test]
    fn test_copy_keeps_mtime() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let file = src.path().join("old.txt");
        fs::write(&file, "x").unwrap();

        let past = SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000);
        File::options()
            .write(true)
            .open(&file)
            .unwrap()
            .set_modified(past)
            .unwrap();

        copy_static(src.path(), dest.path()).unwrap();

        let copied = fs::metadata(dest.path().join("old.txt")).unwrap();
        assert_eq!(copied.modified().unwrap(), past);
    }

    #[test]
    fn test_missing_source_is_noop() {
        let dest = tempfile::tempdir().unwrap();
        let count = copy_static(&dest.path().join("nope"), dest.path()).unwrap();
        assert_eq!(count, 0);
    }
}
