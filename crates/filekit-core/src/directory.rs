//! Directory creation, listing and removal.
//!
//! Flat listings read one directory level; the recursive listing walks the
//! whole tree with `walkdir`. All listings are sorted by file name so output
//! is stable across platforms.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::{FsError, FsResult, IoResultExt};

/// Create `path` and any missing parents. Returns `true` if anything was
/// created.
pub fn ensure_dir(path: &Path) -> FsResult<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(path).fs_context("create_dir", path)?;
    log::debug!("created directory {}", path.display());
    Ok(true)
}

/// Regular files directly inside `dir`.
pub fn list_files(dir: &Path) -> FsResult<Vec<PathBuf>> {
    list_children(dir, |file_type| file_type.is_file())
}

/// Directories directly inside `dir`.
pub fn list_subdirectories(dir: &Path) -> FsResult<Vec<PathBuf>> {
    list_children(dir, |file_type| file_type.is_dir())
}

/// Every regular file below `dir`, at any depth. Symlinks are not followed.
pub fn list_files_recursive(dir: &Path) -> FsResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for next in WalkDir::new(dir).sort_by_file_name() {
        let entry = match next {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().map(Path::to_path_buf);
                let source = err
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("file system loop detected"));
                return Err(FsError::from_io(
                    "walk",
                    Some(path.as_deref().unwrap_or(dir)),
                    source,
                ));
            }
        };
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

pub fn current_dir() -> FsResult<PathBuf> {
    std::env::current_dir().map_err(|err| FsError::from_io("current_dir", None, err))
}

/// Remove a file, or a directory and everything in it. A missing path is not
/// an error.
pub fn remove_path(path: &Path) -> FsResult<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(FsError::from_io("stat", Some(path), err)),
    };
    if metadata.is_dir() {
        fs::remove_dir_all(path).fs_context("remove_dir", path)
    } else {
        fs::remove_file(path).fs_context("remove_file", path)
    }
}

fn list_children<F>(dir: &Path, keep: F) -> FsResult<Vec<PathBuf>>
where
    F: Fn(&fs::FileType) -> bool,
{
    let mut children = Vec::new();
    for entry in fs::read_dir(dir).fs_context("read_dir", dir)? {
        let entry = entry.fs_context("read_dir", dir)?;
        let file_type = entry.file_type().fs_context("stat", &entry.path())?;
        if keep(&file_type) {
            children.push(entry.path());
        }
    }
    children.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(children)
}
