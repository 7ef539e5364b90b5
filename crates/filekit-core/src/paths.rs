//! Path decomposition and temp-file helpers.
//!
//! Everything here delegates to `std::path` for the current platform; no
//! separator or case normalization is attempted.

use std::path::{Component, Path, PathBuf};

use crate::errors::{FsError, FsResult};

/// The pieces of a path, as the platform understands them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParts {
    /// Parent directory; `None` for a bare file name or a root.
    pub directory: Option<PathBuf>,
    pub file_name: Option<String>,
    /// File name without its final extension.
    pub stem: Option<String>,
    /// Final extension without the leading dot.
    pub extension: Option<String>,
    /// Drive prefix and/or root separator; `None` for relative paths.
    pub root: Option<PathBuf>,
}

impl PathParts {
    pub fn of(path: &Path) -> Self {
        let lossy = |s: &std::ffi::OsStr| s.to_string_lossy().into_owned();

        let root: PathBuf = path
            .components()
            .take_while(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
            .collect();

        Self {
            directory: path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf),
            file_name: path.file_name().map(lossy),
            stem: path.file_stem().map(lossy),
            extension: path.extension().map(lossy),
            root: (!root.as_os_str().is_empty()).then_some(root),
        }
    }
}

/// Join path segments. A rooted segment replaces everything before it.
pub fn combine<I, P>(parts: I) -> PathBuf
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut combined = PathBuf::new();
    for part in parts {
        combined.push(part);
    }
    combined
}

pub fn temp_dir() -> PathBuf {
    std::env::temp_dir()
}

/// Create a uniquely named, empty file in the temp directory and keep it.
pub fn create_temp_file() -> FsResult<PathBuf> {
    let dir = temp_dir();
    let named = tempfile::Builder::new()
        .prefix("tmp")
        .suffix(".tmp")
        .tempfile_in(&dir)
        .map_err(|err| FsError::from_io("create_temp", Some(&dir), err))?;
    let (_file, path) = named
        .keep()
        .map_err(|err| FsError::from_io("create_temp", Some(&dir), err.error))?;
    Ok(path)
}

/// Characters the current platform rejects inside a single file name.
pub fn invalid_file_name_chars() -> Vec<char> {
    #[cfg(windows)]
    {
        let mut chars: Vec<char> = (0u8..32).map(char::from).collect();
        chars.extend(['"', '<', '>', '|', ':', '*', '?', '\\', '/']);
        chars
    }
    #[cfg(not(windows))]
    {
        vec!['\0', '/']
    }
}

/// True if `name` can be used as a single path component.
pub fn is_valid_file_name(name: &str) -> bool {
    if name.is_empty() || name == "." || name == ".." {
        return false;
    }
    let invalid = invalid_file_name_chars();
    !name.chars().any(|c| invalid.contains(&c))
}
