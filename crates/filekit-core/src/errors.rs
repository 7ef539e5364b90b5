//! Error categorization for file-system operations.
//!
//! Every failure is reduced to one of four kinds so callers can decide how to
//! react without matching on platform error codes:
//! - NotFound: the path, or one of its parent directories, does not exist
//! - AccessDenied: permissions forbid reading or writing the path
//! - InvalidPath: the path itself is malformed (empty, interior NUL, bad name)
//! - Io: any other failure reported by the operating system

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Category of a file-system failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsErrorKind {
    NotFound,
    AccessDenied,
    InvalidPath,
    Io,
}

impl fmt::Display for FsErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FsErrorKind::NotFound => "not found",
            FsErrorKind::AccessDenied => "access denied",
            FsErrorKind::InvalidPath => "invalid path",
            FsErrorKind::Io => "I/O error",
        };
        f.write_str(label)
    }
}

/// A failed file-system operation with its category.
#[derive(Debug, thiserror::Error)]
#[error("{op}{}: {kind}: {source}", .path.as_ref().map(|p| format!(" {}", p.display())).unwrap_or_default())]
pub struct FsError {
    /// The error category.
    pub kind: FsErrorKind,
    /// Short name of the operation that failed ("open", "copy", ...).
    pub op: &'static str,
    /// The path involved, if any.
    pub path: Option<PathBuf>,
    /// The underlying operating-system error.
    pub source: io::Error,
}

impl FsError {
    /// Wrap an I/O error, deriving the kind from it.
    pub fn from_io(op: &'static str, path: Option<&Path>, source: io::Error) -> Self {
        Self {
            kind: categorize_io_error(&source),
            op,
            path: path.map(Path::to_path_buf),
            source,
        }
    }

    /// Wrap an I/O error under an explicit kind.
    pub fn with_kind(
        kind: FsErrorKind,
        op: &'static str,
        path: Option<&Path>,
        source: io::Error,
    ) -> Self {
        Self {
            kind,
            op,
            path: path.map(Path::to_path_buf),
            source,
        }
    }

    /// Reject a path before touching the file system.
    pub fn invalid_path(op: &'static str, path: &Path, message: &str) -> Self {
        Self::with_kind(
            FsErrorKind::InvalidPath,
            op,
            Some(path),
            io::Error::new(io::ErrorKind::InvalidInput, message.to_owned()),
        )
    }

    pub fn kind(&self) -> FsErrorKind {
        self.kind
    }
}

/// Categorize an I/O error.
pub fn categorize_io_error(err: &io::Error) -> FsErrorKind {
    #[cfg(windows)]
    {
        // ERROR_INVALID_NAME, ERROR_BAD_PATHNAME
        if matches!(err.raw_os_error(), Some(123) | Some(161)) {
            return FsErrorKind::InvalidPath;
        }
    }

    match err.kind() {
        io::ErrorKind::NotFound => FsErrorKind::NotFound,
        io::ErrorKind::PermissionDenied => FsErrorKind::AccessDenied,
        io::ErrorKind::InvalidInput => FsErrorKind::InvalidPath,
        _ => FsErrorKind::Io,
    }
}

/// Attach operation and path context to an `io::Result`.
pub trait IoResultExt<T> {
    fn fs_context(self, op: &'static str, path: &Path) -> FsResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn fs_context(self, op: &'static str, path: &Path) -> FsResult<T> {
        self.map_err(|err| FsError::from_io(op, Some(path), err))
    }
}

/// Result type for file-system operations.
pub type FsResult<T> = std::result::Result<T, FsError>;
