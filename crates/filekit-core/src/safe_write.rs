//! Text writes that report expected failures as `false` instead of an error.

use std::path::Path;

use crate::errors::{FsError, FsErrorKind, FsResult};
use crate::paths::is_valid_file_name;
use crate::text::write_all_text;

/// Write `contents` to `path`, replacing any existing file.
///
/// Returns `Ok(true)` on success. Access-denied, missing-directory and other
/// I/O failures are logged and reported as `Ok(false)`. A malformed path is
/// a caller bug and comes back as `Err` with [`FsErrorKind::InvalidPath`].
pub fn safe_write_all_text(path: &Path, contents: &str) -> FsResult<bool> {
    if path.as_os_str().is_empty() {
        return Err(FsError::invalid_path("write", path, "path is empty"));
    }
    if let Some(name) = path.file_name() {
        if !is_valid_file_name(&name.to_string_lossy()) {
            return Err(FsError::invalid_path("write", path, "invalid file name"));
        }
    }

    match write_all_text(path, contents) {
        Ok(()) => Ok(true),
        Err(err) => match err.kind() {
            FsErrorKind::AccessDenied => {
                log::warn!("access denied writing {}", path.display());
                Ok(false)
            }
            FsErrorKind::NotFound => {
                log::warn!("directory not found for {}", path.display());
                Ok(false)
            }
            FsErrorKind::Io => {
                log::warn!("I/O error writing {}: {}", path.display(), err.source);
                Ok(false)
            }
            FsErrorKind::InvalidPath => Err(err),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn writes_exact_content() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("ok.txt");

        assert!(safe_write_all_text(&path, "line one\nline two").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "line one\nline two");
    }

    #[test]
    fn missing_parent_reports_false() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("absent").join("file.txt");

        assert!(!safe_write_all_text(&path, "data").unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn directory_target_reports_false() {
        let tmp = tempdir().unwrap();

        assert!(!safe_write_all_text(tmp.path(), "data").unwrap());
    }

    #[test]
    fn empty_path_propagates() {
        let err = safe_write_all_text(Path::new(""), "data").unwrap_err();
        assert_eq!(err.kind(), FsErrorKind::InvalidPath);
    }

    #[test]
    fn interior_nul_propagates() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("bad\0name.txt");

        let err = safe_write_all_text(&path, "data").unwrap_err();
        assert_eq!(err.kind(), FsErrorKind::InvalidPath);
    }

    #[test]
    fn invalid_file_name_propagates_without_writing() {
        let tmp = tempdir().unwrap();
        let name = if cfg!(windows) { "bad|name.txt" } else { "bad\0name.txt" };
        let path = tmp.path().join(name);

        let err = safe_write_all_text(&path, "data").unwrap_err();
        assert_eq!(err.kind(), FsErrorKind::InvalidPath);
        assert!(err.to_string().contains("invalid file name"));
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn read_only_directory_reports_false() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempdir().unwrap();
        let locked = tmp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        let target = locked.join("file.txt");
        let probe = fs::write(&target, "probe");
        if probe.is_ok() {
            // Running as root; permissions are not enforced.
            return;
        }

        assert!(!safe_write_all_text(&target, "data").unwrap());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    }
}
