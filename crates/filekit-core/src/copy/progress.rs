use std::fs::File;
use std::io::{self, Read, Write};
use std::num::NonZeroUsize;
use std::path::Path;

use super::observer::{CopyEvent, CopyObserver};
use super::stats::CopyStats;
use crate::errors::{FsError, FsErrorKind, FsResult, IoResultExt};
use crate::options::DEFAULT_BLOCK_SIZE;

/// Copy `src` to `dst` in 4096-byte blocks, reporting progress to `observer`.
///
/// `dst` is created, or truncated if it already exists. A failure part way
/// through leaves whatever was written so far in place.
pub fn copy_file_with_progress<O>(src: &Path, dst: &Path, observer: &mut O) -> FsResult<CopyStats>
where
    O: CopyObserver + ?Sized,
{
    copy_file_with_progress_sized(src, dst, DEFAULT_BLOCK_SIZE, observer)
}

/// Same as [`copy_file_with_progress`] with an explicit block size.
///
/// The length of `src` is taken once before copying; the copy never reads
/// past it, so the reported percentage cannot exceed 100 even if the source
/// grows meanwhile.
pub fn copy_file_with_progress_sized<O>(
    src: &Path,
    dst: &Path,
    block_size: NonZeroUsize,
    observer: &mut O,
) -> FsResult<CopyStats>
where
    O: CopyObserver + ?Sized,
{
    let source = File::open(src).fs_context("open source", src)?;
    let metadata = source.metadata().fs_context("stat", src)?;
    if !metadata.is_file() {
        return Err(FsError::invalid_path("copy", src, "source is not a regular file"));
    }
    let total = metadata.len();
    reject_same_file(src, dst)?;
    let mut dest = File::create(dst).map_err(|err| destination_error(dst, err))?;

    log::debug!(
        "copying {} -> {} ({} bytes, block {})",
        src.display(),
        dst.display(),
        total,
        block_size
    );

    let mut stats = CopyStats::new(total);
    if total == 0 {
        observer.on_event(CopyEvent::Progress {
            percent: 100,
            copied: 0,
            total: 0,
        });
        observer.on_event(CopyEvent::Complete { total: 0 });
        return Ok(stats);
    }

    let mut reader = source.take(total);
    let mut buffer = vec![0u8; block_size.get()];
    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(FsError::from_io("read", Some(src), err)),
        };
        dest.write_all(&buffer[..read]).fs_context("write", dst)?;
        stats.add_block(read as u64);
        observer.on_event(CopyEvent::Progress {
            percent: percentage(stats.bytes_copied, total),
            copied: stats.bytes_copied,
            total,
        });
    }
    dest.flush().fs_context("flush", dst)?;

    if !stats.is_complete() {
        log::warn!(
            "{} shrank during copy: expected {} bytes, copied {}",
            src.display(),
            total,
            stats.bytes_copied
        );
    }
    observer.on_event(CopyEvent::Complete {
        total: stats.bytes_copied,
    });
    Ok(stats)
}

/// `floor(copied * 100 / total)`, clamped to 100. An empty total counts as done.
pub fn percentage(copied: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let scaled = u128::from(copied.min(total)) * 100 / u128::from(total);
    scaled as u8
}

fn destination_error(dst: &Path, err: io::Error) -> FsError {
    // A missing parent is a bad destination, not a missing file.
    if err.kind() == io::ErrorKind::NotFound {
        return FsError::with_kind(FsErrorKind::InvalidPath, "create destination", Some(dst), err);
    }
    FsError::from_io("create destination", Some(dst), err)
}

fn reject_same_file(src: &Path, dst: &Path) -> FsResult<()> {
    // Compares device and inode (file index on Windows), so hard links and
    // symlinks to the source are caught. A missing destination is never the
    // same file.
    if same_file::is_same_file(src, dst).unwrap_or(false) {
        return Err(FsError::invalid_path(
            "copy",
            dst,
            "source and destination are the same file",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::copy::NullObserver;
    use std::fs;
    use tempfile::tempdir;

    fn collect_events(src: &Path, dst: &Path, block: usize) -> (FsResult<CopyStats>, Vec<CopyEvent>) {
        let mut events = Vec::new();
        let result = copy_file_with_progress_sized(
            src,
            dst,
            NonZeroUsize::new(block).unwrap(),
            &mut |event: CopyEvent| events.push(event),
        );
        (result, events)
    }

    fn percents(events: &[CopyEvent]) -> Vec<u8> {
        events
            .iter()
            .filter_map(|event| match event {
                CopyEvent::Progress { percent, .. } => Some(*percent),
                CopyEvent::Complete { .. } => None,
            })
            .collect()
    }

    #[test]
    fn ten_thousand_bytes_report_expected_percentages() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("src.bin");
        let dst = tmp.path().join("dst.bin");
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        fs::write(&src, &data).unwrap();

        let (result, events) = collect_events(&src, &dst, 4096);
        let stats = result.unwrap();

        assert_eq!(percents(&events), vec![40, 81, 100]);
        assert_eq!(events.last(), Some(&CopyEvent::Complete { total: 10_000 }));
        assert_eq!(stats.blocks, 3);
        assert_eq!(fs::read(&dst).unwrap(), data);
    }

    #[test]
    fn empty_source_reports_done_without_dividing() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("empty");
        let dst = tmp.path().join("empty.copy");
        fs::write(&src, b"").unwrap();

        let (result, events) = collect_events(&src, &dst, 4096);
        result.unwrap();

        assert_eq!(percents(&events), vec![100]);
        assert_eq!(events.len(), 2);
        assert!(dst.exists());
        assert_eq!(fs::metadata(&dst).unwrap().len(), 0);
    }

    #[test]
    fn percentages_never_decrease() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("odd.bin");
        let dst = tmp.path().join("odd.copy");
        fs::write(&src, vec![9u8; 12_345]).unwrap();

        let (result, events) = collect_events(&src, &dst, 1000);
        result.unwrap();

        let seen = percents(&events);
        assert_eq!(seen.len(), 13);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(seen.last(), Some(&100));
    }

    #[test]
    fn existing_destination_is_truncated() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("short.txt");
        let dst = tmp.path().join("long.txt");
        fs::write(&src, "new").unwrap();
        fs::write(&dst, "old content that is longer").unwrap();

        copy_file_with_progress(&src, &dst, &mut NullObserver).unwrap();
        assert_eq!(fs::read_to_string(&dst).unwrap(), "new");
    }

    #[test]
    fn missing_source_is_not_found_and_creates_nothing() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("nope");
        let dst = tmp.path().join("out");

        let err = copy_file_with_progress(&src, &dst, &mut NullObserver).unwrap_err();
        assert_eq!(err.kind(), FsErrorKind::NotFound);
        assert!(!dst.exists());
    }

    #[test]
    fn missing_destination_parent_is_invalid_path() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("src.txt");
        fs::write(&src, "data").unwrap();
        let dst = tmp.path().join("no_such_dir").join("out.txt");

        let err = copy_file_with_progress(&src, &dst, &mut NullObserver).unwrap_err();
        assert_eq!(err.kind(), FsErrorKind::InvalidPath);
    }

    #[cfg(unix)]
    #[test]
    fn directory_source_is_rejected() {
        let tmp = tempdir().unwrap();
        let dst = tmp.path().join("out");

        let err = copy_file_with_progress(tmp.path(), &dst, &mut NullObserver).unwrap_err();
        assert_eq!(err.kind(), FsErrorKind::InvalidPath);
        assert!(!dst.exists());
    }

    #[test]
    fn copying_onto_itself_is_rejected() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("self.txt");
        fs::write(&src, "keep me").unwrap();

        let err = copy_file_with_progress(&src, &src, &mut NullObserver).unwrap_err();
        assert_eq!(err.kind(), FsErrorKind::InvalidPath);
        assert_eq!(fs::read_to_string(&src).unwrap(), "keep me");
    }

    #[test]
    fn hard_link_to_source_is_rejected() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("original.txt");
        let link = tmp.path().join("linked.txt");
        fs::write(&src, "keep me").unwrap();
        fs::hard_link(&src, &link).unwrap();

        let err = copy_file_with_progress(&src, &link, &mut NullObserver).unwrap_err();
        assert_eq!(err.kind(), FsErrorKind::InvalidPath);
        assert_eq!(fs::read_to_string(&src).unwrap(), "keep me");
    }

    #[cfg(unix)]
    #[test]
    fn symlink_to_source_is_rejected() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("target.txt");
        let link = tmp.path().join("alias.txt");
        fs::write(&src, "keep me").unwrap();
        std::os::unix::fs::symlink(&src, &link).unwrap();

        let err = copy_file_with_progress(&src, &link, &mut NullObserver).unwrap_err();
        assert_eq!(err.kind(), FsErrorKind::InvalidPath);
        assert_eq!(fs::read_to_string(&src).unwrap(), "keep me");
    }

    #[test]
    fn percentage_floors_and_clamps() {
        assert_eq!(percentage(4096, 10_000), 40);
        assert_eq!(percentage(8192, 10_000), 81);
        assert_eq!(percentage(10_000, 10_000), 100);
        assert_eq!(percentage(20_000, 10_000), 100);
        assert_eq!(percentage(0, 0), 100);
        assert_eq!(percentage(u64::MAX - 1, u64::MAX), 99);
    }
}
