//! Lazy, chunked text reading.
//!
//! [`ChunkedReader`] yields the contents of a UTF-8 text file as a sequence of
//! `String`s holding at most `chunk_size` characters each. The file is opened
//! on the first call to `next()`, not when the reader is built, so an
//! unreadable path surfaces as the first element of the sequence.
//!
//! The open file lives inside the iterator and is dropped as soon as the
//! sequence is exhausted, fails, or is abandoned by the consumer.

use std::char::REPLACEMENT_CHARACTER;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::errors::{FsError, FsResult, IoResultExt};
use crate::options::DEFAULT_CHUNK_SIZE;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

enum ReaderState {
    Pending(PathBuf),
    Open {
        path: PathBuf,
        reader: BufReader<File>,
    },
    Finished,
}

/// Single-pass iterator over fixed-size text chunks of a file.
pub struct ChunkedReader {
    state: ReaderState,
    chunk_size: NonZeroUsize,
    buffer: String,
}

impl ChunkedReader {
    /// Reader over `path` with the default chunk size of 1024 characters.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_chunk_size(path, DEFAULT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(path: impl Into<PathBuf>, chunk_size: NonZeroUsize) -> Self {
        Self {
            state: ReaderState::Pending(path.into()),
            chunk_size,
            buffer: String::new(),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size.get()
    }

    /// True while the underlying file handle is held.
    pub fn is_open(&self) -> bool {
        matches!(self.state, ReaderState::Open { .. })
    }

    fn open(path: &Path) -> FsResult<BufReader<File>> {
        let file = File::open(path).fs_context("open", path)?;
        let mut reader = BufReader::new(file);
        skip_bom(&mut reader).fs_context("read", path)?;
        log::debug!("opened {} for chunked reading", path.display());
        Ok(reader)
    }

    /// Fill the reusable buffer with up to `chunk_size` characters.
    fn fill(&mut self) -> Option<FsResult<String>> {
        let ReaderState::Open { path, reader } = &mut self.state else {
            return None;
        };

        self.buffer.clear();
        let mut filled = 0;
        while filled < self.chunk_size.get() {
            match next_char(reader) {
                Ok(Some(ch)) => {
                    self.buffer.push(ch);
                    filled += 1;
                }
                Ok(None) => break,
                Err(err) => {
                    let err = FsError::from_io("read", Some(path.as_path()), err);
                    self.state = ReaderState::Finished;
                    return Some(Err(err));
                }
            }
        }

        if filled == 0 {
            log::debug!("finished chunked reading of {}", path.display());
            self.state = ReaderState::Finished;
            return None;
        }
        Some(Ok(self.buffer.clone()))
    }
}

impl Iterator for ChunkedReader {
    type Item = FsResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if let ReaderState::Pending(path) = &self.state {
            let path = path.clone();
            match Self::open(&path) {
                Ok(reader) => {
                    self.buffer.reserve(self.chunk_size.get());
                    self.state = ReaderState::Open { path, reader };
                }
                Err(err) => {
                    self.state = ReaderState::Finished;
                    return Some(Err(err));
                }
            }
        }
        self.fill()
    }
}

impl std::iter::FusedIterator for ChunkedReader {}

/// Chunked reader over `path` using the default chunk size.
pub fn read_file_in_chunks(path: impl Into<PathBuf>) -> ChunkedReader {
    ChunkedReader::new(path)
}

fn skip_bom(reader: &mut BufReader<File>) -> io::Result<()> {
    let buf = reader.fill_buf()?;
    if buf.starts_with(&UTF8_BOM) {
        reader.consume(UTF8_BOM.len());
    }
    Ok(())
}

fn read_byte<R: BufRead>(reader: &mut R) -> io::Result<Option<u8>> {
    loop {
        match reader.fill_buf() {
            Ok(buf) => {
                let Some(&byte) = buf.first() else {
                    return Ok(None);
                };
                reader.consume(1);
                return Ok(Some(byte));
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
}

fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

/// Decode one character, substituting U+FFFD for malformed sequences.
/// A continuation byte that does not fit is left in the stream.
fn next_char<R: BufRead>(reader: &mut R) -> io::Result<Option<char>> {
    let Some(lead) = read_byte(reader)? else {
        return Ok(None);
    };

    let width = utf8_width(lead);
    if width == 1 {
        return Ok(Some(char::from(lead)));
    }
    if width == 0 {
        return Ok(Some(REPLACEMENT_CHARACTER));
    }

    let mut bytes = [lead, 0, 0, 0];
    for slot in bytes.iter_mut().take(width).skip(1) {
        let next = loop {
            match reader.fill_buf() {
                Ok(buf) => break buf.first().copied(),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        };
        match next {
            Some(byte) if byte & 0xC0 == 0x80 => {
                *slot = byte;
                reader.consume(1);
            }
            _ => return Ok(Some(REPLACEMENT_CHARACTER)),
        }
    }

    let decoded = std::str::from_utf8(&bytes[..width])
        .ok()
        .and_then(|s| s.chars().next())
        .unwrap_or(REPLACEMENT_CHARACTER);
    Ok(Some(decoded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FsErrorKind;
    use std::fs;
    use tempfile::tempdir;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn chunks_reassemble_original_content() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("text.txt");
        let content = "abcdefghij".repeat(25);
        fs::write(&path, &content).unwrap();

        let chunks: Vec<String> = ChunkedReader::with_chunk_size(&path, size(64))
            .collect::<FsResult<_>>()
            .unwrap();

        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[3].chars().count(), 250 - 3 * 64);
        assert_eq!(chunks.concat(), content);
    }

    #[test]
    fn exact_multiple_has_no_short_tail() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("even.txt");
        fs::write(&path, "x".repeat(30)).unwrap();

        let chunks: Vec<String> = ChunkedReader::with_chunk_size(&path, size(10))
            .collect::<FsResult<_>>()
            .unwrap();

        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.len() == 10));
    }

    #[test]
    fn empty_file_yields_nothing() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("empty.txt");
        fs::write(&path, "").unwrap();

        let mut reader = ChunkedReader::new(&path);
        assert!(reader.next().is_none());
        assert!(!reader.is_open());
    }

    #[test]
    fn open_failure_is_deferred_to_first_element() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("missing.txt");

        let mut reader = ChunkedReader::new(&path);
        assert!(!reader.is_open());

        let err = reader.next().unwrap().unwrap_err();
        assert_eq!(err.kind(), FsErrorKind::NotFound);
        assert!(reader.next().is_none());
    }

    #[test]
    fn chunk_size_counts_characters_not_bytes() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("wide.txt");
        fs::write(&path, "héllo wörld €uro").unwrap();

        let chunks: Vec<String> = ChunkedReader::with_chunk_size(&path, size(4))
            .collect::<FsResult<_>>()
            .unwrap();

        assert_eq!(chunks[0], "héll");
        assert_eq!(chunks[3], "€uro");
        assert_eq!(chunks.concat(), "héllo wörld €uro");
    }

    #[test]
    fn leading_bom_is_skipped() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("bom.txt");
        fs::write(&path, b"\xEF\xBB\xBFabc").unwrap();

        let chunks: Vec<String> = ChunkedReader::new(&path).collect::<FsResult<_>>().unwrap();
        assert_eq!(chunks, vec!["abc".to_string()]);
    }

    #[test]
    fn malformed_bytes_become_replacement_characters() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("broken.txt");
        fs::write(&path, b"a\xFFb\xC3(").unwrap();

        let text: String = ChunkedReader::new(&path)
            .collect::<FsResult<Vec<_>>>()
            .unwrap()
            .concat();
        assert_eq!(text, "a\u{FFFD}b\u{FFFD}(");
    }

    /// Paths currently held open by this process.
    #[cfg(target_os = "linux")]
    fn open_paths() -> Vec<PathBuf> {
        fs::read_dir("/proc/self/fd")
            .unwrap()
            .filter_map(|entry| fs::read_link(entry.ok()?.path()).ok())
            .collect()
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn dropping_early_releases_handle() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("long.txt");
        fs::write(&path, "z".repeat(100)).unwrap();
        let real = fs::canonicalize(&path).unwrap();

        let mut reader = ChunkedReader::with_chunk_size(&path, size(10));
        assert!(!open_paths().contains(&real));

        assert_eq!(reader.next().unwrap().unwrap().len(), 10);
        assert!(reader.is_open());
        assert!(open_paths().contains(&real));

        drop(reader);
        assert!(!open_paths().contains(&real));
    }

    #[cfg(windows)]
    #[test]
    fn dropping_early_releases_handle() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("long.txt");
        fs::write(&path, "z".repeat(100)).unwrap();

        let mut reader = ChunkedReader::with_chunk_size(&path, size(10));
        assert_eq!(reader.next().unwrap().unwrap().len(), 10);
        assert!(reader.is_open());
        drop(reader);

        // Deleting a file with an open handle fails on Windows.
        fs::remove_file(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn exhaustion_closes_handle() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("short.txt");
        fs::write(&path, "abc").unwrap();

        let mut reader = ChunkedReader::with_chunk_size(&path, size(2));
        assert_eq!(reader.next().unwrap().unwrap(), "ab");
        assert_eq!(reader.next().unwrap().unwrap(), "c");
        assert!(reader.next().is_none());
        assert!(!reader.is_open());
        assert!(reader.next().is_none());
    }
}
