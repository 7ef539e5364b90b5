//! Whole-file and line-oriented text helpers.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::errors::{FsError, FsResult, IoResultExt};

const UTF8_BOM: &str = "\u{FEFF}";

/// Size and timestamps of a regular file.
#[derive(Debug, Clone)]
pub struct FileDetails {
    pub path: PathBuf,
    pub size: u64,
    /// Not every platform or file system records a creation time.
    pub created: Option<DateTime<Local>>,
    pub modified: Option<DateTime<Local>>,
}

/// Create or truncate `path` and write `contents`.
pub fn write_all_text(path: &Path, contents: &str) -> FsResult<()> {
    fs::write(path, contents).fs_context("write", path)
}

/// Create or truncate `path` and write raw bytes.
pub fn write_bytes(path: &Path, data: &[u8]) -> FsResult<()> {
    fs::write(path, data).fs_context("write", path)
}

/// Read a whole file as text. A leading BOM is dropped and malformed UTF-8
/// is replaced with U+FFFD.
pub fn read_all_text(path: &Path) -> FsResult<String> {
    let bytes = fs::read(path).fs_context("read", path)?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.strip_prefix(UTF8_BOM).unwrap_or(&*text).to_owned())
}

/// Append `contents`, creating the file if needed.
pub fn append_all_text(path: &Path, contents: &str) -> FsResult<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .fs_context("open", path)?;
    file.write_all(contents.as_bytes()).fs_context("append", path)
}

/// Create or truncate `path` and write each line followed by `\n`.
pub fn write_all_lines<I, S>(path: &Path, lines: I) -> FsResult<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let file = File::create(path).fs_context("create", path)?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{}", line.as_ref()).fs_context("write", path)?;
    }
    writer.flush().fs_context("flush", path)
}

/// Read every line. `\r\n` and `\n` both end a line; a final newline does not
/// produce a trailing empty entry.
pub fn read_all_lines(path: &Path) -> FsResult<Vec<String>> {
    let text = read_all_text(path)?;
    Ok(text.lines().map(str::to_owned).collect())
}

/// True only for an existing regular file.
pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

pub fn file_details(path: &Path) -> FsResult<FileDetails> {
    let metadata = fs::metadata(path).fs_context("stat", path)?;
    if !metadata.is_file() {
        return Err(FsError::invalid_path("stat", path, "not a regular file"));
    }
    Ok(FileDetails {
        path: path.to_path_buf(),
        size: metadata.len(),
        created: metadata.created().ok().map(DateTime::<Local>::from),
        modified: metadata.modified().ok().map(DateTime::<Local>::from),
    })
}

/// Lazy iterator of `(line_number, line)` pairs, numbered from 1.
///
/// Decodes the same way as [`read_all_text`]: a leading BOM is skipped and
/// malformed UTF-8 becomes U+FFFD. `\n` and `\r\n` both end a line.
pub struct NumberedLines {
    path: PathBuf,
    reader: BufReader<File>,
    buf: Vec<u8>,
    number: usize,
}

impl Iterator for NumberedLines {
    type Item = FsResult<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => return None,
            Ok(_) => {}
            Err(err) => {
                return Some(Err(FsError::from_io(
                    "read",
                    Some(self.path.as_path()),
                    err,
                )))
            }
        }

        let mut line: &[u8] = &self.buf;
        if let Some(rest) = line.strip_suffix(b"\n") {
            line = rest.strip_suffix(b"\r").unwrap_or(rest);
        }
        if self.number == 0 {
            line = line.strip_prefix(UTF8_BOM.as_bytes()).unwrap_or(line);
        }

        self.number += 1;
        Some(Ok((self.number, String::from_utf8_lossy(line).into_owned())))
    }
}

pub fn numbered_lines(path: &Path) -> FsResult<NumberedLines> {
    let file = File::open(path).fs_context("open", path)?;
    Ok(NumberedLines {
        path: path.to_path_buf(),
        reader: BufReader::new(file),
        buf: Vec::new(),
        number: 0,
    })
}
