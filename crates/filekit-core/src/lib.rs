//! File-system utilities: chunked text reading, block copy with progress,
//! failure-tolerant writes, and small helpers for text files, directories,
//! binary encoding and paths.

pub mod binary;
pub mod chunked;
pub mod copy;
pub mod directory;
pub mod errors;
pub mod options;
pub mod paths;
pub mod safe_write;
pub mod text;

pub use chunked::{read_file_in_chunks, ChunkedReader};
pub use copy::{copy_file_with_progress, CopyEvent, CopyObserver, CopyStats};
pub use errors::{FsError, FsErrorKind, FsResult};
pub use options::IoOptions;
pub use safe_write::safe_write_all_text;
