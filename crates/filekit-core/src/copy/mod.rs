mod observer;
mod progress;
mod stats;

pub use observer::{ChannelObserver, CopyEvent, CopyObserver, NullObserver};
pub use progress::{copy_file_with_progress, copy_file_with_progress_sized, percentage};
pub use stats::CopyStats;
