use std::num::NonZeroUsize;

/// Default number of characters per chunk produced by the chunked reader.
pub const DEFAULT_CHUNK_SIZE: NonZeroUsize = match NonZeroUsize::new(1024) {
    Some(size) => size,
    None => unreachable!(),
};

/// Default number of bytes moved per iteration of the progress copy loop.
pub const DEFAULT_BLOCK_SIZE: NonZeroUsize = match NonZeroUsize::new(4096) {
    Some(size) => size,
    None => unreachable!(),
};

/// Buffer sizing shared by the chunked reader and the progress copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IoOptions {
    pub chunk_size: NonZeroUsize,
    pub block_size: NonZeroUsize,
}

impl Default for IoOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl IoOptions {
    /// Override the chunk size; zero keeps the current value.
    pub fn with_chunk_size(mut self, chars: usize) -> Self {
        if let Some(size) = NonZeroUsize::new(chars) {
            self.chunk_size = size;
        }
        self
    }

    /// Override the block size; zero keeps the current value.
    pub fn with_block_size(mut self, bytes: usize) -> Self {
        if let Some(size) = NonZeroUsize::new(bytes) {
            self.block_size = size;
        }
        self
    }
}
