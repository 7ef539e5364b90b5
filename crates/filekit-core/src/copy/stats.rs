/// Totals for one completed progress copy.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CopyStats {
    /// Source length measured before the first read.
    pub total_bytes: u64,
    pub bytes_copied: u64,
    /// Number of non-empty blocks written.
    pub blocks: u64,
}

impl CopyStats {
    pub fn new(total_bytes: u64) -> Self {
        Self {
            total_bytes,
            ..Self::default()
        }
    }

    pub fn add_block(&mut self, bytes: u64) {
        self.blocks += 1;
        self.bytes_copied += bytes;
    }

    pub fn is_complete(&self) -> bool {
        self.bytes_copied == self.total_bytes
    }
}
