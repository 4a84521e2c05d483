use crate::error::{BenchError, Result};

/// One block of a source buffer: `len` bytes starting at `offset`.
///
/// Blocks are never materialized; this is just the arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub index: usize,
    pub offset: usize,
    pub len: usize,
}

/// Fixed-size segmentation of a buffer of `len` bytes.
///
/// Every block is `block_size` bytes except the last, which holds the
/// remainder (or a full block when `len` divides evenly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segmentation {
    len: usize,
    block_size: usize,
    block_count: usize,
}

impl Segmentation {
    /// Segment `len` bytes into `block_size` chunks.
    ///
    /// Fails if `block_size` is zero, or if the resulting block count is over
    /// `max_blocks`.
    pub fn new(len: usize, block_size: usize, max_blocks: usize) -> Result<Self> {
        if block_size == 0 {
            return Err(BenchError::config("block size must be greater than zero"));
        }
        let block_count = len.div_ceil(block_size);
        if block_count > max_blocks {
            return Err(BenchError::exhausted(
                "block count",
                format!(
                    "{len} bytes at block size {block_size} needs {block_count} blocks, limit is {max_blocks}"
                ),
            ));
        }
        Ok(Self {
            len,
            block_size,
            block_count,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    #[inline]
    pub fn block_count(&self) -> usize {
        self.block_count
    }

    /// Block `index`, or `None` past the end.
    pub fn block(&self, index: usize) -> Option<Block> {
        if index >= self.block_count {
            return None;
        }
        let offset = index * self.block_size;
        let len = self.block_size.min(self.len - offset);
        Some(Block { index, offset, len })
    }

    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        (0..self.block_count).filter_map(move |i| self.block(i))
    }
}
