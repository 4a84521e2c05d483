use std::ops::Range;

use crate::error::{BenchError, Result};

/// Half-open interval `[start, end)` of block indices owned by one worker for
/// one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkRange {
    pub start: usize,
    pub end: usize,
}

impl WorkRange {
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Split `[0, block_count)` into `threads` contiguous ranges.
///
/// Worker `i` gets `[i * n / T, (i + 1) * n / T)`. The ranges cover every
/// index exactly once and their lengths differ by at most one. When
/// `block_count < threads` some ranges are empty.
pub fn partition(block_count: usize, threads: usize) -> Result<Vec<WorkRange>> {
    if threads == 0 {
        return Err(BenchError::config("thread count must be at least 1"));
    }
    // u128 keeps i * n from overflowing for any usize inputs.
    let n = block_count as u128;
    let t = threads as u128;
    Ok((0..t)
        .map(|i| WorkRange {
            start: (i * n / t) as usize,
            end: ((i + 1) * n / t) as usize,
        })
        .collect())
}
