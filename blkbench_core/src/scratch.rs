use crate::error::{BenchError, Result};
use crate::partition::WorkRange;
use crate::segment::Segmentation;

/// Byte written into every decompressed region before a codec's decompress
/// phase, so stale output from the previous codec can never pass validation.
const DECOMPRESSED_FILL: u8 = 0xD6;

/// Working memory for one block index.
///
/// The three regions are independent allocations. They are reused by every
/// codec within one (file, block size) trial and dropped with the pool.
#[derive(Debug)]
pub struct ScratchBuffer {
    /// Copy of the block's source bytes.
    pub raw: Vec<u8>,
    /// Compressed output; its length is the capacity offered to the codec.
    pub compressed: Vec<u8>,
    /// Decompressed output; always exactly `raw.len()` bytes long.
    pub decompressed: Vec<u8>,
    /// Bytes of `compressed` written by the last compress call.
    pub comp_size: usize,
}

impl ScratchBuffer {
    #[inline]
    pub fn raw_size(&self) -> usize {
        self.raw.len()
    }
}

/// Per-trial arena holding one [`ScratchBuffer`] per block.
///
/// Sized from the actual input length. Workers receive disjoint mutable
/// slices of it through [`ScratchPool::split`], so slot access never needs a
/// lock.
#[derive(Debug)]
pub struct ScratchPool {
    slots: Vec<ScratchBuffer>,
}

impl ScratchPool {
    /// Allocate and fill the arena for `data` as segmented by `seg`.
    ///
    /// `compressed_capacity(raw_size)` gives the compressed region size for a
    /// block of `raw_size` bytes. Any failed allocation is reported as
    /// [`BenchError::ResourceExhaustion`].
    pub fn build(
        data: &[u8],
        seg: &Segmentation,
        compressed_capacity: impl Fn(usize) -> usize,
    ) -> Result<Self> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(seg.block_count())
            .map_err(|e| BenchError::exhausted("scratch pool", e.to_string()))?;

        for block in seg.blocks() {
            let src = &data[block.offset..block.offset + block.len];
            let capacity = compressed_capacity(block.len).max(block.len);

            let mut raw = alloc_region(block.len, "raw region")?;
            raw.copy_from_slice(src);
            slots.push(ScratchBuffer {
                raw,
                compressed: alloc_region(capacity, "compressed region")?,
                decompressed: alloc_region(block.len, "decompressed region")?,
                comp_size: 0,
            });
        }

        Ok(Self { slots })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[ScratchBuffer] {
        &self.slots
    }

    /// Total bytes held by the arena across all three regions.
    pub fn footprint(&self) -> usize {
        self.slots
            .iter()
            .map(|s| s.raw.len() + s.compressed.len() + s.decompressed.len())
            .sum()
    }

    /// Forget the previous codec's output before the next codec runs.
    pub fn reset_outputs(&mut self) {
        for slot in &mut self.slots {
            slot.comp_size = 0;
            slot.decompressed.fill(DECOMPRESSED_FILL);
        }
    }

    /// Carve the arena into one mutable slice per range.
    ///
    /// `ranges` must be contiguous, ascending, and cover every slot, which is
    /// what [`crate::partition::partition`] produces.
    pub fn split(&mut self, ranges: &[WorkRange]) -> Vec<&mut [ScratchBuffer]> {
        let mut parts = Vec::with_capacity(ranges.len());
        let mut rest: &mut [ScratchBuffer] = &mut self.slots;
        let mut cursor = 0;
        for range in ranges {
            debug_assert_eq!(range.start, cursor, "work ranges must be contiguous");
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
            parts.push(head);
            rest = tail;
            cursor = range.end;
        }
        debug_assert!(rest.is_empty(), "work ranges must cover every slot");
        parts
    }
}

fn alloc_region(len: usize, what: &'static str) -> Result<Vec<u8>> {
    let mut region = Vec::new();
    region
        .try_reserve_exact(len)
        .map_err(|e| BenchError::exhausted(what, format!("{len} bytes: {e}")))?;
    region.resize(len, 0);
    Ok(region)
}
