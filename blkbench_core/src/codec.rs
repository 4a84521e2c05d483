use crate::error::Result;

/// Uniform contract every benchmarked backend satisfies.
///
/// Each `Codec` implementation:
/// - Works on caller-owned buffers. `dst.len()` is the capacity; the return
///   value is how many bytes were written. Nothing is allocated per call by
///   the harness, so allocations a backend makes internally are part of what
///   it is measured on.
/// - Compresses every block independently. No state may carry over from one
///   call to the next, which is what allows any block range to be handed to
///   any thread.
/// - Runs at one fixed level chosen at construction time.
///
/// Any error is fatal for the whole run; see [`crate::BenchError::Codec`].
pub trait Codec: Send + Sync {
    /// Short name used in logs and report columns.
    fn name(&self) -> &'static str;

    /// Compress `src` into `dst`, returning the compressed size.
    fn compress(&self, src: &[u8], dst: &mut [u8]) -> Result<usize>;

    /// Decompress `src` into `dst`, returning the decompressed size.
    ///
    /// `dst.len()` is exactly the original block length.
    fn decompress(&self, src: &[u8], dst: &mut [u8]) -> Result<usize>;

    /// Worst-case compressed size for an input of `src_len` bytes.
    fn bound(&self, src_len: usize) -> usize;
}
