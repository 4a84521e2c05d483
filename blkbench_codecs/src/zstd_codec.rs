use blkbench_core::{BenchError, Codec, Result};

/// Zstandard block codec.
///
/// Each block is compressed independently with `zstd` at the configured
/// level (default: 3), straight into the caller's buffer.
pub struct ZstdCodec {
    /// Compression level (1 = fast / larger, 22 = slow / smallest).
    pub level: i32,
}

impl Default for ZstdCodec {
    fn default() -> Self {
        Self { level: 3 }
    }
}

impl ZstdCodec {
    pub fn new(level: i32) -> Self {
        Self { level }
    }
}

impl Codec for ZstdCodec {
    fn name(&self) -> &'static str {
        "zstd"
    }

    fn compress(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        zstd::bulk::compress_to_buffer(src, dst, self.level)
            .map_err(|e| BenchError::codec(self.name(), e.to_string()))
    }

    fn decompress(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        zstd::bulk::decompress_to_buffer(src, dst)
            .map_err(|e| BenchError::codec(self.name(), e.to_string()))
    }

    fn bound(&self, src_len: usize) -> usize {
        zstd::zstd_safe::compress_bound(src_len)
    }
}
