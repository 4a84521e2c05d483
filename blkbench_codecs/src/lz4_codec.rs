use blkbench_core::{BenchError, Codec, Result};
use lz4_flex::block::{compress_into, decompress_into, get_maximum_output_size};

/// LZ4 block codec.
///
/// Fastest decompression of all bundled codecs, and no level to tune. Also
/// the codec the warm-up runs, because it keeps every core busy with little
/// setup per call.
pub struct Lz4Codec;

impl Codec for Lz4Codec {
    fn name(&self) -> &'static str {
        "lz4"
    }

    fn compress(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        compress_into(src, dst).map_err(|e| BenchError::codec(self.name(), e.to_string()))
    }

    fn decompress(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        decompress_into(src, dst).map_err(|e| BenchError::codec(self.name(), e.to_string()))
    }

    fn bound(&self, src_len: usize) -> usize {
        get_maximum_output_size(src_len)
    }
}
