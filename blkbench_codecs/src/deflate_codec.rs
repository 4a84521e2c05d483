use blkbench_core::{BenchError, Codec, Result};
use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};

/// Raw deflate (no zlib or gzip framing) via `flate2`.
///
/// A fresh stream is set up for every block, matching the one-shot call
/// pattern of the other codecs.
pub struct DeflateCodec {
    /// Compression level (0 = store, 9 = smallest).
    pub level: u32,
}

impl Default for DeflateCodec {
    fn default() -> Self {
        Self { level: 6 }
    }
}

impl DeflateCodec {
    pub fn new(level: u32) -> Self {
        Self { level }
    }
}

impl Codec for DeflateCodec {
    fn name(&self) -> &'static str {
        "deflate"
    }

    fn compress(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        let mut stream = Compress::new(Compression::new(self.level), false);
        let status = stream
            .compress(src, dst, FlushCompress::Finish)
            .map_err(|e| BenchError::codec(self.name(), e.to_string()))?;
        if status != Status::StreamEnd {
            return Err(BenchError::codec(
                self.name(),
                format!("output buffer of {} bytes too small for {} input bytes", dst.len(), src.len()),
            ));
        }
        Ok(stream.total_out() as usize)
    }

    fn decompress(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        let mut stream = Decompress::new(false);
        let status = stream
            .decompress(src, dst, FlushDecompress::Finish)
            .map_err(|e| BenchError::codec(self.name(), e.to_string()))?;
        if status != Status::StreamEnd {
            return Err(BenchError::codec(
                self.name(),
                format!("stream did not end within {} output bytes", dst.len()),
            ));
        }
        Ok(stream.total_out() as usize)
    }

    /// zlib's `compressBound`, which also covers raw deflate.
    fn bound(&self, src_len: usize) -> usize {
        src_len + (src_len >> 12) + (src_len >> 14) + (src_len >> 25) + 13
    }
}
