use blkbench_core::{BenchError, Codec, Result};

/// Raw-copy baseline: "compresses" a block by copying it verbatim.
///
/// Its timings are the floor every real codec is compared against, since
/// they measure nothing but moving the bytes through the same scratch
/// regions with the same threading.
pub struct CopyCodec;

impl Codec for CopyCodec {
    fn name(&self) -> &'static str {
        "copy"
    }

    fn compress(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        copy_into(self.name(), src, dst)
    }

    fn decompress(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        copy_into(self.name(), src, dst)
    }

    fn bound(&self, src_len: usize) -> usize {
        src_len
    }
}

fn copy_into(name: &'static str, src: &[u8], dst: &mut [u8]) -> Result<usize> {
    let cap = dst.len();
    let dst = dst
        .get_mut(..src.len())
        .ok_or_else(|| BenchError::codec(name, format!("{} bytes do not fit in {cap}", src.len())))?;
    dst.copy_from_slice(src);
    Ok(src.len())
}
