mod copy;
mod deflate_codec;
mod lz4_codec;
mod zstd_codec;

pub use copy::CopyCodec;
pub use deflate_codec::DeflateCodec;
pub use lz4_codec::Lz4Codec;
pub use zstd_codec::ZstdCodec;

use blkbench_core::{BenchConfig, BenchError, Codec, CodecLevels, Orchestrator, Result};

/// Every codec name [`codec_by_name`] accepts, in default run order.
pub const CODEC_NAMES: &[&str] = &["lz4", "zstd", "deflate"];

/// Resolve a codec from its report name, at the level fixed for the run.
pub fn codec_by_name(name: &str, levels: &CodecLevels) -> Result<Box<dyn Codec>> {
    match name {
        "lz4" => Ok(Box::new(Lz4Codec)),
        "zstd" => Ok(Box::new(ZstdCodec::new(levels.zstd))),
        "deflate" => Ok(Box::new(DeflateCodec::new(levels.deflate))),
        other => Err(BenchError::config(format!(
            "unknown codec '{other}'. Valid options: {}",
            CODEC_NAMES.join(", ")
        ))),
    }
}

/// The baseline plus the ordered set of codecs one run measures.
pub struct Lineup {
    pub baseline: Box<dyn Codec>,
    pub codecs: Vec<Box<dyn Codec>>,
    /// Fast codec used to warm the CPUs up.
    pub warmup: Box<dyn Codec>,
}

impl Lineup {
    /// All bundled codecs, in [`CODEC_NAMES`] order.
    pub fn from_levels(levels: &CodecLevels) -> Result<Self> {
        Self::select(CODEC_NAMES, levels)
    }

    /// Only the named codecs, in the given order. Names may not repeat.
    pub fn select<S: AsRef<str>>(names: &[S], levels: &CodecLevels) -> Result<Self> {
        let mut codecs: Vec<Box<dyn Codec>> = Vec::with_capacity(names.len());
        for name in names {
            let codec = codec_by_name(name.as_ref(), levels)?;
            if codecs.iter().any(|c| c.name() == codec.name()) {
                return Err(BenchError::config(format!(
                    "codec '{}' listed more than once",
                    codec.name()
                )));
            }
            codecs.push(codec);
        }
        Ok(Self {
            baseline: Box::new(CopyCodec),
            codecs,
            warmup: Box::new(Lz4Codec),
        })
    }

    /// Build an orchestrator running this line-up under `config`.
    pub fn into_orchestrator(self, config: BenchConfig) -> Result<Orchestrator> {
        Orchestrator::new(config, self.baseline, self.codecs, self.warmup)
    }
}
