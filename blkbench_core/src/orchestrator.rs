use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::codec::Codec;
use crate::config::BenchConfig;
use crate::dispatch::run_phase;
use crate::error::{BenchError, Result};
use crate::result::{BenchResult, Tally};
use crate::scratch::ScratchPool;
use crate::segment::Segmentation;
use crate::source::SourceBuffer;
use crate::trial::{validate, Phase};
use crate::warmup::{warm_up, WarmupReport};

/// Drives a whole benchmark: every file, every block size, every codec.
///
/// # Trial sequence
/// For one (file, block size) pair:
/// ```text
/// segment → build scratch pool
/// baseline:  compress, decompress, validate
/// codec A:   compress, decompress, validate
/// codec B:   ...
/// → one BenchResult → emit → drop pool
/// ```
/// Codecs never run concurrently with each other; only the blocks inside
/// one phase are spread over threads.
pub struct Orchestrator {
    config: BenchConfig,
    baseline: Box<dyn Codec>,
    codecs: Vec<Box<dyn Codec>>,
    warmup_codec: Box<dyn Codec>,
}

impl Orchestrator {
    /// Validate `config` and set up the codec line-up.
    ///
    /// Fails with [`BenchError::Configuration`] before anything is read or
    /// spawned.
    pub fn new(
        mut config: BenchConfig,
        baseline: Box<dyn Codec>,
        codecs: Vec<Box<dyn Codec>>,
        warmup_codec: Box<dyn Codec>,
    ) -> Result<Self> {
        config.validate()?;
        if codecs.is_empty() {
            return Err(BenchError::config("at least one codec is required"));
        }
        Ok(Self {
            config,
            baseline,
            codecs,
            warmup_codec,
        })
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Names of the measured codecs in run order (baseline excluded).
    pub fn codec_names(&self) -> Vec<&'static str> {
        self.codecs.iter().map(|c| c.name()).collect()
    }

    /// Benchmark every file in `files`, handing each result to `emit` as
    /// soon as it is complete.
    ///
    /// Files are processed one after another. The first error stops the run.
    pub fn run<P, F>(&self, files: &[P], mut emit: F) -> Result<()>
    where
        P: AsRef<Path>,
        F: FnMut(&BenchResult<'_>) -> Result<()>,
    {
        self.warm_up()?;

        for path in files {
            let source = SourceBuffer::load(path)?;
            info!(
                file = %source.path().display(),
                bytes = source.len(),
                "benchmarking file"
            );
            for &block_size in &self.config.block_sizes {
                let result = self.run_trial(&source, block_size)?;
                emit(&result)?;
            }
        }
        Ok(())
    }

    /// Run the configured warm-up on all worker threads.
    pub fn warm_up(&self) -> Result<WarmupReport> {
        if self.config.warmup.is_zero() {
            warn!("CPU warm-up disabled; first trials may run at a lower clock");
            return Ok(WarmupReport::default());
        }
        warm_up(&*self.warmup_codec, self.config.threads, self.config.warmup)
    }

    /// Measure one (file, block size) pair.
    pub fn run_trial<'s>(&self, source: &'s SourceBuffer, block_size: usize) -> Result<BenchResult<'s>> {
        let setup = Instant::now();
        let seg = Segmentation::new(source.len(), block_size, self.config.max_blocks)?;
        let mut pool = ScratchPool::build(source.bytes(), &seg, |raw| self.compressed_capacity(raw))?;
        debug!(
            block_size,
            blocks = seg.block_count(),
            footprint = pool.footprint(),
            setup_ms = setup.elapsed().as_secs_f64() * 1000.0,
            "scratch pool ready"
        );

        let tally = Tally::new(
            std::iter::once(self.baseline.name()).chain(self.codecs.iter().map(|c| c.name())),
        );
        let threads = self.config.threads;
        let mut threads_spawned = 0;

        let lineup = std::iter::once(&self.baseline).chain(&self.codecs);
        for (slot, codec) in lineup.enumerate() {
            let codec: &dyn Codec = &**codec;
            pool.reset_outputs();
            threads_spawned += run_phase(Phase::Compress, codec, slot, &mut pool, threads, &tally)?;
            threads_spawned += run_phase(Phase::Decompress, codec, slot, &mut pool, threads, &tally)?;
            validate(codec, pool.slots())?;
        }

        let mut measurements = tally.into_measurements().into_iter();
        let baseline = measurements
            .next()
            .ok_or_else(|| BenchError::codec(self.baseline.name(), "missing baseline measurement"))?;
        let result = BenchResult {
            source,
            block_size,
            block_count: seg.block_count(),
            threads,
            threads_spawned,
            baseline,
            codecs: measurements.collect(),
        };

        info!(
            file = %source.display_name(),
            block_size,
            blocks = result.block_count,
            "trial complete"
        );
        Ok(result)
    }

    /// Compressed region size for a block of `raw` bytes: the safety margin,
    /// widened to the worst codec bound when that is larger.
    fn compressed_capacity(&self, raw: usize) -> usize {
        std::iter::once(&self.baseline)
            .chain(&self.codecs)
            .map(|c| c.bound(raw))
            .fold(raw + self.config.safety_margin, usize::max)
    }
}
