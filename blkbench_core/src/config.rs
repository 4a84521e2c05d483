use std::thread;
use std::time::Duration;

use crate::error::{BenchError, Result};

/// Default bytes added to every compressed region on top of the raw size.
pub const DEFAULT_SAFETY_MARGIN: usize = 512;

/// Default cap on blocks per (file, block size) trial.
pub const DEFAULT_MAX_BLOCKS: usize = 1 << 22;

/// Default CPU warm-up before the first measured trial.
pub const DEFAULT_WARMUP: Duration = Duration::from_secs(30);

/// Default block sizes, smallest to largest: 4 KB, 16 KB, 64 KB, 256 KB, 1 MB.
pub const DEFAULT_BLOCK_SIZES: &[usize] = &[4 << 10, 16 << 10, 64 << 10, 256 << 10, 1 << 20];

/// Fixed compression levels, one per backend, for a whole experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecLevels {
    /// Zstandard level (1 = fast, 22 = smallest).
    pub zstd: i32,
    /// Deflate level (0 = store, 9 = smallest).
    pub deflate: u32,
}

impl Default for CodecLevels {
    fn default() -> Self {
        Self { zstd: 3, deflate: 6 }
    }
}

/// Everything that shapes a benchmark run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    /// Worker threads per phase. 1 runs every phase on the calling thread.
    pub threads: usize,
    /// Block sizes to try for every file. Sorted ascending by [`validate`](Self::validate).
    pub block_sizes: Vec<usize>,
    /// Extra compressed-region capacity per block. The region is also never
    /// smaller than the largest codec bound for the block.
    pub safety_margin: usize,
    pub max_blocks: usize,
    /// Zero skips warm-up.
    pub warmup: Duration,
    pub levels: CodecLevels,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            threads: 1,
            block_sizes: DEFAULT_BLOCK_SIZES.to_vec(),
            safety_margin: DEFAULT_SAFETY_MARGIN,
            max_blocks: DEFAULT_MAX_BLOCKS,
            warmup: DEFAULT_WARMUP,
            levels: CodecLevels::default(),
        }
    }
}

impl BenchConfig {
    /// Check the config against this machine's logical CPU count, and put the
    /// block sizes in ascending order with duplicates removed.
    pub fn validate(&mut self) -> Result<()> {
        self.validate_for(available_cores()?)
    }

    /// [`validate`](Self::validate) against an explicit core count.
    pub fn validate_for(&mut self, cores: usize) -> Result<()> {
        if self.threads == 0 || self.threads > cores {
            return Err(BenchError::config(format!(
                "thread count {} must be between 1 and {cores} (logical CPUs)",
                self.threads
            )));
        }
        if self.block_sizes.is_empty() {
            return Err(BenchError::config("at least one block size is required"));
        }
        if self.block_sizes.contains(&0) {
            return Err(BenchError::config("block sizes must be greater than zero"));
        }
        if self.max_blocks == 0 {
            return Err(BenchError::config("max blocks must be at least 1"));
        }
        if !(1..=22).contains(&self.levels.zstd) {
            return Err(BenchError::config(format!(
                "zstd level {} is outside 1..=22",
                self.levels.zstd
            )));
        }
        if self.levels.deflate > 9 {
            return Err(BenchError::config(format!(
                "deflate level {} is outside 0..=9",
                self.levels.deflate
            )));
        }
        self.block_sizes.sort_unstable();
        self.block_sizes.dedup();
        Ok(())
    }
}

/// Logical CPUs available to this process.
pub fn available_cores() -> Result<usize> {
    thread::available_parallelism()
        .map(|n| n.get())
        .map_err(|e| BenchError::config(format!("cannot determine logical CPU count: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let mut config = BenchConfig::default();
        config.validate_for(1).unwrap();
        assert_eq!(config.block_sizes, DEFAULT_BLOCK_SIZES);
    }

    #[test]
    fn too_many_threads_is_rejected() {
        let mut config = BenchConfig {
            threads: 9,
            ..Default::default()
        };
        assert!(config.validate_for(8).unwrap_err().is_configuration());
        config.threads = 8;
        assert!(config.validate_for(8).is_ok());
    }

    #[test]
    fn zero_threads_is_rejected() {
        let mut config = BenchConfig {
            threads: 0,
            ..Default::default()
        };
        assert!(config.validate_for(8).unwrap_err().is_configuration());
    }

    #[test]
    fn block_sizes_are_sorted_and_deduplicated() {
        let mut config = BenchConfig {
            block_sizes: vec![65536, 4096, 65536, 16384],
            ..Default::default()
        };
        config.validate_for(1).unwrap();
        assert_eq!(config.block_sizes, vec![4096, 16384, 65536]);
    }

    #[test]
    fn bad_block_sizes_and_levels_are_rejected() {
        for config in [
            BenchConfig {
                block_sizes: vec![],
                ..Default::default()
            },
            BenchConfig {
                block_sizes: vec![4096, 0],
                ..Default::default()
            },
            BenchConfig {
                levels: CodecLevels { zstd: 0, deflate: 6 },
                ..Default::default()
            },
            BenchConfig {
                levels: CodecLevels { zstd: 3, deflate: 10 },
                ..Default::default()
            },
        ] {
            let mut config = config;
            assert!(config.validate_for(4).unwrap_err().is_configuration());
        }
    }
}
