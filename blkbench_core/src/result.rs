use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::source::SourceBuffer;
use crate::trial::{Phase, TrialOutcome};

/// Totals for one codec within one trial.
///
/// Times are the sum of every worker's own elapsed time for the phase, not
/// the wall-clock span of the phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecMeasurement {
    pub codec: &'static str,
    pub compressed_bytes: u64,
    pub restored_bytes: u64,
    pub compress_time: Duration,
    pub decompress_time: Duration,
}

impl CodecMeasurement {
    pub fn new(codec: &'static str) -> Self {
        Self {
            codec,
            compressed_bytes: 0,
            restored_bytes: 0,
            compress_time: Duration::ZERO,
            decompress_time: Duration::ZERO,
        }
    }

    pub fn compress_nanos(&self) -> u128 {
        self.compress_time.as_nanos()
    }

    pub fn decompress_nanos(&self) -> u128 {
        self.decompress_time.as_nanos()
    }

    /// Raw size divided by compressed size (1.0 for an empty input).
    pub fn ratio(&self, raw_size: u64) -> f64 {
        if self.compressed_bytes == 0 {
            return 1.0;
        }
        raw_size as f64 / self.compressed_bytes as f64
    }

    fn apply(&mut self, phase: Phase, outcome: &TrialOutcome) {
        match phase {
            Phase::Compress => {
                self.compressed_bytes += outcome.bytes;
                self.compress_time += outcome.elapsed;
            }
            Phase::Decompress => {
                self.restored_bytes += outcome.bytes;
                self.decompress_time += outcome.elapsed;
            }
        }
    }
}

/// Aggregated measurements for one (file, block size) pair.
#[derive(Debug, Clone)]
pub struct BenchResult<'a> {
    pub source: &'a SourceBuffer,
    pub block_size: usize,
    pub block_count: usize,
    pub threads: usize,
    /// Worker threads spawned across every phase of the trial; zero when the
    /// trial ran single-threaded.
    pub threads_spawned: usize,
    /// The raw-copy baseline.
    pub baseline: CodecMeasurement,
    /// One entry per codec, in the order they were measured.
    pub codecs: Vec<CodecMeasurement>,
}

impl BenchResult<'_> {
    pub fn codec(&self, name: &str) -> Option<&CodecMeasurement> {
        self.codecs.iter().find(|m| m.codec == name)
    }
}

/// The shared, mutex-guarded side of a trial's measurements.
///
/// Slot 0 is the baseline, then one slot per codec. Workers call
/// [`Tally::record`] once, after their range is done; the lock covers only
/// the additions.
#[derive(Debug)]
pub struct Tally {
    entries: Mutex<Vec<CodecMeasurement>>,
}

impl Tally {
    pub fn new(names: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            entries: Mutex::new(names.into_iter().map(CodecMeasurement::new).collect()),
        }
    }

    pub fn record(&self, slot: usize, phase: Phase, outcome: &TrialOutcome) {
        // A poisoned lock only means another worker panicked; the counters
        // themselves are still consistent and the panic is reported on join.
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries[slot].apply(phase, outcome);
    }

    pub fn into_measurements(self) -> Vec<CodecMeasurement> {
        self.entries.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}
