use std::fmt;
use std::time::{Duration, Instant};

use crate::codec::Codec;
use crate::error::{BenchError, Result};
use crate::scratch::ScratchBuffer;

/// Direction of one measured pass over the blocks.
///
/// The raw-copy baseline runs through the same two phases with the copy
/// codec, so every codec column in a report has the same shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Compress,
    Decompress,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Compress => "compress",
            Phase::Decompress => "decompress",
        })
    }
}

/// What one worker measured over its range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrialOutcome {
    pub elapsed: Duration,
    /// Compressed bytes produced (compress) or raw bytes restored (decompress).
    pub bytes: u64,
    pub blocks: usize,
}

/// Run one phase of one codec over a contiguous run of slots.
///
/// The clock starts right before the first block and stops right after the
/// last; nothing else is inside the timed window. Size checks on each call
/// are a couple of compares and stay inside it; content validation does not
/// (see [`validate`]).
pub fn run_trial(phase: Phase, codec: &dyn Codec, slots: &mut [ScratchBuffer]) -> Result<TrialOutcome> {
    let mut bytes = 0u64;

    let start = Instant::now();
    match phase {
        Phase::Compress => {
            for slot in slots.iter_mut() {
                let raw_size = slot.raw.len();
                let written = codec.compress(&slot.raw, &mut slot.compressed)?;
                if written > codec.bound(raw_size) || written > slot.compressed.len() {
                    return Err(BenchError::codec(
                        codec.name(),
                        format!(
                            "compressed {raw_size} bytes into {written}, over bound {} / capacity {}",
                            codec.bound(raw_size),
                            slot.compressed.len()
                        ),
                    ));
                }
                slot.comp_size = written;
                bytes += written as u64;
            }
        }
        Phase::Decompress => {
            for slot in slots.iter_mut() {
                let restored = codec.decompress(&slot.compressed[..slot.comp_size], &mut slot.decompressed)?;
                if restored != slot.raw.len() {
                    return Err(BenchError::codec(
                        codec.name(),
                        format!("decompressed {restored} bytes, expected {}", slot.raw.len()),
                    ));
                }
                bytes += restored as u64;
            }
        }
    }
    let elapsed = start.elapsed();

    Ok(TrialOutcome {
        elapsed,
        bytes,
        blocks: slots.len(),
    })
}

/// Check that every block survived the round trip byte for byte.
///
/// Runs after the decompress phase, outside any timed window.
pub fn validate(codec: &dyn Codec, slots: &[ScratchBuffer]) -> Result<()> {
    for (index, slot) in slots.iter().enumerate() {
        if slot.decompressed != slot.raw {
            let first_diff = slot
                .raw
                .iter()
                .zip(&slot.decompressed)
                .position(|(a, b)| a != b)
                .unwrap_or(slot.raw.len());
            return Err(BenchError::codec(
                codec.name(),
                format!("block {index} round trip differs at byte {first_diff}"),
            ));
        }
    }
    Ok(())
}
