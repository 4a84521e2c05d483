use std::thread;

use tracing::debug;

use crate::codec::Codec;
use crate::error::{BenchError, Result};
use crate::partition::{partition, WorkRange};
use crate::result::Tally;
use crate::scratch::{ScratchBuffer, ScratchPool};
use crate::trial::{run_trial, Phase};

/// One worker's share of a phase: a range of blocks, the codec to run over
/// them, and where to add the totals when done.
pub struct PhaseTask<'a> {
    pub range: WorkRange,
    pub phase: Phase,
    pub codec: &'a dyn Codec,
    /// Tally slot of `codec`.
    pub codec_slot: usize,
    /// The slots for `range`, and only those.
    pub slots: &'a mut [ScratchBuffer],
    pub tally: &'a Tally,
}

impl PhaseTask<'_> {
    /// Time the range, then add the outcome to the shared tally.
    pub fn run(self) -> Result<()> {
        debug_assert_eq!(self.range.len(), self.slots.len());
        let outcome = run_trial(self.phase, self.codec, self.slots)?;
        self.tally.record(self.codec_slot, self.phase, &outcome);
        Ok(())
    }
}

/// Run one phase of one codec over the whole pool.
///
/// With `threads == 1` the work runs on the calling thread. Otherwise exactly
/// `threads` scoped threads are spawned, one per [`WorkRange`], and all of
/// them are joined before this returns, so phases never overlap.
///
/// Returns the number of threads spawned.
pub fn run_phase(
    phase: Phase,
    codec: &dyn Codec,
    codec_slot: usize,
    pool: &mut ScratchPool,
    threads: usize,
    tally: &Tally,
) -> Result<usize> {
    let ranges = partition(pool.len(), threads)?;
    let tasks: Vec<PhaseTask<'_>> = ranges
        .iter()
        .zip(pool.split(&ranges))
        .map(|(&range, slots)| PhaseTask {
            range,
            phase,
            codec,
            codec_slot,
            slots,
            tally,
        })
        .collect();

    if threads == 1 {
        for task in tasks {
            task.run()?;
        }
        return Ok(0);
    }

    let spawned = tasks.len();
    thread::scope(|scope| {
        let handles: Vec<_> = tasks
            .into_iter()
            .map(|task| scope.spawn(move || task.run()))
            .collect();

        // Join every worker before looking at any result.
        let joined: Vec<_> = handles.into_iter().map(|h| h.join()).collect();
        for result in joined {
            match result {
                Ok(outcome) => outcome?,
                Err(_) => {
                    return Err(BenchError::WorkerPanicked {
                        phase,
                        codec: codec.name(),
                    })
                }
            }
        }
        Ok(())
    })?;

    debug!(codec = codec.name(), %phase, threads = spawned, "phase joined");
    Ok(spawned)
}
