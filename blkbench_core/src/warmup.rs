use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::codec::Codec;
use crate::error::{BenchError, Result};

/// Payload every warm-up thread cycles through the codec.
const WARMUP_PAYLOAD: &[u8] = b"The quick brown fox jumps over the lazy dog. \
    Pack my box with five dozen liquor jugs. How vexingly quick daft zebras jump!";

/// What the warm-up did. Only ever logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WarmupReport {
    pub threads: usize,
    pub iterations: u64,
    pub elapsed: Duration,
}

/// Saturate `threads` cores with compress/decompress round trips for
/// `duration`, so clocks and caches settle before the first measured trial.
///
/// Every thread is joined before this returns. A zero `duration` does
/// nothing. A codec failure here is as fatal as anywhere else.
pub fn warm_up(codec: &dyn Codec, threads: usize, duration: Duration) -> Result<WarmupReport> {
    if duration.is_zero() || threads == 0 {
        return Ok(WarmupReport::default());
    }

    info!(codec = codec.name(), threads, secs = duration.as_secs_f64(), "warming up CPUs");
    let start = Instant::now();

    let iterations = thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|_| scope.spawn(move || spin(codec, duration)))
            .collect();

        let joined: Vec<_> = handles.into_iter().map(|h| h.join()).collect();
        let mut total = 0u64;
        for result in joined {
            match result {
                Ok(count) => total += count?,
                Err(_) => return Err(BenchError::codec(codec.name(), "warm-up thread panicked")),
            }
        }
        Ok(total)
    })?;

    let report = WarmupReport {
        threads,
        iterations,
        elapsed: start.elapsed(),
    };
    debug!(?report, "warm-up finished");
    Ok(report)
}

/// One warm-up thread: round trips until `duration` has passed.
fn spin(codec: &dyn Codec, duration: Duration) -> Result<u64> {
    let mut compressed = vec![0u8; codec.bound(WARMUP_PAYLOAD.len())];
    let mut restored = vec![0u8; WARMUP_PAYLOAD.len()];
    let deadline = Instant::now() + duration;
    let mut iterations = 0u64;

    while Instant::now() < deadline {
        let n = codec.compress(WARMUP_PAYLOAD, &mut compressed)?;
        let m = codec.decompress(&compressed[..n], &mut restored)?;
        if m != WARMUP_PAYLOAD.len() {
            return Err(BenchError::codec(
                codec.name(),
                format!("warm-up round trip produced {m} bytes, expected {}", WARMUP_PAYLOAD.len()),
            ));
        }
        iterations += 1;
    }
    Ok(iterations)
}
