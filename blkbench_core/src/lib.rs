pub mod codec;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod orchestrator;
pub mod partition;
pub mod result;
pub mod scratch;
pub mod segment;
pub mod source;
pub mod trial;
pub mod warmup;

pub use codec::Codec;
pub use config::{BenchConfig, CodecLevels};
pub use error::{BenchError, Result};
pub use orchestrator::Orchestrator;
pub use partition::{partition, WorkRange};
pub use result::{BenchResult, CodecMeasurement, Tally};
pub use scratch::{ScratchBuffer, ScratchPool};
pub use segment::{Block, Segmentation};
pub use source::SourceBuffer;
pub use trial::{Phase, TrialOutcome};
