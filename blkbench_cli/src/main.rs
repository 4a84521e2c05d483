mod corpus;
mod report;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use blkbench_codecs::{Lineup, CODEC_NAMES};
use blkbench_core::config::{
    available_cores, DEFAULT_MAX_BLOCKS, DEFAULT_SAFETY_MARGIN, DEFAULT_WARMUP,
};
use blkbench_core::{BenchConfig, BenchError, CodecLevels};

use crate::corpus::DEFAULT_MAX_FILES;
use crate::report::{Format, Report};

// ── CLI definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "blkbench",
    about = "Measure copy, compression and decompression speed and size of block codecs across a file corpus",
    version
)]
struct Cli {
    /// Directory whose regular files form the corpus
    corpus: PathBuf,
    /// Worker threads per phase (1 runs everything on the main thread)
    #[arg(short, long, default_value_t = 1)]
    threads: usize,
    /// Comma-separated block sizes; K and M suffixes are accepted
    #[arg(
        short,
        long,
        value_delimiter = ',',
        value_parser = parse_size,
        default_value = "4K,16K,64K,256K,1M"
    )]
    block_sizes: Vec<usize>,
    /// Comma-separated codecs to measure, in run order
    #[arg(short, long, value_delimiter = ',', default_value = "lz4,zstd,deflate")]
    codecs: Vec<String>,
    /// Zstd compression level (1–22)
    #[arg(long, default_value_t = CodecLevels::default().zstd)]
    zstd_level: i32,
    /// Deflate compression level (0–9)
    #[arg(long, default_value_t = CodecLevels::default().deflate)]
    deflate_level: u32,
    /// Extra bytes reserved in every compressed region
    #[arg(long, default_value_t = DEFAULT_SAFETY_MARGIN)]
    safety_margin: usize,
    /// Upper limit on blocks per file and block size
    #[arg(long, default_value_t = DEFAULT_MAX_BLOCKS)]
    max_blocks: usize,
    /// Upper limit on files taken from the corpus directory
    #[arg(long, default_value_t = DEFAULT_MAX_FILES)]
    max_files: usize,
    /// Seconds of CPU warm-up before measuring (0 disables it)
    #[arg(long, default_value_t = DEFAULT_WARMUP.as_secs())]
    warmup_secs: u64,
    /// Report format
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    format: Format,
    /// Log per-phase detail to stderr
    #[arg(short, long)]
    verbose: bool,
}

// ── Helpers ────────────────────────────────────────────────────────────────

/// Parse `4096`, `4K`, `4k`, `1M` into a byte count.
fn parse_size(s: &str) -> Result<usize, String> {
    let s = s.trim();
    let (digits, multiplier) = match s.char_indices().last() {
        Some((i, 'K' | 'k')) => (&s[..i], 1usize << 10),
        Some((i, 'M' | 'm')) => (&s[..i], 1usize << 20),
        _ => (s, 1),
    };
    let n: usize = digits
        .parse()
        .map_err(|_| format!("invalid block size '{s}'"))?;
    n.checked_mul(multiplier)
        .filter(|&v| v > 0)
        .ok_or_else(|| format!("block size '{s}' must be between 1 byte and usize::MAX"))
}

fn init_logging(verbose: bool) {
    let default = if verbose { "blkbench=debug" } else { "blkbench=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

// ── Run ────────────────────────────────────────────────────────────────────

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = BenchConfig {
        threads: cli.threads,
        block_sizes: cli.block_sizes,
        safety_margin: cli.safety_margin,
        max_blocks: cli.max_blocks,
        warmup: Duration::from_secs(cli.warmup_secs),
        levels: CodecLevels {
            zstd: cli.zstd_level,
            deflate: cli.deflate_level,
        },
    };
    tracing::debug!(?config, cores = available_cores()?, "configuration");

    // Everything that can be rejected up front is rejected before the corpus
    // is touched.
    let lineup = Lineup::select(&cli.codecs, &config.levels)
        .with_context(|| format!("valid codecs are: {}", CODEC_NAMES.join(", ")))?;
    let orchestrator = lineup.into_orchestrator(config)?;

    let files = corpus::scan(&cli.corpus, cli.max_files)
        .with_context(|| format!("scanning corpus {:?}", cli.corpus))?;
    if files.is_empty() {
        tracing::warn!(corpus = %cli.corpus.display(), "corpus has no regular files");
        return Ok(());
    }
    tracing::info!(files = files.len(), threads = orchestrator.config().threads, "corpus ready");

    let stdout = io::stdout();
    let mut report = Report::new(stdout.lock(), cli.format, orchestrator.codec_names());
    orchestrator.run(files.as_slice(), |result| report.emit(result).map_err(BenchError::Report))?;
    Ok(())
}

// ── Entry point ────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
