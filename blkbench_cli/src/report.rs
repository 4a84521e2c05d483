use std::io::{self, Write};
use std::time::Duration;

use serde::Serialize;

use blkbench_core::{BenchResult, CodecMeasurement};

// ── Row model ──────────────────────────────────────────────────────────────

/// One report row: one (file, block size) pair.
#[derive(Debug, Serialize)]
pub struct ReportRow {
    pub file: String,
    pub digest: String,
    pub size: u64,
    pub block_size: usize,
    pub block_count: usize,
    pub threads: usize,
    pub baseline: CodecCell,
    pub codecs: Vec<CodecCell>,
}

/// Per-codec columns. Times are summed per-worker nanoseconds.
#[derive(Debug, Serialize)]
pub struct CodecCell {
    pub codec: &'static str,
    pub compressed_bytes: u64,
    pub ratio: f64,
    pub compress_ns: u128,
    pub decompress_ns: u128,
}

impl CodecCell {
    fn new(m: &CodecMeasurement, raw_size: u64) -> Self {
        Self {
            codec: m.codec,
            compressed_bytes: m.compressed_bytes,
            ratio: m.ratio(raw_size),
            compress_ns: m.compress_nanos(),
            decompress_ns: m.decompress_nanos(),
        }
    }
}

impl From<&BenchResult<'_>> for ReportRow {
    fn from(r: &BenchResult<'_>) -> Self {
        let size = r.source.len() as u64;
        Self {
            file: r.source.display_name(),
            digest: format!("{:016x}", r.source.digest()),
            size,
            block_size: r.block_size,
            block_count: r.block_count,
            threads: r.threads,
            baseline: CodecCell::new(&r.baseline, size),
            codecs: r.codecs.iter().map(|m| CodecCell::new(m, size)).collect(),
        }
    }
}

// ── Renderers ──────────────────────────────────────────────────────────────

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// Fixed-width table for humans
    Table,
    /// One JSON object per line
    Json,
}

/// Streams rows to `out` as each trial finishes.
pub struct Report<W: Write> {
    out: W,
    format: Format,
    codecs: Vec<&'static str>,
    header_written: bool,
}

impl<W: Write> Report<W> {
    pub fn new(out: W, format: Format, codecs: Vec<&'static str>) -> Self {
        Self {
            out,
            format,
            codecs,
            header_written: false,
        }
    }

    pub fn emit(&mut self, result: &BenchResult<'_>) -> io::Result<()> {
        let row = ReportRow::from(result);
        match self.format {
            Format::Json => {
                serde_json::to_writer(&mut self.out, &row)?;
                writeln!(self.out)?;
            }
            Format::Table => {
                if !self.header_written {
                    self.write_header()?;
                    self.header_written = true;
                }
                self.write_table_row(&row)?;
            }
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_header(&mut self) -> io::Result<()> {
        write!(
            self.out,
            "{:<24} {:>10} {:>8} {:>8} {:>10} {:>10}",
            "file", "size", "block", "blocks", "copy size", "copy"
        )?;
        for name in &self.codecs {
            write!(
                self.out,
                " │ {:>10} {:>7} {:>10} {:>10}",
                format!("{name} size"),
                "ratio",
                "comp",
                "decomp"
            )?;
        }
        writeln!(self.out)?;
        let width = 75 + self.codecs.len() * 43;
        writeln!(self.out, "{}", "─".repeat(width))
    }

    fn write_table_row(&mut self, row: &ReportRow) -> io::Result<()> {
        write!(
            self.out,
            "{:<24} {:>10} {:>8} {:>8} {:>10} {:>10}",
            truncate(&row.file, 24),
            human_bytes(row.size),
            human_bytes(row.block_size as u64),
            row.block_count,
            human_bytes(row.baseline.compressed_bytes),
            fmt_nanos(row.baseline.compress_ns + row.baseline.decompress_ns),
        )?;
        for cell in &row.codecs {
            write!(
                self.out,
                " │ {:>10} {:>6.2}x {:>10} {:>10}",
                human_bytes(cell.compressed_bytes),
                cell.ratio,
                fmt_nanos(cell.compress_ns),
                fmt_nanos(cell.decompress_ns),
            )?;
        }
        writeln!(self.out)
    }
}

// ── Formatting helpers ─────────────────────────────────────────────────────

pub fn human_bytes(n: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut v = n as f64;
    let mut unit = 0;
    while v >= 1024.0 && unit < UNITS.len() - 1 {
        v /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", n)
    } else {
        format!("{:.2} {}", v, UNITS[unit])
    }
}

fn fmt_nanos(ns: u128) -> String {
    let d = Duration::from_nanos(ns.min(u64::MAX as u128) as u64);
    let ms = d.as_secs_f64() * 1000.0;
    if ms < 1.0 {
        format!("{:.1} µs", ms * 1000.0)
    } else if ms < 1000.0 {
        format!("{ms:.1} ms")
    } else {
        format!("{:.2} s", d.as_secs_f64())
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let head: String = s.chars().take(max - 1).collect();
    format!("{head}…")
}
