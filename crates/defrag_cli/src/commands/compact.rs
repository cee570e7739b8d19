//! Compact command implementation.

use super::{read_layout, OutputFormat};
use defrag_core::{
    checksum, write_report, CompactionConfig, CompactionMode, CompactionReport, Compactor,
    SegmentList,
};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Outcome of compacting one layout, as printed.
#[derive(Debug, Serialize)]
pub struct CompactSummary {
    /// Checksum of the compacted layout.
    pub checksum: u64,
    /// Live segments after the pass.
    pub segments: usize,
    /// Pass statistics.
    pub report: CompactionReport,
}

/// Runs the compact command.
pub fn run(
    input: &Path,
    mode: CompactionMode,
    dump_path: Option<&Path>,
    format: &str,
    verify: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let format: OutputFormat = format.parse()?;
    let config = CompactionConfig::new().mode(mode).verify_layout(verify);

    let mut layout = read_layout(input)?;
    let summary = compact(&mut layout, config)?;

    let stdout = io::stdout();
    write_summary(&summary, format, &mut stdout.lock())?;

    if let Some(path) = dump_path {
        let lines = write_report(&layout, BufWriter::new(File::create(path)?))?;
        info!(path = %path.display(), lines, "wrote layout report");
    }

    Ok(())
}

/// Compacts `layout` in place and summarises the pass.
pub fn compact(
    layout: &mut SegmentList,
    config: CompactionConfig,
) -> Result<CompactSummary, Box<dyn std::error::Error>> {
    let report = Compactor::new(config).compact(layout)?;
    let checksum = checksum(layout)?;
    info!(
        mode = %report.mode,
        moves = report.moves(),
        checksum,
        "compaction finished"
    );

    Ok(CompactSummary {
        checksum,
        segments: layout.len(),
        report,
    })
}

/// Writes `summary` to `out` in the requested format.
pub fn write_summary<W: Write>(
    summary: &CompactSummary,
    format: OutputFormat,
    out: &mut W,
) -> io::Result<()> {
    if format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut *out, summary)?;
        return writeln!(out);
    }

    let report = &summary.report;
    writeln!(out, "Checksum: {}", summary.checksum)?;
    writeln!(out)?;
    writeln!(out, "Compaction Statistics ({}):", report.mode)?;
    writeln!(out, "  Iterations:        {}", report.iterations)?;
    writeln!(out, "  Files examined:    {}", report.files_examined)?;
    writeln!(out, "  Files relocated:   {}", report.files_relocated)?;
    writeln!(out, "  Files shifted:     {}", report.files_shifted)?;
    writeln!(out, "  Left in place:     {}", report.files_left_in_place)?;
    if report.pieces_split > 0 {
        writeln!(out, "  Pieces split:      {}", report.pieces_split)?;
    }
    writeln!(out, "  Units moved:       {}", report.units_moved)?;
    writeln!(out, "  Segments:          {}", summary.segments)?;
    writeln!(out)?;
    writeln!(out, "  Size before: {} units", report.size_before)?;
    writeln!(out, "  Size after:  {} units", report.size_after)?;
    Ok(())
}
