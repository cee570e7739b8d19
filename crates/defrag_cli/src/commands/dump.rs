//! Dump command implementation.

use super::{read_layout, OutputFormat};
use defrag_core::{dump, DumpRecord, SegmentList};
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// Runs the dump command.
pub fn run(
    input: &Path,
    limit: Option<usize>,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let format: OutputFormat = format.parse()?;
    let layout = read_layout(input)?;

    let stdout = io::stdout();
    let written = write_dump(&layout, limit, format, &mut stdout.lock())?;
    debug!(written, total = layout.len(), "dumped segments");

    Ok(())
}

/// Writes up to `limit` segment records and returns how many were written.
pub fn write_dump<W: Write>(
    layout: &SegmentList,
    limit: Option<usize>,
    format: OutputFormat,
    out: &mut W,
) -> io::Result<usize> {
    let records: Vec<DumpRecord> = dump(layout).take(limit.unwrap_or(usize::MAX)).collect();

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &records)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            for record in &records {
                writeln!(out, "{record}")?;
            }
        }
    }

    Ok(records.len())
}
