//! Human-readable layout dumps.

use crate::layout::{Placements, SegmentList};
use crate::types::FileId;
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};

/// One segment as seen by a dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DumpRecord {
    /// File stored in the segment.
    pub id: FileId,
    /// Address of the first occupied unit.
    pub address: u64,
    /// Occupied units.
    pub length: u64,
    /// Free units after the file.
    pub trailing_free: u64,
}

impl fmt::Display for DumpRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {:4}, size: {}, free space {}",
            self.id.as_u64(),
            self.length,
            self.trailing_free
        )
    }
}

/// Lazily yields a [`DumpRecord`] per live segment in address order.
#[derive(Debug, Clone)]
pub struct Dump<'a> {
    placements: Placements<'a>,
}

impl Iterator for Dump<'_> {
    type Item = DumpRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.placements.next().map(|(address, segment)| DumpRecord {
            id: segment.id(),
            address,
            length: segment.length(),
            trailing_free: segment.trailing_free(),
        })
    }
}

/// Starts a dump of `list`. The list is never modified.
#[must_use]
pub fn dump(list: &SegmentList) -> Dump<'_> {
    Dump {
        placements: list.placements(),
    }
}

/// Writes one line per segment to `writer` and returns the number of lines.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn write_report<W: Write>(list: &SegmentList, mut writer: W) -> io::Result<usize> {
    let mut lines = 0;
    for record in dump(list) {
        writeln!(writer, "{record}")?;
        lines += 1;
    }
    writer.flush()?;
    Ok(lines)
}
