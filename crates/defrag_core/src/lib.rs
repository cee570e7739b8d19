//! # Defrag Core
//!
//! Segment-level model of a linear storage medium and its in-place
//! compaction.
//!
//! This crate provides:
//! - A layout decoder for the digit-per-run dense format
//! - An arena-backed, doubly-linked segment list
//! - A two-pointer compactor (whole-file and fragmenting modes)
//! - A position-weighted checksum over the final layout
//! - Human-readable and serializable layout dumps
//!
//! ## Example
//!
//! ```rust
//! use defrag_core::{checksum, decode_str, Compactor};
//!
//! let mut layout = decode_str("12345").unwrap();
//! Compactor::with_defaults().compact(&mut layout).unwrap();
//! assert_eq!(checksum(&layout).unwrap(), 132);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod checksum;
mod compaction;
mod config;
mod decoder;
mod dump;
mod error;
mod layout;
mod types;

pub use checksum::{checksum, span_sum};
pub use compaction::{CompactionReport, Compactor};
pub use config::{CompactionConfig, CompactionMode};
pub use decoder::{decode_layout, decode_reader, decode_str, LayoutDecoder};
pub use dump::{dump, write_report, Dump, DumpRecord};
pub use error::{CoreError, CoreResult};
pub use layout::{Placements, Segment, SegmentList, Walk};
pub use types::{FileId, SlotId};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything produced by [`compact_input`].
#[derive(Debug)]
pub struct CompactionOutcome {
    /// The layout after compaction.
    pub layout: SegmentList,
    /// Statistics of the pass.
    pub report: CompactionReport,
    /// Checksum of the final layout.
    pub checksum: u64,
}

/// Decodes `input`, compacts it and checksums the result.
///
/// # Errors
///
/// Returns `MalformedInput` for bad input and `CorruptLayout` if the pass
/// detects an accounting error.
pub fn compact_input(input: &[u8], config: CompactionConfig) -> CoreResult<CompactionOutcome> {
    let mut layout = decode_layout(input)?;
    let report = Compactor::new(config).compact(&mut layout)?;
    let checksum = checksum(&layout)?;
    Ok(CompactionOutcome {
        layout,
        report,
        checksum,
    })
}
