//! In-place compaction.
//!
//! Compaction moves files from the right end of the medium into free space
//! near the left end. It runs as a single two-pointer sweep over a
//! [`SegmentList`]: a free cursor walks right over segments that still have
//! free space, a file cursor walks left over files waiting to be moved, and
//! the pass ends once the two meet.
//!
//! ## Invariants
//!
//! - Compaction **MUST NOT** change the total number of occupied units
//! - Address ranges stay pairwise disjoint and increasing in list order
//! - A file is physically moved at most once per list (whole-file mode)
//! - Free space vacated by a file is merged into its predecessor's gap
//! - Any arithmetic underflow is a `CorruptLayout` error and aborts the pass

mod cursor;
mod report;
mod sweep;

pub use report::CompactionReport;

use crate::config::{CompactionConfig, CompactionMode};
use crate::error::CoreResult;
use crate::layout::SegmentList;
use tracing::{debug, debug_span};

/// Runs compaction passes over segment lists.
///
/// ## Example
///
/// ```rust
/// use defrag_core::{decode_str, checksum, Compactor, CompactionConfig};
///
/// let mut layout = decode_str("2333133121414131402").unwrap();
/// let compactor = Compactor::new(CompactionConfig::default());
/// let report = compactor.compact(&mut layout).unwrap();
///
/// assert_eq!(report.files_relocated, 4);
/// assert_eq!(checksum(&layout).unwrap(), 2858);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Compactor {
    config: CompactionConfig,
}

impl Compactor {
    /// Creates a new compactor with the given configuration.
    #[must_use]
    pub fn new(config: CompactionConfig) -> Self {
        Self { config }
    }

    /// Creates a compactor with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(CompactionConfig::default())
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CompactionConfig {
        &self.config
    }

    /// Compacts `list` in place.
    ///
    /// A file with no gap large enough stays where it is; that is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns `CorruptLayout` if the list's accounting is inconsistent. The
    /// list must not be used for a checksum after such an error.
    pub fn compact(&self, list: &mut SegmentList) -> CoreResult<CompactionReport> {
        let mode = self.config.mode;
        let span = debug_span!("compact", %mode, segments = list.len());
        let _enter = span.enter();

        let mut report = CompactionReport::new(mode, list.total_size());

        match mode {
            CompactionMode::WholeFile => sweep::whole_files(list, &mut report)?,
            CompactionMode::Fragment => sweep::fragments(list, &mut report)?,
        }

        report.size_after = list.total_size();

        if self.config.verify_layout {
            list.validate()?;
        }

        debug!(
            iterations = report.iterations,
            moves = report.moves(),
            left_in_place = report.files_left_in_place,
            "compaction finished"
        );
        Ok(report)
    }
}
