//! Statistics gathered during a compaction pass.

use crate::config::CompactionMode;
use serde::Serialize;

/// Result of a compaction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompactionReport {
    /// Relocation strategy used.
    pub mode: CompactionMode,
    /// Number of sweep iterations.
    pub iterations: usize,
    /// Files the sweep tried to relocate.
    pub files_examined: usize,
    /// Files skipped because an earlier sweep already settled them.
    pub files_skipped: usize,
    /// Files copied into an earlier gap.
    pub files_relocated: usize,
    /// Files that slid left into the gap directly before them.
    pub files_shifted: usize,
    /// Files with no gap large enough.
    pub files_left_in_place: usize,
    /// Pieces split off files (fragment mode).
    pub pieces_split: usize,
    /// Storage units written into earlier gaps.
    pub units_moved: u64,
    /// Segments detached from the walk order.
    pub segments_vacated: usize,
    /// Total size before the pass.
    pub size_before: u64,
    /// Total size after the pass.
    pub size_after: u64,
}

impl CompactionReport {
    pub(crate) fn new(mode: CompactionMode, size_before: u64) -> Self {
        Self {
            mode,
            size_before,
            size_after: size_before,
            ..Self::default()
        }
    }

    /// Number of physical moves performed.
    #[must_use]
    pub fn moves(&self) -> usize {
        self.files_relocated + self.files_shifted + self.pieces_split
    }

    /// Units of trailing free space dropped off the end of the medium.
    #[must_use]
    pub fn size_reclaimed(&self) -> u64 {
        self.size_before.saturating_sub(self.size_after)
    }
}
