//! Test fixtures and layout helpers.
//!
//! Provides ready-made layouts and temporary layout files for tests that
//! exercise file input.

use defrag_core::{decode_str, SegmentList};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The worked example used throughout the docs.
pub const EXAMPLE_LAYOUT: &str = "2333133121414131402";

/// A layout where no file can move.
pub const STUCK_LAYOUT: &str = "12345";

/// A layout with a single file and no free space.
pub const SINGLE_FILE_LAYOUT: &str = "5";

/// Decodes a layout that is known to be valid.
///
/// # Panics
///
/// Panics if the layout does not decode.
#[must_use]
pub fn layout(digits: &str) -> SegmentList {
    decode_str(digits).expect("Failed to decode fixture layout")
}

/// `(id, length, trailing_free)` triples in address order.
#[must_use]
pub fn shape(list: &SegmentList) -> Vec<(u64, u64, u64)> {
    list.walk()
        .map(|s| (s.id().as_u64(), s.length(), s.trailing_free()))
        .collect()
}

/// A layout written to a file in a temporary directory.
pub struct TempLayoutFile {
    path: PathBuf,
    /// Kept alive so the directory outlives the handle.
    temp_dir: TempDir,
}

impl TempLayoutFile {
    /// Writes `contents` verbatim to a new temporary file.
    pub fn new(contents: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("layout.txt");
        fs::write(&path, contents).expect("Failed to write layout file");
        Self {
            path,
            temp_dir,
        }
    }

    /// Writes `digits` followed by a newline.
    pub fn with_line(digits: &str) -> Self {
        Self::new(&format!("{digits}\n"))
    }

    /// Path of the layout file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path for an output file next to the layout file.
    #[must_use]
    pub fn sibling(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }
}
