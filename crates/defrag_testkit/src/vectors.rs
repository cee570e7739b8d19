//! Shared layout test vectors.
//!
//! Each vector pairs an input line with the checksum expected after a pass
//! in a given mode, or with the error it must produce.

use serde::{Deserialize, Serialize};

/// A compaction test vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Raw input line.
    pub input: String,
    /// Compaction mode name (`whole-file` or `fragment`).
    pub mode: String,
    /// Expected checksum after compaction.
    pub expected_checksum: Option<u64>,
    /// Expected error kind (`malformed_input`) if this should fail.
    pub expected_error: Option<String>,
}

impl LayoutVector {
    fn ok(id: &str, description: &str, input: &str, mode: &str, checksum: u64) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            input: input.into(),
            mode: mode.into(),
            expected_checksum: Some(checksum),
            expected_error: None,
        }
    }

    fn malformed(id: &str, description: &str, input: &str) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            input: input.into(),
            mode: "whole-file".into(),
            expected_checksum: None,
            expected_error: Some("malformed_input".into()),
        }
    }
}

/// Compaction vectors covering both modes and the decoder's error cases.
#[must_use]
pub fn layout_vectors() -> Vec<LayoutVector> {
    vec![
        LayoutVector::ok(
            "example_whole_file",
            "Worked example, whole files",
            "2333133121414131402\n",
            "whole-file",
            2858,
        ),
        LayoutVector::ok(
            "example_fragment",
            "Worked example, fragmenting",
            "2333133121414131402\n",
            "fragment",
            1928,
        ),
        LayoutVector::ok(
            "stuck_whole_file",
            "No gap is large enough for any file",
            "12345",
            "whole-file",
            132,
        ),
        LayoutVector::ok(
            "stuck_fragment",
            "Small gaps filled unit by unit",
            "12345",
            "fragment",
            60,
        ),
        LayoutVector::ok(
            "single_file",
            "Single file with id 0 weighs nothing",
            "5",
            "whole-file",
            0,
        ),
        LayoutVector::ok(
            "adjacent_shift",
            "File slides left into the gap before it",
            "132\r\n",
            "whole-file",
            1 + 2,
        ),
        LayoutVector::ok(
            "no_free_space",
            "Nothing to do on a packed layout",
            "1020304",
            "fragment",
            1 + 2 + 2 * (3 + 4 + 5) + 3 * (6 + 7 + 8 + 9),
        ),
        LayoutVector::malformed("non_digit", "Letter inside the layout", "12a4"),
        LayoutVector::malformed("zero_length_file", "File token of zero", "1203"),
        LayoutVector::malformed("empty", "Empty line", "\n"),
    ]
}

/// Serializes the vectors as pretty JSON, e.g. for sharing with other tools.
#[must_use]
pub fn layout_vectors_json() -> String {
    serde_json::to_string_pretty(&layout_vectors()).expect("vectors serialize")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn vector_ids_are_unique() {
        let vectors = layout_vectors();
        let ids: HashSet<_> = vectors.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids.len(), vectors.len());
    }

    #[test]
    fn every_vector_has_one_expectation() {
        for vector in layout_vectors() {
            assert!(
                vector.expected_checksum.is_some() != vector.expected_error.is_some(),
                "vector '{}' must expect exactly one outcome",
                vector.id
            );
        }
    }

    #[test]
    fn json_parses_back() {
        let parsed: Vec<LayoutVector> = serde_json::from_str(&layout_vectors_json()).unwrap();
        assert_eq!(parsed.len(), layout_vectors().len());
    }
}
