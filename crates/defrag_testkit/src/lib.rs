//! # Defrag Testkit
//!
//! Test utilities for the segment compactor.
//!
//! This crate provides:
//! - Layout fixtures and temporary layout files
//! - Property-based test generators using proptest
//! - A brute-force reference model to check compaction against
//! - Shared layout test vectors
//!
//! ## Usage
//!
//! ```rust,ignore
//! use defrag_testkit::prelude::*;
//!
//! #[test]
//! fn matches_reference() {
//!     let expected = reference_checksum(EXAMPLE_LAYOUT, CompactionMode::Fragment);
//!     assert_eq!(expected, 1928);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod reference;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::reference::*;
    pub use crate::vectors::*;
}

pub use fixtures::*;
pub use generators::*;
pub use reference::*;
pub use vectors::*;
