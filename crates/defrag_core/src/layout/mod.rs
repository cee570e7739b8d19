//! In-memory layout of the medium.
//!
//! The medium is described by a list of segments, each holding one file
//! followed by a run of free units:
//!
//! ```text
//! | file 0 | free | file 1 | free | ... | file n | free |
//! ```
//!
//! A segment's address is never stored; it is the running sum of the
//! footprints of all segments before it.

mod list;
mod segment;

pub use list::{Placements, SegmentList, Walk};
pub use segment::Segment;
