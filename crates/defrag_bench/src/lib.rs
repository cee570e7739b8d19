//! Benchmarks for the segment compactor.
//!
//! Run with `cargo bench -p defrag_bench`.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod utils;
