//! Checksum command implementation.

use super::read_layout;
use std::path::Path;

/// Runs the checksum command on the layout as given, without compacting.
pub fn run(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let layout = read_layout(input)?;
    println!("{}", defrag_core::checksum(&layout)?);
    Ok(())
}
