//! CLI command implementations.

pub mod checksum;
pub mod compact;
pub mod dump;

use defrag_core::{decode_reader, CoreError, SegmentList};
use std::fs::File;
use std::io;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Errors raised by the command layer itself.
#[derive(Debug, Error)]
pub enum CliError {
    /// The `--format` value is not recognised.
    #[error("unknown output format '{0}' (expected text or json)")]
    UnknownFormat(String),

    /// The layout could not be opened.
    #[error("cannot open {path}: {source}")]
    Open {
        /// Path as given on the command line.
        path: String,
        /// Underlying error.
        source: io::Error,
    },

    /// Decoding or compaction failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Output format shared by the commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One human-readable line per item.
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(CliError::UnknownFormat(other.to_string())),
        }
    }
}

/// Reads and decodes the layout at `input`; `-` reads standard input.
pub fn read_layout(input: &Path) -> Result<SegmentList, CliError> {
    if input == Path::new("-") {
        debug!("reading layout from standard input");
        return Ok(decode_reader(io::stdin().lock())?);
    }

    debug!(path = %input.display(), "reading layout");
    let file = File::open(input).map_err(|source| CliError::Open {
        path: input.display().to_string(),
        source,
    })?;
    Ok(decode_reader(file)?)
}
