//! Compaction configuration.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// How the compactor relocates files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompactionMode {
    /// Move each file as a whole into the left-most gap that can hold it.
    /// Files with no such gap stay where they are.
    #[default]
    WholeFile,
    /// Fill every gap from the left with units taken off the right-most
    /// file, splitting files across gaps as needed.
    Fragment,
}

impl CompactionMode {
    /// Stable lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WholeFile => "whole-file",
            Self::Fragment => "fragment",
        }
    }
}

impl fmt::Display for CompactionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompactionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "whole-file" | "whole" | "file" => Ok(Self::WholeFile),
            "fragment" | "block" | "blocks" => Ok(Self::Fragment),
            other => Err(format!("unknown compaction mode: {other}")),
        }
    }
}

/// Configuration for a compaction pass.
#[derive(Debug, Clone)]
pub struct CompactionConfig {
    /// Relocation strategy.
    pub mode: CompactionMode,

    /// Whether to run a full structural check of the list after the pass.
    pub verify_layout: bool,
}

impl Default for CompactionConfig {
    fn default() -> Self {
        Self {
            mode: CompactionMode::WholeFile,
            verify_layout: false,
        }
    }
}

impl CompactionConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that splits files across gaps.
    #[must_use]
    pub fn fragmenting() -> Self {
        Self::default().mode(CompactionMode::Fragment)
    }

    /// Sets the relocation strategy.
    #[must_use]
    pub const fn mode(mut self, mode: CompactionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets whether to validate the list after the pass.
    #[must_use]
    pub const fn verify_layout(mut self, value: bool) -> Self {
        self.verify_layout = value;
        self
    }
}
