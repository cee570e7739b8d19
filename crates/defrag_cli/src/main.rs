//! Defrag CLI
//!
//! Command-line tools for compacting dense storage layouts.
//!
//! # Commands
//!
//! - `compact` - Compact a layout and print its checksum
//! - `dump` - Print the segments of a layout without compacting
//! - `checksum` - Checksum a layout as given

mod commands;

use clap::{Parser, Subcommand};
use defrag_core::CompactionMode;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Storage layout compaction tools.
#[derive(Parser)]
#[command(name = "defrag")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compact a layout and print its checksum
    Compact {
        /// Layout file, or `-` for standard input
        input: PathBuf,

        /// Relocation strategy (whole-file, fragment)
        #[arg(short, long, default_value = "whole-file")]
        mode: CompactionMode,

        /// Write the final segment listing to this file
        #[arg(short, long)]
        dump: Option<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Validate the layout after the pass
        #[arg(long)]
        verify: bool,
    },

    /// Print the segments of a layout without compacting
    Dump {
        /// Layout file, or `-` for standard input
        input: PathBuf,

        /// Maximum number of segments to print
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Checksum a layout as given
    Checksum {
        /// Layout file, or `-` for standard input
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Compact {
            input,
            mode,
            dump,
            format,
            verify,
        } => {
            commands::compact::run(&input, mode, dump.as_deref(), &format, verify)?;
        }
        Commands::Dump {
            input,
            limit,
            format,
        } => {
            commands::dump::run(&input, limit, &format)?;
        }
        Commands::Checksum { input } => {
            commands::checksum::run(&input)?;
        }
        Commands::Version => {
            println!("Defrag CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Defrag Core v{}", defrag_core::VERSION);
        }
    }

    Ok(())
}
