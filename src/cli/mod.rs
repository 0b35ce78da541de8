//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod compare;
mod glyphs;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Glyphsnap - Record emoji glyph renders and pixel-level snapshot diffs
#[derive(Parser)]
#[command(name = "gsnap")]
#[command(about = "Glyphsnap - Record emoji glyph renders and pixel-level snapshot diffs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare two snapshot directories and record a preview per change
    Compare {
        /// Directory holding the baseline snapshots
        baseline: PathBuf,

        /// Directory holding the snapshots under review
        candidate: PathBuf,

        /// Root directory previews are recorded under
        #[arg(long)]
        out_root: Option<PathBuf>,

        /// Load configuration from a specific glyphsnap.toml
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Render every fully-qualified emoji in a registry file to PNG
    Glyphs {
        /// Unicode emoji-test registry file
        registry: PathBuf,

        /// Platform label naming the output directory
        #[arg(long)]
        platform: String,

        /// Font file to render with (default: probe known system fonts)
        #[arg(long)]
        font: Option<PathBuf>,

        /// Root directory renders are recorded under
        #[arg(long)]
        out_root: Option<PathBuf>,

        /// Square canvas side in pixels
        #[arg(long)]
        canvas: Option<u32>,

        /// Font size in pixels
        #[arg(long)]
        font_size: Option<f32>,

        /// List records that were recognized but not rendered
        #[arg(long)]
        show_skipped: bool,

        /// Show each render in the terminal as it completes
        #[arg(long)]
        preview: bool,

        /// Load configuration from a specific glyphsnap.toml
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Parse a registry file and report its records without rendering
    Parse {
        /// Unicode emoji-test registry file
        registry: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// List records that are recognized but would not render
        #[arg(long)]
        show_skipped: bool,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compare { baseline, candidate, out_root, config } => {
            compare::run_compare(baseline, candidate, out_root, config.as_deref())
        }
        Commands::Glyphs {
            registry,
            platform,
            font,
            out_root,
            canvas,
            font_size,
            show_skipped,
            preview,
            config,
        } => glyphs::run_glyphs(
            registry,
            platform,
            font,
            out_root,
            canvas,
            font_size,
            show_skipped,
            preview,
            config.as_deref(),
        ),
        Commands::Parse { registry, json, show_skipped } => {
            glyphs::run_parse(&registry, json, show_skipped)
        }
    }
}
