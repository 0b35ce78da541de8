//! Glyphsnap - Command-line tool for emoji glyph snapshots and pixel diffs

use std::process::ExitCode;

use glyphsnap::cli;

fn main() -> ExitCode {
    cli::run()
}
