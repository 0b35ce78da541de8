//! Glyphs and parse command implementations

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{load_config, GlyphConfig, GlyphOverrides};
use crate::glyph::FontRasterizer;
use crate::pipeline::{self, FrameSink, GlyphFrame, GlyphReport};
use crate::registry;
use crate::terminal;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the glyphs command
#[allow(clippy::too_many_arguments)]
pub fn run_glyphs(
    registry: PathBuf,
    platform: String,
    font: Option<PathBuf>,
    out_root: Option<PathBuf>,
    canvas: Option<u32>,
    font_size: Option<f32>,
    show_skipped: bool,
    preview: bool,
    config_path: Option<&Path>,
) -> ExitCode {
    let file = match load_config(config_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let overrides = GlyphOverrides {
        out_root,
        font,
        canvas,
        font_size,
    };
    let config = GlyphConfig::new(registry, platform, overrides, &file);
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let rasterizer =
        match FontRasterizer::discover(config.font.as_deref(), config.canvas, config.font_size) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        };

    // Live frames only make sense on an interactive terminal
    let sink: Option<FrameSink> = if preview && atty::is(atty::Stream::Stdout) {
        Some(Box::new(|frame: GlyphFrame| {
            print!("{}", terminal::render_frame(&frame));
        }))
    } else {
        None
    };

    let report = match pipeline::run_glyph_batch(&config, &rasterizer, sink) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    print_glyph_summary(&report, show_skipped);

    ExitCode::from(EXIT_SUCCESS)
}

fn print_glyph_summary(report: &GlyphReport, show_skipped: bool) {
    println!("Number of fully-qualified emojis: {}", report.rendered);
    if show_skipped {
        for skip in &report.skipped {
            println!("SKIPPED: {} \t {} \t {}", skip.status, skip.name, skip.scalar);
        }
    }
    if report.unmatched > 0 {
        eprintln!(
            "Warning: {} lines did not match the record grammar",
            report.unmatched
        );
    }
    if report.overwritten > 0 {
        eprintln!(
            "Warning: {} glyphs overwrote an earlier file with the same name",
            report.overwritten
        );
    }
    println!("Images saved to {}", report.out_dir.display());
    println!("Done.");
}

/// Execute the parse command
pub fn run_parse(registry_path: &Path, json: bool, show_skipped: bool) -> ExitCode {
    let text = match fs::read_to_string(registry_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!(
                "Error: Cannot open input file '{}': {}",
                registry_path.display(),
                e
            );
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let outcome = match registry::parse_registry(&text) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if json {
        match serde_json::to_string_pretty(&outcome) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    for record in &outcome.records {
        println!("{}\t{}\t{}", record.scalar, record.name, record.status);
    }
    println!("Number of fully-qualified emojis: {}", outcome.records.len());
    if show_skipped {
        for skip in &outcome.skipped {
            println!("SKIPPED: {} \t {} \t {}", skip.status, skip.name, skip.scalar);
        }
    }
    if outcome.unmatched > 0 {
        eprintln!(
            "Warning: {} lines did not match the record grammar",
            outcome.unmatched
        );
    }

    ExitCode::from(EXIT_SUCCESS)
}
