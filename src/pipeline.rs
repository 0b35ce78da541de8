//! Pipeline orchestration for the two recording runs.
//!
//! `run_comparison` diffs two snapshot directories and records a three-panel
//! preview per changed file. `run_glyph_batch` parses an emoji registry and
//! records one rendered PNG per fully-qualified sequence, optionally handing
//! each frame to a sink as it completes.

use crate::compare::{self, CompareError};
use crate::config::{CompareConfig, GlyphConfig};
use crate::diff::{self, DiffError};
use crate::glyph::{GlyphError, GlyphRasterizer};
use crate::output::{self, OutputError};
use crate::registry::{self, ParseError, SkippedRecord};
use image::RgbaImage;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

/// Rendered frames queued between the render worker and the sink
const FRAME_CHANNEL_CAPACITY: usize = 8;

/// Error during pipeline execution.
#[derive(Debug)]
pub enum PipelineError {
    /// Snapshot listing or byte comparison error
    Compare(CompareError),
    /// Registry parsing error
    Parse(ParseError),
    /// Image differencing error for a named snapshot
    Diff { name: String, source: DiffError },
    /// Glyph rendering error
    Glyph(GlyphError),
    /// Output recording error
    Output(OutputError),
    /// A snapshot could not be decoded as an image
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },
    /// The registry file could not be read
    RegistryRead { path: PathBuf, source: io::Error },
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Compare(e) => write!(f, "{}", e),
            PipelineError::Parse(e) => write!(f, "{}", e),
            PipelineError::Diff { name, source } => write!(f, "{}: {}", name, source),
            PipelineError::Glyph(e) => write!(f, "{}", e),
            PipelineError::Output(e) => write!(f, "{}", e),
            PipelineError::ImageLoad { path, source } => {
                write!(f, "failed to load {}: {}", path.display(), source)
            }
            PipelineError::RegistryRead { path, source } => {
                write!(f, "cannot read registry {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Compare(e) => Some(e),
            PipelineError::Parse(e) => Some(e),
            PipelineError::Diff { source, .. } => Some(source),
            PipelineError::Glyph(e) => Some(e),
            PipelineError::Output(e) => Some(e),
            PipelineError::ImageLoad { source, .. } => Some(source),
            PipelineError::RegistryRead { source, .. } => Some(source),
        }
    }
}

impl From<CompareError> for PipelineError {
    fn from(e: CompareError) -> Self {
        PipelineError::Compare(e)
    }
}

impl From<ParseError> for PipelineError {
    fn from(e: ParseError) -> Self {
        PipelineError::Parse(e)
    }
}

impl From<GlyphError> for PipelineError {
    fn from(e: GlyphError) -> Self {
        PipelineError::Glyph(e)
    }
}

impl From<OutputError> for PipelineError {
    fn from(e: OutputError) -> Self {
        PipelineError::Output(e)
    }
}

/// Summary of a comparison run.
#[derive(Debug, Clone)]
pub struct CompareReport {
    /// Snapshots present in the baseline directory
    pub compared: usize,
    /// Snapshots whose bytes differ from their counterpart
    pub differing: usize,
    /// Directory the previews were recorded into
    pub out_dir: PathBuf,
}

/// Summary of a glyph rendering run.
#[derive(Debug)]
pub struct GlyphReport {
    /// Fully-qualified sequences rendered to disk
    pub rendered: usize,
    /// Records recognized but not rendered
    pub skipped: Vec<SkippedRecord>,
    /// Lines that did not match the record grammar
    pub unmatched: usize,
    /// Renders that replaced an earlier file with the same name
    pub overwritten: usize,
    /// Directory the renders were recorded into
    pub out_dir: PathBuf,
}

/// A rendered glyph along with its position in the run.
#[derive(Debug)]
pub struct GlyphFrame {
    /// Zero-based position in the run
    pub index: usize,
    /// Total renders in the run
    pub total: usize,
    /// Sanitized sequence name, also the file stem on disk
    pub name: String,
    /// Rendered canvas
    pub image: RgbaImage,
}

/// Callback receiving each rendered frame in run order.
pub type FrameSink<'a> = Box<dyn FnMut(GlyphFrame) + Send + 'a>;

/// Compare two snapshot directories and record previews for the changes.
///
/// Every preview is composed in memory before the output directory is
/// claimed, so a run that fails on a bad snapshot leaves nothing behind.
pub fn run_comparison(config: &CompareConfig) -> Result<CompareReport, PipelineError> {
    let compared = compare::snapshot_names(&config.baseline)?.len();
    let entries = compare::different_files(&config.baseline, &config.candidate)?;

    let mut previews: Vec<(String, RgbaImage)> = Vec::with_capacity(entries.len());
    for entry in &entries {
        let baseline = load_rgba(&entry.baseline)?;
        let candidate = load_rgba(&entry.candidate)?;
        let difference = diff::difference_image(&baseline, &candidate)
            .map_err(|source| PipelineError::Diff { name: entry.name.clone(), source })?;
        let preview = diff::compose_preview(&baseline, &candidate, &difference)
            .map_err(|source| PipelineError::Diff { name: entry.name.clone(), source })?;
        previews.push((entry.name.clone(), preview));
    }

    let out_dir = config.out_dir();
    output::claim_dir(&out_dir)?;

    for (name, preview) in &previews {
        if let Err(e) = output::save_png(preview, &out_dir.join(name)) {
            output::discard_dir(&out_dir);
            return Err(e.into());
        }
    }

    Ok(CompareReport {
        compared,
        differing: previews.len(),
        out_dir,
    })
}

fn load_rgba(path: &Path) -> Result<RgbaImage, PipelineError> {
    let image = image::open(path).map_err(|source| PipelineError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgba8())
}

/// Parse the registry and record one render per fully-qualified sequence.
///
/// Rendering and file writing run on a worker thread. When a sink is given,
/// each frame is saved to disk first and then handed to the sink on a
/// consumer thread, in run order over a bounded channel. A failed run
/// discards its output directory.
pub fn run_glyph_batch(
    config: &GlyphConfig,
    rasterizer: &dyn GlyphRasterizer,
    mut sink: Option<FrameSink<'_>>,
) -> Result<GlyphReport, PipelineError> {
    let text =
        std::fs::read_to_string(&config.registry).map_err(|source| PipelineError::RegistryRead {
            path: config.registry.clone(),
            source,
        })?;
    let outcome = registry::parse_registry(&text)?;

    let out_dir = config.out_dir();
    output::claim_dir(&out_dir)?;

    let total = outcome.records.len();

    // Collisions are knowable up front: a repeated name means the later
    // render lands on top of the earlier file.
    let mut seen: HashSet<&str> = HashSet::with_capacity(total);
    let mut overwritten = 0usize;
    for record in &outcome.records {
        if !seen.insert(record.name.as_str()) {
            overwritten += 1;
        }
    }

    let records = &outcome.records;
    let dir = &out_dir;

    let run = std::thread::scope(|s| -> Result<(), PipelineError> {
        match sink.as_mut() {
            Some(callback) => {
                let (tx, rx) = mpsc::sync_channel::<GlyphFrame>(FRAME_CHANNEL_CAPACITY);
                let worker = s.spawn(move || -> Result<(), PipelineError> {
                    for (index, record) in records.iter().enumerate() {
                        let image = rasterizer.rasterize(&record.sequence)?;
                        output::save_png(&image, &dir.join(format!("{}.png", record.name)))?;
                        let frame = GlyphFrame {
                            index,
                            total,
                            name: record.name.clone(),
                            image,
                        };
                        // A sink that stops listening must not stop the run
                        let _ = tx.send(frame);
                    }
                    Ok(())
                });
                let consumer = s.spawn(move || {
                    while let Ok(frame) = rx.recv() {
                        callback(frame);
                    }
                });

                let outcome = match worker.join() {
                    Ok(result) => result,
                    Err(panic) => std::panic::resume_unwind(panic),
                };
                if let Err(panic) = consumer.join() {
                    std::panic::resume_unwind(panic);
                }
                outcome
            }
            None => {
                for record in records.iter() {
                    let image = rasterizer.rasterize(&record.sequence)?;
                    output::save_png(&image, &dir.join(format!("{}.png", record.name)))?;
                }
                Ok(())
            }
        }
    });

    if let Err(e) = run {
        output::discard_dir(&out_dir);
        return Err(e);
    }

    Ok(GlyphReport {
        rendered: total,
        skipped: outcome.skipped,
        unmatched: outcome.unmatched,
        overwritten,
        out_dir,
    })
}
