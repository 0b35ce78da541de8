//! Configuration loading and discovery for `glyphsnap.toml`
//!
//! Provides the file schema, discovery by walking up from the working
//! directory, and the merge of CLI arguments over file values over
//! built-in defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file name searched for in the working directory and its parents
const CONFIG_FILE_NAME: &str = "glyphsnap.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse glyphsnap.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Merged settings are unusable
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// On-disk configuration as written in `glyphsnap.toml`.
///
/// Every field is optional; anything left out falls back to the built-in
/// defaults after CLI arguments have been applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    /// Settings for the `compare` subcommand
    #[serde(default)]
    pub compare: CompareSection,
    /// Settings for the `glyphs` subcommand
    #[serde(default)]
    pub glyphs: GlyphsSection,
}

/// `[compare]` section of the config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompareSection {
    /// Root directory that preview runs are recorded under
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_root: Option<PathBuf>,
}

/// `[glyphs]` section of the config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlyphsSection {
    /// Root directory that glyph runs are recorded under
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_root: Option<PathBuf>,
    /// Font file used for rendering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<PathBuf>,
    /// Square canvas side in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas: Option<u32>,
    /// Font size in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
}

fn default_compare_root() -> PathBuf {
    env::temp_dir().join("SnapshotComparison")
}

fn default_glyph_root() -> PathBuf {
    env::temp_dir().join("EmojisOverTime")
}

fn default_canvas() -> u32 {
    164
}

fn default_font_size() -> f32 {
    140.0
}

/// Find glyphsnap.toml by walking up from the current working directory.
///
/// # Returns
/// - `Some(path)` if a glyphsnap.toml file is found
/// - `None` if no config file is found
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find glyphsnap.toml by walking up from a specific directory.
///
/// This is the internal implementation that allows specifying the start
/// directory, useful for testing.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        // Move to parent directory
        if !current.pop() {
            // Reached root, no config found
            return None;
        }
    }
}

/// Load configuration from a glyphsnap.toml file.
///
/// If a path is provided, loads from that file and a missing file is an
/// error. Otherwise, uses `find_config()` to locate the config file, and
/// returns the default configuration when none is found.
pub fn load_config(path: Option<&Path>) -> Result<FileConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(FileConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: FileConfig = toml::from_str(&contents)?;
    Ok(config)
}

/// Resolved settings for a comparison run.
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// Directory holding the recorded snapshots
    pub baseline: PathBuf,
    /// Directory holding the snapshots under review
    pub candidate: PathBuf,
    /// Root directory previews are recorded under
    pub out_root: PathBuf,
}

impl CompareConfig {
    /// Merge CLI arguments over file values over defaults.
    pub fn new(
        baseline: PathBuf,
        candidate: PathBuf,
        cli_out_root: Option<PathBuf>,
        file: &FileConfig,
    ) -> Self {
        let out_root = cli_out_root
            .or_else(|| file.compare.out_root.clone())
            .unwrap_or_else(default_compare_root);
        CompareConfig {
            baseline,
            candidate,
            out_root,
        }
    }

    /// Directory this comparison records into, named after both versions.
    ///
    /// The labels are the final path components of the input directories,
    /// so comparing `snapshots/13.2` against `snapshots/13.3` records into
    /// `13.2->13.3`.
    pub fn out_dir(&self) -> PathBuf {
        let name = format!(
            "{}->{}",
            version_label(&self.baseline),
            version_label(&self.candidate)
        );
        self.out_root.join(name)
    }
}

fn version_label(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    }
}

/// CLI arguments that can override glyph config values
#[derive(Debug, Default, Clone)]
pub struct GlyphOverrides {
    /// Override output root directory
    pub out_root: Option<PathBuf>,
    /// Override font file
    pub font: Option<PathBuf>,
    /// Override canvas side
    pub canvas: Option<u32>,
    /// Override font size
    pub font_size: Option<f32>,
}

/// Resolved settings for a glyph rendering run.
#[derive(Debug, Clone)]
pub struct GlyphConfig {
    /// Emoji registry file to parse
    pub registry: PathBuf,
    /// Platform label naming the output directory
    pub platform: String,
    /// Root directory glyph runs are recorded under
    pub out_root: PathBuf,
    /// Font file, if one was chosen explicitly
    pub font: Option<PathBuf>,
    /// Square canvas side in pixels
    pub canvas: u32,
    /// Font size in pixels
    pub font_size: f32,
}

impl GlyphConfig {
    /// Merge CLI arguments over file values over defaults.
    pub fn new(
        registry: PathBuf,
        platform: String,
        overrides: GlyphOverrides,
        file: &FileConfig,
    ) -> Self {
        GlyphConfig {
            registry,
            platform,
            out_root: overrides
                .out_root
                .or_else(|| file.glyphs.out_root.clone())
                .unwrap_or_else(default_glyph_root),
            font: overrides.font.or_else(|| file.glyphs.font.clone()),
            canvas: overrides
                .canvas
                .or(file.glyphs.canvas)
                .unwrap_or_else(default_canvas),
            font_size: overrides
                .font_size
                .or(file.glyphs.font_size)
                .unwrap_or_else(default_font_size),
        }
    }

    /// Check the merged settings before a run starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas == 0 {
            return Err(ConfigError::Invalid(
                "canvas must be at least 1 pixel".to_string(),
            ));
        }
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "font size must be a positive number, got {}",
                self.font_size
            )));
        }
        Ok(())
    }

    /// Directory this run records into, named after the platform.
    pub fn out_dir(&self) -> PathBuf {
        self.out_root.join(&self.platform)
    }
}
