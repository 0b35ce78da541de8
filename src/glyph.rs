//! Glyph rendering onto fixed-size transparent canvases

use ab_glyph::{Font, FontVec, Glyph, GlyphId, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Candidate font files probed when no font is given explicitly.
///
/// Single-face files only; collections (.ttc) are skipped so every entry
/// loads the same way.
const FONT_SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    r"C:\Windows\Fonts\arial.ttf",
];

/// Error type for glyph rendering failures
#[derive(Debug, Error)]
pub enum GlyphError {
    /// Font file could not be read
    #[error("failed to read font {}: {}", .path.display(), .source)]
    FontRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Font file is not parseable font data
    #[error("'{}' is not a usable font file", .0.display())]
    InvalidFont(PathBuf),
    /// No explicit font was given and no known system font exists
    #[error("no usable font found; pass one with --font")]
    NoFontAvailable,
}

/// Renders a text sequence as an image.
///
/// The batch pipeline only depends on this trait, so rendering backends can
/// be swapped out in tests.
pub trait GlyphRasterizer: Send + Sync {
    /// Render `text` onto a fresh canvas.
    fn rasterize(&self, text: &str) -> Result<RgbaImage, GlyphError>;
}

/// Font-backed rasterizer producing square transparent canvases.
///
/// Glyphs are laid out on a single baseline with per-pair kerning, then the
/// whole run is centered on the canvas. Coverage becomes the alpha channel
/// of black ink, so antialiased edges survive compositing.
#[derive(Debug)]
pub struct FontRasterizer {
    font: FontVec,
    canvas: u32,
    px_size: f32,
}

impl FontRasterizer {
    /// Load a rasterizer from a font file.
    pub fn from_file(path: &Path, canvas: u32, px_size: f32) -> Result<Self, GlyphError> {
        let data = std::fs::read(path).map_err(|source| GlyphError::FontRead {
            path: path.to_path_buf(),
            source,
        })?;
        let font = FontVec::try_from_vec(data)
            .map_err(|_| GlyphError::InvalidFont(path.to_path_buf()))?;
        Ok(FontRasterizer {
            font,
            canvas,
            px_size,
        })
    }

    /// Load the explicit font if one was given, otherwise probe the system
    /// font locations.
    ///
    /// An explicit path that fails to load is an error; probing is only a
    /// fallback for the unspecified case.
    pub fn discover(
        explicit: Option<&Path>,
        canvas: u32,
        px_size: f32,
    ) -> Result<Self, GlyphError> {
        if let Some(path) = explicit {
            return Self::from_file(path, canvas, px_size);
        }
        for candidate in FONT_SEARCH_PATHS {
            let path = Path::new(candidate);
            if !path.is_file() {
                continue;
            }
            if let Ok(rasterizer) = Self::from_file(path, canvas, px_size) {
                return Ok(rasterizer);
            }
        }
        Err(GlyphError::NoFontAvailable)
    }
}

impl GlyphRasterizer for FontRasterizer {
    fn rasterize(&self, text: &str) -> Result<RgbaImage, GlyphError> {
        let side = self.canvas;
        let mut canvas = RgbaImage::from_pixel(side, side, Rgba([0, 0, 0, 0]));

        let scaled = self.font.as_scaled(PxScale::from(self.px_size));

        // Lay the run out from x=0, then shift it into place once its
        // width is known.
        let mut glyphs: Vec<Glyph> = Vec::new();
        let mut caret = 0.0f32;
        let mut previous: Option<GlyphId> = None;
        for c in text.chars() {
            let mut glyph = scaled.scaled_glyph(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, glyph.id);
            }
            glyph.position = ab_glyph::point(caret, 0.0);
            caret += scaled.h_advance(glyph.id);
            previous = Some(glyph.id);
            glyphs.push(glyph);
        }
        let run_width = caret;

        let origin_x = (side as f32 - run_width) / 2.0;
        let origin_y = (side as f32 - scaled.height()) / 2.0 + scaled.ascent();

        for mut glyph in glyphs {
            glyph.position.x += origin_x;
            glyph.position.y += origin_y;
            if let Some(outlined) = scaled.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|x, y, coverage| {
                    let px = bounds.min.x as i32 + x as i32;
                    let py = bounds.min.y as i32 + y as i32;
                    if px < 0 || py < 0 || px as u32 >= side || py as u32 >= side {
                        return;
                    }
                    let level = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                    let pixel = canvas.get_pixel_mut(px as u32, py as u32);
                    // Overlapping outlines keep the strongest coverage
                    if level > pixel[3] {
                        *pixel = Rgba([0, 0, 0, level]);
                    }
                });
            }
        }

        Ok(canvas)
    }
}
