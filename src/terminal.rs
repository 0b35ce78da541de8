//! Terminal rendering utilities for glyph preview display
//!
//! Provides ANSI escape sequence generation for displaying rendered glyphs
//! with true-color half blocks in terminal emulators that support 24-bit
//! color.

use crate::pipeline::GlyphFrame;
use image::imageops::FilterType;
use image::{Rgba, RgbaImage};

/// ANSI escape sequence to reset all formatting
pub const ANSI_RESET: &str = "\x1b[0m";

/// Largest preview side in pixels.
///
/// Half blocks pack two pixel rows per text line, so 48 pixels stay within
/// two dozen terminal lines.
const PREVIEW_MAX_DIM: u32 = 48;

/// Shrink an image so neither side exceeds `max_dim`, keeping aspect ratio.
///
/// Uses bilinear filtering: the canvases are antialiased glyph renders, not
/// pixel art, so crisp-edge resampling would just add stair-stepping.
/// Images already small enough are returned unchanged.
pub fn fit_for_terminal(image: &RgbaImage, max_dim: u32) -> RgbaImage {
    let (width, height) = image.dimensions();
    let side = width.max(height);
    if side <= max_dim || side == 0 {
        return image.clone();
    }

    let new_width = (width * max_dim / side).max(1);
    let new_height = (height * max_dim / side).max(1);
    image::imageops::resize(image, new_width, new_height, FilterType::Triangle)
}

/// Render one glyph frame as a banner line followed by its ANSI art.
pub fn render_frame(frame: &GlyphFrame) -> String {
    let mut output = format!("[{}/{}] {}\n", frame.index + 1, frame.total, frame.name);
    output.push_str(&render_image_ansi(&fit_for_terminal(
        &frame.image,
        PREVIEW_MAX_DIM,
    )));
    output
}

/// Render an RGBA image to ANSI terminal output.
///
/// Each pixel is rendered as a "▀" (upper half block) character with
/// foreground and background colors set to display two rows of pixels
/// per line of text.
///
/// # Arguments
///
/// * `image` - The RGBA image to render
///
/// # Returns
///
/// A string with ANSI escape sequences for colored terminal display.
pub fn render_image_ansi(image: &RgbaImage) -> String {
    let width = image.width() as usize;
    let height = image.height() as usize;

    if width == 0 || height == 0 {
        return String::new();
    }

    let mut output = String::new();

    // Process two rows at a time using half-block characters
    for y in (0..height).step_by(2) {
        for x in 0..width {
            let top_pixel = *image.get_pixel(x as u32, y as u32);
            let bottom_pixel = if y + 1 < height {
                *image.get_pixel(x as u32, (y + 1) as u32)
            } else {
                Rgba([0, 0, 0, 0]) // Transparent for odd height images
            };

            // Use upper half block (▀) with foreground = top pixel, background = bottom pixel
            if top_pixel[3] == 0 && bottom_pixel[3] == 0 {
                // Both transparent - use dark gray
                output.push_str("\x1b[48;5;236m\x1b[38;5;236m▀");
            } else if top_pixel[3] == 0 {
                // Top transparent, bottom visible
                output.push_str(&format!(
                    "\x1b[48;2;{};{};{}m\x1b[38;5;236m▀",
                    bottom_pixel[0], bottom_pixel[1], bottom_pixel[2]
                ));
            } else if bottom_pixel[3] == 0 {
                // Top visible, bottom transparent
                output.push_str(&format!(
                    "\x1b[48;5;236m\x1b[38;2;{};{};{}m▀",
                    top_pixel[0], top_pixel[1], top_pixel[2]
                ));
            } else {
                // Both visible
                output.push_str(&format!(
                    "\x1b[48;2;{};{};{}m\x1b[38;2;{};{};{}m▀",
                    bottom_pixel[0], bottom_pixel[1], bottom_pixel[2],
                    top_pixel[0], top_pixel[1], top_pixel[2]
                ));
            }
        }
        output.push_str(ANSI_RESET);
        output.push('\n');
    }

    output
}
