//! Pixel-level image differencing and preview composition
//!
//! `difference_image` produces a per-channel absolute difference of two
//! equally sized RGBA images; `compose_preview` lays baseline, candidate,
//! and difference out as three padded tiles on one transparent canvas.

use image::{Rgba, RgbaImage};
use thiserror::Error;

/// Transparent pixel used for canvas backgrounds
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Error type for image differencing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    /// Input images do not share the same dimensions.
    ///
    /// Silently rescaling one side would hide real divergence, so this is
    /// fatal.
    #[error(
        "image dimensions differ: {baseline_width}x{baseline_height} vs {candidate_width}x{candidate_height}"
    )]
    DimensionMismatch {
        baseline_width: u32,
        baseline_height: u32,
        candidate_width: u32,
        candidate_height: u32,
    },
}

fn ensure_same_dimensions(baseline: &RgbaImage, other: &RgbaImage) -> Result<(), DiffError> {
    if baseline.dimensions() != other.dimensions() {
        let (baseline_width, baseline_height) = baseline.dimensions();
        let (candidate_width, candidate_height) = other.dimensions();
        return Err(DiffError::DimensionMismatch {
            baseline_width,
            baseline_height,
            candidate_width,
            candidate_height,
        });
    }
    Ok(())
}

/// Compute the per-pixel absolute difference of two images.
///
/// Every channel is diffed independently, alpha included, so identical
/// inputs produce an image that is all-zero in every channel.
pub fn difference_image(
    baseline: &RgbaImage,
    candidate: &RgbaImage,
) -> Result<RgbaImage, DiffError> {
    ensure_same_dimensions(baseline, candidate)?;

    let (width, height) = baseline.dimensions();
    let mut diff = RgbaImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let a = baseline.get_pixel(x, y);
            let b = candidate.get_pixel(x, y);
            diff.put_pixel(
                x,
                y,
                Rgba([
                    a[0].abs_diff(b[0]),
                    a[1].abs_diff(b[1]),
                    a[2].abs_diff(b[2]),
                    a[3].abs_diff(b[3]),
                ]),
            );
        }
    }

    Ok(diff)
}

/// Compose baseline, candidate, and difference into one preview image.
///
/// Each tile gets padding of one tenth of its dimension (integer division)
/// on every side, so a W×H trio composes to a `3·(W + 2·⌊W/10⌋)` by
/// `H + 2·⌊H/10⌋` canvas. Tiles are copied 1:1, never resampled, left to
/// right in argument order; everything else stays transparent.
pub fn compose_preview(
    baseline: &RgbaImage,
    candidate: &RgbaImage,
    diff: &RgbaImage,
) -> Result<RgbaImage, DiffError> {
    ensure_same_dimensions(baseline, candidate)?;
    ensure_same_dimensions(baseline, diff)?;

    let (width, height) = baseline.dimensions();
    let pad_x = width / 10;
    let pad_y = height / 10;
    let cell_width = width + 2 * pad_x;

    let mut canvas = RgbaImage::from_pixel(3 * cell_width, height + 2 * pad_y, TRANSPARENT);

    for (index, tile) in [baseline, candidate, diff].into_iter().enumerate() {
        blit_tile(&mut canvas, tile, index as u32 * cell_width + pad_x, pad_y);
    }

    Ok(canvas)
}

/// Copy a tile onto the canvas at the given offset, pixel for pixel.
fn blit_tile(canvas: &mut RgbaImage, tile: &RgbaImage, offset_x: u32, offset_y: u32) {
    for y in 0..tile.height() {
        for x in 0..tile.width() {
            canvas.put_pixel(offset_x + x, offset_y + y, *tile.get_pixel(x, y));
        }
    }
}
