//! Whole-image comparison.
//!
//! The scan runs over the inclusive ranges `0..=width` and `0..=height`. The
//! trailing column and row lie outside the buffers and are skipped: they are
//! neither classified, counted nor painted, so only in-range pixels affect
//! the result.

use rayon::prelude::*;
use tracing::debug;

use crate::buffer::CHANNELS;
use crate::{CompareError, CompareOptions, PixelBuffer, classify};

pub const PASS_COLOR: [u8; 4] = [0, 255, 0, 255];
pub const FAIL_COLOR: [u8; 4] = [255, 0, 0, 255];

#[derive(Debug, Clone, PartialEq)]
pub struct CompareResult {
    /// Number of pixels that failed classification.
    pub pixel_difference: u64,
    /// `pixel_difference / (width * height)`, a fraction in `0.0..=1.0`.
    pub percentage_difference: f64,
    /// `pixel_difference <= max_difference`.
    pub passed: bool,
    /// Green/red verdict overlay, when requested.
    pub composition: Option<PixelBuffer>,
}

/// Compare `left` (reference) against `right` (candidate).
///
/// Rows are classified in parallel; each row counts its own failures and
/// writes only its own slice of the composition.
///
/// Note that `passed` compares the raw failure count against
/// `max_difference`, so the default of `0.01` only passes pixel-identical
/// results.
pub fn compare(
    left: &PixelBuffer,
    right: &PixelBuffer,
    options: CompareOptions,
) -> Result<CompareResult, CompareError> {
    if left.dimensions() != right.dimensions() {
        return Err(CompareError::DimensionMismatch {
            left_w: left.width(),
            left_h: left.height(),
            right_w: right.width(),
            right_h: right.height(),
        });
    }
    options.validate()?;

    let (width, height) = left.dimensions();
    debug!(
        width,
        height,
        max_delta = options.max_delta,
        max_offset = options.max_offset,
        composition = options.render_composition,
        "comparing"
    );

    if left.is_empty() {
        return Ok(CompareResult {
            pixel_difference: 0,
            percentage_difference: 0.0,
            passed: true,
            composition: options
                .render_composition
                .then(|| PixelBuffer::filled(width, height, FAIL_COLOR)),
        });
    }

    let mut composition = options
        .render_composition
        .then(|| PixelBuffer::filled(width, height, FAIL_COLOR).into_bytes());

    let pixel_difference: u64 = match composition.as_mut() {
        Some(bytes) => bytes
            .par_chunks_mut(width as usize * CHANNELS)
            .enumerate()
            .map(|(y, row)| scan_row(left, right, y as u32, &options, Some(row)))
            .sum(),
        None => (0..=height)
            .into_par_iter()
            .filter(|&y| y < height)
            .map(|y| scan_row(left, right, y, &options, None))
            .sum(),
    };

    let percentage_difference = pixel_difference as f64 / left.pixel_count() as f64;
    let passed = pixel_difference as f64 <= options.max_difference;

    debug!(pixel_difference, percentage_difference, passed, "compared");

    Ok(CompareResult {
        pixel_difference,
        percentage_difference,
        passed,
        composition: composition.map(|bytes| PixelBuffer::from_parts(width, height, bytes)),
    })
}

/// Classify row `y`, painting verdicts into `row` when given. Returns the
/// number of failing pixels.
fn scan_row(
    left: &PixelBuffer,
    right: &PixelBuffer,
    y: u32,
    options: &CompareOptions,
    mut row: Option<&mut [u8]>,
) -> u64 {
    let width = left.width();
    let mut failures = 0;
    for x in (0..=width).filter(|&x| x < width) {
        let passes = classify(left, right, x, y, options);
        if !passes {
            failures += 1;
        }
        if let Some(row) = row.as_deref_mut() {
            let i = x as usize * CHANNELS;
            let color = if passes { PASS_COLOR } else { FAIL_COLOR };
            row[i..i + CHANNELS].copy_from_slice(&color);
        }
    }
    failures
}
