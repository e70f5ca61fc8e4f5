use std::borrow::Cow;

use anyhow::{Context, Result};
use rembrandt_core::compare::FAIL_COLOR;
use rembrandt_core::{CompareError, CompareOptions, PixelBuffer};

use crate::imaging;

pub struct DiffOutcome {
    pub passed: bool,
    pub pixel_difference: u64,
    pub percentage_difference: f64,
    pub total_pixels: u64,
    pub composition: Option<PixelBuffer>,
    /// `Some((ref_w, ref_h, cur_w, cur_h))` when images have different dimensions.
    pub dimension_mismatch: Option<(u32, u32, u32, u32)>,
}

impl DiffOutcome {
    /// Image to show for this outcome: the engine's composition, or for a
    /// dimension change the candidate's size painted in the failure color.
    pub fn difference_image(&self) -> Option<Cow<'_, PixelBuffer>> {
        match (&self.composition, self.dimension_mismatch) {
            (Some(composition), _) => Some(Cow::Borrowed(composition)),
            (None, Some((_, _, cw, ch))) => {
                Some(Cow::Owned(PixelBuffer::filled(cw, ch, FAIL_COLOR)))
            }
            (None, None) => None,
        }
    }
}

/// Run the engine on two decoded buffers.
///
/// A dimension mismatch is reported as a failed outcome rather than an error
/// so callers can show it next to regular differences.
pub fn compare_pixels(
    reference: &PixelBuffer,
    current: &PixelBuffer,
    options: CompareOptions,
) -> Result<DiffOutcome> {
    match rembrandt_core::compare(reference, current, options) {
        Ok(result) => Ok(DiffOutcome {
            passed: result.passed,
            pixel_difference: result.pixel_difference,
            percentage_difference: result.percentage_difference,
            total_pixels: reference.pixel_count(),
            composition: result.composition,
            dimension_mismatch: None,
        }),
        Err(CompareError::DimensionMismatch {
            left_w,
            left_h,
            right_w,
            right_h,
        }) => Ok(DiffOutcome {
            passed: false,
            pixel_difference: 0,
            percentage_difference: 0.0,
            total_pixels: reference.pixel_count(),
            composition: None,
            dimension_mismatch: Some((left_w, left_h, right_w, right_h)),
        }),
        Err(e) => Err(anyhow::Error::from(e).context("Comparison failed")),
    }
}

/// Two-phase comparison of encoded images:
/// 1. Byte-identical check (memcmp)
/// 2. Decode and run the pixel engine
///
/// Runs synchronously; call via `spawn_blocking`.
pub fn compare_png(
    reference_png: &[u8],
    current_png: &[u8],
    options: CompareOptions,
) -> Result<DiffOutcome> {
    // Phase 1: byte-identical
    if reference_png == current_png {
        return Ok(DiffOutcome {
            passed: true,
            pixel_difference: 0,
            percentage_difference: 0.0,
            total_pixels: 0,
            composition: None,
            dimension_mismatch: None,
        });
    }

    // Phase 2: decode and diff
    let reference = imaging::decode(reference_png).context("Failed to decode reference PNG")?;
    let current = imaging::decode(current_png).context("Failed to decode current PNG")?;
    compare_pixels(&reference, &current, options)
}
