//! Per-pixel pass/fail decision.

use crate::{CompareOptions, PixelBuffer, color_delta};

/// Decide whether pixel `(x, y)` passes.
///
/// A pixel passes outright when its color delta between `left` and `right` is
/// below `max_delta`. Otherwise, with `max_offset > 0`, the square neighborhood
/// of that radius (clamped to the buffer) is searched for evidence that the
/// content merely moved: a neighbor whose `left` color is clearly different
/// from the origin, while its `right` color differs from the origin by about
/// the same amount.
///
/// Neighbors sharing a row or a column with `(x, y)` are never considered,
/// so a 1-pixel-wide or 1-pixel-tall neighborhood always fails.
///
/// Both buffers must have the same dimensions and `(x, y)` must be in range.
pub fn classify(
    left: &PixelBuffer,
    right: &PixelBuffer,
    x: u32,
    y: u32,
    options: &CompareOptions,
) -> bool {
    let origin = left.color_at(x, y);
    let delta = color_delta(origin, right.color_at(x, y));
    if delta < options.max_delta {
        return true;
    }

    if options.max_offset == 0 {
        return false;
    }

    let offset = options.max_offset;
    let (width, height) = left.dimensions();
    let x_range = x.saturating_sub(offset)..=x.saturating_add(offset).min(width - 1);
    let y_range = y.saturating_sub(offset)..=y.saturating_add(offset).min(height - 1);

    for nx in x_range {
        if nx == x {
            continue;
        }
        for ny in y_range.clone() {
            if ny == y {
                continue;
            }
            let delta_left = color_delta(origin, left.color_at(nx, ny));
            if delta_left <= options.max_delta {
                continue;
            }
            let delta_right = color_delta(origin, right.color_at(nx, ny));
            if (delta_right - delta_left).abs() < options.max_delta {
                return true;
            }
        }
    }

    false
}
