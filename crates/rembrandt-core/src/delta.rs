use crate::Color;

/// Distance between two colors.
///
/// Squared channel differences (alpha included, all weighted equally) are
/// summed in normalized space, scaled by 255 and square-rooted. This is not a
/// perceptual metric; `CompareOptions::max_delta` is calibrated against it.
/// Identical colors give `0.0`, opaque white vs opaque black `sqrt(765)`.
#[inline]
pub fn color_delta(a: Color, b: Color) -> f64 {
    let dr = a.r - b.r;
    let dg = a.g - b.g;
    let db = a.b - b.b;
    let da = a.a - b.a;
    ((dr * dr + dg * dg + db * db + da * da) * 255.0).sqrt()
}
