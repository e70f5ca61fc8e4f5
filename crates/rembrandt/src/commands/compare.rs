use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use rembrandt_core::CompareOptions;
use tracing::{debug, info};

use crate::compare::diff;
use crate::imaging;
use crate::report::json::CompareReport;
use crate::report::terminal;

/// `rembrandt compare`: diff one image pair.
/// Returns exit code: 0 = passed, 1 = failed.
pub fn compare(
    reference: &Path,
    candidate: &Path,
    output: Option<&Path>,
    json: bool,
    options: CompareOptions,
) -> Result<i32> {
    let start = Instant::now();
    let left = imaging::open(reference)?;
    let right = imaging::open(candidate)?;
    debug!(
        reference = %reference.display(),
        candidate = %candidate.display(),
        width = left.width(),
        height = left.height(),
        "images loaded"
    );

    let options = options.with_composition(output.is_some());
    let outcome = diff::compare_pixels(&left, &right, options)?;

    let written = match (output, outcome.difference_image()) {
        (Some(path), Some(image)) => {
            imaging::save_png(&image, path)?;
            info!(path = %path.display(), "composition saved");
            Some(path)
        }
        _ => None,
    };

    if json {
        println!(
            "{}",
            CompareReport::new(reference, candidate, &outcome, written).to_json()?
        );
    } else {
        terminal::print_verdict(&outcome, written, start.elapsed());
    }

    Ok(if outcome.passed { 0 } else { 1 })
}
